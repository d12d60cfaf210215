mod types;

pub use types::{ErrorResponse, FactorResponse, PreprocessQuery, PreprocessResponse};

use actix_cors::Cors;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::http::StatusCode;
use actix_web::{
    dev::Server, get, post, web, App, HttpResponse, HttpServer, Responder, ResponseError,
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard};
use tracing::{error, info};
use uuid::Uuid;
use validator::Validate;

use crate::application::{PreprocessedTrialBalance, TrialBalancePreprocessor};
use crate::domain::anonymization::AnonymizationFactor;
use crate::domain::error::{AppError, Result};
use crate::infrastructure::config::AppConfig;

const MAX_LOG_ENTRIES: usize = 100;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub source: String,
    pub message: String,
}

pub struct HttpState {
    pub config: AppConfig,
    pub logs: Mutex<Vec<LogEntry>>,
}

impl HttpState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            logs: Mutex::new(Vec::new()),
        }
    }

    fn preprocessor(&self) -> TrialBalancePreprocessor {
        TrialBalancePreprocessor::new(self.config.processing.clone())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ParseError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            kind: self.kind().to_string(),
        })
    }
}

/// Validate the query and run the pipeline off the async executor
async fn run_preprocessing(
    data: &web::Data<HttpState>,
    query: PreprocessQuery,
    body: web::Bytes,
    run_id: Uuid,
) -> Result<PreprocessedTrialBalance> {
    query
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    add_log(
        &data.logs,
        "INFO",
        "Preprocess",
        &format!(
            "Run {}: {} ({} bytes, header_row={}, anonymize={})",
            run_id,
            query.file_name,
            body.len(),
            query.header_row,
            query.anonymize
        ),
    );
    info!(%run_id, file_name = %query.file_name, bytes = body.len(), "Preprocessing upload");

    let preprocessor = data.preprocessor();
    let options = query.run_options();
    let file_name = query.file_name;

    let outcome = web::block(move || preprocessor.preprocess(&file_name, &body, &options))
        .await
        .map_err(|e| AppError::Internal(format!("Preprocessing task failed: {}", e)))?;

    match outcome {
        Ok(result) => {
            add_log(
                &data.logs,
                "INFO",
                "Preprocess",
                &format!(
                    "Run {} complete: {} rows x {} columns in {} ms",
                    run_id, result.row_count, result.column_count, result.processing_time_ms
                ),
            );
            Ok(result)
        }
        Err(e) => {
            error!(%run_id, error = %e, "Preprocessing failed");
            add_log(
                &data.logs,
                "ERROR",
                "Preprocess",
                &format!("Run {} failed: {}", run_id, e),
            );
            Err(e)
        }
    }
}

#[post("/preprocess")]
async fn preprocess(
    data: web::Data<HttpState>,
    query: web::Query<PreprocessQuery>,
    body: web::Bytes,
) -> Result<HttpResponse> {
    let run_id = Uuid::new_v4();
    let result = run_preprocessing(&data, query.into_inner(), body, run_id).await?;
    let response = PreprocessResponse::new(
        run_id.to_string(),
        result,
        &data.config.processing.output_file_name,
    );
    Ok(HttpResponse::Ok().json(response))
}

#[post("/preprocess/csv")]
async fn preprocess_csv(
    data: web::Data<HttpState>,
    query: web::Query<PreprocessQuery>,
    body: web::Bytes,
) -> Result<HttpResponse> {
    let run_id = Uuid::new_v4();
    let result = run_preprocessing(&data, query.into_inner(), body, run_id).await?;

    let disposition = ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters: vec![DispositionParam::Filename(
            data.config.processing.output_file_name.clone(),
        )],
    };

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header(disposition)
        .body(result.csv))
}

/// Sample a factor for display before the run; pass it back as `factor`
#[get("/factor")]
async fn sample_factor(data: web::Data<HttpState>) -> impl Responder {
    let factor = AnonymizationFactor::sample(
        &mut rand::rng(),
        &data.config.processing.factor_range(),
    );
    HttpResponse::Ok().json(FactorResponse {
        factor: factor.value(),
        display: factor.to_string(),
    })
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

#[get("/logs")]
async fn get_logs(data: web::Data<HttpState>) -> impl Responder {
    let logs = lock_logs(&data.logs);
    HttpResponse::Ok().json(&*logs)
}

fn lock_logs(logs: &Mutex<Vec<LogEntry>>) -> MutexGuard<'_, Vec<LogEntry>> {
    logs.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub fn add_log_entry(
    logs: &Mutex<Vec<LogEntry>>,
    level: &str,
    source: &str,
    message: &str,
) -> LogEntry {
    let entry = LogEntry {
        time: Local::now().format("%H:%M:%S").to_string(),
        level: level.to_string(),
        source: source.to_string(),
        message: message.to_string(),
    };
    let mut logs = lock_logs(logs);
    logs.push(entry.clone());
    if logs.len() > MAX_LOG_ENTRIES {
        logs.remove(0);
    }
    entry
}

pub fn add_log(logs: &Mutex<Vec<LogEntry>>, level: &str, source: &str, message: &str) {
    add_log_entry(logs, level, source, message);
}

/// Register state, body limit, query error rendering and the `/api` routes
pub fn configure(cfg: &mut web::ServiceConfig, state: web::Data<HttpState>) {
    let limit = state.config.server.max_upload_bytes;
    let query_config = web::QueryConfig::default()
        .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into());

    cfg.app_data(state)
        .app_data(web::PayloadConfig::new(limit))
        .app_data(query_config)
        .service(
            web::scope("/api")
                .service(preprocess)
                .service(preprocess_csv)
                .service(sample_factor)
                .service(health)
                .service(get_logs),
        );
}

pub fn start_server(config: AppConfig) -> std::io::Result<Server> {
    let host = config.server.host.clone();
    let port = config.server.port;
    let state = web::Data::new(HttpState::new(config));

    add_log(
        &state.logs,
        "INFO",
        "HttpApi",
        &format!("Listening on {}:{}", host, port),
    );

    let server = HttpServer::new(move || {
        let cors = Cors::permissive(); // Allow all origins for local tool

        App::new()
            .wrap(cors)
            .configure(|cfg| configure(cfg, state.clone()))
    })
    .bind((host.as_str(), port))?
    .run();

    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;
    use crate::infrastructure::config::ServerConfig;

    const TB_CSV: &str = "Name,Val,Notes\nA,1,\n,2,\nB,,\n,4,\n";

    fn state_with(config: AppConfig) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(config))
    }

    macro_rules! app {
        ($state:expr) => {{
            let state = $state;
            test::init_service(App::new().configure(move |cfg| configure(cfg, state.clone())))
                .await
        }};
    }

    #[actix_web::test]
    async fn test_preprocess_returns_csv_and_prompt() {
        let app = app!(state_with(AppConfig::default()));
        let req = test::TestRequest::post()
            .uri("/api/preprocess?file_name=tb.csv")
            .set_payload(TB_CSV)
            .to_request();

        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["csv"], "Name,Val\nA,1\nA,2\nB,2\nB,4\n");
        assert_eq!(body["file_kind"], "csv");
        assert_eq!(body["row_count"], 4);
        assert_eq!(body["csv_file_name"], "clean_tb.csv");
        assert!(body["factor"].is_null());
        assert!(body["prompt"]
            .as_str()
            .unwrap()
            .ends_with("*** DATA INPUT ***\nName,Val\nA,1\nA,2\nB,2\nB,4\n"));
        assert_eq!(body["processed_preview"]["rows"][0][0], "A");
        assert_eq!(body["raw_preview"]["columns"][0]["name"], "0");
    }

    #[actix_web::test]
    async fn test_preprocess_with_explicit_factor() {
        let app = app!(state_with(AppConfig::default()));
        let req = test::TestRequest::post()
            .uri("/api/preprocess?file_name=tb.csv&anonymize=true&factor=2")
            .set_payload(TB_CSV)
            .to_request();

        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["factor"], 2.0);
        assert_eq!(body["factor_display"], "2.0000");
        assert_eq!(body["csv"], "Name,Val\nA,2\nA,4\nB,4\nB,8\n");
    }

    #[actix_web::test]
    async fn test_csv_download() {
        let app = app!(state_with(AppConfig::default()));
        let req = test::TestRequest::post()
            .uri("/api/preprocess/csv?file_name=tb.csv")
            .set_payload(TB_CSV)
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let content_type = resp.headers().get("content-type").unwrap().to_str().unwrap();
        assert!(content_type.starts_with("text/csv"));
        let disposition = resp
            .headers()
            .get("content-disposition")
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.contains("attachment"));
        assert!(disposition.contains("clean_tb.csv"));

        let body = test::read_body(resp).await;
        assert_eq!(body, "Name,Val\nA,1\nA,2\nB,2\nB,4\n");
    }

    #[actix_web::test]
    async fn test_parse_error_is_unprocessable() {
        let app = app!(state_with(AppConfig::default()));
        let req = test::TestRequest::post()
            .uri("/api/preprocess?file_name=tb.xlsx")
            .set_payload("not a workbook")
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["kind"], "parse");
        assert!(body["error"].as_str().unwrap().starts_with("Parse error:"));
    }

    #[actix_web::test]
    async fn test_validation_errors_are_bad_request() {
        let app = app!(state_with(AppConfig::default()));

        for uri in [
            "/api/preprocess?file_name=tb.txt",
            "/api/preprocess?file_name=",
            "/api/preprocess?file_name=tb.csv&anonymize=true&factor=-3",
        ] {
            let req = test::TestRequest::post()
                .uri(uri)
                .set_payload(TB_CSV)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", uri);
        }
    }

    #[actix_web::test]
    async fn test_malformed_query_is_json_validation_error() {
        let app = app!(state_with(AppConfig::default()));

        for uri in [
            "/api/preprocess?file_name=tb.csv&header_row=-1",
            "/api/preprocess?header_row=0",
            "/api/preprocess/csv?file_name=tb.csv&anonymize=maybe",
        ] {
            let req = test::TestRequest::post()
                .uri(uri)
                .set_payload(TB_CSV)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", uri);

            let content_type = resp.headers().get("content-type").unwrap().to_str().unwrap();
            assert!(content_type.starts_with("application/json"), "{}", uri);
            let body: ErrorResponse = test::read_body_json(resp).await;
            assert_eq!(body.kind, "validation");
            assert!(body.error.starts_with("Validation error:"), "{}", body.error);
        }
    }

    #[actix_web::test]
    async fn test_upload_limit() {
        let config = AppConfig {
            server: ServerConfig {
                max_upload_bytes: 8,
                ..Default::default()
            },
            ..Default::default()
        };
        let app = app!(state_with(config));
        let req = test::TestRequest::post()
            .uri("/api/preprocess?file_name=tb.csv")
            .set_payload(TB_CSV)
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[actix_web::test]
    async fn test_sample_factor_in_range() {
        let app = app!(state_with(AppConfig::default()));
        let req = test::TestRequest::get().uri("/api/factor").to_request();

        let body: FactorResponse = test::call_and_read_body_json(&app, req).await;
        assert!((1.1..=9.9).contains(&body.factor));
        assert_eq!(body.display, format!("{:.4}", body.factor));
    }

    #[actix_web::test]
    async fn test_health_and_logs() {
        let state = state_with(AppConfig::default());
        let app = app!(state.clone());

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "ok");

        let req = test::TestRequest::post()
            .uri("/api/preprocess?file_name=tb.csv")
            .set_payload(TB_CSV)
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::get().uri("/api/logs").to_request();
        let logs: Vec<LogEntry> = test::call_and_read_body_json(&app, req).await;
        assert!(logs.iter().any(|l| l.source == "Preprocess" && l.message.contains("complete")));
    }
}
