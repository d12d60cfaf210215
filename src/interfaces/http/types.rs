//! Request and response bodies for the HTTP API

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::{CleaningReport, PreprocessedTrialBalance, RunOptions};
use crate::domain::file_kind::FileKind;
use crate::domain::table::Table;

/// Query string of the preprocessing endpoints; the file bytes are the body
#[derive(Debug, Deserialize, Validate)]
pub struct PreprocessQuery {
    #[validate(length(min = 1, max = 255))]
    pub file_name: String,
    #[serde(default)]
    pub header_row: usize,
    #[serde(default)]
    pub anonymize: bool,
    #[serde(default)]
    pub factor: Option<f64>,
}

impl PreprocessQuery {
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            header_row: self.header_row,
            anonymize: self.anonymize,
            factor: self.factor,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PreprocessResponse {
    pub run_id: String,
    pub file_name: String,
    pub file_kind: FileKind,
    pub header_row: usize,
    pub factor: Option<f64>,
    /// Factor as shown to the user, four decimals
    pub factor_display: Option<String>,
    pub raw_preview: Table,
    pub processed_preview: Table,
    pub row_count: usize,
    pub column_count: usize,
    pub cleaning: CleaningReport,
    pub csv: String,
    pub csv_file_name: String,
    pub prompt: String,
    pub prompt_tokens: usize,
    pub processing_time_ms: u64,
}

impl PreprocessResponse {
    pub fn new(run_id: String, result: PreprocessedTrialBalance, csv_file_name: &str) -> Self {
        Self {
            run_id,
            file_name: result.file_name,
            file_kind: result.file_kind,
            header_row: result.header_row,
            factor: result.factor.map(|f| f.value()),
            factor_display: result.factor.map(|f| f.to_string()),
            raw_preview: result.raw_preview,
            processed_preview: result.processed_preview,
            row_count: result.row_count,
            column_count: result.column_count,
            cleaning: result.cleaning,
            csv: result.csv,
            csv_file_name: csv_file_name.to_string(),
            prompt: result.prompt.content,
            prompt_tokens: result.prompt.estimated_tokens,
            processing_time_ms: result.processing_time_ms,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FactorResponse {
    pub factor: f64,
    pub display: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: String,
}
