use std::io;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::domain::error::Result;
use crate::infrastructure::config::AppConfig;
use crate::interfaces::cli::{run_process, Cli, Commands};
use crate::interfaces::http::start_server;

/// `RUST_LOG` wins over the configured level. Logs go to stderr so stdout stays clean.
pub fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

pub async fn run(cli: Cli) -> Result<()> {
    let _ = dotenvy::dotenv();

    match cli.command {
        Commands::Serve { config } => {
            let config = AppConfig::load(config.as_deref())?;
            init_tracing(&config);
            info!(
                host = %config.server.host,
                port = config.server.port,
                "Starting HTTP server"
            );
            start_server(config)?.await?;
            Ok(())
        }
        Commands::Process(args) => {
            let config = AppConfig::load(args.config.as_deref())?;
            init_tracing(&config);
            run_process(&args, &config, &mut io::stdout().lock())?;
            Ok(())
        }
    }
}
