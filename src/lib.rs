pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

mod app;

pub use app::{init_tracing, run};
pub use domain::error::{AppError, Result};
pub use interfaces::cli::Cli;
