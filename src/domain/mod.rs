pub mod anonymization;
pub mod error;
pub mod file_kind;
pub mod processing_config;
pub mod prompt;

// Tabular data model
pub mod table;
