pub mod config;
pub mod csv;
pub mod loader;
pub mod spreadsheet;
