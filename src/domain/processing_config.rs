// ============================================================
// PROCESSING CONFIGURATION
// ============================================================
// Tunables for one preprocessing run

use serde::{Deserialize, Serialize};

use super::anonymization::FactorRange;
use crate::domain::error::{AppError, Result};

/// Configuration for trial balance preprocessing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Rows shown in the raw and processed previews (default: 10)
    pub preview_rows: usize,

    /// Lower bound of the anonymization factor, inclusive (default: 1.1)
    pub factor_min: f64,

    /// Upper bound of the anonymization factor, inclusive (default: 9.9)
    pub factor_max: f64,

    /// File name offered for the cleaned CSV download
    pub output_file_name: String,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        let range = FactorRange::default();
        Self {
            preview_rows: 10,
            factor_min: range.min,
            factor_max: range.max,
            output_file_name: "clean_tb.csv".to_string(),
        }
    }
}

impl ProcessingConfig {
    pub fn factor_range(&self) -> FactorRange {
        FactorRange {
            min: self.factor_min,
            max: self.factor_max,
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.preview_rows == 0 {
            return Err(AppError::ValidationError(
                "preview_rows must be > 0".to_string(),
            ));
        }
        if self.output_file_name.trim().is_empty() {
            return Err(AppError::ValidationError(
                "output_file_name must not be empty".to_string(),
            ));
        }
        self.factor_range().validate()
    }
}
