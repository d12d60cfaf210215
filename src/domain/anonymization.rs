// ============================================================
// ANONYMIZATION FACTOR
// ============================================================
// The single multiplier applied to every numeric value of a run

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};

/// Inclusive range the factor is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorRange {
    pub min: f64,
    pub max: f64,
}

impl Default for FactorRange {
    fn default() -> Self {
        Self { min: 1.1, max: 9.9 }
    }
}

impl FactorRange {
    pub fn new(min: f64, max: f64) -> Result<Self> {
        let range = Self { min, max };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(AppError::ValidationError(
                "factor range bounds must be finite".to_string(),
            ));
        }
        if self.min <= 0.0 {
            return Err(AppError::ValidationError(
                "factor range minimum must be > 0".to_string(),
            ));
        }
        if self.min > self.max {
            return Err(AppError::ValidationError(format!(
                "factor range minimum ({}) exceeds maximum ({})",
                self.min, self.max
            )));
        }
        Ok(())
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Positive, finite multiplier. Scoped to one run and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AnonymizationFactor(f64);

impl AnonymizationFactor {
    pub fn new(value: f64) -> Result<Self> {
        if !value.is_finite() || value <= 0.0 {
            return Err(AppError::ValidationError(format!(
                "anonymization factor must be a finite number > 0, got {}",
                value
            )));
        }
        Ok(Self(value))
    }

    /// Draw uniformly from `range`
    pub fn sample<R: Rng>(rng: &mut R, range: &FactorRange) -> Self {
        Self(rng.random_range(range.min..=range.max))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for AnonymizationFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}
