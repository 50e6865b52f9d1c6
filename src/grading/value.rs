//! Graded value estimation.
//!
//! The base (raw) market value always comes from outside: a market-data
//! collaborator or the caller. The estimator only applies the grade
//! multiplier.

use crate::config::MultiplierTable;
use crate::core::{EstimatedValue, OverallGrade};
use crate::errors::{CertigradeError, Result};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValueEstimator {
    table: MultiplierTable,
}

impl ValueEstimator {
    pub fn new(table: MultiplierTable) -> Self {
        Self { table }
    }

    pub fn multiplier(&self, grade: OverallGrade) -> f64 {
        self.table.multiplier_for(grade)
    }

    /// `base_value * multiplier(grade)`, rounded to cents.
    ///
    /// Fails with `InvalidInput` for a negative or non-finite base value.
    pub fn estimate(&self, base_value: f64, grade: OverallGrade) -> Result<EstimatedValue> {
        validate_base_value(base_value)?;
        EstimatedValue::new(base_value * self.multiplier(grade))
            .map_err(|e| CertigradeError::invalid_input(format!("estimated value: {}", e)))
    }
}

pub(crate) fn validate_base_value(base_value: f64) -> Result<()> {
    if base_value.is_finite() && base_value >= 0.0 {
        Ok(())
    } else {
        Err(CertigradeError::invalid_input(format!(
            "base value must be a non-negative amount, got {}",
            base_value
        )))
    }
}

/// Multiplier from the default step table.
pub fn grade_multiplier(grade: OverallGrade) -> f64 {
    MultiplierTable::default().multiplier_for(grade)
}
