//! Ordinary linear regression.

use house_price_models::FEATURE_COUNT;
use serde::{Deserialize, Serialize};

use crate::{FeatureRow, ModelError, PriceModel};

/// `price = intercept + sum(coefficients[i] * row[i])`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    /// Constant term.
    pub intercept: f64,
    /// One weight per feature column.
    pub coefficients: Vec<f64>,
}

impl LinearModel {
    /// Checks the coefficient count and that every weight is finite.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Invalid`] if the model cannot be evaluated.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.coefficients.len() != FEATURE_COUNT {
            return Err(ModelError::Invalid {
                message: format!(
                    "linear model has {} coefficients, expected {FEATURE_COUNT}",
                    self.coefficients.len()
                ),
            });
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ModelError::Invalid {
                message: "linear model has non-finite weights".to_string(),
            });
        }
        Ok(())
    }
}

impl PriceModel for LinearModel {
    fn predict_row(&self, row: &FeatureRow) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(row)
                .map(|(c, x)| c * x)
                .sum::<f64>()
    }
}
