#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Price prediction from a pre-trained regression artifact.
//!
//! The artifact is a JSON document with a required `model` key and any
//! number of extra keys (training metadata, encoders, ...):
//!
//! ```json
//! {
//!   "model": { "type": "random_forest", "trees": [ { "nodes": [ ... ] } ] },
//!   "metadata": { "trained_on": "realtor-data.csv" }
//! }
//! ```
//!
//! The artifact is loaded once at startup with [`load_model`] and shared
//! read-only behind the [`PriceModel`] trait for every prediction.

pub mod artifact;
pub mod forest;
pub mod linear;

pub use artifact::{ModelArtifact, ModelSpec, load_model};
pub use forest::{RandomForest, RegressionTree, TreeNode};
pub use linear::LinearModel;

use house_price_models::{FEATURE_COUNT, FeatureVector};
use thiserror::Error;

/// A single model input row in training column order.
pub type FeatureRow = [f64; FEATURE_COUNT];

/// Errors from loading a model artifact.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Reading the artifact failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The artifact is not valid JSON or lacks the `model` key.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The artifact parsed but cannot be evaluated.
    #[error("Invalid model: {message}")]
    Invalid {
        /// Description of the problem.
        message: String,
    },
}

/// A regression model that maps feature rows to prices.
pub trait PriceModel: Send + Sync {
    /// Predicts the price for one feature row.
    fn predict_row(&self, row: &FeatureRow) -> f64;

    /// Predicts one price per row of a feature matrix.
    fn predict_batch(&self, rows: &[FeatureRow]) -> Vec<f64> {
        rows.iter().map(|row| self.predict_row(row)).collect()
    }
}

/// Predicts the price for a single feature vector.
///
/// No range checks happen here. Callers must only pass feature vectors
/// whose state and city codes were resolved from the reference data.
#[must_use]
pub fn predict(model: &dyn PriceModel, features: &FeatureVector) -> f64 {
    let price = model.predict_row(&features.to_row());
    log::debug!("Predicted {price} for {features:?}");
    price
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Constant(f64);

    impl PriceModel for Constant {
        fn predict_row(&self, _row: &FeatureRow) -> f64 {
            self.0
        }
    }

    #[test]
    fn batch_prediction_defaults_to_row_by_row() {
        let model = Constant(250_000.0);
        let rows = [[3.0, 2.0, 1.0, 600.0, 0.0, 0.0]; 3];
        assert_eq!(model.predict_batch(&rows), vec![250_000.0; 3]);
    }

    #[test]
    fn predict_uses_feature_row() {
        let model = LinearModel {
            intercept: 0.0,
            coefficients: vec![0.0, 0.0, 0.0, 100.0, 0.0, 0.0],
        };
        let features = FeatureVector {
            bedrooms: 3,
            bathrooms: 2,
            acre_lot: 1.0,
            house_size: 600,
            state_code: 0,
            city_code: 0,
        };
        assert!((predict(&model, &features) - 60_000.0).abs() < 1e-9);
    }
}
