//! Serialized model artifact.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{FeatureRow, LinearModel, ModelError, PriceModel, RandomForest};

/// The regression model stored under the artifact's `model` key, tagged by
/// `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModelSpec {
    /// Bagged ensemble of regression trees.
    RandomForest(RandomForest),
    /// Linear regression.
    Linear(LinearModel),
}

impl ModelSpec {
    /// Short name of the model family, for logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::RandomForest(_) => "random_forest",
            Self::Linear(_) => "linear",
        }
    }

    fn validate(&self) -> Result<(), ModelError> {
        match self {
            Self::RandomForest(forest) => forest.validate(),
            Self::Linear(linear) => linear.validate(),
        }
    }
}

impl PriceModel for ModelSpec {
    fn predict_row(&self, row: &FeatureRow) -> f64 {
        match self {
            Self::RandomForest(forest) => forest.predict_row(row),
            Self::Linear(linear) => linear.predict_row(row),
        }
    }
}

/// A deserialized artifact: the model plus whatever else was stored
/// alongside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// The regression model.
    pub model: ModelSpec,
    /// Any other top-level keys, kept verbatim.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ModelArtifact {
    /// Parses and validates an artifact from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Json`] if the text is malformed or has no
    /// `model` key, and [`ModelError::Invalid`] if the model cannot be
    /// evaluated.
    pub fn from_json_str(s: &str) -> Result<Self, ModelError> {
        let artifact: Self = serde_json::from_str(s)?;
        artifact.model.validate()?;
        Ok(artifact)
    }
}

impl PriceModel for ModelArtifact {
    fn predict_row(&self, row: &FeatureRow) -> f64 {
        self.model.predict_row(row)
    }
}

/// Loads and validates the model artifact at `path`.
///
/// Called once at startup; a failure here means no predictions can be made.
///
/// # Errors
///
/// Returns [`ModelError`] if the file cannot be read, parsed, or validated.
pub fn load_model(path: &Path) -> Result<ModelArtifact, ModelError> {
    log::info!("Loading model artifact from {}", path.display());
    let content = std::fs::read_to_string(path)?;
    let artifact = ModelArtifact::from_json_str(&content)?;
    log::info!(
        "Loaded {} model ({} extra artifact keys)",
        artifact.model.kind(),
        artifact.extra.len()
    );
    Ok(artifact)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_forest_artifact_with_metadata() {
        let artifact = ModelArtifact::from_json_str(
            r#"{
                "model": {
                    "type": "random_forest",
                    "trees": [
                        { "nodes": [
                            { "feature": 3, "threshold": 1500.0, "left": 1, "right": 2 },
                            { "value": 200000.0 },
                            { "value": 400000.0 }
                        ] }
                    ]
                },
                "metadata": { "trained_on": "realtor-data.csv" }
            }"#,
        )
        .unwrap();

        assert_eq!(artifact.model.kind(), "random_forest");
        assert!(artifact.extra.contains_key("metadata"));
        let prices = artifact.predict_batch(&[
            [2.0, 3.0, 0.16, 2000.0, 0.0, 0.0],
            [3.0, 2.0, 1.0, 600.0, 0.0, 0.0],
        ]);
        assert_eq!(prices, vec![400_000.0, 200_000.0]);
    }

    #[test]
    fn parses_linear_artifact() {
        let artifact = ModelArtifact::from_json_str(
            r#"{"model": {"type": "linear", "intercept": 1.0, "coefficients": [0, 0, 0, 0, 0, 0]}}"#,
        )
        .unwrap();
        assert_eq!(artifact.model.kind(), "linear");
        assert!((artifact.predict_row(&[0.0; 6]) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn missing_model_key_is_an_error() {
        let err = ModelArtifact::from_json_str(r#"{"metadata": {}}"#).unwrap_err();
        assert!(matches!(err, ModelError::Json(_)));
    }

    #[test]
    fn invalid_model_is_rejected() {
        let err = ModelArtifact::from_json_str(r#"{"model": {"type": "random_forest", "trees": []}}"#)
            .unwrap_err();
        assert!(matches!(err, ModelError::Invalid { .. }));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_model(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, ModelError::Io(_)));
    }
}
