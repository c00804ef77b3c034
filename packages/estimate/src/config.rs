//! Startup configuration read from the environment.

use std::path::PathBuf;

/// Default location of the state/city reference data.
pub const DEFAULT_REFERENCE_PATH: &str = "data/state_city.json";
/// Default location of the model artifact.
pub const DEFAULT_MODEL_PATH: &str = "data/predict_model.json";
/// Default number of priced points sampled around a city.
pub const DEFAULT_NEARBY_POINTS: usize = 1;
/// Upper bound on priced points sampled around a city.
pub const MAX_NEARBY_POINTS: usize = 50;

/// Settings needed to build a [`crate::PricingContext`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextConfig {
    /// Path of the state/city reference JSON.
    pub reference_path: PathBuf,
    /// Path of the model artifact JSON.
    pub model_path: PathBuf,
    /// Overrides the embedded Nominatim search endpoint.
    pub nominatim_url: Option<String>,
    /// Number of priced points sampled around the resolved city.
    pub nearby_points: usize,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            reference_path: PathBuf::from(DEFAULT_REFERENCE_PATH),
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            nominatim_url: None,
            nearby_points: DEFAULT_NEARBY_POINTS,
        }
    }
}

impl ContextConfig {
    /// Reads `REFERENCE_DATA_PATH`, `MODEL_PATH`, `NOMINATIM_URL` and
    /// `NEARBY_POINTS`, falling back to the defaults for anything unset or
    /// unparseable.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let nearby_points = match lookup("NEARBY_POINTS") {
            Some(raw) => match raw.parse::<usize>() {
                Ok(count) if count <= MAX_NEARBY_POINTS => count,
                Ok(count) => {
                    log::warn!("NEARBY_POINTS {count} exceeds {MAX_NEARBY_POINTS}, clamping");
                    MAX_NEARBY_POINTS
                }
                Err(_) => {
                    log::warn!("Ignoring invalid NEARBY_POINTS value '{raw}'");
                    defaults.nearby_points
                }
            },
            None => defaults.nearby_points,
        };

        Self {
            reference_path: lookup("REFERENCE_DATA_PATH")
                .map_or(defaults.reference_path, PathBuf::from),
            model_path: lookup("MODEL_PATH").map_or(defaults.model_path, PathBuf::from),
            nominatim_url: lookup("NOMINATIM_URL").filter(|url| !url.is_empty()),
            nearby_points,
        }
    }
}
