//! Compile-time geocoding service configuration.
//!
//! The Nominatim provider is defined in `services/nominatim.toml`, embedded
//! at compile time and exposed via [`nominatim_service`].

use std::time::Duration;

use serde::Deserialize;

/// Nominatim service configuration loaded from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct NominatimService {
    /// Unique identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Search endpoint (e.g., `"https://nominatim.openstreetmap.org/search"`).
    pub base_url: String,
    /// `User-Agent` header sent with every request. The public instance
    /// rejects anonymous clients.
    pub user_agent: String,
    /// ISO country code restricting results, if any.
    #[serde(default)]
    pub country_code: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

const fn default_timeout_secs() -> u64 {
    10
}

impl NominatimService {
    /// Request timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

const NOMINATIM_TOML: &str = include_str!("../services/nominatim.toml");

/// Returns the embedded Nominatim configuration.
///
/// # Panics
///
/// Panics if the embedded TOML is malformed (this is a compile-time
/// guarantee since the config is embedded).
#[must_use]
pub fn nominatim_service() -> NominatimService {
    toml::de::from_str(NOMINATIM_TOML)
        .unwrap_or_else(|e| panic!("Failed to parse geocoding service 'nominatim': {e}"))
}
