#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! City geocoding for the house price estimator.
//!
//! Resolves a `"{city}, {state}"` pair to a center point through the
//! [`Geocoder`] trait, and samples random points in a small box around
//! that center for map display.
//!
//! The production implementation is [`nominatim::NominatimGeocoder`],
//! configured from `services/nominatim.toml` which is embedded at compile
//! time by the [`service_registry`]. Lookups never fail the caller: any
//! error is logged and reported as an unresolved location.

pub mod nominatim;
pub mod resolver;
pub mod service_registry;

pub use resolver::{
    NEARBY_HALF_WIDTH_DEG, city_query, resolve_city, sample_in_box, sample_nearby_points,
};

use async_trait::async_trait;
use house_price_models::GeoPoint;
use thiserror::Error;

/// Errors from geocoding operations.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response parsing failed.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },

    /// Rate limit exceeded.
    #[error("Rate limit exceeded")]
    RateLimited,
}

/// A free-form geocoding capability.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Geocodes a free-form query such as `"Austin, Texas"`.
    ///
    /// Returns `Ok(None)` when the provider has no match.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError`] if the request or response parsing fails.
    async fn geocode(&self, query: &str) -> Result<Option<GeoPoint>, GeocodeError>;
}
