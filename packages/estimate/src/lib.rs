#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Price estimation workflow for the house price estimator.
//!
//! Ties the reference data, the regression model and the geocoder together:
//!
//! - [`baseline`] averages one representative prediction per state.
//! - [`deviation`] jitters a price by a bounded random fraction.
//! - [`comparison`] classifies a prediction against the baseline and
//!   formats the user-facing text.
//! - [`context`] holds the process-wide [`PricingContext`], initialized in
//!   a fixed order: reference table, model, baseline.
//! - [`submit`] turns one form submission into a [`RenderState`] that any
//!   front-end can draw.

pub mod baseline;
pub mod comparison;
pub mod config;
pub mod context;
pub mod deviation;
pub mod submit;

pub use baseline::compute_baseline;
pub use comparison::{PriceComparison, compare, format_price};
pub use config::ContextConfig;
pub use context::PricingContext;
pub use deviation::{DEFAULT_DEVIATION, perturb};
pub use submit::{Estimate, LocationView, PricedPoint, RenderState, handle_submit};

use house_price_models::InvalidAttributeError;
use thiserror::Error;

/// Errors that can occur while initializing or running the estimator.
#[derive(Debug, Error)]
pub enum EstimateError {
    /// Reference data could not be loaded.
    #[error("Reference data error: {0}")]
    Reference(#[from] house_price_reference::ReferenceError),

    /// The model artifact could not be loaded.
    #[error("Model unavailable: {0}")]
    Model(#[from] house_price_predictor::ModelError),

    /// The geocoding client could not be built.
    #[error("Geocoder error: {0}")]
    Geocode(#[from] house_price_geocoder::GeocodeError),

    /// No state had both a label and a city, so no baseline exists.
    #[error("No state in the reference data has a label and at least one city")]
    EmptyBaseline,

    /// A submitted attribute is outside its accepted range.
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InvalidAttributeError),
}
