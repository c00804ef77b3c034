#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the house price server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the estimator's [`RenderState`] to allow independent evolution of
//! the API contract. Map markers are emitted as a `GeoJSON`
//! `FeatureCollection` that any web map library can draw directly.

use geojson::{Feature, FeatureCollection, Geometry, JsonObject};
use house_price_estimate::comparison::{baseline_label, predicted_label};
use house_price_estimate::{Estimate, LocationView, PricedPoint, RenderState, format_price};
use house_price_models::{
    FeatureVector, GeoPoint, HighlightColor, HouseAttributes, PriceClassification,
};
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// Body of `POST /api/predict`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictRequest {
    /// Number of bedrooms (2-5).
    pub bedrooms: u8,
    /// Number of bathrooms (1-4).
    pub bathrooms: u8,
    /// Lot size in acres (0.0-1.2).
    pub acre_lot: f64,
    /// House size in square feet (100-4363).
    pub house_size: u32,
    /// State name.
    pub state: String,
    /// City name within the state.
    pub city: String,
}

impl From<PredictRequest> for HouseAttributes {
    fn from(req: PredictRequest) -> Self {
        Self {
            bedrooms: req.bedrooms,
            bathrooms: req.bathrooms,
            acre_lot: req.acre_lot,
            house_size: req.house_size,
            state: req.state,
            city: req.city,
        }
    }
}

/// Response of `GET /api/states`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiStates {
    /// State names in reference order.
    pub states: Vec<String>,
}

/// Response of `GET /api/states/{state}/cities`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCities {
    /// The state the cities belong to.
    pub state: String,
    /// City names in reference order.
    pub cities: Vec<String>,
}

/// Response of `GET /api/baseline`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiBaseline {
    /// Average representative price across all states.
    pub baseline_price: f64,
    /// Display text, e.g. `"Average of all States: $250,000.00"`.
    pub label: String,
}

impl ApiBaseline {
    /// Builds the response for a baseline price.
    #[must_use]
    pub fn new(baseline_price: f64) -> Self {
        Self {
            baseline_price,
            label: baseline_label(baseline_price),
        }
    }
}

/// Response of `POST /api/predict`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ApiPrediction {
    /// The state or city has no label; no prediction was made.
    #[serde(rename_all = "camelCase")]
    InvalidSelection {
        /// Baseline average.
        baseline: ApiBaseline,
        /// Text asking for a valid selection.
        message: String,
    },
    /// A price was predicted.
    Estimated(Box<ApiEstimate>),
}

/// A successful prediction as returned by the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEstimate {
    /// Baseline average.
    pub baseline: ApiBaseline,
    /// Encoded model input.
    pub features: FeatureVector,
    /// Predicted price.
    pub predicted_price: f64,
    /// Display text, e.g. `"Predicted Price: $312,000.00"`.
    pub predicted_label: String,
    /// Relation to the baseline.
    pub classification: PriceClassification,
    /// Color of the predicted price text.
    pub price_color: HighlightColor,
    /// `(predicted - baseline) / predicted * 100`, absent for a zero
    /// prediction.
    pub percentage_difference: Option<f64>,
    /// Signed percentage text, e.g. `"+12.50%"`.
    pub percentage_text: Option<String>,
    /// `"+"` for a positive difference, empty otherwise.
    pub sign: String,
    /// Color of the percentage text.
    pub percentage_color: HighlightColor,
    /// Map section.
    pub map: ApiMap,
}

/// Map section of a prediction.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ApiMap {
    /// The city was geocoded.
    #[serde(rename_all = "camelCase")]
    Resolved {
        /// Map center.
        center: GeoPoint,
        /// Initial zoom level.
        zoom: u8,
        /// City marker and priced nearby points.
        markers: FeatureCollection,
    },
    /// The city could not be geocoded.
    #[serde(rename_all = "camelCase")]
    Unresolved {
        /// Neutral text shown instead of the map.
        message: String,
        /// Error text about the missing nearby points.
        error: String,
    },
}

impl From<RenderState> for ApiPrediction {
    fn from(state: RenderState) -> Self {
        match state {
            RenderState::InvalidSelection {
                baseline_price,
                message,
            } => Self::InvalidSelection {
                baseline: ApiBaseline::new(baseline_price),
                message: message.to_string(),
            },
            RenderState::Estimated(estimate) => Self::Estimated(Box::new(ApiEstimate::from(*estimate))),
        }
    }
}

impl From<Estimate> for ApiEstimate {
    fn from(estimate: Estimate) -> Self {
        let comparison = estimate.comparison;
        Self {
            baseline: ApiBaseline::new(estimate.baseline_price),
            features: estimate.features,
            predicted_price: estimate.predicted_price,
            predicted_label: predicted_label(estimate.predicted_price),
            classification: comparison.classification,
            price_color: comparison.price_color(),
            percentage_difference: comparison.percentage_difference,
            percentage_text: comparison.percentage_text(),
            sign: comparison.sign().to_string(),
            percentage_color: comparison.percentage_color(),
            map: ApiMap::from(estimate.location),
        }
    }
}

impl From<LocationView> for ApiMap {
    fn from(location: LocationView) -> Self {
        match location {
            LocationView::Resolved {
                center,
                zoom,
                popup,
                nearby,
            } => Self::Resolved {
                center,
                zoom,
                markers: marker_collection(center, &popup, &nearby),
            },
            LocationView::Unresolved { message, error } => Self::Unresolved {
                message: message.to_string(),
                error: error.to_string(),
            },
        }
    }
}

/// Builds the map layer: one `city` marker carrying the popup text, then
/// one `nearby` point per sampled location with its jittered price.
#[must_use]
pub fn marker_collection(center: GeoPoint, popup: &str, nearby: &[PricedPoint]) -> FeatureCollection {
    let mut features = Vec::with_capacity(nearby.len() + 1);

    let mut props = JsonObject::new();
    props.insert("kind".to_string(), "city".into());
    props.insert("popup".to_string(), popup.into());
    features.push(point_feature(center, props));

    for priced in nearby {
        let mut props = JsonObject::new();
        props.insert("kind".to_string(), "nearby".into());
        props.insert("price".to_string(), priced.price.into());
        props.insert(
            "popup".to_string(),
            format!("Estimated Price: {}", format_price(priced.price)).into(),
        );
        features.push(point_feature(priced.point, props));
    }

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

fn point_feature(point: GeoPoint, properties: JsonObject) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(geojson::Value::Point(vec![
            point.longitude,
            point.latitude,
        ]))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}
