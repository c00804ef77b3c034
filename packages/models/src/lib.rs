#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Shared domain types for the house price estimator.
//!
//! Defines the user-facing house attributes, the encoded feature vector fed
//! to the regression model, geographic points and bounding boxes, and the
//! price comparison classification shared by every presentation surface.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Number of columns in a model feature row.
pub const FEATURE_COUNT: usize = 6;

/// Accepted bedroom counts.
pub const BEDROOMS_RANGE: RangeInclusive<u8> = 2..=5;
/// Accepted bathroom counts.
pub const BATHROOMS_RANGE: RangeInclusive<u8> = 1..=4;
/// Accepted lot sizes in acres.
pub const ACRE_LOT_RANGE: RangeInclusive<f64> = 0.0..=1.2;
/// Accepted house sizes in square feet.
pub const HOUSE_SIZE_RANGE: RangeInclusive<u32> = 100..=4363;

/// Raw inputs collected from the user for one prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseAttributes {
    /// Number of bedrooms.
    pub bedrooms: u8,
    /// Number of bathrooms.
    pub bathrooms: u8,
    /// Lot size in acres.
    pub acre_lot: f64,
    /// Living area in square feet.
    pub house_size: u32,
    /// State name as listed in the reference data.
    pub state: String,
    /// City name as listed under the state.
    pub city: String,
}

impl HouseAttributes {
    /// Checks every numeric attribute against its accepted range.
    ///
    /// # Errors
    ///
    /// Returns the first attribute found outside its range.
    pub fn validate(&self) -> Result<(), InvalidAttributeError> {
        if !BEDROOMS_RANGE.contains(&self.bedrooms) {
            return Err(InvalidAttributeError::new(
                "bedrooms",
                self.bedrooms.to_string(),
                "2-5",
            ));
        }
        if !BATHROOMS_RANGE.contains(&self.bathrooms) {
            return Err(InvalidAttributeError::new(
                "bathrooms",
                self.bathrooms.to_string(),
                "1-4",
            ));
        }
        if !ACRE_LOT_RANGE.contains(&self.acre_lot) {
            return Err(InvalidAttributeError::new(
                "acreLot",
                self.acre_lot.to_string(),
                "0.0-1.2",
            ));
        }
        if !HOUSE_SIZE_RANGE.contains(&self.house_size) {
            return Err(InvalidAttributeError::new(
                "houseSize",
                self.house_size.to_string(),
                "100-4363",
            ));
        }
        Ok(())
    }
}

/// Error returned when a [`HouseAttributes`] field is outside its accepted
/// range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidAttributeError {
    /// Name of the offending field.
    pub field: &'static str,
    /// The rejected value, rendered as text.
    pub value: String,
    /// Human-readable accepted range.
    pub expected: &'static str,
}

impl InvalidAttributeError {
    fn new(field: &'static str, value: String, expected: &'static str) -> Self {
        Self {
            field,
            value,
            expected,
        }
    }
}

impl std::fmt::Display for InvalidAttributeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid {} value {}: expected {}",
            self.field, self.value, self.expected
        )
    }
}

impl std::error::Error for InvalidAttributeError {}

/// Encoded model input: numeric attributes followed by the state and city
/// labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureVector {
    /// Number of bedrooms.
    pub bedrooms: u8,
    /// Number of bathrooms.
    pub bathrooms: u8,
    /// Lot size in acres.
    pub acre_lot: f64,
    /// Living area in square feet.
    pub house_size: u32,
    /// Encoded state label.
    pub state_code: u32,
    /// Encoded city label.
    pub city_code: u32,
}

impl FeatureVector {
    /// Builds a feature vector from user attributes and resolved codes.
    #[must_use]
    pub const fn from_attributes(attrs: &HouseAttributes, state_code: u32, city_code: u32) -> Self {
        Self {
            bedrooms: attrs.bedrooms,
            bathrooms: attrs.bathrooms,
            acre_lot: attrs.acre_lot,
            house_size: attrs.house_size,
            state_code,
            city_code,
        }
    }

    /// Returns the model row in training column order: bedrooms,
    /// bathrooms, acre lot, house size, state code, city code.
    #[must_use]
    pub fn to_row(&self) -> [f64; FEATURE_COUNT] {
        [
            f64::from(self.bedrooms),
            f64::from(self.bathrooms),
            self.acre_lot,
            f64::from(self.house_size),
            f64::from(self.state_code),
            f64::from(self.city_code),
        ]
    }
}

/// A WGS84 coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl GeoPoint {
    /// Creates a point from latitude and longitude.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// An axis-aligned bounding box in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    /// Western edge (minimum longitude).
    pub west: f64,
    /// Southern edge (minimum latitude).
    pub south: f64,
    /// Eastern edge (maximum longitude).
    pub east: f64,
    /// Northern edge (maximum latitude).
    pub north: f64,
}

impl BoundingBox {
    /// Creates a bounding box from its four edges.
    #[must_use]
    pub const fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    /// Builds a square box extending `half_width` degrees from `center` in
    /// both latitude and longitude.
    #[must_use]
    pub fn around(center: GeoPoint, half_width: f64) -> Self {
        let half_width = half_width.abs();
        Self::new(
            center.longitude - half_width,
            center.latitude - half_width,
            center.longitude + half_width,
            center.latitude + half_width,
        )
    }

    /// Returns `true` if the point lies inside or on the edge of the box.
    #[must_use]
    pub fn contains(&self, point: GeoPoint) -> bool {
        (self.west..=self.east).contains(&point.longitude)
            && (self.south..=self.north).contains(&point.latitude)
    }

    /// Returns the center of the box.
    #[must_use]
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            f64::midpoint(self.south, self.north),
            f64::midpoint(self.west, self.east),
        )
    }
}

/// How a predicted price relates to the baseline average.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PriceClassification {
    /// Predicted price is above the baseline.
    Above,
    /// Predicted price is below the baseline.
    Below,
    /// Predicted price equals the baseline.
    Neutral,
}

impl PriceClassification {
    /// Returns the highlight color used when rendering this classification.
    #[must_use]
    pub const fn color(self) -> HighlightColor {
        match self {
            Self::Above => HighlightColor::Red,
            Self::Below => HighlightColor::Green,
            Self::Neutral => HighlightColor::Black,
        }
    }
}

/// Text highlight colors used by the presentation layer.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum HighlightColor {
    /// Above the baseline.
    Red,
    /// Below the baseline.
    Green,
    /// Equal to the baseline.
    Black,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attributes() -> HouseAttributes {
        HouseAttributes {
            bedrooms: 3,
            bathrooms: 2,
            acre_lot: 1.0,
            house_size: 600,
            state: "Texas".to_string(),
            city: "Austin".to_string(),
        }
    }

    #[test]
    fn default_form_values_are_valid() {
        assert!(attributes().validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_attributes() {
        let mut attrs = attributes();
        attrs.bedrooms = 6;
        assert_eq!(attrs.validate().unwrap_err().field, "bedrooms");

        let mut attrs = attributes();
        attrs.bathrooms = 0;
        assert_eq!(attrs.validate().unwrap_err().field, "bathrooms");

        let mut attrs = attributes();
        attrs.acre_lot = 1.25;
        assert_eq!(attrs.validate().unwrap_err().field, "acreLot");

        let mut attrs = attributes();
        attrs.acre_lot = f64::NAN;
        assert_eq!(attrs.validate().unwrap_err().field, "acreLot");

        let mut attrs = attributes();
        attrs.house_size = 99;
        assert_eq!(attrs.validate().unwrap_err().field, "houseSize");
    }

    #[test]
    fn feature_row_follows_training_column_order() {
        let features = FeatureVector::from_attributes(&attributes(), 7, 11);
        assert_eq!(features.to_row(), [3.0, 2.0, 1.0, 600.0, 7.0, 11.0]);
    }

    #[test]
    fn bounding_box_around_center() {
        let center = GeoPoint::new(30.2672, -97.7431);
        let bbox = BoundingBox::around(center, 0.05);
        assert!((bbox.west - -97.7931).abs() < 1e-9);
        assert!((bbox.east - -97.6931).abs() < 1e-9);
        assert!((bbox.south - 30.2172).abs() < 1e-9);
        assert!((bbox.north - 30.3172).abs() < 1e-9);
        assert!(bbox.contains(center));
        assert!(!bbox.contains(GeoPoint::new(30.4, -97.7431)));

        let mid = bbox.center();
        assert!((mid.latitude - center.latitude).abs() < 1e-9);
        assert!((mid.longitude - center.longitude).abs() < 1e-9);
    }

    #[test]
    fn classification_colors() {
        assert_eq!(PriceClassification::Above.color(), HighlightColor::Red);
        assert_eq!(PriceClassification::Below.color(), HighlightColor::Green);
        assert_eq!(PriceClassification::Neutral.color(), HighlightColor::Black);
        assert_eq!(HighlightColor::Red.to_string(), "red");
        assert_eq!("below".parse::<PriceClassification>().unwrap(), PriceClassification::Below);
    }
}
