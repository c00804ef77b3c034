//! One form submission, start to finish.

use house_price_geocoder::{NEARBY_HALF_WIDTH_DEG, resolve_city, sample_in_box};
use house_price_models::{BoundingBox, FeatureVector, GeoPoint, HouseAttributes};
use house_price_predictor::predict;
use house_price_reference::{lookup_city_code_in_state, lookup_state_code};
use rand::Rng;

use crate::comparison::{
    INVALID_SELECTION_MESSAGE, NO_LOCATION_MESSAGE, NO_POINTS_MESSAGE, PriceComparison, compare,
    predicted_label,
};
use crate::deviation::perturb;
use crate::{EstimateError, PricingContext};

/// Initial zoom level of the map around a resolved city.
pub const MAP_ZOOM: u8 = 12;

/// A sampled point near the city with its jittered price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricedPoint {
    /// Where the point is.
    pub point: GeoPoint,
    /// The predicted price perturbed by up to the context's deviation.
    pub price: f64,
}

/// The map section of a result.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationView {
    /// The city was geocoded.
    Resolved {
        /// Map center and marker position.
        center: GeoPoint,
        /// Initial zoom level.
        zoom: u8,
        /// Marker popup text.
        popup: String,
        /// Priced points sampled around the center.
        nearby: Vec<PricedPoint>,
    },
    /// The city could not be geocoded.
    Unresolved {
        /// Neutral text shown in place of the map.
        message: &'static str,
        /// Error text about the missing nearby points.
        error: &'static str,
    },
}

/// A successful prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    /// The submitted attributes.
    pub attributes: HouseAttributes,
    /// The encoded model input.
    pub features: FeatureVector,
    /// Model output for `features`.
    pub predicted_price: f64,
    /// Baseline the prediction was compared with.
    pub baseline_price: f64,
    /// Comparison against the baseline.
    pub comparison: PriceComparison,
    /// Map section.
    pub location: LocationView,
}

/// Everything a front-end needs to draw the outcome of one submission.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderState {
    /// The state or city has no label; the model was not invoked.
    InvalidSelection {
        /// Baseline, still shown alongside the message.
        baseline_price: f64,
        /// Text asking for a valid selection.
        message: &'static str,
    },
    /// The model produced a prediction.
    Estimated(Box<Estimate>),
}

impl RenderState {
    /// The baseline shown with every outcome.
    #[must_use]
    pub fn baseline_price(&self) -> f64 {
        match self {
            Self::InvalidSelection { baseline_price, .. } => *baseline_price,
            Self::Estimated(estimate) => estimate.baseline_price,
        }
    }
}

/// Handles one submission: validate, encode, predict, compare, locate.
///
/// Unknown states or cities and geocoding failures are not errors; they
/// are reported through the returned [`RenderState`].
///
/// # Errors
///
/// Returns [`EstimateError::InvalidInput`] if a numeric attribute is out of
/// range.
pub async fn handle_submit<R: Rng + ?Sized>(
    context: &PricingContext,
    attributes: HouseAttributes,
    rng: &mut R,
) -> Result<RenderState, EstimateError> {
    attributes.validate()?;

    let table = context.table();
    let codes = lookup_state_code(table, &attributes.state).zip(lookup_city_code_in_state(
        table,
        &attributes.state,
        &attributes.city,
    ));
    let Some((state_code, city_code)) = codes else {
        log::info!(
            "No labels for city '{}' in state '{}'",
            attributes.city,
            attributes.state
        );
        return Ok(RenderState::InvalidSelection {
            baseline_price: context.baseline_price(),
            message: INVALID_SELECTION_MESSAGE,
        });
    };

    let features = FeatureVector::from_attributes(&attributes, state_code, city_code);
    let predicted_price = predict(context.model(), &features);
    let comparison = compare(predicted_price, context.baseline_price());

    let location = match resolve_city(context.geocoder(), &attributes.state, &attributes.city).await
    {
        Some(center) => {
            let bbox = BoundingBox::around(center, NEARBY_HALF_WIDTH_DEG);
            let nearby = sample_in_box(&bbox, context.nearby_points(), rng)
                .into_iter()
                .map(|point| PricedPoint {
                    point,
                    price: perturb(predicted_price, context.deviation(), rng),
                })
                .collect();
            LocationView::Resolved {
                center,
                zoom: MAP_ZOOM,
                popup: predicted_label(predicted_price),
                nearby,
            }
        }
        None => LocationView::Unresolved {
            message: NO_LOCATION_MESSAGE,
            error: NO_POINTS_MESSAGE,
        },
    };

    Ok(RenderState::Estimated(Box::new(Estimate {
        attributes,
        features,
        predicted_price,
        baseline_price: context.baseline_price(),
        comparison,
        location,
    })))
}
