//! City resolution and nearby point sampling.

use house_price_models::{BoundingBox, GeoPoint};
use rand::Rng;

use crate::Geocoder;

/// Half-width in degrees of the box nearby points are drawn from.
pub const NEARBY_HALF_WIDTH_DEG: f64 = 0.05;

/// Builds the free-form query for a city.
#[must_use]
pub fn city_query(state: &str, city: &str) -> String {
    format!("{city}, {state}")
}

/// Resolves the center point of a city.
///
/// Returns `None` when the geocoder has no match, the lookup fails, or the
/// returned point is not finite; the failure is logged and never
/// propagated.
pub async fn resolve_city(geocoder: &dyn Geocoder, state: &str, city: &str) -> Option<GeoPoint> {
    let query = city_query(state, city);
    match geocoder.geocode(&query).await {
        Ok(Some(point)) if point.latitude.is_finite() && point.longitude.is_finite() => Some(point),
        Ok(Some(point)) => {
            log::warn!("Ignoring non-finite location {point:?} for '{query}'");
            None
        }
        Ok(None) => {
            log::info!("No geocoding match for '{query}'");
            None
        }
        Err(e) => {
            log::warn!("Geocoding '{query}' failed: {e}");
            None
        }
    }
}

/// Draws `count` independent points uniformly inside `bbox`.
///
/// Longitude is drawn from `[west, east]` and latitude from
/// `[south, north]`. Points may repeat; no spacing is enforced.
pub fn sample_in_box<R: Rng + ?Sized>(bbox: &BoundingBox, count: usize, rng: &mut R) -> Vec<GeoPoint> {
    (0..count)
        .map(|_| {
            let longitude = rng.random_range(bbox.west..=bbox.east);
            let latitude = rng.random_range(bbox.south..=bbox.north);
            GeoPoint::new(latitude, longitude)
        })
        .collect()
}

/// Resolves a city and draws `count` points within
/// [`NEARBY_HALF_WIDTH_DEG`] of its center.
///
/// Returns `None` under the same conditions as [`resolve_city`].
pub async fn sample_nearby_points<R: Rng + ?Sized>(
    geocoder: &dyn Geocoder,
    state: &str,
    city: &str,
    count: usize,
    rng: &mut R,
) -> Option<Vec<GeoPoint>> {
    let center = resolve_city(geocoder, state, city).await?;
    let bbox = BoundingBox::around(center, NEARBY_HALF_WIDTH_DEG);
    Some(sample_in_box(&bbox, count, rng))
}
