//! Nominatim / OpenStreetMap geocoder client.
//!
//! Nominatim has strict usage rules for the public instance: at most one
//! request per second and an identifying `User-Agent`. One submission
//! issues a single lookup, so no client-side rate limiting is applied.
//!
//! See <https://nominatim.org/release-docs/develop/api/Search/>

use async_trait::async_trait;
use house_price_models::GeoPoint;

use crate::service_registry::NominatimService;
use crate::{GeocodeError, Geocoder};

/// [`Geocoder`] backed by a Nominatim search endpoint.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: reqwest::Client,
    base_url: String,
    country_code: Option<String>,
}

impl NominatimGeocoder {
    /// Builds a client from a service configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the HTTP client cannot be built.
    pub fn from_service(service: &NominatimService) -> Result<Self, GeocodeError> {
        let client = reqwest::Client::builder()
            .user_agent(service.user_agent.clone())
            .timeout(service.timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: service.base_url.clone(),
            country_code: service.country_code.clone(),
        })
    }

    /// Overrides the search endpoint (e.g. a self-hosted instance).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// The search endpoint in use.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, query: &str) -> Result<Option<GeoPoint>, GeocodeError> {
        geocode_freeform(
            &self.client,
            &self.base_url,
            self.country_code.as_deref(),
            query,
        )
        .await
    }
}

/// Geocodes a free-form query (e.g., `"Austin, Texas"`) using Nominatim.
///
/// # Errors
///
/// Returns [`GeocodeError`] if the HTTP request or response parsing fails.
pub async fn geocode_freeform(
    client: &reqwest::Client,
    base_url: &str,
    country_code: Option<&str>,
    query: &str,
) -> Result<Option<GeoPoint>, GeocodeError> {
    let mut params = vec![("q", query), ("format", "jsonv2"), ("limit", "1")];
    if let Some(code) = country_code {
        params.push(("countrycodes", code));
    }

    log::debug!("Nominatim lookup: {query}");
    let resp = client.get(base_url).query(&params).send().await?;

    if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(GeocodeError::RateLimited);
    }

    let body: serde_json::Value = resp.error_for_status()?.json().await?;
    parse_response(&body)
}

/// Parses Nominatim JSON response.
fn parse_response(body: &serde_json::Value) -> Result<Option<GeoPoint>, GeocodeError> {
    let results = body.as_array().ok_or_else(|| GeocodeError::Parse {
        message: "Nominatim response is not an array".to_string(),
    })?;

    let Some(first) = results.first() else {
        return Ok(None);
    };

    let lat = first["lat"]
        .as_str()
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(|| GeocodeError::Parse {
            message: "Missing lat in Nominatim response".to_string(),
        })?;

    let lon = first["lon"]
        .as_str()
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(|| GeocodeError::Parse {
            message: "Missing lon in Nominatim response".to_string(),
        })?;

    // Range checks also reject NaN and infinities.
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(GeocodeError::Parse {
            message: format!("Nominatim returned invalid coordinates ({lat}, {lon})"),
        });
    }

    if let Some(name) = first["display_name"].as_str() {
        log::debug!("Nominatim matched '{name}'");
    }

    Ok(Some(GeoPoint::new(lat, lon)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service_registry::nominatim_service;

    #[test]
    fn parses_nominatim_result() {
        let body = serde_json::json!([{
            "lat": "30.2711286",
            "lon": "-97.7436995",
            "display_name": "Austin, Travis County, Texas, United States"
        }]);
        let point = parse_response(&body).unwrap().unwrap();
        assert!((point.latitude - 30.271_128_6).abs() < 1e-6);
        assert!((point.longitude - -97.743_699_5).abs() < 1e-6);
    }

    #[test]
    fn parses_nominatim_empty() {
        let body = serde_json::json!([]);
        assert!(parse_response(&body).unwrap().is_none());
    }

    #[test]
    fn rejects_non_array_body() {
        let body = serde_json::json!({ "error": "Bad request" });
        assert!(matches!(
            parse_response(&body),
            Err(GeocodeError::Parse { .. })
        ));
    }

    #[test]
    fn rejects_missing_coordinates() {
        let body = serde_json::json!([{ "lat": "30.27" }]);
        assert!(matches!(
            parse_response(&body),
            Err(GeocodeError::Parse { .. })
        ));
    }

    #[test]
    fn rejects_non_finite_coordinates() {
        for (lat, lon) in [
            ("NaN", "-97.74"),
            ("30.27", "inf"),
            ("-inf", "-97.74"),
            ("91.0", "-97.74"),
            ("30.27", "-180.5"),
        ] {
            let body = serde_json::json!([{ "lat": lat, "lon": lon }]);
            assert!(
                matches!(parse_response(&body), Err(GeocodeError::Parse { .. })),
                "accepted ({lat}, {lon})"
            );
        }

        let edge = serde_json::json!([{ "lat": "-90", "lon": "180" }]);
        assert_eq!(
            parse_response(&edge).unwrap(),
            Some(GeoPoint::new(-90.0, 180.0))
        );
    }

    #[test]
    fn base_url_override() {
        let geocoder = NominatimGeocoder::from_service(&nominatim_service())
            .unwrap()
            .with_base_url("http://localhost:8088/search");
        assert_eq!(geocoder.base_url(), "http://localhost:8088/search");
    }
}
