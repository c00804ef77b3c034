//! Process-wide pricing context.

use std::sync::Arc;

use house_price_geocoder::Geocoder;
use house_price_geocoder::nominatim::NominatimGeocoder;
use house_price_geocoder::service_registry::nominatim_service;
use house_price_predictor::{PriceModel, load_model};
use house_price_reference::ReferenceTable;

use crate::EstimateError;
use crate::baseline::compute_baseline;
use crate::comparison::baseline_label;
use crate::config::{ContextConfig, DEFAULT_NEARBY_POINTS};
use crate::deviation::DEFAULT_DEVIATION;

/// Everything a submission needs that outlives it: the reference table,
/// the model, the baseline computed from both, and the geocoder.
///
/// Built once at startup and never mutated, so it can be shared across
/// threads behind an `Arc`.
pub struct PricingContext {
    table: ReferenceTable,
    model: Arc<dyn PriceModel>,
    geocoder: Arc<dyn Geocoder>,
    baseline_price: f64,
    nearby_points: usize,
    deviation: f64,
}

impl PricingContext {
    /// Assembles a context from already-loaded parts and computes the
    /// baseline.
    ///
    /// # Errors
    ///
    /// Returns [`EstimateError::EmptyBaseline`] if the table has no state
    /// that can contribute to the baseline.
    pub fn new(
        table: ReferenceTable,
        model: Arc<dyn PriceModel>,
        geocoder: Arc<dyn Geocoder>,
    ) -> Result<Self, EstimateError> {
        let baseline_price = compute_baseline(&table, model.as_ref())?;
        Ok(Self {
            table,
            model,
            geocoder,
            baseline_price,
            nearby_points: DEFAULT_NEARBY_POINTS,
            deviation: DEFAULT_DEVIATION,
        })
    }

    /// Loads every resource named by `config` in order: reference table,
    /// model, geocoder client, then the baseline.
    ///
    /// # Errors
    ///
    /// Returns [`EstimateError`] if any resource fails to load. A model
    /// that cannot be loaded is fatal; callers should abort startup.
    pub fn initialize(config: &ContextConfig) -> Result<Self, EstimateError> {
        let table = ReferenceTable::load(&config.reference_path)?;
        let model = load_model(&config.model_path)?;

        let mut geocoder = NominatimGeocoder::from_service(&nominatim_service())?;
        if let Some(url) = &config.nominatim_url {
            geocoder = geocoder.with_base_url(url.clone());
        }
        log::info!("Geocoding via {}", geocoder.base_url());

        let context = Self::new(table, Arc::new(model), Arc::new(geocoder))?
            .with_nearby_points(config.nearby_points);
        log::info!("{}", baseline_label(context.baseline_price));
        Ok(context)
    }

    /// Sets how many priced points are sampled around the resolved city.
    #[must_use]
    pub fn with_nearby_points(mut self, count: usize) -> Self {
        self.nearby_points = count;
        self
    }

    /// Sets the maximum fractional deviation of nearby point prices.
    #[must_use]
    pub fn with_deviation(mut self, fraction: f64) -> Self {
        self.deviation = fraction;
        self
    }

    /// The reference table.
    #[must_use]
    pub const fn table(&self) -> &ReferenceTable {
        &self.table
    }

    /// The regression model.
    #[must_use]
    pub fn model(&self) -> &dyn PriceModel {
        self.model.as_ref()
    }

    /// The geocoder.
    #[must_use]
    pub fn geocoder(&self) -> &dyn Geocoder {
        self.geocoder.as_ref()
    }

    /// Average representative price across all states.
    #[must_use]
    pub const fn baseline_price(&self) -> f64 {
        self.baseline_price
    }

    /// Number of priced points sampled per submission.
    #[must_use]
    pub const fn nearby_points(&self) -> usize {
        self.nearby_points
    }

    /// Maximum fractional deviation of nearby point prices.
    #[must_use]
    pub const fn deviation(&self) -> f64 {
        self.deviation
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn missing_reference_file_fails_first() {
        let config = ContextConfig {
            reference_path: PathBuf::from("does/not/exist.json"),
            model_path: PathBuf::from("also/missing.json"),
            ..ContextConfig::default()
        };
        let err = PricingContext::initialize(&config).err().unwrap();
        assert!(matches!(err, EstimateError::Reference(_)));
    }

    #[test]
    fn missing_model_is_fatal() {
        let data = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data");
        let config = ContextConfig {
            reference_path: data.join("state_city.json"),
            model_path: PathBuf::from("does/not/exist.json"),
            ..ContextConfig::default()
        };
        let err = PricingContext::initialize(&config).err().unwrap();
        assert!(matches!(err, EstimateError::Model(_)));
    }

    #[test]
    fn initializes_from_bundled_data() {
        let data = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data");
        let config = ContextConfig {
            reference_path: data.join("state_city.json"),
            model_path: data.join("predict_model.json"),
            nominatim_url: Some("http://localhost:8088/search".to_string()),
            nearby_points: 3,
        };
        let context = PricingContext::initialize(&config).unwrap();

        assert_eq!(context.nearby_points(), 3);
        assert!(context.baseline_price().is_finite());
        assert!(context.baseline_price() > 0.0);
        assert_eq!(context.table().state_names()[0], "California");
        assert!(context.table().find_state("Puerto Rico").is_some());
    }
}
