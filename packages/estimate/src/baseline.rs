//! Baseline average price across all states.

use house_price_models::FeatureVector;
use house_price_predictor::PriceModel;
use house_price_reference::ReferenceTable;

use crate::EstimateError;

/// Bedrooms used for every representative house.
pub const BASELINE_BEDROOMS: u8 = 2;
/// Bathrooms used for every representative house.
pub const BASELINE_BATHROOMS: u8 = 3;
/// Lot size in acres used for every representative house.
pub const BASELINE_ACRE_LOT: f64 = 0.16;
/// House size in square feet used for every representative house.
pub const BASELINE_HOUSE_SIZE: u32 = 2000;

/// Builds the representative feature vector of every state: the fixed
/// baseline house placed in the state's first city.
///
/// States without a label or without cities are skipped with a warning.
#[must_use]
pub fn representative_features(table: &ReferenceTable) -> Vec<FeatureVector> {
    table
        .states()
        .filter_map(|state| {
            let Some(state_code) = state.code else {
                log::warn!("Skipping state '{}' in baseline: no label", state.name);
                return None;
            };
            let Some(city) = state.first_city() else {
                log::warn!("Skipping state '{}' in baseline: no cities", state.name);
                return None;
            };
            Some(FeatureVector {
                bedrooms: BASELINE_BEDROOMS,
                bathrooms: BASELINE_BATHROOMS,
                acre_lot: BASELINE_ACRE_LOT,
                house_size: BASELINE_HOUSE_SIZE,
                state_code,
                city_code: city.code,
            })
        })
        .collect()
}

/// Averages the model's prediction for the representative house of every
/// state.
///
/// # Errors
///
/// Returns [`EstimateError::EmptyBaseline`] if no state can contribute.
#[allow(clippy::cast_precision_loss)]
pub fn compute_baseline(table: &ReferenceTable, model: &dyn PriceModel) -> Result<f64, EstimateError> {
    let rows: Vec<_> = representative_features(table)
        .iter()
        .map(FeatureVector::to_row)
        .collect();

    if rows.is_empty() {
        return Err(EstimateError::EmptyBaseline);
    }

    let prices = model.predict_batch(&rows);
    let baseline = prices.iter().sum::<f64>() / prices.len() as f64;
    log::info!("Baseline price over {} states: {baseline:.2}", prices.len());
    Ok(baseline)
}

#[cfg(test)]
mod tests {
    use house_price_predictor::{FeatureRow, LinearModel};

    use super::*;

    struct Constant(f64);

    impl PriceModel for Constant {
        fn predict_row(&self, _row: &FeatureRow) -> f64 {
            self.0
        }
    }

    fn table(json: &serde_json::Value) -> ReferenceTable {
        ReferenceTable::from_json(json).unwrap()
    }

    #[test]
    fn single_state_baseline_equals_its_prediction() {
        let table = table(&serde_json::json!({
            "Texas": { "le_state": 0, "cities": { "Austin": 0 } }
        }));
        let baseline = compute_baseline(&table, &Constant(250_000.0)).unwrap();
        assert!((baseline - 250_000.0).abs() < 1e-9);
    }

    #[test]
    fn averages_over_states_using_first_city() {
        let table = table(&serde_json::json!({
            "Texas": { "le_state": 1, "cities": { "Austin": 10, "Dallas": 99 } },
            "Ohio": { "le_state": 3, "cities": { "Columbus": 20 } }
        }));
        let model = LinearModel {
            intercept: 0.0,
            coefficients: vec![0.0, 0.0, 0.0, 0.0, 1000.0, 1.0],
        };
        // Texas: 1000 + 10, Ohio: 3000 + 20
        let baseline = compute_baseline(&table, &model).unwrap();
        assert!((baseline - 2015.0).abs() < 1e-9);
    }

    #[test]
    fn representative_house_is_fixed() {
        let table = table(&serde_json::json!({
            "Texas": { "le_state": 5, "cities": { "Austin": 7 } }
        }));
        let features = representative_features(&table);
        assert_eq!(
            features,
            vec![FeatureVector {
                bedrooms: 2,
                bathrooms: 3,
                acre_lot: 0.16,
                house_size: 2000,
                state_code: 5,
                city_code: 7,
            }]
        );
    }

    #[test]
    fn skips_states_without_cities_or_label() {
        let table = table(&serde_json::json!({
            "Texas": { "le_state": 0, "cities": { "Austin": 0 } },
            "Wyoming": { "le_state": 1, "cities": {} },
            "Nowhere": { "cities": { "Ghost Town": 0 } }
        }));
        assert_eq!(representative_features(&table).len(), 1);
    }

    #[test]
    fn empty_baseline_is_an_error() {
        let table = table(&serde_json::json!({
            "Wyoming": { "le_state": 1, "cities": {} }
        }));
        assert!(matches!(
            compute_baseline(&table, &Constant(1.0)),
            Err(EstimateError::EmptyBaseline)
        ));
    }
}
