//! HTTP handler functions for the house price API.

use actix_web::{HttpResponse, web};
use house_price_estimate::{EstimateError, handle_submit};
use house_price_models::HouseAttributes;
use house_price_server_models::{
    ApiBaseline, ApiCities, ApiHealth, ApiPrediction, ApiStates, PredictRequest,
};

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/states`
///
/// Lists state names in reference order.
pub async fn states(state: web::Data<AppState>) -> HttpResponse {
    let states = state
        .context
        .table()
        .state_names()
        .into_iter()
        .map(String::from)
        .collect();
    HttpResponse::Ok().json(ApiStates { states })
}

/// `GET /api/states/{state}/cities`
///
/// Lists the cities of one state, for the dependent city selector.
pub async fn cities(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let name = path.into_inner();
    let Some(entry) = state.context.table().find_state(&name) else {
        return HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Unknown state '{name}'")
        }));
    };

    HttpResponse::Ok().json(ApiCities {
        state: entry.name.clone(),
        cities: entry.cities.iter().map(|c| c.name.clone()).collect(),
    })
}

/// `GET /api/baseline`
///
/// Returns the average representative price across all states.
pub async fn baseline(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiBaseline::new(state.context.baseline_price()))
}

/// `POST /api/predict`
///
/// Predicts a price for the submitted house and compares it with the
/// baseline. Unknown states or cities and geocoding misses are reported in
/// the response body, not as HTTP errors.
#[allow(clippy::future_not_send)]
pub async fn predict(state: web::Data<AppState>, body: web::Json<PredictRequest>) -> HttpResponse {
    let attributes = HouseAttributes::from(body.into_inner());
    let mut rng = rand::rng();

    match handle_submit(&state.context, attributes, &mut rng).await {
        Ok(render) => HttpResponse::Ok().json(ApiPrediction::from(render)),
        Err(EstimateError::InvalidInput(e)) => {
            log::debug!("Rejected prediction request: {e}");
            HttpResponse::BadRequest().json(serde_json::json!({
                "error": e.to_string()
            }))
        }
        Err(e) => {
            log::error!("Failed to predict price: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to predict price"
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, test, web};
    use async_trait::async_trait;
    use house_price_estimate::PricingContext;
    use house_price_geocoder::{GeocodeError, Geocoder};
    use house_price_models::GeoPoint;
    use house_price_predictor::{FeatureRow, PriceModel};
    use house_price_reference::ReferenceTable;

    use crate::{AppState, configure_api};

    struct Constant(f64);

    impl PriceModel for Constant {
        fn predict_row(&self, _row: &FeatureRow) -> f64 {
            self.0
        }
    }

    struct AustinOnly;

    #[async_trait]
    impl Geocoder for AustinOnly {
        async fn geocode(&self, query: &str) -> Result<Option<GeoPoint>, GeocodeError> {
            Ok((query == "Austin, Texas").then(|| GeoPoint::new(30.2672, -97.7431)))
        }
    }

    fn app_state() -> web::Data<AppState> {
        let table = ReferenceTable::from_json(&serde_json::json!({
            "Texas": { "le_state": 0, "cities": { "Austin": 0, "Waco": 1 } },
            "New York": { "le_state": 1, "cities": { "Albany": 0 } }
        }))
        .unwrap();
        let context =
            PricingContext::new(table, Arc::new(Constant(250_000.0)), Arc::new(AustinOnly))
                .unwrap();
        web::Data::new(AppState {
            context: Arc::new(context),
        })
    }

    fn body(state: &str, city: &str, house_size: u32) -> serde_json::Value {
        serde_json::json!({
            "bedrooms": 3,
            "bathrooms": 2,
            "acreLot": 1.0,
            "houseSize": house_size,
            "state": state,
            "city": city
        })
    }

    #[actix_web::test]
    async fn lists_states_and_cities() {
        let app =
            test::init_service(App::new().app_data(app_state()).configure(configure_api)).await;

        let req = test::TestRequest::get().uri("/api/states").to_request();
        let json: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(json["states"], serde_json::json!(["Texas", "New York"]));

        let req = test::TestRequest::get()
            .uri("/api/states/NewYork/cities")
            .to_request();
        let json: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(json["state"], "New York");
        assert_eq!(json["cities"], serde_json::json!(["Albany"]));

        let req = test::TestRequest::get()
            .uri("/api/states/Ohio/cities")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn returns_baseline() {
        let app =
            test::init_service(App::new().app_data(app_state()).configure(configure_api)).await;
        let req = test::TestRequest::get().uri("/api/baseline").to_request();
        let json: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(json["baselinePrice"], 250_000.0);
        assert_eq!(json["label"], "Average of all States: $250,000.00");
    }

    #[actix_web::test]
    async fn predicts_with_map_markers() {
        let app =
            test::init_service(App::new().app_data(app_state()).configure(configure_api)).await;
        let req = test::TestRequest::post()
            .uri("/api/predict")
            .set_json(body("Texas", "Austin", 600))
            .to_request();
        let json: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(json["status"], "estimated");
        assert_eq!(json["predictedPrice"], 250_000.0);
        assert_eq!(json["classification"], "neutral");
        assert_eq!(json["priceColor"], "black");
        assert_eq!(json["sign"], "");
        assert_eq!(json["map"]["status"], "resolved");
        assert_eq!(json["map"]["zoom"], 12);
        assert_eq!(json["map"]["markers"]["features"].as_array().unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn unknown_city_asks_for_valid_selection() {
        let app =
            test::init_service(App::new().app_data(app_state()).configure(configure_api)).await;
        let req = test::TestRequest::post()
            .uri("/api/predict")
            .set_json(body("Texas", "Albany", 600))
            .to_request();
        let json: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(json["status"], "invalidSelection");
        assert_eq!(
            json["message"],
            "Please select valid state and city values to get predictions."
        );
    }

    #[actix_web::test]
    async fn out_of_range_input_is_bad_request() {
        let app =
            test::init_service(App::new().app_data(app_state()).configure(configure_api)).await;
        let req = test::TestRequest::post()
            .uri("/api/predict")
            .set_json(body("Texas", "Austin", 10_000))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }
}
