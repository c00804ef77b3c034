#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the house price estimator.
//!
//! Serves the REST API for listing states and cities, reading the baseline
//! average, and predicting prices, plus the static frontend files. The
//! [`PricingContext`] is built once before the server binds and shared
//! read-only by every worker.

mod handlers;
pub mod interactive;

use std::sync::Arc;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use house_price_estimate::{ContextConfig, PricingContext};

/// Shared application state.
pub struct AppState {
    /// Reference table, model, baseline and geocoder.
    pub context: Arc<PricingContext>,
}

/// Registers the `/api` routes.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/states", web::get().to(handlers::states))
            .route("/states/{state}/cities", web::get().to(handlers::cities))
            .route("/baseline", web::get().to(handlers::baseline))
            .route("/predict", web::post().to(handlers::predict)),
    );
}

/// Starts the house price API server.
///
/// Loads the reference data, the model artifact and the baseline (see
/// [`PricingContext::initialize`]) and then starts the Actix-Web HTTP
/// server. This is a regular async function; the caller is responsible for
/// providing the async runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the pricing context cannot be
/// initialized, or if the HTTP server fails to bind or encounters a runtime
/// error.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::try_init_custom_env("RUST_LOG").ok();

    log::info!("Initializing pricing context...");
    let context = PricingContext::initialize(&ContextConfig::from_env()).map_err(|e| {
        log::error!("Failed to initialize pricing context: {e}");
        std::io::Error::other(e)
    })?;

    let state = web::Data::new(AppState {
        context: Arc::new(context),
    });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    let static_dir = std::env::var("STATIC_DIR").unwrap_or_else(|_| "app/dist".to_string());

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure_api)
            // Serve frontend static files (production)
            .service(Files::new("/", &static_dir).index_file("index.html"))
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
