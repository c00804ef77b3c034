#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the house price estimator.
//!
//! Pass `--interactive` (or `-i`) to be prompted for the bind address and
//! port before starting.

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let interactive = std::env::args()
        .skip(1)
        .any(|arg| arg == "--interactive" || arg == "-i");

    if interactive {
        house_price_server::interactive::run().await
    } else {
        house_price_server::run_server().await
    }
}
