#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front-end for the house price estimator.
//!
//! ```text
//! house_price_cli predict --state Texas --city Austin [--bedrooms 3] [--bathrooms 2]
//!                         [--acre-lot 1.0] [--house-size 600]
//! house_price_cli states [--state Texas]
//! ```
//!
//! Running with no subcommand opens the interactive prediction form.
//! Data locations come from the same environment variables as the server
//! (`REFERENCE_DATA_PATH`, `MODEL_PATH`, `NOMINATIM_URL`, `NEARBY_POINTS`).

mod interactive;
mod render;

use clap::{Parser, Subcommand};
use house_price_estimate::{ContextConfig, PricingContext, handle_submit};
use house_price_models::HouseAttributes;
use house_price_reference::ReferenceTable;

#[derive(Parser)]
#[command(name = "house_price_cli", about = "Estimate house prices by location")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict the price of one house
    Predict {
        /// Number of bedrooms (2-5)
        #[arg(long, default_value_t = 3)]
        bedrooms: u8,
        /// Number of bathrooms (1-4)
        #[arg(long, default_value_t = 2)]
        bathrooms: u8,
        /// Lot size in acres (0.0-1.2)
        #[arg(long, default_value_t = 1.0)]
        acre_lot: f64,
        /// House size in square feet (100-4363)
        #[arg(long, default_value_t = 600)]
        house_size: u32,
        /// State name
        #[arg(long)]
        state: String,
        /// City name within the state
        #[arg(long)]
        city: String,
    },
    /// List states, or the cities of one state
    States {
        /// Show the cities of this state
        #[arg(long)]
        state: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();
    let config = ContextConfig::from_env();

    match cli.command {
        None => {
            let context = PricingContext::initialize(&config)?;
            interactive::run(&context).await?;
        }
        Some(Commands::Predict {
            bedrooms,
            bathrooms,
            acre_lot,
            house_size,
            state,
            city,
        }) => {
            let context = PricingContext::initialize(&config)?;
            let attributes = HouseAttributes {
                bedrooms,
                bathrooms,
                acre_lot,
                house_size,
                state,
                city,
            };
            let outcome = handle_submit(&context, attributes, &mut rand::rng()).await?;
            render::print(&outcome);
        }
        Some(Commands::States { state }) => {
            let table = ReferenceTable::load(&config.reference_path)?;
            match state {
                Some(name) => {
                    let Some(entry) = table.find_state(&name) else {
                        eprintln!("Unknown state '{name}'");
                        std::process::exit(1);
                    };
                    println!("{} ({} cities)", entry.name, entry.cities.len());
                    for city in &entry.cities {
                        println!("  {}", city.name);
                    }
                }
                None => {
                    for name in table.state_names() {
                        println!("{name}");
                    }
                }
            }
        }
    }

    Ok(())
}
