//! Interactive prediction form.
//!
//! Mirrors the web form: pick a state, then a city from that state, enter
//! the house attributes, and see the prediction against the baseline. The
//! form repeats until the user declines another prediction.

use std::fmt::Display;
use std::ops::RangeInclusive;
use std::str::FromStr;

use dialoguer::{Confirm, Input, Select};
use house_price_estimate::comparison::baseline_label;
use house_price_estimate::{PricingContext, handle_submit};
use house_price_models::{
    ACRE_LOT_RANGE, BATHROOMS_RANGE, BEDROOMS_RANGE, HOUSE_SIZE_RANGE, HouseAttributes,
};

use crate::render;

const DEFAULT_BEDROOMS: u8 = 3;
const DEFAULT_BATHROOMS: u8 = 2;
const DEFAULT_ACRE_LOT: f64 = 1.0;
const DEFAULT_HOUSE_SIZE: u32 = 600;

fn ranged<T>(label: &str, range: &RangeInclusive<T>, default: T) -> dialoguer::Result<T>
where
    T: Clone + Display + FromStr + PartialOrd,
    T::Err: Display,
{
    Input::new()
        .with_prompt(format!("{label} ({}-{})", range.start(), range.end()))
        .default(default)
        .validate_with(|value: &T| {
            if range.contains(value) {
                Ok(())
            } else {
                Err(format!(
                    "must be between {} and {}",
                    range.start(),
                    range.end()
                ))
            }
        })
        .interact_text()
}

/// Runs the prediction form until the user quits.
///
/// # Errors
///
/// Returns an error if a prompt fails or a submission is rejected.
pub async fn run(context: &PricingContext) -> Result<(), Box<dyn std::error::Error>> {
    println!("House Price Prediction");
    println!("{}", console::style(baseline_label(context.baseline_price())).bold());
    println!();

    let states = context.table().state_names();
    if states.is_empty() {
        println!("No states available.");
        return Ok(());
    }

    let mut rng = rand::rng();

    loop {
        let state_idx = Select::new()
            .with_prompt("State")
            .items(&states)
            .default(0)
            .interact()?;
        let state = states[state_idx];

        let cities = context.table().city_names(state);
        let city = if cities.is_empty() {
            println!("{state} has no cities.");
            String::new()
        } else {
            let city_idx = Select::new()
                .with_prompt("City")
                .items(&cities)
                .default(0)
                .interact()?;
            cities[city_idx].to_string()
        };

        let attributes = HouseAttributes {
            bedrooms: ranged("Number of Bedrooms", &BEDROOMS_RANGE, DEFAULT_BEDROOMS)?,
            bathrooms: ranged("Number of Bathrooms", &BATHROOMS_RANGE, DEFAULT_BATHROOMS)?,
            acre_lot: ranged("Acre Lot", &ACRE_LOT_RANGE, DEFAULT_ACRE_LOT)?,
            house_size: ranged("House Size (sq ft)", &HOUSE_SIZE_RANGE, DEFAULT_HOUSE_SIZE)?,
            state: state.to_string(),
            city,
        };

        let outcome = handle_submit(context, attributes, &mut rng).await?;
        println!();
        render::print(&outcome);
        println!();

        if !Confirm::new()
            .with_prompt("Predict another house?")
            .default(true)
            .interact()?
        {
            break;
        }
    }

    Ok(())
}
