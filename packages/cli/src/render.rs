//! Terminal rendering of a [`RenderState`].

use console::{StyledObject, style};
use house_price_estimate::comparison::{baseline_label, predicted_label};
use house_price_estimate::{Estimate, LocationView, RenderState, format_price};
use house_price_models::HighlightColor;

fn colored<D>(value: D, color: HighlightColor) -> StyledObject<D> {
    match color {
        HighlightColor::Red => style(value).red(),
        HighlightColor::Green => style(value).green(),
        HighlightColor::Black => style(value),
    }
}

/// Lines printed for one submission outcome.
pub fn lines(state: &RenderState) -> Vec<String> {
    let mut out = vec![style(baseline_label(state.baseline_price())).bold().to_string()];

    match state {
        RenderState::InvalidSelection { message, .. } => {
            out.push(style(message).yellow().to_string());
        }
        RenderState::Estimated(estimate) => estimate_lines(estimate, &mut out),
    }

    out
}

fn estimate_lines(estimate: &Estimate, out: &mut Vec<String>) {
    let comparison = &estimate.comparison;

    out.push(
        colored(
            predicted_label(estimate.predicted_price),
            comparison.price_color(),
        )
        .to_string(),
    );

    let percentage = comparison
        .percentage_text()
        .unwrap_or_else(|| "n/a".to_string());
    out.push(format!(
        "Percentage Difference: {}",
        colored(percentage, comparison.percentage_color())
    ));

    match &estimate.location {
        LocationView::Resolved {
            center,
            zoom,
            nearby,
            ..
        } => {
            out.push(format!(
                "Location: {:.4}, {:.4} (zoom {zoom})",
                center.latitude, center.longitude
            ));
            for priced in nearby {
                out.push(format!(
                    "  {:.4}, {:.4}  Estimated Price: {}",
                    priced.point.latitude,
                    priced.point.longitude,
                    format_price(priced.price)
                ));
            }
        }
        LocationView::Unresolved { message, error } => {
            out.push((*message).to_string());
            out.push(style(error).red().to_string());
        }
    }
}

/// Prints the outcome of one submission to stdout.
pub fn print(state: &RenderState) {
    for line in lines(state) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use house_price_estimate::comparison::{INVALID_SELECTION_MESSAGE, NO_POINTS_MESSAGE};
    use house_price_estimate::{PricedPoint, compare};
    use house_price_models::{FeatureVector, GeoPoint, HouseAttributes};

    use super::*;

    fn plain(state: &RenderState) -> Vec<String> {
        lines(state)
            .iter()
            .map(|l| console::strip_ansi_codes(l).into_owned())
            .collect()
    }

    fn estimate(predicted: f64, location: LocationView) -> RenderState {
        RenderState::Estimated(Box::new(Estimate {
            attributes: HouseAttributes {
                bedrooms: 3,
                bathrooms: 2,
                acre_lot: 1.0,
                house_size: 600,
                state: "Texas".to_string(),
                city: "Austin".to_string(),
            },
            features: FeatureVector {
                bedrooms: 3,
                bathrooms: 2,
                acre_lot: 1.0,
                house_size: 600,
                state_code: 0,
                city_code: 0,
            },
            predicted_price: predicted,
            baseline_price: 250_000.0,
            comparison: compare(predicted, 250_000.0),
            location,
        }))
    }

    #[test]
    fn invalid_selection_shows_baseline_and_message() {
        let out = plain(&RenderState::InvalidSelection {
            baseline_price: 250_000.0,
            message: INVALID_SELECTION_MESSAGE,
        });
        assert_eq!(
            out,
            vec![
                "Average of all States: $250,000.00".to_string(),
                INVALID_SELECTION_MESSAGE.to_string(),
            ]
        );
    }

    #[test]
    fn resolved_estimate_lists_nearby_points() {
        let out = plain(&estimate(
            200_000.0,
            LocationView::Resolved {
                center: GeoPoint::new(30.2672, -97.7431),
                zoom: 12,
                popup: "Predicted Price: $200,000.00".to_string(),
                nearby: vec![PricedPoint {
                    point: GeoPoint::new(30.25, -97.76),
                    price: 210_000.0,
                }],
            },
        ));

        assert_eq!(out[1], "Predicted Price: $200,000.00");
        assert_eq!(out[2], "Percentage Difference: -25.00%");
        assert_eq!(out[3], "Location: 30.2672, -97.7431 (zoom 12)");
        assert_eq!(out[4], "  30.2500, -97.7600  Estimated Price: $210,000.00");
    }

    #[test]
    fn unresolved_estimate_shows_error_text() {
        let out = plain(&estimate(
            0.0,
            LocationView::Unresolved {
                message: "Choose a location to predict",
                error: NO_POINTS_MESSAGE,
            },
        ));

        assert_eq!(out[2], "Percentage Difference: n/a");
        assert_eq!(out[3], "Choose a location to predict");
        assert_eq!(out[4], NO_POINTS_MESSAGE);
    }
}
