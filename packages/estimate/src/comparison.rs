//! Comparison of a prediction against the baseline, and the text shown for
//! it.

use std::cmp::Ordering;

use house_price_models::{HighlightColor, PriceClassification};

/// Shown instead of a prediction when the state or city has no label.
pub const INVALID_SELECTION_MESSAGE: &str =
    "Please select valid state and city values to get predictions.";
/// Shown in place of the map when the city cannot be geocoded.
pub const NO_LOCATION_MESSAGE: &str = "Choose a location to predict";
/// Shown when nearby points cannot be generated.
pub const NO_POINTS_MESSAGE: &str =
    "Could not generate random points. Please check the city and state values.";

/// Result of comparing a predicted price with the baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceComparison {
    /// Whether the prediction is above, below or equal to the baseline.
    pub classification: PriceClassification,
    /// `(predicted - baseline) / predicted * 100`. `None` when the
    /// predicted price is zero.
    pub percentage_difference: Option<f64>,
}

impl PriceComparison {
    /// Color of the predicted price text.
    #[must_use]
    pub const fn price_color(&self) -> HighlightColor {
        self.classification.color()
    }

    /// Color of the percentage text, following the sign of the difference.
    #[must_use]
    pub fn percentage_color(&self) -> HighlightColor {
        classify(self.percentage_difference.unwrap_or(0.0), 0.0).color()
    }

    /// `"+"` for a positive difference, empty otherwise.
    #[must_use]
    pub fn sign(&self) -> &'static str {
        match self.percentage_difference {
            Some(diff) if diff > 0.0 => "+",
            _ => "",
        }
    }

    /// Signed percentage with two decimals, e.g. `"+12.50%"`.
    #[must_use]
    pub fn percentage_text(&self) -> Option<String> {
        self.percentage_difference
            .map(|diff| format!("{}{diff:.2}%", self.sign()))
    }
}

fn classify(predicted: f64, baseline: f64) -> PriceClassification {
    match predicted.partial_cmp(&baseline) {
        Some(Ordering::Greater) => PriceClassification::Above,
        Some(Ordering::Less) => PriceClassification::Below,
        Some(Ordering::Equal) | None => PriceClassification::Neutral,
    }
}

/// Percentage difference relative to the predicted price.
///
/// The denominator is the predicted price, not the baseline.
#[must_use]
pub fn percentage_difference(predicted: f64, baseline: f64) -> Option<f64> {
    if predicted == 0.0 {
        return None;
    }
    let diff = (predicted - baseline) / predicted * 100.0;
    diff.is_finite().then_some(diff)
}

/// Compares a predicted price with the baseline.
#[must_use]
pub fn compare(predicted: f64, baseline: f64) -> PriceComparison {
    PriceComparison {
        classification: classify(predicted, baseline),
        percentage_difference: percentage_difference(predicted, baseline),
    }
}

/// Formats a price as dollars with thousands separators, e.g.
/// `"$1,234,567.89"`.
#[must_use]
pub fn format_price(value: f64) -> String {
    if !value.is_finite() {
        return format!("${value}");
    }

    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((&fixed, "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        "-"
    } else {
        ""
    };
    format!("{sign}${grouped}.{cents}")
}

/// `"Average of all States: $X"`.
#[must_use]
pub fn baseline_label(baseline: f64) -> String {
    format!("Average of all States: {}", format_price(baseline))
}

/// `"Predicted Price: $X"`, used both as result text and map popup.
#[must_use]
pub fn predicted_label(predicted: f64) -> String {
    format!("Predicted Price: {}", format_price(predicted))
}
