//! Bounded random price deviation.

use rand::Rng;

/// Default maximum deviation as a fraction of the base value.
pub const DEFAULT_DEVIATION: f64 = 0.10;

/// Returns `value + value * fraction * u` with `u` drawn uniformly from
/// `[-1, 1]`, i.e. a symmetric jitter of at most `|value * fraction|`.
pub fn perturb<R: Rng + ?Sized>(value: f64, fraction: f64, rng: &mut R) -> f64 {
    let u: f64 = rng.random_range(-1.0..=1.0);
    value + value * fraction * u
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn stays_within_bounds() {
        let mut rng = StdRng::seed_from_u64(11);
        for value in [250_000.0, -1_000.0, 0.0, 1.5] {
            for fraction in [DEFAULT_DEVIATION, 0.5, -0.2] {
                let bound = (value * fraction).abs();
                for _ in 0..500 {
                    let v = perturb(value, fraction, &mut rng);
                    assert!(
                        v >= value - bound && v <= value + bound,
                        "{v} outside {value} ± {bound}"
                    );
                }
            }
        }
    }

    #[test]
    fn zero_fraction_is_identity() {
        let mut rng = StdRng::seed_from_u64(5);
        assert!((perturb(123_456.0, 0.0, &mut rng) - 123_456.0).abs() < f64::EPSILON);
    }

    #[test]
    fn draws_vary() {
        let mut rng = StdRng::seed_from_u64(9);
        let draws: Vec<f64> = (0..20)
            .map(|_| perturb(100_000.0, DEFAULT_DEVIATION, &mut rng))
            .collect();
        assert!(draws.windows(2).any(|w| (w[0] - w[1]).abs() > f64::EPSILON));
    }
}
