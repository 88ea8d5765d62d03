//! Forecast confidence score.
//!
//! `0.3 + 0.7 * data_points_factor * variance_factor`: rewards both
//! data volume (up to 60 observed days) and low relative volatility.
//! Not a statistical prediction interval, but monotonic in both
//! inputs, which is what downstream prioritization relies on.

use crate::history::coefficient_of_variation;

/// Floor returned for an empty history.
pub const MIN_CONFIDENCE: f64 = 0.3;
/// Spread above the floor earned by volume and stability.
pub const CONFIDENCE_RANGE: f64 = 0.7;
/// History length at which the data-volume factor saturates.
pub const FULL_HISTORY_DAYS: f64 = 60.0;

/// Score forecast confidence for a raw (un-normalized) sales history.
pub fn confidence_score(history: &[f64]) -> f64 {
    if history.is_empty() {
        return MIN_CONFIDENCE;
    }

    let data_points_factor = (history.len() as f64 / FULL_HISTORY_DAYS).min(1.0);

    let cov = coefficient_of_variation(history);
    let variance_factor = (1.0 - cov.min(1.0)).max(0.0);

    MIN_CONFIDENCE + CONFIDENCE_RANGE * data_points_factor * variance_factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_history_is_floor_confidence() {
        assert!((confidence_score(&[]) - MIN_CONFIDENCE).abs() < f64::EPSILON);
    }

    #[test]
    fn constant_full_history_is_maximum_confidence() {
        let history = vec![10.0; 60];
        assert!((confidence_score(&history) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn zero_mean_history_stays_at_floor() {
        // Zero sales every day: CoV defined as 1.0, variance factor 0.
        let history = vec![0.0; 60];
        assert!((confidence_score(&history) - MIN_CONFIDENCE).abs() < 1e-9);
    }

    #[test]
    fn monotonic_in_history_length() {
        // Constant series of growing length: confidence never decreases.
        let mut prev = 0.0;
        for len in 1..=90usize {
            let history = vec![5.0; len];
            let c = confidence_score(&history);
            assert!(
                c >= prev - 1e-12,
                "confidence dropped at len {}: {} < {}",
                len,
                c,
                prev
            );
            prev = c;
        }
        // And it saturates at 60 points.
        assert!(
            (confidence_score(&vec![5.0; 60]) - confidence_score(&vec![5.0; 90])).abs() < 1e-12
        );
    }

    #[test]
    fn monotonic_in_volatility() {
        // Same mean and length, increasing spread: confidence never increases.
        let spreads = [0.0, 1.0, 2.0, 4.0, 8.0];
        let mut prev = f64::INFINITY;
        for spread in spreads {
            let history: Vec<f64> = (0..60)
                .map(|i| if i % 2 == 0 { 10.0 + spread } else { 10.0 - spread })
                .collect();
            let c = confidence_score(&history);
            assert!(
                c <= prev + 1e-12,
                "confidence rose with volatility {}: {} > {}",
                spread,
                c,
                prev
            );
            prev = c;
        }
    }

    #[test]
    fn extreme_volatility_clamps_to_floor() {
        // CoV far above 1: variance factor bottoms out at 0.
        let history: Vec<f64> = (0..60).map(|i| if i == 0 { 600.0 } else { 0.0 }).collect();
        assert!((confidence_score(&history) - MIN_CONFIDENCE).abs() < 1e-9);
    }
}
