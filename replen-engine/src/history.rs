//! Sales history normalization and the small statistics shared with
//! the confidence score.
//!
//! Every rolling-sum computation downstream runs on a fixed-length
//! array produced by [`normalize`], so window arithmetic can never go
//! out of range.

/// Pad or truncate a most-recent-first daily sales series to exactly
/// `window` entries.
///
/// Real observations stay at the front (the recent end); missing older
/// days are filled with zeros at the tail. Empty input yields an
/// all-zero array. Idempotent: normalizing an already-normalized
/// series is a no-op.
pub fn normalize(history: &[f64], window: usize) -> Vec<f64> {
    let mut out: Vec<f64> = history.iter().copied().take(window).collect();
    out.resize(window, 0.0);
    out
}

/// Sum of the first `n` entries, i.e. the most recent `n` days.
pub fn sum_recent(normalized: &[f64], n: usize) -> f64 {
    normalized.iter().take(n).sum()
}

/// Sum of entries in `[start, end)`, an older slice of the series.
pub fn sum_range(normalized: &[f64], start: usize, end: usize) -> f64 {
    let end = end.min(normalized.len());
    if start >= end {
        return 0.0;
    }
    normalized[start..end].iter().sum()
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation.
pub fn stddev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Relative volatility: stddev / mean, with 1.0 for a zero mean.
pub fn coefficient_of_variation(values: &[f64]) -> f64 {
    let m = mean(values);
    if m == 0.0 {
        return 1.0;
    }
    stddev(values) / m
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_truncates_to_window() {
        let history: Vec<f64> = (0..120).map(|i| i as f64).collect();
        let n = normalize(&history, 90);
        assert_eq!(n.len(), 90);
        // Most recent entries survive, oldest are dropped.
        assert!((n[0] - 0.0).abs() < f64::EPSILON);
        assert!((n[89] - 89.0).abs() < f64::EPSILON);
    }

    #[test]
    fn normalize_pads_short_history_with_zeros() {
        let n = normalize(&[5.0, 3.0], 7);
        assert_eq!(n, vec![5.0, 3.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn normalize_empty_yields_all_zeros() {
        let n = normalize(&[], 30);
        assert_eq!(n.len(), 30);
        assert!(n.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn normalize_is_idempotent() {
        for len in [0usize, 3, 30, 90, 200] {
            let history: Vec<f64> = (0..len).map(|i| (i % 7) as f64).collect();
            let once = normalize(&history, 90);
            let twice = normalize(&once, 90);
            assert_eq!(once, twice, "idempotence failed for len {}", len);
        }
    }

    #[test]
    fn sum_recent_counts_the_newest_days() {
        let n = normalize(&[10.0, 10.0, 10.0, 1.0, 1.0], 5);
        assert!((sum_recent(&n, 3) - 30.0).abs() < 0.01);
        assert!((sum_recent(&n, 5) - 32.0).abs() < 0.01);
    }

    #[test]
    fn sum_range_handles_out_of_range_bounds() {
        let n = vec![1.0, 2.0, 3.0];
        assert!((sum_range(&n, 1, 3) - 5.0).abs() < 0.01);
        assert!((sum_range(&n, 2, 10) - 3.0).abs() < 0.01);
        assert_eq!(sum_range(&n, 5, 10), 0.0);
    }

    #[test]
    fn stddev_of_constant_series_is_zero() {
        let v = vec![4.0; 30];
        assert!(stddev(&v).abs() < f64::EPSILON);
        assert!(coefficient_of_variation(&v).abs() < f64::EPSILON);
    }

    #[test]
    fn coefficient_of_variation_is_one_for_zero_mean() {
        assert!((coefficient_of_variation(&[0.0, 0.0, 0.0]) - 1.0).abs() < f64::EPSILON);
    }
}
