//! Shared numeric helpers for the analysis modules.
//!
//! Conventions:
//!   - Empty input never panics; helpers return None instead.
//!   - Standard deviation is the sample estimate (n - 1 denominator).
//!   - Quantiles use linear interpolation between closest ranks.
//!   - Ratios with an undefined denominator are None, never 0.0 or NaN.

/// Arithmetic mean. None for empty input.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1). None for fewer than two values.
pub fn sample_stddev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}

/// Coefficient of variation: stddev / mean.
/// None when the stddev is undefined or the mean is zero.
pub fn coefficient_of_variation(values: &[f64]) -> Option<f64> {
    let sd = sample_stddev(values)?;
    let m = mean(values)?;
    if m == 0.0 {
        return None;
    }
    Some(sd / m)
}

/// Median via the 0.5 quantile.
pub fn median(values: &[f64]) -> Option<f64> {
    quantile(values, 0.5)
}

/// Quantile with linear interpolation between closest ranks.
/// `q` must be in [0, 1]. None for empty input.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    debug_assert!((0.0..=1.0).contains(&q), "quantile out of range: {q}");
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        return Some(sorted[lo]);
    }
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Assign each value to one of `bins` equal-population buckets (0-based,
/// bucket 0 = smallest values).
///
/// Ties are broken by first occurrence: values are ranked with a stable
/// sort, so two equal values land in buckets in input order. Bucket sizes
/// differ by at most one. This mirrors rank(method="first") semantics and
/// keeps segment membership deterministic at quantile edges.
pub fn equal_population_buckets(values: &[f64], bins: usize) -> Vec<usize> {
    assert!(bins > 0, "bins must be > 0");
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        values[a]
            .partial_cmp(&values[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let mut buckets = vec![0usize; n];
    for (rank, &idx) in order.iter().enumerate() {
        buckets[idx] = rank * bins / n;
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_and_stddev_basics() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[2.0, 4.0]), Some(3.0));
        assert_eq!(sample_stddev(&[5.0]), None);
        // Sample stddev of [2, 4, 4, 4, 5, 5, 7, 9] is ~2.138
        let sd = sample_stddev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((sd - 2.138).abs() < 0.001);
    }

    #[test]
    fn cv_is_none_for_zero_mean_or_single_value() {
        assert_eq!(coefficient_of_variation(&[100.0]), None);
        assert_eq!(coefficient_of_variation(&[-1.0, 1.0]), None);
        let cv = coefficient_of_variation(&[100.0, 100.0, 100.0, 100.0]).unwrap();
        assert_eq!(cv, 0.0);
    }

    #[test]
    fn quantile_interpolates() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&values, 0.0), Some(1.0));
        assert_eq!(quantile(&values, 1.0), Some(4.0));
        assert_eq!(quantile(&values, 0.5), Some(2.5));
        assert_eq!(median(&values), Some(2.5));
    }

    #[test]
    fn buckets_are_equal_population() {
        let values: Vec<f64> = (0..23).map(|i| (i * 7 % 23) as f64).collect();
        let buckets = equal_population_buckets(&values, 5);
        let mut counts = [0usize; 5];
        for b in buckets {
            counts[b] += 1;
        }
        // 23 / 5: buckets of size 4 or 5.
        for c in counts {
            assert!(c == 4 || c == 5, "bucket size {c}");
        }
    }

    #[test]
    fn bucket_ties_break_by_first_occurrence() {
        let values = [1.0, 1.0, 1.0, 1.0];
        let buckets = equal_population_buckets(&values, 4);
        assert_eq!(buckets, vec![0, 1, 2, 3]);
    }
}
