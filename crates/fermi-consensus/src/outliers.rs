//! IQR with Tukey fences.
//!
//! Uses Q1 - k*IQR and Q3 + k*IQR as fences (k = 1.5 default).

/// Split sorted samples into (kept, removed) by Tukey fences.
///
/// If every value would be removed, nothing is removed.
pub fn remove_outliers(sorted: &[f64], multiplier: f64) -> (Vec<f64>, Vec<f64>) {
    if sorted.is_empty() {
        return (Vec::new(), Vec::new());
    }

    let q1 = percentile(sorted, 25.0);
    let q3 = percentile(sorted, 75.0);
    let iqr = q3 - q1;
    let lower_fence = q1 - multiplier * iqr;
    let upper_fence = q3 + multiplier * iqr;

    let (kept, removed): (Vec<f64>, Vec<f64>) = sorted
        .iter()
        .copied()
        .partition(|v| *v >= lower_fence && *v <= upper_fence);

    if kept.is_empty() {
        return (sorted.to_vec(), Vec::new());
    }
    (kept, removed)
}

/// Compute percentile using linear interpolation over sorted data.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }

    let rank = (p / 100.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let frac = rank - lower as f64;

    if upper >= sorted.len() {
        sorted[sorted.len() - 1]
    } else {
        sorted[lower] * (1.0 - frac) + sorted[upper] * frac
    }
}

/// Median of sorted data.
pub fn median(sorted: &[f64]) -> f64 {
    percentile(sorted, 50.0)
}
