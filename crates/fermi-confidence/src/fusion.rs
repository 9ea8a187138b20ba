//! Scalar fusion of independent confidences.

use fermi_core::constants::NEUTRAL_CONFIDENCE;
use fermi_core::Confidence;

/// Geometric mean of the non-zero values.
///
/// Zeros and non-finite values are skipped. With nothing left the neutral
/// 0.5 is returned.
pub fn geometric_mean(values: &[f64]) -> f64 {
    let (log_sum, count) = values
        .iter()
        .filter(|v| v.is_finite() && **v > 0.0)
        .fold((0.0_f64, 0_usize), |(sum, n), v| (sum + v.ln(), n + 1));
    if count == 0 {
        return NEUTRAL_CONFIDENCE;
    }
    (log_sum / count as f64).exp()
}

/// Fuse independent confidences: one weak input drags the whole result down
/// multiplicatively.
pub fn fuse(confidences: &[Confidence]) -> Confidence {
    let raw: Vec<f64> = confidences.iter().map(|c| c.value()).collect();
    Confidence::new(geometric_mean(&raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_certain_stays_certain() {
        assert_eq!(geometric_mean(&[1.0, 1.0]), 1.0);
    }

    #[test]
    fn two_values() {
        assert!((geometric_mean(&[0.8, 0.5]) - 0.632).abs() < 1e-3);
    }

    #[test]
    fn empty_and_all_zero_are_neutral() {
        assert_eq!(geometric_mean(&[]), 0.5);
        assert_eq!(geometric_mean(&[0.0, 0.0]), 0.5);
    }

    #[test]
    fn zeros_are_skipped() {
        assert!((geometric_mean(&[0.0, 0.64]) - 0.64).abs() < 1e-12);
    }

    #[test]
    fn fuse_matches_market_size_example() {
        let fused = fuse(&[Confidence::CERTAIN, Confidence::CERTAIN, Confidence::new(0.5)]);
        assert!((fused.value() - 0.7937).abs() < 1e-3);
    }
}
