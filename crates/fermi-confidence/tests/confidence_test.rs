//! Property tests for confidence fusion and banding.

use fermi_confidence::{band, fuse, geometric_mean, ConfidenceBand};
use fermi_core::config::BandingConfig;
use fermi_core::Confidence;
use proptest::prelude::*;

proptest! {
    #[test]
    fn fused_confidence_stays_in_unit_range(values in prop::collection::vec(0.0_f64..=1.0, 0..12)) {
        let fused = geometric_mean(&values);
        prop_assert!((0.0..=1.0).contains(&fused));
    }

    #[test]
    fn fusion_never_exceeds_strongest_input(
        values in prop::collection::vec(0.01_f64..=1.0, 1..12),
    ) {
        let max = values.iter().copied().fold(0.0_f64, f64::max);
        let min = values.iter().copied().fold(1.0_f64, f64::min);
        let fused = geometric_mean(&values);
        prop_assert!(fused <= max + 1e-12);
        prop_assert!(fused >= min - 1e-12);
    }

    /// A weaker input never raises the fused confidence.
    #[test]
    fn weaker_input_lowers_fusion(
        values in prop::collection::vec(0.05_f64..=1.0, 1..8),
        weak in 0.01_f64..0.05,
    ) {
        let base = fuse(&values.iter().map(|v| Confidence::new(*v)).collect::<Vec<_>>());
        let mut with_weak = values.clone();
        with_weak.push(weak);
        let lowered = geometric_mean(&with_weak);
        prop_assert!(lowered <= base.value() + 1e-12);
    }

    #[test]
    fn banding_is_monotonic_in_similarity(
        a in 0.0_f64..=1.0,
        b in 0.0_f64..=1.0,
        coverage in 0.0_f64..=0.3,
        validated in any::<bool>(),
    ) {
        let config = BandingConfig::default();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let low = band(lo, coverage, validated, &config).overall.value();
        let high = band(hi, coverage, validated, &config).overall.value();
        prop_assert!(high + 1e-12 >= low);
    }

    #[test]
    fn banding_is_monotonic_in_coverage(
        similarity in 0.0_f64..=1.0,
        a in 0.0_f64..=0.3,
        b in 0.0_f64..=0.3,
        validated in any::<bool>(),
    ) {
        let config = BandingConfig::default();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let low = band(similarity, lo, validated, &config).overall.value();
        let high = band(similarity, hi, validated, &config).overall.value();
        prop_assert!(high + 1e-12 >= low);
    }

    #[test]
    fn validation_never_hurts(similarity in 0.0_f64..=1.0, coverage in 0.0_f64..=0.3) {
        let config = BandingConfig::default();
        let unvalidated = band(similarity, coverage, false, &config).overall.value();
        let validated = band(similarity, coverage, true, &config).overall.value();
        prop_assert!(validated + 1e-12 >= unvalidated);
    }

    #[test]
    fn band_agrees_with_classify(
        similarity in 0.0_f64..=1.0,
        coverage in 0.0_f64..=0.3,
        validated in any::<bool>(),
    ) {
        let result = band(similarity, coverage, validated, &BandingConfig::default());
        prop_assert_eq!(result.band, ConfidenceBand::classify(result.overall.value()));
        prop_assert!(!result.rationale.is_empty());
        prop_assert!(!result.deciding_axes.is_empty());
    }
}
