//! Consensus selection.

use fermi_core::config::ConsensusConfig;
use fermi_core::Confidence;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clustering::{cluster, largest};
use crate::outliers::{median, remove_outliers};

/// Outcome of a consensus extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consensus {
    pub value: f64,
    /// Size of the winning cluster, or of the whole working set on fallback.
    pub cluster_size: usize,
    /// Finite samples considered.
    pub sample_count: usize,
    pub outliers_removed: Vec<f64>,
    pub cluster_count: usize,
    /// True when no cluster reached the minimum size.
    pub used_fallback: bool,
}

impl Consensus {
    pub fn confidence(&self) -> Confidence {
        cluster_confidence(self.cluster_size, self.used_fallback)
    }
}

/// Confidence earned by agreement: 3 → 0.70, 4 → 0.80, 5+ → 0.85; fallback 0.50.
pub fn cluster_confidence(cluster_size: usize, used_fallback: bool) -> Confidence {
    if used_fallback {
        return Confidence::new(0.50);
    }
    Confidence::new(match cluster_size {
        0 | 1 => 0.50,
        2 => 0.60,
        3 => 0.70,
        4 => 0.80,
        _ => 0.85,
    })
}

/// Consensus value with default settings, `None` for fewer than 3 samples.
pub fn consensus(samples: &[f64]) -> Option<f64> {
    extract(samples, &ConsensusConfig::default()).map(|c| c.value)
}

/// Full consensus extraction.
///
/// Non-finite samples are ignored. Returns `None` when fewer than
/// `min_samples` finite samples remain: insufficient evidence, not an error.
pub fn extract(samples: &[f64], config: &ConsensusConfig) -> Option<Consensus> {
    let mut sorted: Vec<f64> = samples.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.len() < config.min_samples.max(1) {
        debug!(samples = sorted.len(), min = config.min_samples, "too few samples for consensus");
        return None;
    }
    sorted.sort_by(f64::total_cmp);

    let (working, outliers_removed) = remove_outliers(&sorted, config.iqr_multiplier);
    let clusters = cluster(&working, config.similarity_tolerance);

    let (value, cluster_size, used_fallback) = match largest(&clusters) {
        Some(best) if best.len() >= config.min_cluster_size => (median(best), best.len(), false),
        _ => (median(&working), working.len(), true),
    };

    debug!(
        samples = sorted.len(),
        outliers = outliers_removed.len(),
        clusters = clusters.len(),
        cluster_size,
        used_fallback,
        value,
        "consensus extracted"
    );

    Some(Consensus {
        value,
        cluster_size,
        sample_count: sorted.len(),
        outliers_removed,
        cluster_count: clusters.len(),
        used_fallback,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fewer_than_three_samples_is_none() {
        assert_eq!(consensus(&[]), None);
        assert_eq!(consensus(&[1.0, 2.0]), None);
    }

    #[test]
    fn outlier_excluded_from_consensus() {
        let result = extract(&[10.0, 11.0, 9.0, 10.0, 12.0, 1000.0], &ConsensusConfig::default())
            .unwrap();
        assert_eq!(result.outliers_removed, vec![1000.0]);
        assert_eq!(result.cluster_size, 5);
        assert!((result.value - 10.0).abs() < 1e-12);
        assert!(!result.used_fallback);
        assert!((result.confidence().value() - 0.85).abs() < 1e-12);
    }

    #[test]
    fn no_dominant_cluster_falls_back_to_median_of_all() {
        let result = extract(&[1.0, 10.0, 100.0], &ConsensusConfig::default()).unwrap();
        assert!(result.used_fallback);
        assert!((result.value - 10.0).abs() < 1e-12);
        assert!((result.confidence().value() - 0.50).abs() < 1e-12);
    }

    #[test]
    fn non_finite_samples_are_ignored() {
        assert_eq!(consensus(&[f64::NAN, 1.0, 2.0]), None);
        assert_eq!(consensus(&[f64::INFINITY, 10.0, 10.0, 10.0]), Some(10.0));
    }

    #[test]
    fn confidence_tiers() {
        assert_eq!(cluster_confidence(3, false).value(), 0.70);
        assert_eq!(cluster_confidence(4, false).value(), 0.80);
        assert_eq!(cluster_confidence(9, false).value(), 0.85);
        assert_eq!(cluster_confidence(9, true).value(), 0.50);
    }
}
