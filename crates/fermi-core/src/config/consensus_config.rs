use serde::{Deserialize, Serialize};

use super::defaults;

/// Consensus extractor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsensusConfig {
    /// Tukey fence multiplier `k`. Default: 1.5.
    pub iqr_multiplier: f64,
    /// Maximum relative distance to a cluster's running median. Default: 0.30.
    pub similarity_tolerance: f64,
    /// Smallest cluster whose median is trusted. Default: 3.
    pub min_cluster_size: usize,
    /// Fewer samples than this yields no consensus. Default: 3.
    pub min_samples: usize,
}

impl Default for ConsensusConfig {
    fn default() -> Self {
        Self {
            iqr_multiplier: defaults::DEFAULT_IQR_MULTIPLIER,
            similarity_tolerance: defaults::DEFAULT_SIMILARITY_TOLERANCE,
            min_cluster_size: defaults::DEFAULT_MIN_CLUSTER_SIZE,
            min_samples: defaults::DEFAULT_MIN_SAMPLES,
        }
    }
}
