use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Weights of the four model-scoring components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Fraction of variables resolved from non-default sources.
    pub filled: f64,
    /// Fused variable confidence.
    pub confidence: f64,
    /// Variable-count complexity score.
    pub complexity: f64,
    /// Shallow-resolution bonus.
    pub depth: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            filled: defaults::DEFAULT_WEIGHT_FILLED,
            confidence: defaults::DEFAULT_WEIGHT_CONFIDENCE,
            complexity: defaults::DEFAULT_WEIGHT_COMPLEXITY,
            depth: defaults::DEFAULT_WEIGHT_DEPTH,
        }
    }
}

impl ScoringWeights {
    pub fn as_array(&self) -> [(&'static str, f64); 4] {
        [
            ("filled", self.filled),
            ("confidence", self.confidence),
            ("complexity", self.complexity),
            ("depth", self.depth),
        ]
    }
}

/// Decomposition search configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecompositionConfig {
    /// Hard recursion bound. Default: 4.
    pub max_depth: usize,
    /// Proposed models evaluated per query. Default: 5.
    pub max_candidates: usize,
    /// Models above this variable count are kept with a warning. Default: 6.
    pub recommended_variables: usize,
    /// Models above this variable count are discarded. Default: 10.
    pub max_variables: usize,
    /// Confidence assigned to heuristic defaults. Default: 0.35.
    pub heuristic_confidence: f64,
    /// Extra keyword rules: a variable whose name contains the key gets the value.
    /// Checked before the built-in table.
    pub heuristic_defaults: BTreeMap<String, f64>,
    /// Used when no keyword rule matches. Default: none (variable unresolvable).
    pub generic_default: Option<f64>,
    pub weights: ScoringWeights,
}

impl Default for DecompositionConfig {
    fn default() -> Self {
        Self {
            max_depth: defaults::DEFAULT_MAX_DEPTH,
            max_candidates: defaults::DEFAULT_MAX_CANDIDATES,
            recommended_variables: defaults::DEFAULT_RECOMMENDED_VARIABLES,
            max_variables: defaults::DEFAULT_MAX_VARIABLES,
            heuristic_confidence: defaults::DEFAULT_HEURISTIC_CONFIDENCE,
            heuristic_defaults: BTreeMap::new(),
            generic_default: None,
            weights: ScoringWeights::default(),
        }
    }
}
