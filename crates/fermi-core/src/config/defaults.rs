//! Compiled defaults for every configuration value.

// Decomposition search
pub const DEFAULT_MAX_DEPTH: usize = crate::constants::DEFAULT_MAX_DEPTH;
pub const DEFAULT_MAX_CANDIDATES: usize = 5;
pub const DEFAULT_RECOMMENDED_VARIABLES: usize = 6;
pub const DEFAULT_MAX_VARIABLES: usize = 10;
pub const DEFAULT_HEURISTIC_CONFIDENCE: f64 = 0.35;

// Model scoring weights
pub const DEFAULT_WEIGHT_FILLED: f64 = 0.5;
pub const DEFAULT_WEIGHT_CONFIDENCE: f64 = 0.3;
pub const DEFAULT_WEIGHT_COMPLEXITY: f64 = 0.2;
pub const DEFAULT_WEIGHT_DEPTH: f64 = 0.1;

// Consensus
pub const DEFAULT_IQR_MULTIPLIER: f64 = 1.5;
pub const DEFAULT_SIMILARITY_TOLERANCE: f64 = 0.30;
pub const DEFAULT_MIN_CLUSTER_SIZE: usize = 3;
pub const DEFAULT_MIN_SAMPLES: usize = crate::constants::MIN_CONSENSUS_SAMPLES;

// Banding: band entry thresholds
pub const DEFAULT_HIGH_SIMILARITY: f64 = 0.90;
pub const DEFAULT_HIGH_COVERAGE: f64 = 0.10;
pub const DEFAULT_MEDIUM_SIMILARITY: f64 = 0.70;
pub const DEFAULT_MEDIUM_COVERAGE: f64 = 0.05;

// Banding: base and cap per band
pub const DEFAULT_HIGH_BASE: f64 = 0.80;
pub const DEFAULT_HIGH_CAP: f64 = 1.00;
pub const DEFAULT_MEDIUM_BASE: f64 = 0.65;
pub const DEFAULT_MEDIUM_CAP: f64 = 0.79;
pub const DEFAULT_LOW_BASE: f64 = 0.40;
pub const DEFAULT_LOW_CAP: f64 = 0.59;

// Observability
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
