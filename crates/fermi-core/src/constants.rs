/// Fermi engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default bound on recursive estimate depth.
pub const DEFAULT_MAX_DEPTH: usize = 4;

/// Neutral confidence used when there is nothing to fuse.
pub const NEUTRAL_CONFIDENCE: f64 = 0.5;

/// Minimum number of samples before consensus is attempted.
pub const MIN_CONSENSUS_SAMPLES: usize = 3;

/// Key under which numeric context facts are looked up for behavioral anchoring.
pub const ANCHOR_FACT: &str = "anchor";
