use serde::{Deserialize, Serialize};
use std::fmt;

/// Confidence score clamped to [0.0, 1.0].
/// A reliability probability attached to every estimate and every resolved variable.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Confidence(f64);

impl Confidence {
    /// High confidence threshold.
    pub const HIGH: f64 = 0.8;
    /// Medium confidence threshold.
    pub const MEDIUM: f64 = 0.6;
    /// Neutral value used when no evidence is available.
    pub const NEUTRAL: f64 = 0.5;

    pub const ZERO: Confidence = Confidence(0.0);
    pub const CERTAIN: Confidence = Confidence(1.0);

    /// Create a new Confidence, clamping to [0.0, 1.0]. NaN becomes 0.0.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self(0.0);
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Get the raw f64 value.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Whether this confidence satisfies an acceptance threshold.
    pub fn meets(self, threshold: f64) -> bool {
        self.0 + f64::EPSILON >= threshold
    }
}

impl Default for Confidence {
    fn default() -> Self {
        Self(0.0)
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

impl From<f64> for Confidence {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Confidence> for f64 {
    fn from(c: Confidence) -> Self {
        c.0
    }
}
