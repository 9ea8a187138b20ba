//! # fermi-confidence
//!
//! Two ways of producing one confidence from several signals.
//!
//! | Operation | Input | Used by |
//! |-----------|-------|---------|
//! | [`fuse`] | independent confidences | decomposition results |
//! | [`band`] | similarity, coverage, validation | analogy matching |

pub mod banding;
pub mod fusion;

pub use banding::{band, Axis, BandedConfidence, ConfidenceBand};
pub use fusion::{fuse, geometric_mean};
