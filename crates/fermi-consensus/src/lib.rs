//! # fermi-consensus
//!
//! Turns a noisy multi-sample evidence set into one representative value.
//!
//! 1. Tukey-fence outlier removal ([`outliers`])
//! 2. Running-median similarity clustering ([`clustering`])
//! 3. Largest-cluster median, or median of all as fallback ([`extractor`])

pub mod clustering;
pub mod extractor;
pub mod outliers;

pub use extractor::{cluster_confidence, consensus, extract, Consensus};
