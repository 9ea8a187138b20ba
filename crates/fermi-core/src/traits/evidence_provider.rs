//! Evidence collaborator interfaces.
//!
//! Implementations own all I/O (web search, statistics APIs, vector lookups,
//! generative model calls). The engine only sees these traits.

use crate::errors::EvidenceError;
use crate::models::{BenchmarkCandidate, EstimationResult, EvidenceItem, Query};

/// Point lookup for a cascade layer, e.g. a generative prior guess.
pub trait EvidenceProvider: Send + Sync {
    /// Name used in traces.
    fn name(&self) -> &str;

    /// `Ok(None)` means the provider has nothing to say about this query.
    fn lookup(&self, query: &Query) -> Result<Option<EstimationResult>, EvidenceError>;
}

/// Source of noisy samples for consensus extraction.
pub trait SampleProvider: Send + Sync {
    fn name(&self) -> &str;

    fn samples(&self, query: &Query) -> Result<Vec<EvidenceItem>, EvidenceError>;
}

/// Source of benchmark exemplars for analogy matching.
pub trait BenchmarkProvider: Send + Sync {
    fn name(&self) -> &str;

    fn candidates(&self, query: &Query) -> Result<Vec<BenchmarkCandidate>, EvidenceError>;
}
