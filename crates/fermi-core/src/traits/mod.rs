//! Collaborator seams and the recursion entry point.

pub mod estimator;
pub mod evidence_provider;
pub mod model_proposer;

pub use estimator::Estimator;
pub use evidence_provider::{BenchmarkProvider, EvidenceProvider, SampleProvider};
pub use model_proposer::ModelProposer;
