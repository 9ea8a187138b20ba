pub mod benchmark;
pub mod decomposition_model;
pub mod estimation_result;
pub mod evidence;
pub mod query;
pub mod variable;

pub use benchmark::{BenchmarkCandidate, TargetProfile};
pub use decomposition_model::DecompositionModel;
pub use estimation_result::{EstimationResult, StrategyKind};
pub use evidence::{EvidenceItem, EvidenceValue};
pub use query::{normalize_key, Context, ContextValue, Query};
pub use variable::{SourceKind, Variable};
