//! # fermi-core
//!
//! Foundation crate for the Fermi estimation engine.
//! Defines the shared data model, collaborator traits, errors, config,
//! the per-request call guard, tracing setup, and constants.
//! Every other crate in the workspace depends on this.

pub mod confidence;
pub mod config;
pub mod constants;
pub mod errors;
pub mod guard;
pub mod models;
pub mod tracing_setup;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use confidence::Confidence;
pub use config::FermiConfig;
pub use errors::{EstimationError, FermiErrorCode};
pub use guard::{CallGuard, CancellationToken, GuardEntry, RequestScope};
pub use models::{
    Context, ContextValue, DecompositionModel, EstimationResult, EvidenceItem, EvidenceValue,
    Query, SourceKind, StrategyKind, Variable,
};
pub use traits::{Estimator, EvidenceProvider, ModelProposer};
