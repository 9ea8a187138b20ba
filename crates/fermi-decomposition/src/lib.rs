//! # fermi-decomposition
//!
//! Breaks a quantity into sub-quantities and resolves each with the same
//! estimation engine, recursively.
//!
//! 1. Obtain candidate models from the injected [`ModelProposer`](fermi_core::traits::ModelProposer)
//! 2. Resolve each variable: context/cache, recursive estimate, heuristic default
//! 3. Score fully resolved models
//! 4. Execute the best with the restricted evaluator, falling back to the next on error

pub mod expression;
pub mod heuristics;
pub mod policy;
pub mod resolver;
pub mod scoring;
pub mod search;

pub use expression::Expression;
pub use heuristics::{heuristic_default, HeuristicDefault};
pub use scoring::{complexity_score, depth_bonus, score_model, ModelScore};
pub use search::{DecompositionSearch, ScoredModel, SearchOutcome};
