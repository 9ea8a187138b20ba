//! Estimation failure taxonomy.
//!
//! Every variant except `NoEstimatePossible` is recovered inside the engine
//! and recorded in the reasoning trace. `NoEstimatePossible` is surfaced to the
//! caller as an explicit no-estimate result, never as a panic or a default value.

use super::error_code::{self, FermiErrorCode};
use super::{EvidenceError, ExpressionError, ProposerError};

#[derive(Debug, thiserror::Error)]
pub enum EstimationError {
    #[error("strategy {strategy} failed: {reason}")]
    StrategyFailure { strategy: String, reason: String },

    #[error("cycle detected: '{key}' is already being resolved ({stack})")]
    CycleDetected { key: String, stack: String },

    #[error("depth limit reached: depth {depth}, max {max_depth}")]
    DepthExceeded { depth: usize, max_depth: usize },

    #[error("model {model_id} is infeasible: {reason}")]
    InfeasibleModel { model_id: String, reason: String },

    #[error("no estimate possible for '{query}'")]
    NoEstimatePossible { query: String },

    #[error("estimation cancelled")]
    Cancelled,

    #[error("Evidence error: {0}")]
    Evidence(#[from] EvidenceError),

    #[error("Proposer error: {0}")]
    Proposer(#[from] ProposerError),

    #[error("Expression error: {0}")]
    Expression(#[from] ExpressionError),
}

impl FermiErrorCode for EstimationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::StrategyFailure { .. } => error_code::STRATEGY_FAILURE,
            Self::CycleDetected { .. } => error_code::CYCLE_DETECTED,
            Self::DepthExceeded { .. } => error_code::DEPTH_EXCEEDED,
            Self::InfeasibleModel { .. } => error_code::INFEASIBLE_MODEL,
            Self::NoEstimatePossible { .. } => error_code::NO_ESTIMATE_POSSIBLE,
            Self::Cancelled => error_code::CANCELLED,
            Self::Evidence(e) => e.error_code(),
            Self::Proposer(e) => e.error_code(),
            Self::Expression(e) => e.error_code(),
        }
    }
}

impl EstimationError {
    /// Render as a trace line prefixed with the stable error code.
    pub fn trace_line(&self) -> String {
        format!("[{}] {}", self.error_code(), self)
    }
}
