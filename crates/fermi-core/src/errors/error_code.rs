//! Stable error codes surfaced in traces and logs.

/// Maps an error to its stable, upper-snake-case code.
pub trait FermiErrorCode {
    fn error_code(&self) -> &'static str;
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const EXPRESSION_ERROR: &str = "EXPRESSION_ERROR";
pub const EVIDENCE_ERROR: &str = "EVIDENCE_ERROR";
pub const PROPOSER_ERROR: &str = "PROPOSER_ERROR";
pub const STRATEGY_FAILURE: &str = "STRATEGY_FAILURE";
pub const CYCLE_DETECTED: &str = "CYCLE_DETECTED";
pub const DEPTH_EXCEEDED: &str = "DEPTH_EXCEEDED";
pub const INFEASIBLE_MODEL: &str = "INFEASIBLE_MODEL";
pub const NO_ESTIMATE_POSSIBLE: &str = "NO_ESTIMATE_POSSIBLE";
pub const CANCELLED: &str = "CANCELLED";
