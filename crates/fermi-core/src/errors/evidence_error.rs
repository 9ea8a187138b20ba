//! Collaborator errors: evidence providers and model proposers.

use super::error_code::{self, FermiErrorCode};

/// Failure reported by an evidence-gathering collaborator.
#[derive(Debug, thiserror::Error)]
pub enum EvidenceError {
    #[error("evidence source {source_name} unavailable: {reason}")]
    Unavailable { source_name: String, reason: String },

    #[error("evidence source {source_name} returned malformed data: {reason}")]
    Malformed { source_name: String, reason: String },

    #[error("evidence lookup failed: {0}")]
    Failed(String),
}

impl FermiErrorCode for EvidenceError {
    fn error_code(&self) -> &'static str {
        error_code::EVIDENCE_ERROR
    }
}

/// Failure reported by the decomposition-model proposer.
#[derive(Debug, thiserror::Error)]
pub enum ProposerError {
    #[error("model proposer unavailable: {0}")]
    Unavailable(String),

    #[error("model proposer returned an invalid model: {0}")]
    InvalidModel(String),
}

impl FermiErrorCode for ProposerError {
    fn error_code(&self) -> &'static str {
        error_code::PROPOSER_ERROR
    }
}
