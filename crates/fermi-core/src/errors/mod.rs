//! Error handling for Fermi.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod error_code;
pub mod estimation_error;
pub mod evidence_error;
pub mod expression_error;

pub use config_error::ConfigError;
pub use error_code::FermiErrorCode;
pub use estimation_error::EstimationError;
pub use evidence_error::{EvidenceError, ProposerError};
pub use expression_error::ExpressionError;
