//! Formula evaluation errors.

use super::error_code::{self, FermiErrorCode};

/// Errors from the restricted arithmetic evaluator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExpressionError {
    #[error("formula is empty")]
    Empty,

    #[error("unexpected character '{ch}' at offset {offset}")]
    UnexpectedCharacter { ch: char, offset: usize },

    #[error("unexpected token {found} at offset {offset}")]
    UnexpectedToken { found: String, offset: usize },

    #[error("unbalanced parentheses")]
    UnbalancedParentheses,

    #[error("formula nests deeper than {limit} levels")]
    TooDeep { limit: usize },

    #[error("formula has {tokens} tokens, more than the limit of {limit}")]
    TooLong { tokens: usize, limit: usize },

    #[error("unknown variable '{name}'")]
    UnknownVariable { name: String },

    #[error("division by zero")]
    DivisionByZero,

    #[error("result is not a finite number")]
    NonFinite,
}

impl FermiErrorCode for ExpressionError {
    fn error_code(&self) -> &'static str {
        error_code::EXPRESSION_ERROR
    }
}
