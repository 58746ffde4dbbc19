//! Error types for the notation core engine

use pyo3::exceptions::{PyOverflowError, PyRecursionError, PyValueError, PyZeroDivisionError};
use pyo3::PyErr;
use thiserror::Error;

/// Main error type for conversion and evaluation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("Unidentifiable notation: {0}")]
    UnidentifiableNotation(String),

    #[error("Invalid expression: {0}")]
    InvalidExpression(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Arithmetic overflow: {0}")]
    Overflow(String),

    #[error("Negative exponent: {0}")]
    NegativeExponent(i64),

    #[error("Nesting too deep: limit is {0}")]
    NestingTooDeep(usize),

    #[error("Expression too long: {len} bytes exceeds limit of {limit}")]
    ExpressionTooLong { len: usize, limit: usize },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl NotationError {
    /// Shorthand for a [`NotationError::InvalidExpression`] from a message
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        NotationError::InvalidExpression(msg.into())
    }
}

impl From<NotationError> for PyErr {
    fn from(err: NotationError) -> PyErr {
        let msg = err.to_string();
        match err {
            NotationError::DivisionByZero => PyZeroDivisionError::new_err(msg),
            NotationError::Overflow(_) => PyOverflowError::new_err(msg),
            NotationError::NestingTooDeep(_) => PyRecursionError::new_err(msg),
            NotationError::UnidentifiableNotation(_)
            | NotationError::InvalidExpression(_)
            | NotationError::NegativeExponent(_)
            | NotationError::ExpressionTooLong { .. }
            | NotationError::InvalidConfig(_) => PyValueError::new_err(msg),
        }
    }
}

/// Result type alias for the notation core engine
pub type Result<T> = std::result::Result<T, NotationError>;
