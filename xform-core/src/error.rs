//! Error types for transform operations

use thiserror::Error;

/// Errors reported by [`Transform`](crate::Transform) operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    /// Matrix input with the wrong number of elements
    #[error("Invalid argument: expected {expected} values, got {actual}")]
    InvalidArgument { expected: usize, actual: usize },

    /// `pop` called with nothing pushed
    #[error("Cannot pop: transform stack is empty")]
    EmptyStack,

    /// Inversion of a matrix whose determinant is zero
    #[error("Cannot invert singular matrix")]
    SingularMatrix,

    /// Homogeneous `w` evaluated to zero during projection
    #[error("Division by zero: projected w is 0")]
    DivisionByZero,

    /// Malformed matrix text
    #[error("Failed to parse matrix: {0}")]
    Parse(String),
}

/// Result type for transform operations
pub type TransformResult<T> = Result<T, TransformError>;
