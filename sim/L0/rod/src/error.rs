//! Error types for rod boundary conditions.

use thiserror::Error;

/// Errors raised while building rod states or boundary conditions.
///
/// Applying a boundary condition never fails; only construction does.
#[derive(Debug, Error)]
pub enum RodError {
    /// A rod must have at least one node.
    #[error("Rod has no nodes")]
    EmptyRod,

    /// The state arrays of a rod disagree on the node count.
    #[error("Length mismatch: {field} has {actual} entries, expected {expected}")]
    LengthMismatch {
        /// Name of the offending array.
        field: &'static str,
        /// Expected length (the position count).
        expected: usize,
        /// Actual length.
        actual: usize,
    },

    /// Index out of bounds.
    #[error("Index out of bounds: {0}")]
    IndexOutOfBounds(String),

    /// Boundary condition parameters are invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl RodError {
    /// Create an index out of bounds error.
    pub fn index_out_of_bounds(msg: impl Into<String>) -> Self {
        Self::IndexOutOfBounds(msg.into())
    }

    /// Create an invalid config error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

/// Result type for rod operations.
pub type Result<T> = std::result::Result<T, RodError>;
