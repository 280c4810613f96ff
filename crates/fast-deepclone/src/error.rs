//! Value model error types

use thiserror::Error;

/// Errors raised by value model constructors and accessors.
///
/// The clone engine itself never produces these; they surface only when a
/// caller builds an invalid value (misaligned typed array, bad weak key, ...).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// Type error (e.g., using a primitive as a weak key)
    #[error("TypeError: {0}")]
    TypeError(String),

    /// Range error (e.g., view extending past the end of its buffer)
    #[error("RangeError: {0}")]
    RangeError(String),

    /// Operation on a detached ArrayBuffer
    #[error("TypeError: ArrayBuffer is detached")]
    Detached,
}

impl ValueError {
    /// Create a type error
    pub fn type_error(msg: impl Into<String>) -> Self {
        Self::TypeError(msg.into())
    }

    /// Create a range error
    pub fn range_error(msg: impl Into<String>) -> Self {
        Self::RangeError(msg.into())
    }
}

/// Result type for value model operations
pub type ValueResult<T> = std::result::Result<T, ValueError>;
