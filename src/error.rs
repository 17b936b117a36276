//! Error types for variability analysis.
//!
//! Every public entry point validates shapes and configuration up front and
//! reports misuse through [`VariabilityError`] instead of failing deep inside
//! array indexing.

use thiserror::Error;

/// Main error type for variability operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VariabilityError {
    /// Array shape cannot be processed (channel grouping, window length, empty axis).
    #[error("Invalid shape: {context}")]
    InvalidShape { context: String },

    /// An axis disagrees with the count the configuration expects.
    #[error("Dimension mismatch on {axis} axis: expected {expected}, got {actual}")]
    DimensionMismatch {
        axis: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Configuration validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Input validation errors.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for variability operations.
pub type Result<T> = std::result::Result<T, VariabilityError>;

impl VariabilityError {
    /// Create an invalid shape error.
    #[must_use]
    pub fn invalid_shape(context: impl Into<String>) -> Self {
        Self::InvalidShape {
            context: context.into(),
        }
    }

    /// Create a dimension mismatch error.
    #[must_use]
    pub const fn dimension_mismatch(axis: &'static str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            axis,
            expected,
            actual,
        }
    }

    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
