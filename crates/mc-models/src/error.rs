//! Model-related error types

use thiserror::Error;

/// Model-related errors
#[derive(Debug, Error)]
pub enum ModelError {
    /// Numerical computation error
    #[error("Numerical error: {message} (operation: {operation})")]
    NumericalError {
        /// Error message
        message: String,
        /// Operation that failed
        operation: String,
    },

    /// Nothing to fit on
    #[error("Not enough data: {n_samples} samples")]
    InsufficientData {
        /// Number of samples
        n_samples: usize,
    },

    /// Shapes of the inputs do not agree
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected shape
        expected: String,
        /// Actual shape
        actual: String,
    },

    /// Invalid model configuration
    #[error("Invalid model configuration: {message}")]
    InvalidConfig {
        /// Configuration error message
        message: String,
    },

    /// Model not fitted yet
    #[error("Model not fitted yet")]
    NotFitted,
}
