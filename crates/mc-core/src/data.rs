//! Historical observation data for MenuCast
//!
//! This module provides the observation model flattened from the per-day
//! history file, and the per-dish aggregates derived from it.

mod aggregate;
mod history;
mod observation;


use std::path::PathBuf;

// Re-exports
pub use aggregate::{DishAggregate, aggregate_by_dish};
pub use history::{load_history, parse_history};
pub use observation::{NUMERIC_FEATURES, Observation, ValidObservation};

// Type aliases for common use cases
pub type FloatArray = ndarray::Array1<f64>;
pub type Matrix = ndarray::Array2<f64>;

/// Error types specific to data operations
#[derive(thiserror::Error, Debug)]
pub enum DataError {
    #[error("Failed to read history file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed history data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: String, actual: String },
}

/// Result type for data operations
pub type Result<T> = std::result::Result<T, DataError>;
