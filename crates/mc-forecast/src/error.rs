//! Forecast error types

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use mc_core::CoreError;
use mc_core::data::DataError;
use mc_models::ModelError;

/// Errors that end a forecast run
#[derive(Debug, Error)]
pub enum ForecastError {
    /// History could not be read or parsed
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    /// Feature construction failed
    #[error("Feature error: {0}")]
    Core(#[from] CoreError),

    /// Model fitting or prediction failed
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// The fitted model returned no dish predictions
    #[error("No dish predictions were produced")]
    NoPredictions,

    /// Summary could not be serialized
    #[error("Failed to serialize summary: {0}")]
    Serialize(#[source] serde_json::Error),

    /// An output directory or file could not be written
    #[error("Failed to write summary to '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Configuration file could not be read
    #[error("Failed to read config '{path}': {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Configuration file is not valid JSON for [`ForecastConfig`](crate::ForecastConfig)
    #[error("Failed to parse config '{path}': {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration values are out of range
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl ForecastError {
    /// Whether this error is the recoverable "nothing to train on" condition
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, ForecastError::Core(e) if e.is_insufficient_data())
    }
}

/// Result type for forecast operations
pub type Result<T> = std::result::Result<T, ForecastError>;
