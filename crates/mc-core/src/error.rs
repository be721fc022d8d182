use crate::data::DataError;
use crate::encoding::EncodingError;

#[derive(thiserror::Error, Debug)]
pub enum CoreError {
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodingError),

    /// Nothing left to train on after dropping incomplete rows and rare dishes
    #[error(
        "Insufficient data: {valid} of {total} observations usable, {retained_dishes} dishes retained"
    )]
    InsufficientData {
        total: usize,
        valid: usize,
        retained_dishes: usize,
    },
}

impl CoreError {
    /// Whether this error is the recoverable "nothing to train on" condition
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, CoreError::InsufficientData { .. })
    }
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
