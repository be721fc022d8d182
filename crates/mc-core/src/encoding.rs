//! Categorical encoding
//!
//! Dish identities enter the design matrix as indicator (dummy) columns. The
//! encoder is fitted once on the training labels and then reused for every
//! prediction row, so training and prediction share one column layout.

use std::collections::BTreeSet;

use indexmap::IndexSet;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while fitting or applying an encoder
#[derive(Debug, Error)]
pub enum EncodingError {
    /// Transform called before fit
    #[error("Encoder has not been fitted")]
    NotFitted,

    /// Fit called without any labels
    #[error("Cannot fit an encoder on zero labels")]
    EmptyFit,

    /// Label outside the fitted categories under [`HandleUnknown::Error`]
    #[error("Unknown category '{label}'. Known categories: {known:?}")]
    UnknownCategory { label: String, known: Vec<String> },
}

/// What to do with a label that was not seen during fitting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandleUnknown {
    /// Encode as an all-zero row
    #[default]
    Ignore,
    /// Fail with [`EncodingError::UnknownCategory`]
    Error,
}

/// Maps categorical labels to fixed-width numeric vectors
pub trait CategoricalEncoder {
    /// Learn the category set from training labels
    fn fit<S: AsRef<str>>(&mut self, labels: &[S]) -> Result<&mut Self, EncodingError>;

    /// Fitted categories in column order
    fn categories(&self) -> Vec<&str>;

    /// Number of output columns
    fn width(&self) -> usize;

    /// Encode one label
    fn transform_one(&self, label: &str) -> Result<Array1<f64>, EncodingError>;

    /// Encode a sequence of labels, one row per label
    fn transform<S: AsRef<str>>(&self, labels: &[S]) -> Result<Array2<f64>, EncodingError> {
        let mut matrix = Array2::zeros((labels.len(), self.width()));

        for (i, label) in labels.iter().enumerate() {
            let row = self.transform_one(label.as_ref())?;
            matrix.row_mut(i).assign(&row);
        }

        Ok(matrix)
    }

    /// Output column names, `{prefix}_{category}`
    fn feature_names(&self, prefix: &str) -> Vec<String> {
        self.categories()
            .into_iter()
            .map(|category| format!("{}_{}", prefix, category))
            .collect()
    }
}

/// One-hot encoder: one indicator column per category, sorted lexicographically
#[derive(Debug, Clone, Default)]
pub struct OneHotEncoder {
    categories: Option<IndexSet<String>>,
    handle_unknown: HandleUnknown,
}

impl OneHotEncoder {
    /// Create an unfitted encoder that ignores unknown labels
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the unknown-label policy
    pub fn handle_unknown(mut self, policy: HandleUnknown) -> Self {
        self.handle_unknown = policy;
        self
    }

    /// Check if the encoder has been fitted
    pub fn is_fitted(&self) -> bool {
        self.categories.is_some()
    }

    /// Column index of a category
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.categories.as_ref()?.get_index_of(label)
    }

    fn fitted(&self) -> Result<&IndexSet<String>, EncodingError> {
        self.categories.as_ref().ok_or(EncodingError::NotFitted)
    }
}

impl CategoricalEncoder for OneHotEncoder {
    fn fit<S: AsRef<str>>(&mut self, labels: &[S]) -> Result<&mut Self, EncodingError> {
        if labels.is_empty() {
            return Err(EncodingError::EmptyFit);
        }

        // Sort categories for consistent encoding
        let sorted: BTreeSet<&str> = labels.iter().map(AsRef::as_ref).collect();
        self.categories = Some(sorted.into_iter().map(str::to_string).collect());

        Ok(self)
    }

    fn categories(&self) -> Vec<&str> {
        self.categories
            .as_ref()
            .map(|cats| cats.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    fn width(&self) -> usize {
        self.categories.as_ref().map_or(0, |cats| cats.len())
    }

    fn transform_one(&self, label: &str) -> Result<Array1<f64>, EncodingError> {
        let categories = self.fitted()?;
        let mut row = Array1::zeros(categories.len());

        match categories.get_index_of(label) {
            Some(idx) => row[idx] = 1.0,
            None => match self.handle_unknown {
                HandleUnknown::Ignore => {}
                HandleUnknown::Error => {
                    return Err(EncodingError::UnknownCategory {
                        label: label.to_string(),
                        known: categories.iter().cloned().collect(),
                    });
                }
            },
        }

        Ok(row)
    }
}
