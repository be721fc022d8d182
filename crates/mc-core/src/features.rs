//! Design matrix construction
//!
//! The feature builder drops incomplete observations, groups the rest per
//! dish, optionally filters rare dishes, and lays out the design matrix as a
//! one-hot block over dish names followed by the four numeric features.

#[cfg(test)]
mod tests;

use indexmap::IndexMap;
use ndarray::{Array2, Axis, concatenate};
use tracing::{debug, info, warn};

use crate::data::{
    DataError, DishAggregate, FloatArray, Matrix, NUMERIC_FEATURES, Observation,
    ValidObservation, aggregate_by_dish,
};
use crate::encoding::{CategoricalEncoder, HandleUnknown, OneHotEncoder};
use crate::error::{CoreError, Result};

/// Prefix of the one-hot column names
pub const NAME_PREFIX: &str = "name";

/// Feature-list entry standing in for the whole one-hot block
pub const ONE_HOT_MARKER: &str = "name_onehot";

/// Numeric training data: design matrix, target and column names
#[derive(Debug, Clone)]
pub struct DesignMatrix {
    /// Design matrix (X), one row per retained observation
    pub x: Matrix,
    /// Target vector (y), the earnings
    pub y: FloatArray,
    /// Column names of `x`
    pub column_names: Vec<String>,
}

impl DesignMatrix {
    /// Number of rows
    pub fn nrows(&self) -> usize {
        self.x.nrows()
    }

    /// Number of columns
    pub fn ncols(&self) -> usize {
        self.x.ncols()
    }
}

/// Everything the regressor and predictor need from the history
#[derive(Debug, Clone)]
pub struct FeatureSet {
    /// Encoder fitted on the retained dish names
    pub encoder: OneHotEncoder,
    /// Aggregates of retained dishes, in encoder category order
    pub aggregates: IndexMap<String, DishAggregate>,
    /// Training matrix
    pub design: DesignMatrix,
}

impl FeatureSet {
    /// Retained dish names in column order
    pub fn dishes(&self) -> Vec<&str> {
        self.encoder.categories()
    }

    /// Feature names as reported in the prediction summary
    pub fn feature_names(&self) -> Vec<String> {
        std::iter::once(ONE_HOT_MARKER)
            .chain(NUMERIC_FEATURES)
            .map(str::to_string)
            .collect()
    }

    /// Encode one prediction row with the training column layout
    pub fn encode_row(&self, dish: &str, numeric: [f64; 4]) -> Result<FloatArray> {
        let one_hot = self.encoder.transform_one(dish)?;
        let row: FloatArray = one_hot.into_iter().chain(numeric).collect();

        if row.len() != self.design.ncols() {
            return Err(DataError::DimensionMismatch {
                expected: format!("{} columns", self.design.ncols()),
                actual: format!("{} columns", row.len()),
            }
            .into());
        }

        Ok(row)
    }
}

/// Builds a [`FeatureSet`] from raw observations
#[derive(Debug, Clone)]
pub struct FeatureBuilder {
    min_observations: usize,
}

impl Default for FeatureBuilder {
    fn default() -> Self {
        Self {
            min_observations: 1,
        }
    }
}

impl FeatureBuilder {
    /// Create a builder that keeps every dish
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop dishes with fewer observations than `n` (0 behaves like 1)
    pub fn min_observations(mut self, n: usize) -> Self {
        self.min_observations = n.max(1);
        self
    }

    /// Build the design matrix
    ///
    /// Returns [`CoreError::InsufficientData`] when no observation survives
    /// validation or the minimum-count filter.
    pub fn build(&self, observations: &[Observation]) -> Result<FeatureSet> {
        let total = observations.len();
        let valid: Vec<ValidObservation<'_>> =
            observations.iter().filter_map(Observation::validate).collect();

        if valid.len() < total {
            warn!(
                dropped = total - valid.len(),
                "dropping observations without a dish name or earning"
            );
        }

        if valid.is_empty() {
            return Err(CoreError::InsufficientData {
                total,
                valid: 0,
                retained_dishes: 0,
            });
        }

        let mut aggregates = aggregate_by_dish(&valid);
        aggregates.retain(|name, agg| {
            let keep = agg.observations >= self.min_observations;
            if !keep {
                debug!(
                    dish = %name,
                    observations = agg.observations,
                    min = self.min_observations,
                    "dish below minimum observation count"
                );
            }
            keep
        });

        if aggregates.is_empty() {
            return Err(CoreError::InsufficientData {
                total,
                valid: valid.len(),
                retained_dishes: 0,
            });
        }

        let retained: Vec<&ValidObservation<'_>> = valid
            .iter()
            .filter(|obs| aggregates.contains_key(obs.name))
            .collect();

        let names: Vec<&str> = aggregates.keys().map(String::as_str).collect();
        let mut encoder = OneHotEncoder::new().handle_unknown(HandleUnknown::Ignore);
        encoder.fit(&names)?;

        let labels: Vec<&str> = retained.iter().map(|obs| obs.name).collect();
        let one_hot = encoder.transform(&labels)?;
        let numeric = Array2::from_shape_fn((retained.len(), NUMERIC_FEATURES.len()), |(i, j)| {
            retained[i].numeric[j]
        });

        let x = concatenate(Axis(1), &[one_hot.view(), numeric.view()]).map_err(|e| {
            DataError::DimensionMismatch {
                expected: format!("{} rows in both blocks", retained.len()),
                actual: e.to_string(),
            }
        })?;
        let y: FloatArray = retained.iter().map(|obs| obs.total_earning).collect();

        let column_names: Vec<String> = encoder
            .feature_names(NAME_PREFIX)
            .into_iter()
            .chain(NUMERIC_FEATURES.iter().map(|name| name.to_string()))
            .collect();

        info!(
            rows = x.nrows(),
            columns = x.ncols(),
            dishes = encoder.width(),
            "built design matrix"
        );

        Ok(FeatureSet {
            encoder,
            aggregates,
            design: DesignMatrix { x, y, column_names },
        })
    }
}
