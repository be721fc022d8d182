//! Linear regression models
//!
//! This module provides the ordinary least squares (OLS) model used to map
//! dish and operational features to a daily earning, together with the
//! in-sample metrics reported alongside its predictions.

pub mod metrics;
pub mod ols;


// Re-exports
pub use ols::{LinearRegression, LinearRegressionResult, Matrix, Vector};

use mc_core::features::DesignMatrix;
use serde::{Deserialize, Serialize};

use crate::base::Result;

/// Linear model configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearConfig {
    /// Whether to estimate an intercept
    pub fit_intercept: bool,
    /// Relative cutoff below which singular values count as zero.
    /// `None` uses `max(n, p) * f64::EPSILON`.
    pub rcond: Option<f64>,
}

impl Default for LinearConfig {
    fn default() -> Self {
        Self {
            fit_intercept: true,
            rcond: None,
        }
    }
}

/// Linear model trait
pub trait LinearModel {
    /// Fit the model on a design matrix and target vector
    fn fit(&mut self, x: &Matrix, y: &Vector) -> Result<&mut Self>;

    /// Predict one value per row of `x`
    fn predict(&self, x: &Matrix) -> Result<Vector>;

    /// Get coefficients (intercept excluded)
    fn coefficients(&self) -> Option<&Vector>;

    /// Get intercept
    fn intercept(&self) -> Option<f64>;

    /// Get fitted values
    fn fitted_values(&self) -> Option<&Vector>;

    /// Get residuals
    fn residuals(&self) -> Option<&Vector>;
}

/// Convenience function for OLS regression on a design matrix
pub fn lm(design: &DesignMatrix) -> Result<LinearRegression> {
    LinearRegression::new()
        .feature_names(design.column_names.clone())
        .fit(&design.x, &design.y)
}
