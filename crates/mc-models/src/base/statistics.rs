//! Statistical structures for model results

use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// In-sample fit statistics
///
/// Every value here is computed on the training data itself. They describe
/// the fit, not how the model performs on days it has not seen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelStatistics {
    /// Number of observations
    pub n_obs: usize,
    /// Number of design-matrix columns (intercept excluded)
    pub n_features: usize,
    /// Numerical rank of the (centered) design matrix
    pub rank: usize,
    /// Residual sum of squares
    pub rss: f64,
    /// Total sum of squares around the mean
    pub tss: f64,
    /// Mean squared error
    pub mse: f64,
    /// Coefficient of determination
    pub r_squared: f64,
    /// Residual standard error, when residual degrees of freedom remain
    pub residual_std_error: Option<f64>,
    /// Residual degrees of freedom, when positive
    pub df_residual: Option<usize>,
}

/// Residual statistics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResidualStatistics {
    /// Minimum residual
    pub min: f64,
    /// First quartile
    pub q1: f64,
    /// Median
    pub median: f64,
    /// Third quartile
    pub q3: f64,
    /// Maximum residual
    pub max: f64,
    /// Mean residual
    pub mean: f64,
}

impl Default for ResidualStatistics {
    fn default() -> Self {
        Self {
            min: 0.0,
            q1: 0.0,
            median: 0.0,
            q3: 0.0,
            max: 0.0,
            mean: 0.0,
        }
    }
}

impl ResidualStatistics {
    /// Summarize a residual vector
    pub fn from_residuals(residuals: &Array1<f64>) -> Self {
        if residuals.is_empty() {
            return Self::default();
        }

        let mut sorted: Vec<f64> = residuals.to_vec();
        sorted.sort_by(f64::total_cmp);

        Self {
            min: sorted[0],
            q1: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q3: quantile(&sorted, 0.75),
            max: sorted[sorted.len() - 1],
            mean: residuals.mean().unwrap_or(0.0),
        }
    }
}

/// Linear-interpolated quantile of sorted, non-empty data
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let idx = (sorted.len() as f64 - 1.0) * q;
    let lower = idx.floor() as usize;
    let upper = idx.ceil() as usize;

    if lower == upper {
        sorted[lower]
    } else {
        let weight = idx - lower as f64;
        sorted[lower] * (1.0 - weight) + sorted[upper] * weight
    }
}
