//! Ordinary Least Squares (OLS) linear regression
//!
//! The intercept is handled by centering: columns and target are shifted to
//! zero mean, the centered problem is solved through a singular value
//! decomposition, and the intercept is recovered from the means. Singular
//! values below the cutoff are treated as zero, which gives the minimum-norm
//! solution whenever the design is rank deficient. A full one-hot block next
//! to an intercept is always rank deficient, and a dish seen on a single day
//! contributes a column with one active row; both fit without error.

use nalgebra::{DMatrix, DVector};
use ndarray::{Array1, Array2, Axis};
use tracing::debug;

use crate::base::{
    Coefficient, ModelError, ModelStatistics, ModelSummary, ModelType, ResidualStatistics, Result,
};
use crate::lm::metrics::{mean_squared_error, r2_score};
use crate::lm::{LinearConfig, LinearModel};

// ==================== Type Definitions ====================

/// Matrix type alias for 2D arrays
pub type Matrix = Array2<f64>;

/// Vector type alias for 1D arrays
pub type Vector = Array1<f64>;

/// Iteration cap for the SVD
const SVD_MAX_ITER: usize = 10_000;

/// Convergence tolerance for the SVD, nalgebra's default. Anything tighter
/// can stop on a wrong decomposition of a rank-deficient tall matrix.
const SVD_EPS: f64 = f64::EPSILON * 5.0;

// ==================== Linear Regression Result ====================

/// OLS linear regression result
#[derive(Debug, Clone)]
pub struct LinearRegressionResult {
    /// Coefficients, one per design-matrix column
    pub coefficients: Vector,
    /// Intercept (0 when not fitted)
    pub intercept: f64,
    /// Fitted values (ŷ)
    pub fitted_values: Vector,
    /// Residuals (y - ŷ)
    pub residuals: Vector,
    /// Singular values of the centered design matrix, descending
    pub singular_values: Vector,
    /// Fit statistics
    pub model_statistics: ModelStatistics,
}

// ==================== Linear Regression Model ====================

/// OLS linear regression model
#[derive(Debug, Clone, Default)]
pub struct LinearRegression {
    /// Configuration
    config: LinearConfig,
    /// Column names used in the summary
    feature_names: Option<Vec<String>>,
    /// Fitted result
    result: Option<LinearRegressionResult>,
}

impl LinearRegression {
    /// Create a new, unfitted model with an intercept
    pub fn new() -> Self {
        Self::default()
    }

    /// Set configuration
    pub fn config(mut self, config: LinearConfig) -> Self {
        self.config = config;
        self
    }

    /// Disable intercept
    pub fn no_intercept(mut self) -> Self {
        self.config.fit_intercept = false;
        self
    }

    /// Name the design-matrix columns for the summary
    pub fn feature_names(mut self, names: Vec<String>) -> Self {
        self.feature_names = Some(names);
        self
    }

    /// Check if the model has been fitted
    pub fn is_fitted(&self) -> bool {
        self.result.is_some()
    }

    /// Fitted result
    pub fn result(&self) -> Option<&LinearRegressionResult> {
        self.result.as_ref()
    }

    /// Fit statistics
    pub fn statistics(&self) -> Option<&ModelStatistics> {
        self.result.as_ref().map(|r| &r.model_statistics)
    }

    /// Fit the OLS model
    pub fn fit(mut self, x: &Matrix, y: &Vector) -> Result<Self> {
        let (n, p) = x.dim();

        if n == 0 {
            return Err(ModelError::InsufficientData { n_samples: 0 });
        }
        if y.len() != n {
            return Err(ModelError::DimensionMismatch {
                expected: format!("{} targets", n),
                actual: format!("{} targets", y.len()),
            });
        }
        if let Some(names) = &self.feature_names {
            if names.len() != p {
                return Err(ModelError::DimensionMismatch {
                    expected: format!("{} feature names", p),
                    actual: format!("{} feature names", names.len()),
                });
            }
        }
        if let Some(rcond) = self.config.rcond {
            if !rcond.is_finite() || rcond < 0.0 {
                return Err(ModelError::InvalidConfig {
                    message: format!("rcond must be a non-negative number, got {}", rcond),
                });
            }
        }
        if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
            return Err(ModelError::NumericalError {
                message: "design matrix or target contains non-finite values".to_string(),
                operation: "fit".to_string(),
            });
        }

        // Center so the intercept drops out of the least-squares problem
        let (x_offset, y_offset) = if self.config.fit_intercept {
            let x_mean = x
                .mean_axis(Axis(0))
                .ok_or(ModelError::InsufficientData { n_samples: n })?;
            (x_mean, y.mean().unwrap_or(0.0))
        } else {
            (Vector::zeros(p), 0.0)
        };
        let x_centered = x - &x_offset;
        let y_centered = y - y_offset;

        let solution = svd_solve(&x_centered, &y_centered, self.config.rcond)?;
        let coefficients = solution.coefficients;
        let intercept = y_offset - x_offset.dot(&coefficients);

        let fitted_values = x.dot(&coefficients) + intercept;
        let residuals = y - &fitted_values;

        let rss = residuals.mapv(|r| r * r).sum();
        let tss = y_centered.mapv(|r| r * r).sum();
        let mse = mean_squared_error(y, &fitted_values)?;
        let r_squared = r2_score(y, &fitted_values)?;

        // Parameters used: the rank plus the intercept
        let n_params = solution.rank + usize::from(self.config.fit_intercept);
        let df_residual = n.checked_sub(n_params).filter(|&df| df > 0);
        let residual_std_error = df_residual.map(|df| (rss / df as f64).sqrt());

        let model_statistics = ModelStatistics {
            n_obs: n,
            n_features: p,
            rank: solution.rank,
            rss,
            tss,
            mse,
            r_squared,
            residual_std_error,
            df_residual,
        };

        debug!(
            n_obs = n,
            n_features = p,
            rank = solution.rank,
            mse,
            r_squared,
            "fitted OLS model"
        );

        self.result = Some(LinearRegressionResult {
            coefficients,
            intercept,
            fitted_values,
            residuals,
            singular_values: solution.singular_values,
            model_statistics,
        });

        Ok(self)
    }

    /// Get model summary
    pub fn summary(&self) -> Result<ModelSummary> {
        let result = self.result.as_ref().ok_or(ModelError::NotFitted)?;

        let mut coefficients = Vec::with_capacity(result.coefficients.len() + 1);
        if self.config.fit_intercept {
            coefficients.push(Coefficient::new("(Intercept)", result.intercept).as_intercept());
        }
        for (i, &estimate) in result.coefficients.iter().enumerate() {
            let name = match &self.feature_names {
                Some(names) => names[i].clone(),
                None => format!("x{}", i),
            };
            coefficients.push(Coefficient::new(name, estimate));
        }

        Ok(ModelSummary {
            model_type: ModelType::LinearRegression,
            coefficients,
            model_statistics: result.model_statistics,
            residual_statistics: ResidualStatistics::from_residuals(&result.residuals),
        })
    }
}

impl LinearModel for LinearRegression {
    fn fit(&mut self, x: &Matrix, y: &Vector) -> Result<&mut Self> {
        let fitted = self.clone().fit(x, y)?;
        *self = fitted;
        Ok(self)
    }

    fn predict(&self, x: &Matrix) -> Result<Vector> {
        let result = self.result.as_ref().ok_or(ModelError::NotFitted)?;

        if x.ncols() != result.coefficients.len() {
            return Err(ModelError::DimensionMismatch {
                expected: format!("{} columns", result.coefficients.len()),
                actual: format!("{} columns", x.ncols()),
            });
        }

        let predictions = x.dot(&result.coefficients) + result.intercept;
        if predictions.iter().any(|v| !v.is_finite()) {
            return Err(ModelError::NumericalError {
                message: "prediction is not a finite number".to_string(),
                operation: "predict".to_string(),
            });
        }

        Ok(predictions)
    }

    fn coefficients(&self) -> Option<&Vector> {
        self.result.as_ref().map(|r| &r.coefficients)
    }

    fn intercept(&self) -> Option<f64> {
        self.result.as_ref().map(|r| r.intercept)
    }

    fn fitted_values(&self) -> Option<&Vector> {
        self.result.as_ref().map(|r| &r.fitted_values)
    }

    fn residuals(&self) -> Option<&Vector> {
        self.result.as_ref().map(|r| &r.residuals)
    }
}

// ==================== Least Squares ====================

/// Least-squares solution of `x · β = y`
struct SvdSolution {
    coefficients: Vector,
    rank: usize,
    singular_values: Vector,
}

/// Solve using SVD-based least squares
fn svd_solve(x: &Matrix, y: &Vector, rcond: Option<f64>) -> Result<SvdSolution> {
    let (n, p) = x.dim();

    // Nothing to solve for: every centered column is zero
    if p == 0 || x.iter().all(|&v| v == 0.0) {
        return Ok(SvdSolution {
            coefficients: Vector::zeros(p),
            rank: 0,
            singular_values: Vector::zeros(n.min(p)),
        });
    }

    let a = DMatrix::from_fn(n, p, |i, j| x[(i, j)]);
    let b = DVector::from_iterator(n, y.iter().copied());

    let svd = a
        .try_svd(true, true, SVD_EPS, SVD_MAX_ITER)
        .ok_or_else(|| ModelError::NumericalError {
            message: "SVD did not converge".to_string(),
            operation: "svd_solve".to_string(),
        })?;

    let max_sv = svd.singular_values.max();
    let cutoff = rcond.unwrap_or(n.max(p) as f64 * f64::EPSILON) * max_sv;
    let rank = svd.singular_values.iter().filter(|&&s| s > cutoff).count();

    let beta = svd
        .solve(&b, cutoff)
        .map_err(|message| ModelError::NumericalError {
            message: message.to_string(),
            operation: "svd_solve".to_string(),
        })?;

    let mut singular_values: Vec<f64> = svd.singular_values.iter().copied().collect();
    singular_values.sort_by(|a, b| b.total_cmp(a));

    Ok(SvdSolution {
        coefficients: beta.iter().copied().collect(),
        rank,
        singular_values: Vector::from(singular_values),
    })
}
