//! Model summary structures

use super::coefficient::Coefficient;
use super::statistics::{ModelStatistics, ResidualStatistics};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Printable summary of a fitted model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSummary {
    /// Model type
    pub model_type: ModelType,
    /// Coefficients table, intercept first
    pub coefficients: Vec<Coefficient>,
    /// Fit statistics
    pub model_statistics: ModelStatistics,
    /// Residual statistics
    pub residual_statistics: ResidualStatistics,
}

impl fmt::Display for ModelSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = &self.model_statistics;

        writeln!(f, "Model Summary")?;
        writeln!(f, "=============")?;
        writeln!(f, "Model Type: {}", self.model_type)?;
        writeln!(f, "Observations: {}", stats.n_obs)?;
        writeln!(f, "Features: {} (rank {})", stats.n_features, stats.rank)?;
        writeln!(f)?;

        writeln!(f, "Coefficients:")?;
        writeln!(f, "{:<28} {:>14}", "Term", "Estimate")?;
        writeln!(f, "{:-<28} {:-<14}", "", "")?;
        for coeff in &self.coefficients {
            writeln!(f, "{:<28} {:>14.6}", coeff.name, coeff.estimate)?;
        }
        writeln!(f)?;

        let resid = &self.residual_statistics;
        writeln!(f, "Residuals:")?;
        writeln!(
            f,
            "  Min: {:.4}  1Q: {:.4}  Median: {:.4}  3Q: {:.4}  Max: {:.4}",
            resid.min, resid.q1, resid.median, resid.q3, resid.max
        )?;
        writeln!(f)?;

        writeln!(f, "Model Statistics (in-sample):")?;
        writeln!(f, "  MSE: {:.4}", stats.mse)?;
        writeln!(f, "  R-squared: {:.4}", stats.r_squared)?;
        if let Some(resid_se) = stats.residual_std_error {
            writeln!(f, "  Residual Std. Error: {:.4}", resid_se)?;
        }
        if let Some(df_resid) = stats.df_residual {
            writeln!(f, "  Residual DF: {}", df_resid)?;
        }

        Ok(())
    }
}

/// Model type enumeration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelType {
    /// Ordinary least squares linear regression
    LinearRegression,
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelType::LinearRegression => write!(f, "LinearRegression"),
        }
    }
}
