//! In-sample fit metrics
//!
//! These are evaluated on the same rows the model was fitted on. They
//! describe how closely the model reproduces its training data and are not
//! an estimate of accuracy on unseen days.

use crate::base::{ModelError, Result};
use crate::lm::Vector;

/// Mean squared error between targets and predictions
pub fn mean_squared_error(y_true: &Vector, y_pred: &Vector) -> Result<f64> {
    check_lengths(y_true, y_pred)?;

    let rss: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(&t, &p)| (t - p).powi(2))
        .sum();

    check_finite(rss / y_true.len() as f64, "mean_squared_error")
}

/// Coefficient of determination
///
/// A constant target has no variance to explain: the score is 1.0 when the
/// predictions match it up to rounding and 0.0 otherwise.
pub fn r2_score(y_true: &Vector, y_pred: &Vector) -> Result<f64> {
    check_lengths(y_true, y_pred)?;

    let mean = y_true.mean().unwrap_or(0.0);
    let rss: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(&t, &p)| (t - p).powi(2))
        .sum();
    let tss: f64 = y_true.iter().map(|&t| (t - mean).powi(2)).sum();
    check_finite(rss, "r2_score")?;
    check_finite(tss, "r2_score")?;

    // Sums of squares this small relative to the target are rounding noise
    let negligible = y_true.iter().map(|&t| t * t).sum::<f64>().max(1.0) * f64::EPSILON;
    if tss <= negligible {
        return Ok(if rss <= negligible { 1.0 } else { 0.0 });
    }

    Ok(1.0 - rss / tss)
}

/// Sums of squares overflow for targets around 1e154 and beyond
fn check_finite(value: f64, operation: &str) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ModelError::NumericalError {
            message: format!("sum of squares overflowed to {}", value),
            operation: operation.to_string(),
        })
    }
}

fn check_lengths(y_true: &Vector, y_pred: &Vector) -> Result<()> {
    if y_true.is_empty() {
        return Err(ModelError::InsufficientData { n_samples: 0 });
    }

    if y_true.len() != y_pred.len() {
        return Err(ModelError::DimensionMismatch {
            expected: format!("{} predictions", y_true.len()),
            actual: format!("{} predictions", y_pred.len()),
        });
    }

    Ok(())
}
