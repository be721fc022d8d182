//! Prediction summary
//!
//! The summary is the only artifact of a run. Its JSON layout is fixed: the
//! dashboard reads `dishes`, `predictedEarning` and `bestAction` directly.

use chrono::{DateTime, Utc};
use mc_models::{ModelError, ModelType};
use mc_models::base::ModelStatistics;
use serde::{Deserialize, Serialize};

use crate::error::{ForecastError, Result};
use crate::predict::DishPrediction;

/// Dish to prioritize
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestAction {
    pub dish: String,
    /// Unclamped prediction; may be negative
    pub value: f64,
}

/// In-sample fit metrics (computed on the training data)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub mse: f64,
    pub r2: f64,
}

impl From<&ModelStatistics> for Metrics {
    fn from(stats: &ModelStatistics) -> Self {
        Self {
            mse: stats.mse,
            r2: stats.r_squared,
        }
    }
}

/// Forecast summary written for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionSummary {
    /// When the model was trained
    pub trained_at: DateTime<Utc>,
    /// Always [`ModelType::LinearRegression`]
    pub model_type: ModelType,
    /// One-hot marker followed by the numeric feature names
    pub features: Vec<String>,
    /// Dish names, in prediction order
    pub dishes: Vec<String>,
    /// Display predictions, parallel to `dishes`, never negative
    pub predicted_earning: Vec<f64>,
    /// Dish with the highest unclamped prediction
    pub best_action: BestAction,
    /// In-sample metrics
    pub metrics: Metrics,
}

impl PredictionSummary {
    /// Assemble a summary, rounding reported earnings to `decimals` places
    pub fn new(
        trained_at: DateTime<Utc>,
        features: Vec<String>,
        predictions: &[DishPrediction],
        best: &DishPrediction,
        statistics: &ModelStatistics,
        decimals: Option<u32>,
    ) -> Self {
        Self {
            trained_at,
            model_type: ModelType::LinearRegression,
            features,
            dishes: predictions.iter().map(|p| p.dish.clone()).collect(),
            predicted_earning: predictions
                .iter()
                .map(|p| round_to(p.display, decimals))
                .collect(),
            best_action: BestAction {
                dish: best.dish.clone(),
                value: round_to(best.unclamped, decimals),
            },
            metrics: Metrics::from(statistics),
        }
    }

    /// Pretty-printed JSON, the exact bytes written to every output path
    ///
    /// serde_json writes non-finite floats as `null`, so they are rejected here.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
        let numbers = self
            .predicted_earning
            .iter()
            .chain([&self.best_action.value, &self.metrics.mse, &self.metrics.r2]);
        if numbers.into_iter().any(|v| !v.is_finite()) {
            return Err(ModelError::NumericalError {
                message: "summary contains a non-finite number".to_string(),
                operation: "serialize summary".to_string(),
            }
            .into());
        }

        serde_json::to_vec_pretty(self).map_err(ForecastError::Serialize)
    }
}

/// Round half away from zero; `None` leaves the value untouched
///
/// Values too large to scale are returned as is, and a result of `-0.0` is
/// reported as `0.0`.
pub fn round_to(value: f64, decimals: Option<u32>) -> f64 {
    match decimals {
        Some(d) => {
            let scale = 10f64.powi(d as i32);
            let scaled = value * scale;
            if !scaled.is_finite() {
                return value;
            }
            scaled.round() / scale + 0.0
        }
        None => value,
    }
}
