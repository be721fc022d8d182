//! Per-dish earning forecast for MenuCast
//!
//! Runs the batch pipeline end to end: load the history, build features, fit
//! the regression, predict a typical day per dish, pick the best action and
//! write the summary for the dashboard.

pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod predict;
pub mod summary;

pub use config::ForecastConfig;
pub use error::{ForecastError, Result};
pub use pipeline::{ForecastOutcome, forecast, run};
pub use summary::PredictionSummary;
