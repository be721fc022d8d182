//! Regression models for MenuCast
//!
//! Provides the [`LinearModel`](lm::LinearModel) interface, an ordinary least
//! squares implementation and the in-sample fit diagnostics reported with
//! every forecast.

pub mod base;
pub mod error;
pub mod lm;

pub use base::{ModelSummary, ModelType, Result};
pub use error::ModelError;
pub use lm::{LinearConfig, LinearModel, LinearRegression, lm};
