//! Core data structures for MenuCast
//!
//! This crate loads the per-day operational history, groups it per dish and
//! turns it into the numeric design matrix consumed by the regression models.

pub mod data;
pub mod encoding;
pub mod error;
pub mod features;

pub use error::{CoreError, Result};
