//! Forecast configuration
//!
//! Paths and policies for one run. The defaults reproduce the fixed layout
//! the dashboard expects; a JSON file can override any subset of fields.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ForecastError, Result};

/// Raw per-day history written by the backend
pub const DEFAULT_INPUT_PATH: &str = "data/dataformodel.json";

/// Primary summary location
pub const DEFAULT_SUMMARY_PATH: &str = "data/predicted.json";

/// Mirror read by the dashboard
pub const DEFAULT_MIRROR_PATH: &str = "../frontend/public/data/predicted.json";

/// Keep every dish, however rarely it was served
pub const DEFAULT_MIN_OBSERVATIONS: usize = 1;

/// Best-case plates wasted on the predicted day
pub const DEFAULT_WASTE_ASSUMPTION: f64 = 1.0;

/// Decimal places of reported earnings
pub const DEFAULT_DECIMALS: u32 = 2;

const MAX_DECIMALS: u32 = 15;

/// Configuration for one forecast run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// History file to train on
    pub input_path: PathBuf,
    /// Primary summary output
    pub summary_path: PathBuf,
    /// Mirror summary output for the presentation layer
    pub mirror_path: PathBuf,
    /// Dishes with fewer observations are left out of training
    pub min_observations: usize,
    /// `platesWasted` value used for every prediction row
    pub waste_assumption: f64,
    /// Rounding of reported earnings; `None` reports full precision
    pub decimals: Option<u32>,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            summary_path: PathBuf::from(DEFAULT_SUMMARY_PATH),
            mirror_path: PathBuf::from(DEFAULT_MIRROR_PATH),
            min_observations: DEFAULT_MIN_OBSERVATIONS,
            waste_assumption: DEFAULT_WASTE_ASSUMPTION,
            decimals: Some(DEFAULT_DECIMALS),
        }
    }
}

impl ForecastConfig {
    /// Default configuration with every path resolved under `base`
    pub fn rooted_at(base: impl AsRef<Path>) -> Self {
        let base = base.as_ref();
        let defaults = Self::default();

        Self {
            input_path: base.join(defaults.input_path),
            summary_path: base.join(defaults.summary_path),
            mirror_path: base.join(defaults.mirror_path),
            ..defaults
        }
    }

    /// Load a JSON configuration file; missing fields take their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let contents = fs::read_to_string(path).map_err(|source| ForecastError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self =
            serde_json::from_str(&contents).map_err(|source| ForecastError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Set the minimum observation count per dish
    pub fn with_min_observations(mut self, n: usize) -> Self {
        self.min_observations = n;
        self
    }

    /// Set the waste assumption
    pub fn with_waste_assumption(mut self, plates: f64) -> Self {
        self.waste_assumption = plates;
        self
    }

    /// Set the rounding of reported earnings
    pub fn with_decimals(mut self, decimals: Option<u32>) -> Self {
        self.decimals = decimals;
        self
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if !self.waste_assumption.is_finite() || self.waste_assumption < 0.0 {
            return Err(ForecastError::InvalidConfig {
                message: format!(
                    "waste_assumption must be a non-negative number, got {}",
                    self.waste_assumption
                ),
            });
        }

        if self.summary_path == self.mirror_path {
            return Err(ForecastError::InvalidConfig {
                message: format!(
                    "summary_path and mirror_path must differ, both are '{}'",
                    self.summary_path.display()
                ),
            });
        }

        if let Some(decimals) = self.decimals {
            if decimals > MAX_DECIMALS {
                return Err(ForecastError::InvalidConfig {
                    message: format!("decimals must be at most {}, got {}", MAX_DECIMALS, decimals),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ForecastConfig::default();
        assert_eq!(config.input_path, PathBuf::from("data/dataformodel.json"));
        assert_eq!(config.min_observations, 1);
        assert_eq!(config.waste_assumption, 1.0);
        assert_eq!(config.decimals, Some(2));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rooted_at() {
        let config = ForecastConfig::rooted_at("/srv/backend");
        assert_eq!(
            config.summary_path,
            PathBuf::from("/srv/backend/data/predicted.json")
        );
        assert_eq!(
            config.mirror_path,
            PathBuf::from("/srv/backend/../frontend/public/data/predicted.json")
        );
    }

    #[test]
    fn test_from_file_partial() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"min_observations": 3, "decimals": null}"#).unwrap();

        let config = ForecastConfig::from_file(&path).unwrap();
        assert_eq!(config.min_observations, 3);
        assert_eq!(config.decimals, None);
        assert_eq!(config.summary_path, PathBuf::from(DEFAULT_SUMMARY_PATH));
    }

    #[test]
    fn test_from_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            ForecastConfig::from_file(dir.path().join("missing.json")),
            Err(ForecastError::ConfigRead { .. })
        ));

        let path = dir.path().join("bad.json");
        fs::write(&path, "{").unwrap();
        assert!(matches!(
            ForecastConfig::from_file(&path),
            Err(ForecastError::ConfigParse { .. })
        ));
    }

    #[test]
    fn test_validate() {
        let config = ForecastConfig::default().with_waste_assumption(-1.0);
        assert!(matches!(
            config.validate(),
            Err(ForecastError::InvalidConfig { .. })
        ));

        let config = ForecastConfig::default().with_waste_assumption(f64::NAN);
        assert!(config.validate().is_err());

        let mut config = ForecastConfig::default();
        config.mirror_path = config.summary_path.clone();
        assert!(config.validate().is_err());

        let config = ForecastConfig::default().with_decimals(Some(40));
        assert!(config.validate().is_err());
    }
}
