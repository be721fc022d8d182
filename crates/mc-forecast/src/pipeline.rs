//! Forecast pipeline
//!
//! Loader, feature builder, regressor and predictor run once, in that order,
//! on the full history. Nothing is carried over between runs.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, SecondsFormat, Utc};
use mc_core::CoreError;
use mc_core::data::{Observation, load_history};
use mc_core::features::FeatureBuilder;
use mc_models::{ModelError, lm};
use tracing::{debug, info, info_span};

use crate::config::ForecastConfig;
use crate::error::{ForecastError, Result};
use crate::output::write_summary;
use crate::predict::{Predictor, best_action};
use crate::summary::PredictionSummary;

/// How a run ended
#[derive(Debug, Clone, PartialEq)]
pub enum ForecastOutcome {
    /// History file missing or empty; nothing written
    NoData,
    /// History present but nothing usable after filtering; nothing written
    InsufficientData {
        /// Observations loaded
        total: usize,
        /// Observations with a name and an earning
        valid: usize,
    },
    /// Model trained and summary written
    Trained {
        summary: PredictionSummary,
        written: Vec<PathBuf>,
    },
}

impl fmt::Display for ForecastOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForecastOutcome::NoData => write!(f, "No historical data to train on. Exiting."),
            ForecastOutcome::InsufficientData { total, valid } => write!(
                f,
                "Insufficient data to train on ({} of {} observations usable). Exiting.",
                valid, total
            ),
            ForecastOutcome::Trained { summary, .. } => write!(
                f,
                "[{}] Regression model trained & summary saved. Best action: {} ({:.2})",
                summary
                    .trained_at
                    .to_rfc3339_opts(SecondsFormat::Secs, true),
                summary.best_action.dish,
                summary.best_action.value
            ),
        }
    }
}

/// Run the whole pipeline against the configured files
///
/// Missing or unusable history ends the run normally without touching the
/// output files. Read, model and write failures are errors.
pub fn run(config: &ForecastConfig) -> Result<ForecastOutcome> {
    config.validate()?;

    let _span = info_span!("forecast", input = %config.input_path.display()).entered();

    let observations = load_history(&config.input_path)?;
    info!(observations = observations.len(), "loaded history");

    if observations.is_empty() {
        info!("no historical data to train on");
        return Ok(ForecastOutcome::NoData);
    }

    let summary = match forecast(&observations, config, Utc::now()) {
        Ok(summary) => summary,
        Err(ForecastError::Core(CoreError::InsufficientData { total, valid, .. })) => {
            info!(total, valid, "insufficient data to train on");
            return Ok(ForecastOutcome::InsufficientData { total, valid });
        }
        Err(e) => return Err(e),
    };

    let written = write_summary(&summary, &[&config.summary_path, &config.mirror_path])?;

    Ok(ForecastOutcome::Trained { summary, written })
}

/// Train on `observations` and build the summary, without any file I/O
pub fn forecast(
    observations: &[Observation],
    config: &ForecastConfig,
    trained_at: DateTime<Utc>,
) -> Result<PredictionSummary> {
    let features = FeatureBuilder::new()
        .min_observations(config.min_observations)
        .build(observations)?;

    let model = lm(&features.design)?;
    debug!("\n{}", model.summary()?);

    let statistics = model.statistics().ok_or(ModelError::NotFitted)?;
    info!(
        mse = statistics.mse,
        r2 = statistics.r_squared,
        "fitted regression (in-sample metrics)"
    );

    let predictions =
        Predictor::new(&features, &model, config.waste_assumption).predict_all()?;
    let best = best_action(&predictions).ok_or(ForecastError::NoPredictions)?;
    info!(dish = %best.dish, value = best.unclamped, "best action");

    Ok(PredictionSummary::new(
        trained_at,
        features.feature_names(),
        &predictions,
        best,
        statistics,
        config.decimals,
    ))
}
