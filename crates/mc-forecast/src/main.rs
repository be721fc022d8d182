use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use mc_forecast::{ForecastConfig, run};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Train the per-dish earning model on the recorded history and write the
/// forecast summary for the dashboard.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,

    /// Accepted for compatibility with older schedulers; has no effect
    #[arg(long)]
    episodes: Option<i64>,

    /// JSON config file (defaults are used when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries only the status line.
    const CRATES: &[&str] = &["menucast", "mc_core", "mc_models", "mc_forecast"];
    let level = cli.verbose.tracing_level_filter();
    let allowlist = CRATES
        .iter()
        .map(|c| format!("{c}={level}"))
        .collect::<Vec<_>>()
        .join(",");
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("warn,{allowlist}")))
        .with_writer(std::io::stderr)
        .init();

    if let Some(episodes) = cli.episodes {
        debug!(episodes, "ignoring --episodes");
    }

    let config = match &cli.config {
        Some(path) => ForecastConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ForecastConfig::default(),
    };

    let outcome = run(&config).context("forecast run failed")?;
    println!("{outcome}");

    Ok(())
}
