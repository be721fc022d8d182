//! Summary output
//!
//! The summary is serialized once and the same bytes go to every target, so
//! the primary file and the dashboard mirror cannot drift apart. Any failure
//! aborts the run; there is no retry and no rollback of a copy already written.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{ForecastError, Result};
use crate::summary::PredictionSummary;

/// Write the summary to each path in order, creating parent directories
pub fn write_summary<P: AsRef<Path>>(
    summary: &PredictionSummary,
    paths: &[P],
) -> Result<Vec<PathBuf>> {
    let bytes = summary.to_json_bytes()?;
    let mut written = Vec::with_capacity(paths.len());

    for path in paths {
        let path = path.as_ref();
        write_bytes(path, &bytes)?;
        info!(path = %path.display(), bytes = bytes.len(), "wrote summary");
        written.push(path.to_path_buf());
    }

    Ok(written)
}

fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    let write_error = |source| ForecastError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_error)?;
    }

    fs::write(path, bytes).map_err(write_error)
}
