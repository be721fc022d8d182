//! History file loading

use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use super::observation::RawDay;
use super::*;

/// Load the per-day history file and flatten it into observations
///
/// A missing file means no history has been recorded yet and yields an empty
/// sequence. Malformed JSON and other I/O failures are errors.
pub fn load_history(path: impl AsRef<Path>) -> Result<Vec<Observation>> {
    let path = path.as_ref();

    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "history file not found");
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(DataError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    parse_history(&contents)
}

/// Parse history JSON (an array of day records with `items`) into observations
pub fn parse_history(input: &str) -> Result<Vec<Observation>> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }

    let days: Vec<RawDay> = serde_json::from_str(input)?;
    let n_days = days.len();

    let observations: Vec<Observation> = days
        .into_iter()
        .flat_map(|day| day.items.unwrap_or_default())
        .map(Observation::from)
        .collect();

    debug!(
        days = n_days,
        observations = observations.len(),
        "flattened history"
    );

    Ok(observations)
}
