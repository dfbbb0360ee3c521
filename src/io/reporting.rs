// src/io/reporting.rs

use crate::error::EnvError;
use crate::simulation::engine::HistoryRecord;
use std::path::Path;
use tracing::info;

/// Writes the per-day episode trail to a CSV file.
///
/// # Arguments
/// * `path` - Where to save the file (e.g., "results/episode_1.csv").
/// * `records` - One record per simulated day, as produced by `run_episode`.
pub fn write_episode_log<P: AsRef<Path>>(
    path: P,
    records: &[HistoryRecord],
) -> Result<(), EnvError> {
    let path = path.as_ref();
    let mut wtr = csv::Writer::from_path(path)?;

    for record in records {
        wtr.serialize(record)?;
    }

    // Flush the buffer to ensure all data is written
    wtr.flush()?;

    info!(rows = records.len(), path = %path.display(), "episode log written");
    Ok(())
}
