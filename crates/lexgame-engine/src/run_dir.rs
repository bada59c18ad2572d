//! Timestamped run directories and the artifacts written into them.
//!
//! ```text
//! <LOG_PATH>/<YYYY-MM-DD_HH-MM-SS>-<game>/
//!     config.yaml      copy of the input file, or the effective defaults
//!     run.json         manifest with timing and trial summaries
//!     lexicons.json    final population of the last trial
//!     monitors/*.json  one file per measure
//!     monitors/form-competition.json  with --competition only
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use lexgame_core::{ExperimentConfig, GameKind, TrialSummary};
use serde::Serialize;

use crate::error::EngineError;

/// Summary of one run, written as `run.json`.
#[derive(Debug, Serialize)]
pub struct RunManifest<'a> {
    /// Game played.
    pub game: GameKind,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// When the run finished.
    pub finished_at: DateTime<Utc>,
    /// Base seed.
    pub seed: u64,
    /// Per-trial summaries.
    pub trials: &'a [TrialSummary],
}

/// Create `<log_path>/<timestamp>-<game>` and return its path.
pub fn create(log_path: &Path, game: GameKind, now: DateTime<Utc>) -> Result<PathBuf, EngineError> {
    let name = format!("{}-{}", now.format("%Y-%m-%d_%H-%M-%S"), game.as_str());
    let dir = log_path.join(name);
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Archive the configuration: copy `source` if it exists, otherwise write
/// the effective config as YAML.
pub fn archive_config(
    dir: &Path,
    source: &Path,
    config: &ExperimentConfig,
) -> Result<PathBuf, EngineError> {
    let target = dir.join("config.yaml");
    if source.exists() {
        fs::copy(source, &target)?;
    } else {
        fs::write(&target, serde_yml::to_string(config)?)?;
    }
    Ok(target)
}

/// Write `value` as pretty JSON to `dir/name`.
pub fn write_json<T: Serialize + ?Sized>(
    dir: &Path,
    name: &str,
    value: &T,
) -> Result<PathBuf, EngineError> {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_string_pretty(value)?)?;
    Ok(path)
}
