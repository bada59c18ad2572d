//! Experiment binary for the lexgame simulation.
//!
//! # Startup Sequence
//!
//! 1. Parse `[CONFIG] [--debug] [--competition OBJECT [--agent AGENT]]`
//! 2. Initialize structured logging (tracing)
//! 3. Load configuration from `lexgame-config.yaml` (or the given path)
//! 4. Validate it and create a timestamped run directory under `LOG_PATH`
//! 5. Archive the configuration into the run directory
//! 6. Run every trial, or a single form-competition trial
//! 7. Write monitors, trial summaries, and final lexicons

mod cli;
mod error;
mod run_dir;

use chrono::Utc;
use clap::Parser;
use lexgame_core::{Experiment, ExperimentConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::error::EngineError;
use crate::run_dir::RunManifest;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if the arguments, the configuration, the experiment,
/// or writing its results fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(args.debug))
        .with_target(true)
        .init();

    info!("lexgame-engine starting");

    let config = load_config(&args)?;
    info!(
        env = %config.env,
        trials = config.trials,
        episodes = config.episodes,
        seed = config.seed,
        population_size = config.population_size,
        world_size = config.world_size,
        "Configuration loaded"
    );

    let experiment = Experiment::new(config)?;
    let started_at = Utc::now();
    let dir = run_dir::create(
        &experiment.config().log_path,
        experiment.game().kind(),
        started_at,
    )?;
    run_dir::archive_config(&dir, args.config_path(), experiment.config())?;
    info!(run_dir = %dir.display(), "Run directory created");

    let results = match args.competition() {
        Some(competition) => experiment.run_competition(competition)?,
        None => experiment.run()?,
    };

    let monitors = results.monitors.write(&dir)?;
    run_dir::write_json(&dir, "lexicons.json", &results.final_population)?;
    let manifest = RunManifest {
        game: experiment.game().kind(),
        started_at,
        finished_at: Utc::now(),
        seed: experiment.config().seed,
        trials: &results.trials,
    };
    run_dir::write_json(&dir, "run.json", &manifest)?;

    info!(
        run_dir = %dir.display(),
        monitors = monitors.len(),
        "lexgame-engine finished"
    );
    Ok(())
}

/// `--debug` forces debug level; otherwise `RUST_LOG`, defaulting to info.
fn env_filter(debug: bool) -> EnvFilter {
    if debug {
        return EnvFilter::new("debug");
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Load the experiment configuration.
///
/// A missing default file falls back to built-in defaults; a missing file
/// given on the command line is an error.
fn load_config(args: &Cli) -> Result<ExperimentConfig, EngineError> {
    let path = args.config_path();
    if path.exists() || args.explicit_config() {
        Ok(ExperimentConfig::from_file(path)?)
    } else {
        info!("Config file not found, using defaults");
        Ok(ExperimentConfig::default())
    }
}
