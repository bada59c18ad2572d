//! Configuration, game environments, monitors, and the experiment runner
//! for the lexgame simulation.
//!
//! A population of agents plays repeated language games. Each episode
//! pairs a speaker with a hearer, samples a context from the world, and
//! lets the speaker talk about one object in it. The two games share the
//! episode cycle in [`environment`] and differ in what a meaning is.
//!
//! # Modules
//!
//! - [`config`] -- Loading `lexgame-config.yaml` into [`ExperimentConfig`]
//!   and validating it into a typed [`GameConfig`].
//! - [`environment`] -- [`GameEnvironment`] trait, shared [`GameState`],
//!   and the [`Environment`] selector.
//! - [`naming_game`] -- The Naming Game: meanings are objects.
//! - [`guessing_game`] -- The Guessing Game: meanings are discriminating
//!   categories.
//! - [`monitors`] -- Per-episode measures, one series per trial, and
//!   form competition.
//! - [`experiment`] -- Trials of episodes and their summaries.
//! - [`error`] -- [`EnvironmentError`] and [`ExperimentError`].

pub mod config;
pub mod environment;
pub mod error;
pub mod experiment;
pub mod guessing_game;
pub mod monitors;
pub mod naming_game;

pub use config::{
    ConfigError, EpisodeSettings, ExperimentConfig, GameConfig, GameKind, GuessingGameConfig,
    NamingGameConfig,
};
pub use environment::{Environment, EpisodeOutcome, GameEnvironment, GameState, Interaction};
pub use error::{EnvironmentError, ExperimentError};
pub use experiment::{Competition, Experiment, ExperimentResults, TrialSummary};
pub use guessing_game::GuessingGameEnv;
pub use monitors::{Monitors, SizeFilter};
pub use naming_game::NamingGameEnv;
