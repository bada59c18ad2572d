//! Error types for environments and experiments.

use lexgame_agents::AgentError;
use lexgame_lexicon::Symbol;
use lexgame_world::WorldError;

use crate::config::{ConfigError, GameKind};

/// Errors raised while building or stepping a game environment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvironmentError {
    /// World generation or context sampling failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },

    /// An agent failed to learn.
    #[error("agent error: {source}")]
    Agent {
        /// The underlying agent error.
        #[from]
        source: AgentError,
    },

    /// `step` was called without a preceding `reset`.
    #[error("episode stepped before reset")]
    NotReset,

    /// The sampled context held no object to pick a topic from.
    #[error("sampled context is empty")]
    EmptyContext,

    /// The population is too small to pick a speaker and a hearer.
    #[error("population of {size} cannot form a speaker-hearer pair")]
    PopulationTooSmall {
        /// Number of agents available.
        size: usize,
    },

    /// An agent index held by the episode is out of range.
    #[error("no agent at index {index}")]
    UnknownAgent {
        /// The stale index.
        index: usize,
    },

    /// A world object index is out of range.
    #[error("no object at index {index}")]
    UnknownObject {
        /// The requested index.
        index: usize,
    },

    /// The speaker had no meaning to express.
    #[error("speaker {agent} produced no utterance")]
    NoUtterance {
        /// The speaker's identifier.
        agent: Symbol,
    },
}

/// Errors raised while running an experiment or writing its results.
#[derive(Debug, thiserror::Error)]
pub enum ExperimentError {
    /// The configuration was rejected.
    #[error("config error: {source}")]
    Config {
        /// The underlying configuration error.
        #[from]
        source: ConfigError,
    },

    /// The environment of a trial could not be built.
    #[error("failed to set up trial {trial}: {source}")]
    Setup {
        /// Trial index.
        trial: u32,
        /// The underlying environment error.
        source: EnvironmentError,
    },

    /// An environment failed during a trial.
    #[error("environment error in trial {trial}, episode {episode}: {source}")]
    Environment {
        /// Trial index.
        trial: u32,
        /// Episode index within the trial.
        episode: u32,
        /// The underlying environment error.
        source: EnvironmentError,
    },

    /// Form competition was requested for a game whose meanings are not
    /// world objects.
    #[error("form competition needs the naming game, not {game}")]
    CompetitionUnsupported {
        /// The configured game.
        game: GameKind,
    },

    /// Writing results failed.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Serializing results failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}
