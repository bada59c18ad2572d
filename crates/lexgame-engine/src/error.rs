//! Error types for the experiment binary.

/// Top-level error for the experiment binary.
///
/// Wraps every failure `main` can hit so it can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading or validation failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: lexgame_core::ConfigError,
    },

    /// The experiment failed or its results could not be written.
    #[error("experiment error: {source}")]
    Experiment {
        /// The underlying experiment error.
        #[from]
        source: lexgame_core::ExperimentError,
    },

    /// Creating the run directory or writing into it failed.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Serializing a run artifact failed.
    #[error("serialization error: {source}")]
    Json {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },

    /// Rendering the effective configuration as YAML failed.
    #[error("YAML error: {source}")]
    Yaml {
        /// The underlying YAML error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for EngineError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}
