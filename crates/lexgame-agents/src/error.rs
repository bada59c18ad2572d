//! Error types for the lexgame-agents crate.

use lexgame_lexicon::LexiconError;

/// Errors that can occur while an agent learns or is configured.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AgentError {
    /// A lexicon mutation failed.
    #[error("lexicon error: {source}")]
    Lexicon {
        /// The underlying lexicon error.
        #[from]
        source: LexiconError,
    },

    /// The configured update rule name is not recognised.
    #[error("unknown update rule {0:?}; expected \"interpolated\" or \"basic\"")]
    UnknownUpdateRule(String),
}
