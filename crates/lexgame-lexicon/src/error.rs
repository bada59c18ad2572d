//! Error types for the lexgame-lexicon crate.

use crate::symbols::{Form, Symbol};

/// Errors that can occur when mutating a [`Lexicon`](crate::Lexicon).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexiconError {
    /// Attempted to remove a construction the lexicon does not hold.
    #[error("construction ({meaning} - {form}) is not in the lexicon")]
    NotFound {
        /// Meaning of the missing construction.
        meaning: Symbol,
        /// Form of the missing construction.
        form: Form,
    },
}
