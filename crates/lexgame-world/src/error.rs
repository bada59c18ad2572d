//! Error types for the lexgame-world crate.

/// Errors that can occur when building or sampling a world.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    /// The requested context bounds are inverted or start at zero.
    #[error("invalid context bounds: min {min}, max {max}")]
    InvalidContextBounds {
        /// Requested minimum context size.
        min: usize,
        /// Requested maximum context size.
        max: usize,
    },

    /// More objects were requested than the world holds.
    #[error("context of up to {requested} objects requested but the world only has {available}")]
    ContextTooLarge {
        /// Requested maximum context size.
        requested: usize,
        /// Number of objects in the world.
        available: usize,
    },

    /// Each object was asked to carry more categories than exist.
    #[error("{per_object} categories per object requested but only {available} categories exist")]
    TooManyCategoriesPerObject {
        /// Requested categories per object.
        per_object: usize,
        /// Size of the category universe.
        available: usize,
    },
}
