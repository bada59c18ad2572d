//! Constructions, lexicons, and word invention for the lexgame simulation.
//!
//! This crate is the leaf of the workspace. It knows nothing about agents,
//! worlds, or games; it only models the learned meaning/form associations
//! an agent owns and the utilities used to create new ones.
//!
//! # Modules
//!
//! - [`symbols`] -- String-backed [`Symbol`] (meanings, objects, agents) and [`Form`] (utterances)
//! - [`construction`] -- [`Construction`] and its identity [`ConstructionKey`]
//! - [`lexicon`] -- The ordered, duplicate-free [`Lexicon`] owned by one agent
//! - [`invention`] -- Random word forms and scoped symbolic identifiers
//! - [`table`] -- Plain-text tables used when logging lexicons
//! - [`error`] -- [`LexiconError`]

pub mod construction;
pub mod error;
pub mod invention;
pub mod lexicon;
pub mod symbols;
pub mod table;

pub use construction::{Construction, ConstructionKey};
pub use error::LexiconError;
pub use invention::{CONSONANTS, DEFAULT_SYLLABLES, ScopedIds, VOWELS, invent_form};
pub use lexicon::Lexicon;
pub use symbols::{Form, Symbol};
pub use table::render_table;
