//! Referential worlds for the lexgame simulation.
//!
//! A world is the set of things agents can talk about. The Naming Game
//! world is a flat set of object symbols; the Guessing Game world maps
//! every object to a fixed subset of a category universe, and agents must
//! talk about categories that single the topic out of its context.
//!
//! # Modules
//!
//! - [`referential`] -- The [`ReferentialWorld`] trait with context and topic sampling
//! - [`naming`] -- [`NamingWorld`], a flat set of objects
//! - [`guessing`] -- [`GuessingWorld`], objects described by categories, plus conceptualization
//! - [`error`] -- [`WorldError`]

pub mod error;
pub mod guessing;
pub mod naming;
pub mod referential;

pub use error::WorldError;
pub use guessing::GuessingWorld;
pub use naming::NamingWorld;
pub use referential::ReferentialWorld;
