//! Agents, bandit policies, and learning rules for the lexgame simulation.
//!
//! An [`Agent`] owns one [`Lexicon`](lexgame_lexicon::Lexicon) and treats it
//! as the action space of a multi-armed bandit. Production (meaning to
//! form) and comprehension (form to meaning) are the two directions in
//! which an arm is pulled; alignment turns the outcome of an episode into
//! value updates.
//!
//! # Modules
//!
//! - [`agent`] -- [`Agent`] identity, per-episode state, and production
//! - [`config`] -- [`LearningConfig`], the tunables shared by every agent
//! - [`rule`] -- [`UpdateRule`], the interpolated and basic value updates
//! - [`policy`] -- Epsilon-greedy and greedy arm selection
//! - [`learning`] -- Value updates, pruning, lateral inhibition, alignment
//! - [`naming`] -- Naming Game comprehension, adoption, and coherence probe
//! - [`guessing`] -- Guessing Game context masking, reconceptualization, and probe
//! - [`error`] -- [`AgentError`]

pub mod agent;
pub mod config;
pub mod error;
pub mod guessing;
pub mod learning;
pub mod naming;
pub mod policy;
pub mod rule;

pub use agent::{AGENT_NAMESPACE, Agent, EpisodeState, Production};
pub use config::LearningConfig;
pub use error::AgentError;
pub use guessing::{Adoption, ContextPath};
pub use learning::{AlignmentReport, ValueUpdate};
pub use policy::{epsilon_greedy, first_max_by};
pub use rule::UpdateRule;
