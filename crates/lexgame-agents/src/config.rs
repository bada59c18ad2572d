//! Learning parameters shared by every agent in a population.
//!
//! These correspond to the learning keys of the experiment YAML file
//! (`EPS_GREEDY`, `INITIAL_Q_VAL`, `LEARNING_RATE`, the reward keys,
//! `UPDATE_RULE`, `DELETE_SA_PAIR`, and `LATERAL_INHIBITION`). The core
//! crate validates the file and builds one [`LearningConfig`] from it.

use serde::{Deserialize, Serialize};

use crate::rule::UpdateRule;

/// Tunables for action selection and value updates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LearningConfig {
    /// Probability of exploring a random candidate during production and
    /// Naming Game comprehension (default: 0.1).
    pub eps_greedy: f64,

    /// Value of newly invented or adopted constructions (default: 0.5).
    pub initial_q_value: f64,

    /// Step size of the interpolated rule (default: 0.5).
    pub learning_rate: f64,

    /// Reward for a construction used in a successful episode (default: 1.0).
    pub reward_success: f64,

    /// Reward for a failed construction and for inhibited competitors
    /// (default: -1.0).
    pub reward_failure: f64,

    /// Slack above `reward_failure` under which the interpolated rule
    /// prunes (default: 0.01).
    pub epsilon_failure: f64,

    /// Which value update to apply.
    pub update_rule: UpdateRule,

    /// Whether constructions crossing the prune threshold are removed.
    pub delete_sa_pair: bool,

    /// Whether success also penalises same-meaning competitors.
    pub lateral_inhibition: bool,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            eps_greedy: 0.1,
            initial_q_value: 0.5,
            learning_rate: 0.5,
            reward_success: 1.0,
            reward_failure: -1.0,
            epsilon_failure: 0.01,
            update_rule: UpdateRule::Interpolated,
            delete_sa_pair: true,
            lateral_inhibition: true,
        }
    }
}
