//! Value update rules.
//!
//! Two interchangeable rules turn a reward into a new construction value.
//! Each also decides when a value is low enough for the construction to
//! be pruned (whether pruning actually happens is a separate switch in
//! [`LearningConfig`](crate::LearningConfig)).
//!
//! | rule | update | prune when |
//! |---|---|---|
//! | interpolated | `q + lr * (reward - q)` | `q < reward_failure + epsilon_failure` |
//! | basic | `clamp(q + reward, 0, 1)` | `q <= 0` |

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AgentError;

/// Selects how rewards change construction values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateRule {
    /// Move the value a fraction of the way towards the reward.
    #[default]
    Interpolated,
    /// Add the reward and clamp the result to `[0, 1]`.
    Basic,
}

impl UpdateRule {
    /// Compute the value after receiving `reward`.
    pub fn apply(self, old_q: f64, reward: f64, learning_rate: f64) -> f64 {
        match self {
            Self::Interpolated => learning_rate.mul_add(reward - old_q, old_q),
            Self::Basic => (old_q + reward).clamp(0.0, 1.0),
        }
    }

    /// Whether `new_q` has dropped far enough to prune the construction.
    pub fn should_prune(self, new_q: f64, reward_failure: f64, epsilon_failure: f64) -> bool {
        match self {
            Self::Interpolated => new_q < reward_failure + epsilon_failure,
            Self::Basic => new_q <= 0.0,
        }
    }

    /// The configuration name of this rule.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Interpolated => "interpolated",
            Self::Basic => "basic",
        }
    }
}

impl FromStr for UpdateRule {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "interpolated" => Ok(Self::Interpolated),
            "basic" => Ok(Self::Basic),
            other => Err(AgentError::UnknownUpdateRule(other.to_owned())),
        }
    }
}

impl core::fmt::Display for UpdateRule {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
