//! Value updates, pruning, lateral inhibition, and alignment.
//!
//! Alignment is the last step of an episode. It only acts when the agent
//! applied a construction (or, in the Guessing Game, found a correct
//! alternate path during comprehension):
//!
//! | outcome | target | reward | lateral inhibition |
//! |---|---|---|---|
//! | success | applied | success | yes |
//! | failure with correct path | correct path | success | yes |
//! | failure | applied | failure | no |
//!
//! Lateral inhibition hands the failure reward to every *other*
//! construction with the target's meaning. Peers are collected into a
//! snapshot of keys before any of them is updated, since updates can prune.

use lexgame_lexicon::{Construction, ConstructionKey};
use serde::Serialize;
use tracing::debug;

use crate::agent::Agent;
use crate::error::AgentError;

/// One value change applied to a construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueUpdate {
    /// The updated construction.
    pub key: ConstructionKey,
    /// Value before the update.
    pub old_q: f64,
    /// Value after the update.
    pub new_q: f64,
    /// Whether the construction was pruned from the lexicon.
    pub removed: bool,
}

/// Everything [`Agent::align`] changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AlignmentReport {
    /// The update of the applied construction or correct path.
    pub rewarded: Option<ValueUpdate>,
    /// Updates handed out by lateral inhibition.
    pub inhibited: Vec<ValueUpdate>,
}

impl AlignmentReport {
    /// Number of constructions pruned during alignment.
    pub fn removed(&self) -> usize {
        self.rewarded
            .iter()
            .chain(&self.inhibited)
            .filter(|update| update.removed)
            .count()
    }
}

impl Agent {
    /// Apply `reward` to the construction `key` under the configured rule,
    /// pruning it when the rule says so and deletion is enabled.
    ///
    /// `Ok(None)` if the construction is not in the lexicon.
    pub fn update(
        &mut self,
        key: &ConstructionKey,
        reward: f64,
    ) -> Result<Option<ValueUpdate>, AgentError> {
        let config = *self.config();
        let Some(construction) = self.lexicon_mut().get_mut(key) else {
            return Ok(None);
        };
        let old_q = construction.q_value();
        let new_q = config
            .update_rule
            .apply(old_q, reward, config.learning_rate);
        construction.set_q_value(new_q);

        let removed = config.update_rule.should_prune(
            new_q,
            config.reward_failure,
            config.epsilon_failure,
        ) && self.remove_construction(key)?;

        Ok(Some(ValueUpdate {
            key: key.clone(),
            old_q,
            new_q,
            removed,
        }))
    }

    /// Remove `key` from the lexicon if deletion is enabled.
    ///
    /// Returns whether the construction was removed.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Lexicon`] if deletion is enabled and the
    /// construction is not in the lexicon.
    pub fn remove_construction(&mut self, key: &ConstructionKey) -> Result<bool, AgentError> {
        if !self.config().delete_sa_pair {
            return Ok(false);
        }
        let removed = self.lexicon_mut().remove(key)?;
        debug!(agent = %self.id(), construction = %removed, "Pruned construction");
        Ok(true)
    }

    /// Give the failure reward to every construction sharing `primary`'s
    /// meaning, except `primary` itself.
    pub fn lateral_inhibition(
        &mut self,
        primary: &ConstructionKey,
    ) -> Result<Vec<ValueUpdate>, AgentError> {
        let peers: Vec<ConstructionKey> = self
            .lexicon()
            .lookup_by_meaning(core::slice::from_ref(&primary.meaning))
            .into_iter()
            .filter(|construction| !construction.matches(primary))
            .map(Construction::key)
            .collect();

        let reward_failure = self.config().reward_failure;
        let mut updates = Vec::with_capacity(peers.len());
        for peer in &peers {
            if let Some(update) = self.update(peer, reward_failure)? {
                updates.push(update);
            }
        }
        Ok(updates)
    }

    /// Learn from the outcome of the current episode.
    pub fn align(&mut self) -> Result<AlignmentReport, AgentError> {
        let episode = self.episode();
        let target = match (&episode.applied, &episode.correct_path) {
            (Some(applied), _) if episode.communicative_success => Some((applied.clone(), true)),
            (_, Some(correct)) => Some((correct.clone(), true)),
            (Some(applied), None) => Some((applied.clone(), false)),
            (None, None) => None,
        };
        let Some((key, rewarded_as_success)) = target else {
            return Ok(AlignmentReport::default());
        };

        let config = *self.config();
        let mut report = AlignmentReport::default();
        if rewarded_as_success {
            report.rewarded = self.update(&key, config.reward_success)?;
            if config.lateral_inhibition {
                report.inhibited = self.lateral_inhibition(&key)?;
            }
        } else {
            report.rewarded = self.update(&key, config.reward_failure)?;
        }
        Ok(report)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use lexgame_lexicon::{Lexicon, Symbol};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::config::LearningConfig;
    use crate::rule::UpdateRule;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn basic(delete: bool) -> LearningConfig {
        LearningConfig {
            eps_greedy: 0.0,
            reward_success: 0.1,
            reward_failure: -0.1,
            update_rule: UpdateRule::Basic,
            delete_sa_pair: delete,
            ..LearningConfig::default()
        }
    }

    fn agent(config: LearningConfig, entries: &[(&str, &str, f64)]) -> Agent {
        let mut lexicon = Lexicon::new(config.initial_q_value);
        for (meaning, form, q) in entries {
            lexicon.insert(Construction::new(*meaning, *form, *q));
        }
        Agent::with_lexicon(Symbol::from("a"), config, lexicon)
    }

    fn q(agent: &Agent, meaning: &str, form: &str) -> Option<f64> {
        agent
            .lexicon()
            .get(&ConstructionKey::new(meaning, form))
            .map(Construction::q_value)
    }

    #[test]
    fn interpolated_update_sequence() {
        let config = LearningConfig {
            learning_rate: 0.1,
            ..LearningConfig::default()
        };
        let mut agent = agent(config, &[("m1", "f1", 0.0)]);
        let key = ConstructionKey::new("m1", "f1");
        agent.update(&key, 1.0).unwrap();
        assert!(close(q(&agent, "m1", "f1").unwrap(), 0.1));
        agent.update(&key, 1.0).unwrap();
        assert!(close(q(&agent, "m1", "f1").unwrap(), 0.19));
        let update = agent.update(&key, -1.0).unwrap().unwrap();
        assert!(close(update.old_q, 0.19));
        assert!(close(update.new_q, 0.071));
        assert!(!update.removed);
    }

    #[test]
    fn basic_update_sequence() {
        let mut agent = agent(basic(true), &[("m1", "f1", 0.5)]);
        let key = ConstructionKey::new("m1", "f1");
        for expected in [0.75, 1.0, 1.0] {
            agent.update(&key, 0.25).unwrap();
            assert!(close(q(&agent, "m1", "f1").unwrap(), expected));
        }
    }

    #[test]
    fn update_of_unknown_construction_is_none() {
        let mut agent = agent(basic(true), &[]);
        let update = agent.update(&ConstructionKey::new("m1", "f1"), 1.0);
        assert_eq!(update, Ok(None));
    }

    #[test]
    fn interpolated_prunes_below_threshold() {
        let config = LearningConfig {
            learning_rate: 1.0,
            ..LearningConfig::default()
        };
        let mut agent = agent(config, &[("m1", "f1", 0.5), ("m1", "f2", 0.5)]);
        let update = agent
            .update(&ConstructionKey::new("m1", "f1"), -1.0)
            .unwrap()
            .unwrap();
        assert!(update.removed);
        assert_eq!(agent.lexicon().len(), 1);
        assert!(q(&agent, "m1", "f1").is_none());
    }

    #[test]
    fn basic_prunes_at_zero_only_when_enabled() {
        let mut pruning = agent(basic(true), &[("m1", "f1", 0.05)]);
        let key = ConstructionKey::new("m1", "f1");
        assert!(pruning.update(&key, -0.1).unwrap().unwrap().removed);
        assert!(pruning.lexicon().is_empty());

        let mut keeping = agent(basic(false), &[("m1", "f1", 0.05)]);
        let update = keeping.update(&key, -0.1).unwrap().unwrap();
        assert!(!update.removed);
        assert!(close(update.new_q, 0.0));
        assert_eq!(keeping.lexicon().len(), 1);
    }

    #[test]
    fn remove_construction_respects_flag() {
        let key = ConstructionKey::new("m1", "f1");
        let mut keeping = agent(basic(false), &[("m1", "f1", 0.5)]);
        assert_eq!(keeping.remove_construction(&key), Ok(false));
        assert_eq!(keeping.lexicon().len(), 1);

        let mut pruning = agent(basic(true), &[("m1", "f1", 0.5)]);
        assert_eq!(pruning.remove_construction(&key), Ok(true));
        assert!(pruning.remove_construction(&key).is_err());
    }

    #[test]
    fn lateral_inhibition_skips_primary() {
        let mut agent = agent(
            basic(true),
            &[("m1", "f1", 0.5), ("m1", "f2", 0.9), ("m1", "f3", 0.4), ("m2", "f1", 0.7)],
        );
        let updates = agent
            .lateral_inhibition(&ConstructionKey::new("m1", "f1"))
            .unwrap();
        assert_eq!(updates.len(), 2);
        assert!(close(q(&agent, "m1", "f1").unwrap(), 0.5));
        assert!(close(q(&agent, "m1", "f2").unwrap(), 0.8));
        assert!(close(q(&agent, "m1", "f3").unwrap(), 0.3));
        assert!(close(q(&agent, "m2", "f1").unwrap(), 0.7));
    }

    #[test]
    fn lateral_inhibition_survives_pruning_peers() {
        let config = LearningConfig {
            learning_rate: 1.0,
            ..LearningConfig::default()
        };
        let mut agent = agent(
            config,
            &[("m1", "f1", 0.5), ("m1", "f2", 0.5), ("m1", "f3", 0.5)],
        );
        let updates = agent
            .lateral_inhibition(&ConstructionKey::new("m1", "f1"))
            .unwrap();
        assert_eq!(updates.len(), 2);
        assert!(updates.iter().all(|u| u.removed));
        assert_eq!(agent.lexicon().len(), 1);
    }

    #[test]
    fn align_success_rewards_and_inhibits() {
        let mut agent = agent(basic(true), &[("m1", "f1", 0.5), ("m1", "f2", 0.9)]);
        let _ = agent.produce(&[Symbol::from("m1")], &mut StdRng::seed_from_u64(0));
        let applied = agent.episode().applied.clone().unwrap();
        assert_eq!(applied, ConstructionKey::new("m1", "f2"));
        let report = agent.align().unwrap();
        assert!(close(q(&agent, "m1", "f2").unwrap(), 1.0));
        assert!(close(q(&agent, "m1", "f1").unwrap(), 0.4));
        assert_eq!(report.inhibited.len(), 1);
        assert_eq!(report.removed(), 0);
    }

    #[test]
    fn align_success_inhibits_each_peer_once() {
        let mut agent = agent(
            basic(false),
            &[("m1", "f1", 0.6), ("m1", "f2", 0.9), ("m1", "f3", 0.6), ("m1", "f4", 0.6)],
        );
        let _ = agent.produce(&[Symbol::from("m1")], &mut StdRng::seed_from_u64(0));
        let report = agent.align().unwrap();
        assert_eq!(report.inhibited.len(), 3);
        for form in ["f1", "f3", "f4"] {
            assert!(close(q(&agent, "m1", form).unwrap(), 0.5));
        }
        assert!(close(q(&agent, "m1", "f2").unwrap(), 1.0));
    }

    #[test]
    fn align_without_lateral_inhibition() {
        let config = LearningConfig {
            lateral_inhibition: false,
            ..basic(true)
        };
        let mut agent = agent(config, &[("m1", "f1", 0.5), ("m1", "f2", 0.9)]);
        let _ = agent.produce(&[Symbol::from("m1")], &mut StdRng::seed_from_u64(0));
        let report = agent.align().unwrap();
        assert!(report.inhibited.is_empty());
        assert!(close(q(&agent, "m1", "f1").unwrap(), 0.5));
    }

    #[test]
    fn align_failure_penalises_applied_only() {
        let mut agent = agent(basic(true), &[("m1", "f1", 0.5), ("m1", "f2", 0.9)]);
        let _ = agent.produce(&[Symbol::from("m1")], &mut StdRng::seed_from_u64(0));
        agent.set_communicative_success(false);
        let report = agent.align().unwrap();
        assert!(close(q(&agent, "m1", "f2").unwrap(), 0.8));
        assert!(close(q(&agent, "m1", "f1").unwrap(), 0.5));
        assert!(report.inhibited.is_empty());
    }

    #[test]
    fn align_without_applied_does_nothing() {
        let mut agent = agent(basic(true), &[("m1", "f1", 0.5)]);
        agent.set_communicative_success(false);
        let report = agent.align().unwrap();
        assert_eq!(report, AlignmentReport::default());
        assert!(close(q(&agent, "m1", "f1").unwrap(), 0.5));
    }
}
