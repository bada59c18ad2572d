//! The basic Naming Game.
//!
//! The world is a flat set of objects and meanings are the objects
//! themselves. Per episode the speaker names the topic (inventing a word
//! if it has none), the hearer interprets the word, and on failure the
//! hearer adopts the speaker's word for the topic.

use core::slice;

use lexgame_lexicon::{ScopedIds, Symbol};
use lexgame_world::{NamingWorld, ReferentialWorld};
use rand::rngs::StdRng;
use tracing::debug;

use crate::config::NamingGameConfig;
use crate::environment::{EpisodeOutcome, GameEnvironment, GameState, Interaction, member};
use crate::error::EnvironmentError;

/// A Naming Game over a fixed world and population.
#[derive(Debug)]
pub struct NamingGameEnv {
    config: NamingGameConfig,
    world: NamingWorld,
    state: GameState,
}

impl NamingGameEnv {
    /// Create the world and population. All randomness comes from `rng`.
    pub fn new(config: NamingGameConfig, rng: StdRng) -> Self {
        let mut ids = ScopedIds::new();
        let world = NamingWorld::new(config.episode.world_size, &mut ids);
        let state = GameState::new(config.episode, config.learning, &mut ids, rng);
        Self {
            config,
            world,
            state,
        }
    }

    /// The configuration this game was built with.
    pub const fn config(&self) -> &NamingGameConfig {
        &self.config
    }

    /// The world of objects.
    pub const fn world(&self) -> &NamingWorld {
        &self.world
    }

    fn trace_episode(
        &self,
        episode: u32,
        interaction: &Interaction,
        utterance: &str,
        outcome: EpisodeOutcome,
    ) {
        let (Some(speaker), Some(hearer)) = (self.state.speaker(), self.state.hearer()) else {
            return;
        };
        debug!(
            episode,
            speaker = %speaker.id(),
            hearer = %hearer.id(),
            topic = %interaction.topic,
            utterance,
            interpretation = ?hearer.episode().interpretation,
            %outcome,
            "Naming game episode"
        );
        debug!("{} lexicon:\n{}", speaker.id(), speaker.lexicon());
        debug!("{} lexicon:\n{}", hearer.id(), hearer.lexicon());
    }
}

impl GameEnvironment for NamingGameEnv {
    fn reset(&mut self) -> Result<(), EnvironmentError> {
        self.state.begin(&self.world)?;
        Ok(())
    }

    fn step(&mut self, episode: u32) -> Result<EpisodeOutcome, EnvironmentError> {
        let interaction = self.state.start_step()?;
        let topic = &interaction.topic;
        let state = &mut self.state;

        let speaker = member(&mut state.population, interaction.speaker)?;
        let production = speaker
            .produce(slice::from_ref(topic), &mut state.rng)
            .ok_or_else(|| EnvironmentError::NoUtterance {
                agent: speaker.id().clone(),
            })?;
        state.lexicon_change = production.invented;

        let hearer = member(&mut state.population, interaction.hearer)?;
        let interpretation = hearer.comprehend(&production.form, &mut state.rng);
        state.lexicon_coherence =
            hearer.produce_as_hearer(topic).as_ref() == Some(&production.form);

        let outcome = if interpretation.as_ref() == Some(topic) {
            EpisodeOutcome::Success
        } else {
            if hearer.adopt(topic.clone(), production.form.clone()) {
                state.lexicon_change = true;
            }
            state.fail(&interaction)?;
            EpisodeOutcome::FailThenAdopt
        };

        state.align(&interaction)?;

        if self.config.episode.traces(episode) {
            self.trace_episode(episode, &interaction, production.form.as_str(), outcome);
        }
        Ok(outcome)
    }

    fn state(&self) -> &GameState {
        &self.state
    }

    fn objects(&self) -> &[Symbol] {
        self.world.objects()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use lexgame_agents::LearningConfig;
    use lexgame_lexicon::Construction;
    use rand::SeedableRng;

    use super::*;
    use crate::config::EpisodeSettings;

    fn config(population_size: usize) -> NamingGameConfig {
        NamingGameConfig {
            episode: EpisodeSettings {
                world_size: 6,
                population_size,
                context_min_size: 2,
                context_max_size: 4,
                print_every: 1,
            },
            learning: LearningConfig::default(),
        }
    }

    #[test]
    fn builds_world_and_population() {
        let env = NamingGameEnv::new(config(3), StdRng::seed_from_u64(1));
        assert_eq!(env.world().objects().len(), 6);
        assert_eq!(env.population().len(), 3);
        assert!(env.population().iter().all(|a| a.lexicon().is_empty()));
        assert!(env.speaker().is_none());
    }

    #[test]
    fn reset_picks_distinct_pair_and_topic_in_context() {
        let mut env = NamingGameEnv::new(config(3), StdRng::seed_from_u64(1));
        for _ in 0..20 {
            env.reset().unwrap();
            let interaction = env.state().interaction().unwrap().clone();
            assert_ne!(interaction.speaker, interaction.hearer);
            assert!(interaction.context.contains(&interaction.topic));
            assert!((2..=4).contains(&interaction.context.len()));
            assert!(env.speaker().unwrap().communicative_success());
            assert!(env.hearer().unwrap().communicative_success());
            assert_eq!(
                env.speaker().unwrap().episode().topic.as_ref(),
                Some(&interaction.topic)
            );
            assert!(env.hearer().unwrap().episode().topic.is_none());
        }
    }

    #[test]
    fn step_before_reset_fails() {
        let mut env = NamingGameEnv::new(config(2), StdRng::seed_from_u64(1));
        assert_eq!(env.step(0), Err(EnvironmentError::NotReset));
    }

    #[test]
    fn each_reset_allows_one_step() {
        let mut env = NamingGameEnv::new(config(2), StdRng::seed_from_u64(4));
        env.reset().unwrap();
        env.step(0).unwrap();
        let before = env.speaker().unwrap().lexicon().to_string();
        assert_eq!(env.step(1), Err(EnvironmentError::NotReset));
        assert_eq!(env.speaker().unwrap().lexicon().to_string(), before);
        env.reset().unwrap();
        assert!(env.step(2).is_ok());
    }

    #[test]
    fn adopting_a_known_pair_is_not_a_lexicon_change() {
        let settings = NamingGameConfig {
            episode: EpisodeSettings {
                world_size: 2,
                context_min_size: 2,
                context_max_size: 2,
                ..config(2).episode
            },
            learning: LearningConfig {
                eps_greedy: 0.0,
                ..LearningConfig::default()
            },
        };
        let mut env = NamingGameEnv::new(settings, StdRng::seed_from_u64(9));
        env.reset().unwrap();
        let interaction = env.state().interaction().unwrap().clone();
        let other = env
            .objects()
            .iter()
            .find(|object| **object != interaction.topic)
            .unwrap()
            .clone();
        let population = &mut env.state.population;
        population
            .get_mut(interaction.speaker)
            .unwrap()
            .lexicon_mut()
            .insert(Construction::new(interaction.topic.clone(), "fa", 0.9));
        let hearer = population.get_mut(interaction.hearer).unwrap().lexicon_mut();
        hearer.insert(Construction::new(interaction.topic.clone(), "fa", 0.1));
        hearer.insert(Construction::new(other, "fa", 0.9));

        assert_eq!(env.step(0).unwrap(), EpisodeOutcome::FailThenAdopt);
        assert!(!env.lexicon_change());
        assert_eq!(env.hearer().unwrap().lexicon().len(), 2);
    }

    #[test]
    fn two_agents_converge() {
        let mut env = NamingGameEnv::new(config(2), StdRng::seed_from_u64(5));
        let mut outcomes = Vec::new();
        for episode in 0..400 {
            env.reset().unwrap();
            outcomes.push(env.step(episode).unwrap());
        }
        let late_successes = outcomes
            .iter()
            .skip(300)
            .filter(|o| o.is_success())
            .count();
        assert!(late_successes > 50);
    }
}
