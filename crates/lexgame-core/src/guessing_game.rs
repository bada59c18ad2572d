//! The Guessing Game.
//!
//! Objects are described by categories and speakers talk about the
//! categories that single the topic out of the context. When no such
//! category exists the episode fails before anyone speaks.

use lexgame_lexicon::{ScopedIds, Symbol};
use lexgame_world::{GuessingWorld, ReferentialWorld};
use rand::rngs::StdRng;
use tracing::debug;

use crate::config::GuessingGameConfig;
use crate::environment::{EpisodeOutcome, GameEnvironment, GameState, Interaction, member};
use crate::error::EnvironmentError;

/// A Guessing Game over a fixed world and population.
#[derive(Debug)]
pub struct GuessingGameEnv {
    config: GuessingGameConfig,
    world: GuessingWorld,
    state: GameState,
    /// Categories discriminating the current topic, sorted.
    discriminating: Vec<Symbol>,
}

impl GuessingGameEnv {
    /// Create the world and population. All randomness comes from `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`EnvironmentError::World`] if objects cannot hold the
    /// requested number of categories.
    pub fn new(config: GuessingGameConfig, mut rng: StdRng) -> Result<Self, EnvironmentError> {
        let mut ids = ScopedIds::new();
        let world = GuessingWorld::new(
            config.episode.world_size,
            config.amount_categories,
            config.categories_per_object,
            &mut ids,
            &mut rng,
        )?;
        let state = GameState::new(config.episode, config.learning, &mut ids, rng);
        Ok(Self {
            config,
            world,
            state,
            discriminating: Vec::new(),
        })
    }

    /// The configuration this game was built with.
    pub const fn config(&self) -> &GuessingGameConfig {
        &self.config
    }

    /// The object-category world.
    pub const fn world(&self) -> &GuessingWorld {
        &self.world
    }

    /// Categories that discriminate the current topic, sorted.
    pub fn discriminating(&self) -> &[Symbol] {
        &self.discriminating
    }

    fn trace_episode(
        &self,
        episode: u32,
        interaction: &Interaction,
        utterance: Option<&str>,
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
            context = ?interaction.context,
            discriminating = ?self.discriminating,
            utterance,
            interpretation = ?hearer.episode().interpretation,
            %outcome,
            "Guessing game episode"
        );
        debug!(
            "contextualization:\n{}",
            self.world
                .contextualization_table(&interaction.topic, &interaction.context)
        );
        debug!("{} lexicon:\n{}", speaker.id(), speaker.lexicon());
        debug!("{} lexicon:\n{}", hearer.id(), hearer.lexicon());
    }
}

impl GameEnvironment for GuessingGameEnv {
    fn reset(&mut self) -> Result<(), EnvironmentError> {
        let interaction = self.state.begin(&self.world)?;
        self.discriminating = self
            .world
            .conceptualize(&interaction.topic, &interaction.context)
            .into_iter()
            .collect();
        Ok(())
    }

    fn step(&mut self, episode: u32) -> Result<EpisodeOutcome, EnvironmentError> {
        let interaction = self.state.start_step()?;
        let topic = &interaction.topic;
        let world = &self.world;
        let state = &mut self.state;

        if self.discriminating.is_empty() {
            state.fail(&interaction)?;
            let outcome = EpisodeOutcome::FailDueToDiscrimination;
            if self.config.episode.traces(episode) {
                self.trace_episode(episode, &interaction, None, outcome);
            }
            return Ok(outcome);
        }

        let speaker = member(&mut state.population, interaction.speaker)?;
        let production = speaker
            .produce(&self.discriminating, &mut state.rng)
            .ok_or_else(|| EnvironmentError::NoUtterance {
                agent: speaker.id().clone(),
            })?;
        state.lexicon_change = production.invented;

        let hearer = member(&mut state.population, interaction.hearer)?;
        let interpretation = hearer.comprehend_in_context(&production.form, world);
        state.lexicon_coherence =
            hearer.produce_as_hearer_in_context(topic, world).as_ref() == Some(&production.form);

        let outcome = if interpretation.as_ref() == Some(topic) {
            EpisodeOutcome::Success
        } else {
            if hearer.adopt_in_context(topic, &production.form, world).changed_lexicon() {
                state.lexicon_change = true;
            }
            state.fail(&interaction)?;
            EpisodeOutcome::FailThenAdopt
        };

        state.align(&interaction)?;

        if self.config.episode.traces(episode) {
            self.trace_episode(episode, &interaction, Some(production.form.as_str()), outcome);
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
