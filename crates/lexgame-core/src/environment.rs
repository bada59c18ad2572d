//! Shared episode machinery and the game selector.
//!
//! Every episode moves through the same states:
//!
//! ```text
//! Idle -> Reset -> Produce -> Comprehend -> Evaluate -> Align -> Idle
//! ```
//!
//! [`GameState`] owns what both games have in common: the population, the
//! seeded random source, and the current [`Interaction`]. The games only
//! differ in their world and in how the Produce..Align steps interpret
//! meanings, so each implements [`GameEnvironment`] on top of a
//! [`GameState`]. [`Environment`] picks one of them from configuration.

use lexgame_agents::{AGENT_NAMESPACE, Agent, AlignmentReport, LearningConfig};
use lexgame_lexicon::{ScopedIds, Symbol};
use lexgame_world::ReferentialWorld;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::trace;

use crate::config::{EpisodeSettings, GameConfig, GameKind};
use crate::error::EnvironmentError;
use crate::guessing_game::GuessingGameEnv;
use crate::naming_game::NamingGameEnv;

/// How an episode ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EpisodeOutcome {
    /// The hearer identified the topic.
    Success,
    /// The hearer failed and learned from the speaker.
    FailThenAdopt,
    /// No category singled out the topic; nothing was said.
    FailDueToDiscrimination,
}

impl EpisodeOutcome {
    /// Whether the episode was a communicative success.
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    /// Short label used in logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::FailThenAdopt => "failure, hearer adopts",
            Self::FailDueToDiscrimination => "failure, no discriminating category",
        }
    }
}

impl core::fmt::Display for EpisodeOutcome {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The participants and referents of the current episode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interaction {
    /// Population index of the speaker.
    pub speaker: usize,
    /// Population index of the hearer.
    pub hearer: usize,
    /// Objects co-present in this episode.
    pub context: Vec<Symbol>,
    /// The object the speaker talks about.
    pub topic: Symbol,
}

/// Population, random source, and episode bookkeeping shared by both games.
#[derive(Debug)]
pub struct GameState {
    pub(crate) population: Vec<Agent>,
    pub(crate) rng: StdRng,
    pub(crate) settings: EpisodeSettings,
    interaction: Option<Interaction>,
    /// Set by `begin`, cleared by the step that plays the interaction.
    pending: bool,
    pub(crate) lexicon_change: bool,
    pub(crate) lexicon_coherence: bool,
}

impl GameState {
    /// Create `settings.population_size` agents with empty lexicons.
    pub fn new(
        settings: EpisodeSettings,
        learning: LearningConfig,
        ids: &mut ScopedIds,
        rng: StdRng,
    ) -> Self {
        let population = (0..settings.population_size)
            .map(|_| Agent::new(ids.next_id(AGENT_NAMESPACE), learning))
            .collect();
        Self {
            population,
            rng,
            settings,
            interaction: None,
            pending: false,
            lexicon_change: false,
            lexicon_coherence: false,
        }
    }

    /// Every agent, in creation order.
    pub fn population(&self) -> &[Agent] {
        &self.population
    }

    /// The current interaction, if `reset` has run.
    pub const fn interaction(&self) -> Option<&Interaction> {
        self.interaction.as_ref()
    }

    /// The current speaker.
    pub fn speaker(&self) -> Option<&Agent> {
        self.interaction
            .as_ref()
            .and_then(|ix| self.population.get(ix.speaker))
    }

    /// The current hearer.
    pub fn hearer(&self) -> Option<&Agent> {
        self.interaction
            .as_ref()
            .and_then(|ix| self.population.get(ix.hearer))
    }

    /// The current topic.
    pub fn topic(&self) -> Option<&Symbol> {
        self.interaction.as_ref().map(|ix| &ix.topic)
    }

    /// Whether the last step added or removed a construction.
    pub const fn lexicon_change(&self) -> bool {
        self.lexicon_change
    }

    /// Whether, in the last step, the hearer would have said what the
    /// speaker said.
    pub const fn lexicon_coherence(&self) -> bool {
        self.lexicon_coherence
    }

    /// The settings this state was built with.
    pub const fn settings(&self) -> &EpisodeSettings {
        &self.settings
    }

    /// Pick speaker, hearer, context, and topic, and reset both agents.
    pub(crate) fn begin<W: ReferentialWorld>(
        &mut self,
        world: &W,
    ) -> Result<Interaction, EnvironmentError> {
        let (speaker, hearer) = pick_pair(&mut self.rng, self.population.len())?;
        let context = world.pick_context(
            &mut self.rng,
            self.settings.context_min_size,
            self.settings.context_max_size,
        )?;
        let topic = world
            .pick_topic(&mut self.rng, &context)
            .ok_or(EnvironmentError::EmptyContext)?;

        member(&mut self.population, speaker)?
            .reset_episode(context.clone(), Some(topic.clone()));
        member(&mut self.population, hearer)?.reset_episode(context.clone(), None);
        self.lexicon_change = false;
        self.lexicon_coherence = false;

        let interaction = Interaction {
            speaker,
            hearer,
            context,
            topic,
        };
        self.interaction = Some(interaction.clone());
        self.pending = true;
        Ok(interaction)
    }

    /// Claim the interaction started by the last `begin`.
    ///
    /// Each interaction is played once; stepping again without a new
    /// `begin` is [`EnvironmentError::NotReset`].
    pub(crate) fn start_step(&mut self) -> Result<Interaction, EnvironmentError> {
        if !self.pending {
            return Err(EnvironmentError::NotReset);
        }
        let interaction = self.interaction.clone().ok_or(EnvironmentError::NotReset)?;
        self.pending = false;
        Ok(interaction)
    }

    /// Flag the episode as failed for both participants.
    pub(crate) fn fail(&mut self, interaction: &Interaction) -> Result<(), EnvironmentError> {
        member(&mut self.population, interaction.speaker)?.set_communicative_success(false);
        member(&mut self.population, interaction.hearer)?.set_communicative_success(false);
        Ok(())
    }

    /// Align speaker then hearer, noting any pruned construction.
    pub(crate) fn align(&mut self, interaction: &Interaction) -> Result<(), EnvironmentError> {
        for index in [interaction.speaker, interaction.hearer] {
            let agent = member(&mut self.population, index)?;
            let report: AlignmentReport = agent.align()?;
            if report.removed() > 0 {
                trace!(agent = %agent.id(), removed = report.removed(), "Alignment pruned lexicon");
                self.lexicon_change = true;
            }
        }
        Ok(())
    }
}

/// Pick two distinct population indices, speaker first.
pub(crate) fn pick_pair(
    rng: &mut StdRng,
    population: usize,
) -> Result<(usize, usize), EnvironmentError> {
    if population < 2 {
        return Err(EnvironmentError::PopulationTooSmall { size: population });
    }
    let mut picked = rand::seq::index::sample(rng, population, 2).into_iter();
    match (picked.next(), picked.next()) {
        (Some(speaker), Some(hearer)) => Ok((speaker, hearer)),
        _ => Err(EnvironmentError::PopulationTooSmall { size: population }),
    }
}

/// Mutable access to one agent by index.
pub(crate) fn member(
    population: &mut [Agent],
    index: usize,
) -> Result<&mut Agent, EnvironmentError> {
    population
        .get_mut(index)
        .ok_or(EnvironmentError::UnknownAgent { index })
}

/// The interface the experiment runner drives.
pub trait GameEnvironment {
    /// Start a new episode.
    fn reset(&mut self) -> Result<(), EnvironmentError>;

    /// Play the episode started by the last `reset`. Each reset allows
    /// exactly one step.
    fn step(&mut self, episode: u32) -> Result<EpisodeOutcome, EnvironmentError>;

    /// Shared population and episode state.
    fn state(&self) -> &GameState;

    /// Objects of the world, in creation order.
    fn objects(&self) -> &[Symbol];

    /// Every agent, in creation order.
    fn population(&self) -> &[Agent] {
        self.state().population()
    }

    /// The current speaker.
    fn speaker(&self) -> Option<&Agent> {
        self.state().speaker()
    }

    /// The current hearer.
    fn hearer(&self) -> Option<&Agent> {
        self.state().hearer()
    }

    /// The current topic.
    fn topic(&self) -> Option<&Symbol> {
        self.state().topic()
    }

    /// Whether the last step changed a lexicon.
    fn lexicon_change(&self) -> bool {
        self.state().lexicon_change()
    }

    /// Whether the hearer would have produced the speaker's utterance.
    fn lexicon_coherence(&self) -> bool {
        self.state().lexicon_coherence()
    }
}

/// A game environment selected by configuration.
#[derive(Debug)]
pub enum Environment {
    /// The Naming Game.
    Naming(NamingGameEnv),
    /// The Guessing Game.
    Guessing(GuessingGameEnv),
}

impl Environment {
    /// Build the environment described by `config`, drawing all randomness
    /// from `rng`.
    pub fn new(config: &GameConfig, rng: StdRng) -> Result<Self, EnvironmentError> {
        match config {
            GameConfig::Naming(naming) => Ok(Self::Naming(NamingGameEnv::new(*naming, rng))),
            GameConfig::Guessing(guessing) => {
                Ok(Self::Guessing(GuessingGameEnv::new(*guessing, rng)?))
            }
        }
    }

    /// Which game this is.
    pub const fn kind(&self) -> GameKind {
        match self {
            Self::Naming(_) => GameKind::Naming,
            Self::Guessing(_) => GameKind::Guessing,
        }
    }
}

impl GameEnvironment for Environment {
    fn reset(&mut self) -> Result<(), EnvironmentError> {
        match self {
            Self::Naming(env) => env.reset(),
            Self::Guessing(env) => env.reset(),
        }
    }

    fn step(&mut self, episode: u32) -> Result<EpisodeOutcome, EnvironmentError> {
        match self {
            Self::Naming(env) => env.step(episode),
            Self::Guessing(env) => env.step(episode),
        }
    }

    fn state(&self) -> &GameState {
        match self {
            Self::Naming(env) => env.state(),
            Self::Guessing(env) => env.state(),
        }
    }

    fn objects(&self) -> &[Symbol] {
        match self {
            Self::Naming(env) => env.objects(),
            Self::Guessing(env) => env.objects(),
        }
    }
}
