//! Agent identity, per-episode state, and production.
//!
//! An agent keeps its lexicon for its whole lifetime. Everything else it
//! holds is [`EpisodeState`], which the environment resets at the start of
//! every episode. The construction an agent applies in an episode is stored
//! as a [`ConstructionKey`] so that the lexicon stays the only owner of
//! construction values.

use lexgame_lexicon::{Construction, ConstructionKey, Form, Lexicon, Symbol};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Serialize;
use tracing::trace;

use crate::config::LearningConfig;
use crate::policy::epsilon_greedy;

/// Namespace used for agent identifiers.
pub const AGENT_NAMESPACE: &str = "AGENT";

/// Transient state of one agent for the current episode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EpisodeState {
    /// Whether the episode is (still) considered a success. Starts `true`.
    pub communicative_success: bool,
    /// The construction selected, invented, or interpreted this episode.
    pub applied: Option<ConstructionKey>,
    /// The objects co-present in this episode.
    pub context: Vec<Symbol>,
    /// The intended topic. Only the speaker knows it.
    pub topic: Option<Symbol>,
    /// The object the hearer inferred from the utterance.
    pub interpretation: Option<Symbol>,
    /// Constructions matching the heard form.
    pub parsed: Vec<ConstructionKey>,
    /// A parsed construction that would have led to the true topic.
    pub correct_path: Option<ConstructionKey>,
}

impl Default for EpisodeState {
    fn default() -> Self {
        Self {
            communicative_success: true,
            applied: None,
            context: Vec::new(),
            topic: None,
            interpretation: None,
            parsed: Vec::new(),
            correct_path: None,
        }
    }
}

/// The result of a production attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Production {
    /// The uttered form.
    pub form: Form,
    /// Whether a new construction had to be invented.
    pub invented: bool,
}

/// A population member: one lexicon plus its bandit policy.
#[derive(Debug, Clone, Serialize)]
pub struct Agent {
    id: Symbol,
    lexicon: Lexicon,
    #[serde(skip)]
    config: LearningConfig,
    #[serde(skip)]
    episode: EpisodeState,
}

impl Agent {
    /// Create an agent with an empty lexicon.
    pub const fn new(id: Symbol, config: LearningConfig) -> Self {
        Self::with_lexicon(id, config, Lexicon::new(config.initial_q_value))
    }

    /// Create an agent that starts from an existing lexicon.
    pub const fn with_lexicon(id: Symbol, config: LearningConfig, lexicon: Lexicon) -> Self {
        Self {
            id,
            lexicon,
            config,
            episode: EpisodeState {
                communicative_success: true,
                applied: None,
                context: Vec::new(),
                topic: None,
                interpretation: None,
                parsed: Vec::new(),
                correct_path: None,
            },
        }
    }

    /// The agent's identifier.
    pub const fn id(&self) -> &Symbol {
        &self.id
    }

    /// The agent's lexicon.
    pub const fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Mutable access to the lexicon.
    pub const fn lexicon_mut(&mut self) -> &mut Lexicon {
        &mut self.lexicon
    }

    /// The learning parameters this agent was created with.
    pub const fn config(&self) -> &LearningConfig {
        &self.config
    }

    /// The current episode state.
    pub const fn episode(&self) -> &EpisodeState {
        &self.episode
    }

    pub(crate) const fn episode_mut(&mut self) -> &mut EpisodeState {
        &mut self.episode
    }

    /// Whether the current episode counts as a success for this agent.
    pub const fn communicative_success(&self) -> bool {
        self.episode.communicative_success
    }

    /// Mark the current episode as a success or failure.
    pub const fn set_communicative_success(&mut self, success: bool) {
        self.episode.communicative_success = success;
    }

    /// The construction applied this episode, if it is still in the lexicon.
    pub fn applied(&self) -> Option<&Construction> {
        self.episode
            .applied
            .as_ref()
            .and_then(|key| self.lexicon.get(key))
    }

    /// Clear the episode state and install the new context and topic.
    pub fn reset_episode(&mut self, context: Vec<Symbol>, topic: Option<Symbol>) {
        self.episode = EpisodeState {
            context,
            topic,
            ..EpisodeState::default()
        };
    }

    /// Produce a form for one of `meanings`.
    ///
    /// Known constructions for any of the meanings are chosen epsilon-greedily.
    /// Without any, a form is invented for a uniformly chosen meaning. Either
    /// way the construction becomes the applied one. `None` only for an
    /// empty `meanings` slice.
    pub fn produce<R: Rng + ?Sized>(
        &mut self,
        meanings: &[Symbol],
        rng: &mut R,
    ) -> Option<Production> {
        let chosen = epsilon_greedy(
            &self.lexicon.lookup_by_meaning(meanings),
            self.config.eps_greedy,
            rng,
        )
        .map(Construction::key);
        let (key, invented) = if let Some(key) = chosen {
            (key, false)
        } else {
            let meaning = meanings.choose(rng)?.clone();
            let invented = self.lexicon.invent(&meaning, rng);
            trace!(agent = %self.id, construction = %invented, "Invented construction");
            (invented.key(), true)
        };

        let form = key.form.clone();
        self.episode.applied = Some(key);
        Some(Production { form, invented })
    }
}
