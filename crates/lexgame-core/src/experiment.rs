//! Experiment runner: trials of episodes over a fresh environment.
//!
//! Each trial builds a new environment seeded with `SEED + trial`, plays
//! `EPISODES` episodes, and records every measure after each step. Trials
//! are independent; only the monitors and summaries accumulate.
//!
//! [`Experiment::run_competition`] plays a single trial and additionally
//! follows how the forms of one agent compete for one object.

use lexgame_agents::Agent;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::{ExperimentConfig, GameConfig, GameKind};
use crate::environment::{Environment, GameEnvironment};
use crate::error::ExperimentError;
use crate::monitors::{Monitors, SizeFilter, lexicon_size, mean};

/// Outcome of one trial.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrialSummary {
    /// Trial index.
    pub trial: u32,
    /// Seed the trial's environment was built with.
    pub seed: u64,
    /// Episodes played.
    pub episodes: u32,
    /// Episodes in which the speaker succeeded.
    pub successes: u32,
    /// `successes / episodes`.
    pub success_rate: f64,
    /// Sum of `REWARD_SUCCESS` per success and `REWARD_FAILURE` per failure.
    pub cumulative_reward: f64,
    /// Average lexicon size over the population after the last episode.
    pub final_lexicon_size: f64,
}

/// Everything an experiment produced.
#[derive(Debug, Clone)]
pub struct ExperimentResults {
    /// Per-episode measures of every trial.
    pub monitors: Monitors,
    /// One summary per trial, in order.
    pub trials: Vec<TrialSummary>,
    /// The population as it stood at the end of the last trial.
    pub final_population: Vec<Agent>,
}

/// Whose forms, for which object, a competition run follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Competition {
    /// Population index of the observed agent.
    pub agent: usize,
    /// World index of the object whose forms compete.
    pub object: usize,
}

/// A validated experiment, ready to run.
#[derive(Debug, Clone)]
pub struct Experiment {
    config: ExperimentConfig,
    game: GameConfig,
}

impl Experiment {
    /// Validate `config` and prepare the experiment.
    pub fn new(config: ExperimentConfig) -> Result<Self, ExperimentError> {
        let game = config.validate()?;
        Ok(Self { config, game })
    }

    /// The configuration as loaded.
    pub const fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    /// The validated game configuration.
    pub const fn game(&self) -> &GameConfig {
        &self.game
    }

    /// How the lexicon-size monitor counts constructions.
    pub fn size_filter(&self) -> SizeFilter {
        if self.config.ignore_low_sa_pair {
            SizeFilter::Above(self.config.low_value_threshold())
        } else {
            SizeFilter::All
        }
    }

    /// Run every trial in order.
    pub fn run(&self) -> Result<ExperimentResults, ExperimentError> {
        info!(
            game = %self.game.kind(),
            trials = self.config.trials,
            episodes = self.config.episodes,
            seed = self.config.seed,
            "Experiment started"
        );

        let mut monitors = Monitors::new();
        let mut trials = Vec::new();
        let mut final_population = Vec::new();
        for trial in 0..self.config.trials {
            let (summary, env) = self.run_trial(trial, &mut monitors)?;
            trials.push(summary);
            final_population = env.population().to_vec();
        }

        info!(trials = trials.len(), "Experiment finished");
        Ok(ExperimentResults {
            monitors,
            trials,
            final_population,
        })
    }

    /// Play the first trial, following the forms `competition.agent` has
    /// for `competition.object` after every episode.
    ///
    /// # Errors
    ///
    /// Returns [`ExperimentError::CompetitionUnsupported`] unless the game
    /// is the Naming Game, where meanings are world objects.
    pub fn run_competition(
        &self,
        competition: Competition,
    ) -> Result<ExperimentResults, ExperimentError> {
        let game = self.game.kind();
        if game != GameKind::Naming {
            return Err(ExperimentError::CompetitionUnsupported { game });
        }
        info!(
            agent = competition.agent,
            object = competition.object,
            episodes = self.config.episodes,
            "Form competition started"
        );

        let mut monitors = Monitors::new();
        let (summary, env) = self.play_trial(0, &mut monitors, Some(competition))?;
        info!(forms = monitors.competition().len(), "Form competition finished");
        Ok(ExperimentResults {
            monitors,
            trials: vec![summary],
            final_population: env.population().to_vec(),
        })
    }

    /// Play one trial, recording into `monitors`. Returns the summary and
    /// the environment as it stood after the last episode.
    pub fn run_trial(
        &self,
        trial: u32,
        monitors: &mut Monitors,
    ) -> Result<(TrialSummary, Environment), ExperimentError> {
        self.play_trial(trial, monitors, None)
    }

    fn play_trial(
        &self,
        trial: u32,
        monitors: &mut Monitors,
        competition: Option<Competition>,
    ) -> Result<(TrialSummary, Environment), ExperimentError> {
        let seed = self.config.seed.wrapping_add(u64::from(trial));
        let mut env = Environment::new(&self.game, StdRng::seed_from_u64(seed))
            .map_err(|source| ExperimentError::Setup { trial, source })?;
        info!(trial, seed, game = %env.kind(), "Trial started");

        let filter = self.size_filter();
        let mut successes: u32 = 0;
        let mut cumulative_reward = 0.0;
        for episode in 0..self.config.episodes {
            env.reset()
                .and_then(|()| env.step(episode))
                .map_err(|source| ExperimentError::Environment {
                    trial,
                    episode,
                    source,
                })?;
            monitors.record(trial, &env, filter);
            if let Some(Competition { agent, object }) = competition {
                monitors
                    .record_form_competition(&env, agent, object)
                    .map_err(|source| ExperimentError::Environment {
                        trial,
                        episode,
                        source,
                    })?;
            }

            if env.speaker().is_some_and(Agent::communicative_success) {
                successes = successes.saturating_add(1);
                cumulative_reward += self.config.reward_success;
            } else {
                cumulative_reward += self.config.reward_failure;
            }
        }

        let summary = TrialSummary {
            trial,
            seed,
            episodes: self.config.episodes,
            successes,
            success_rate: f64::from(successes) / f64::from(self.config.episodes.max(1)),
            cumulative_reward,
            final_lexicon_size: mean(
                env.population()
                    .iter()
                    .map(|a| lexicon_size(a.lexicon(), filter)),
            ),
        };

        if successes == 0 {
            warn!(trial, episodes = summary.episodes, "Trial ended without a single success");
        }
        info!(
            trial,
            success_rate = summary.success_rate,
            cumulative_reward = summary.cumulative_reward,
            lexicon_size = summary.final_lexicon_size,
            "Trial finished"
        );
        Ok((summary, env))
    }
}
