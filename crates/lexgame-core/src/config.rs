//! Configuration loading and validation for lexgame experiments.
//!
//! An experiment is described by a flat YAML file whose keys are written in
//! upper case (`POPULATION_SIZE: 10`). Every key is optional; missing keys
//! take the defaults below. [`ExperimentConfig`] mirrors the file as-is and
//! [`ExperimentConfig::validate`] performs every check once, before any
//! episode runs, producing the typed configuration of the selected game.
//!
//! | key | default |
//! |---|---|
//! | `ENV` | `bng` |
//! | `TRIALS` / `EPISODES` | 1 / 5000 |
//! | `SEED` | 42 |
//! | `WORLD_SIZE` / `POPULATION_SIZE` | 10 / 10 |
//! | `CONTEXT_MIN_SIZE` / `CONTEXT_MAX_SIZE` | 5 / 8 |
//! | `AMOUNT_CATEGORIES` / `CATEGORIES_PER_OBJECT` | 50 / 5 |
//! | `EPS_GREEDY` | 0.1 |
//! | `INITIAL_Q_VAL` / `LEARNING_RATE` | 0.5 / 0.5 |
//! | `REWARD_SUCCESS` / `REWARD_FAILURE` / `EPSILON_FAILURE` | 1 / -1 / 0.01 |
//! | `UPDATE_RULE` | `interpolated` |
//! | `DELETE_SA_PAIR` / `LATERAL_INHIBITION` | true / true |
//! | `IGNORE_LOW_SA_PAIR` | false |
//! | `PRINT_EVERY` | 0 (never) |
//! | `LOG_PATH` | `data/log` |

use core::str::FromStr;
use std::path::{Path, PathBuf};

use lexgame_agents::{AgentError, LearningConfig, UpdateRule};
use serde::{Deserialize, Serialize};

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A learning parameter was rejected by the agent layer.
    #[error("invalid learning configuration: {source}")]
    Agent {
        /// The underlying agent error.
        #[from]
        source: AgentError,
    },

    /// `ENV` names no known game.
    #[error("environment {0:?} is not valid; expected \"bng\" or \"gg\"")]
    UnknownEnvironment(String),

    /// A value is out of range or inconsistent with another value.
    #[error("invalid {field}: {reason}")]
    Invalid {
        /// The offending configuration key.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Which game an experiment plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameKind {
    /// The basic Naming Game (`bng`).
    Naming,
    /// The Guessing Game (`gg`).
    Guessing,
}

impl GameKind {
    /// The configuration name of this game.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Naming => "bng",
            Self::Guessing => "gg",
        }
    }
}

impl FromStr for GameKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bng" => Ok(Self::Naming),
            "gg" => Ok(Self::Guessing),
            other => Err(ConfigError::UnknownEnvironment(other.to_owned())),
        }
    }
}

impl core::fmt::Display for GameKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The experiment file as written, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct ExperimentConfig {
    /// Game selector, `bng` or `gg`.
    #[serde(default = "default_env")]
    pub env: String,

    /// Number of independent trials.
    #[serde(default = "default_trials")]
    pub trials: u32,

    /// Episodes per trial.
    #[serde(default = "default_episodes")]
    pub episodes: u32,

    /// Base seed; trial `t` runs with `seed + t`.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Number of objects in the world.
    #[serde(default = "default_world_size")]
    pub world_size: usize,

    /// Number of agents.
    #[serde(default = "default_population_size")]
    pub population_size: usize,

    /// Smallest context size (inclusive).
    #[serde(default = "default_context_min_size")]
    pub context_min_size: usize,

    /// Largest context size (inclusive).
    #[serde(default = "default_context_max_size")]
    pub context_max_size: usize,

    /// Size of the category universe (Guessing Game).
    #[serde(default = "default_amount_categories")]
    pub amount_categories: usize,

    /// Categories held by each object (Guessing Game).
    #[serde(default = "default_categories_per_object")]
    pub categories_per_object: usize,

    /// Exploration rate.
    #[serde(default = "default_eps_greedy")]
    pub eps_greedy: f64,

    /// Value of new constructions.
    #[serde(default = "default_initial_q_val")]
    pub initial_q_val: f64,

    /// Step size of the interpolated rule.
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,

    /// Reward on success.
    #[serde(default = "default_reward_success")]
    pub reward_success: f64,

    /// Reward on failure and for lateral inhibition.
    #[serde(default = "default_reward_failure")]
    pub reward_failure: f64,

    /// Slack added to `REWARD_FAILURE` for the prune threshold.
    #[serde(default = "default_epsilon_failure")]
    pub epsilon_failure: f64,

    /// `interpolated` or `basic`.
    #[serde(default = "default_update_rule")]
    pub update_rule: String,

    /// Whether low-valued constructions are pruned.
    #[serde(default = "default_true")]
    pub delete_sa_pair: bool,

    /// Whether success suppresses same-meaning competitors.
    #[serde(default = "default_true")]
    pub lateral_inhibition: bool,

    /// Whether the lexicon-size monitor skips near-failure constructions.
    #[serde(default)]
    pub ignore_low_sa_pair: bool,

    /// Log a detailed episode trace every this many episodes (0 = never).
    #[serde(default)]
    pub print_every: u32,

    /// Directory under which run directories are created.
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            env: default_env(),
            trials: default_trials(),
            episodes: default_episodes(),
            seed: default_seed(),
            world_size: default_world_size(),
            population_size: default_population_size(),
            context_min_size: default_context_min_size(),
            context_max_size: default_context_max_size(),
            amount_categories: default_amount_categories(),
            categories_per_object: default_categories_per_object(),
            eps_greedy: default_eps_greedy(),
            initial_q_val: default_initial_q_val(),
            learning_rate: default_learning_rate(),
            reward_success: default_reward_success(),
            reward_failure: default_reward_failure(),
            epsilon_failure: default_epsilon_failure(),
            update_rule: default_update_rule(),
            delete_sa_pair: true,
            lateral_inhibition: true,
            ignore_low_sa_pair: false,
            print_every: 0,
            log_path: default_log_path(),
        }
    }
}

/// Settings shared by both games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EpisodeSettings {
    /// Number of objects in the world.
    pub world_size: usize,
    /// Number of agents.
    pub population_size: usize,
    /// Smallest context size (inclusive).
    pub context_min_size: usize,
    /// Largest context size (inclusive).
    pub context_max_size: usize,
    /// Detailed trace interval (0 = never).
    pub print_every: u32,
}

impl EpisodeSettings {
    /// Whether episode `episode` gets a detailed trace.
    pub const fn traces(&self, episode: u32) -> bool {
        self.print_every != 0 && episode.is_multiple_of(self.print_every)
    }
}

/// Validated configuration of a Naming Game environment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NamingGameConfig {
    /// World and episode settings.
    pub episode: EpisodeSettings,
    /// Agent learning parameters.
    pub learning: LearningConfig,
}

/// Validated configuration of a Guessing Game environment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GuessingGameConfig {
    /// World and episode settings.
    pub episode: EpisodeSettings,
    /// Agent learning parameters.
    pub learning: LearningConfig,
    /// Size of the category universe.
    pub amount_categories: usize,
    /// Categories held by each object.
    pub categories_per_object: usize,
}

/// A validated experiment: the game to play and its configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum GameConfig {
    /// Play the Naming Game.
    Naming(NamingGameConfig),
    /// Play the Guessing Game.
    Guessing(GuessingGameConfig),
}

impl GameConfig {
    /// Which game this configures.
    pub const fn kind(&self) -> GameKind {
        match self {
            Self::Naming(_) => GameKind::Naming,
            Self::Guessing(_) => GameKind::Guessing,
        }
    }
}

impl ExperimentConfig {
    /// Load experiment config from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_yml::from_str(&contents)?;
        Ok(config)
    }

    /// Parse experiment config from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }

    /// The selected game.
    pub fn game_kind(&self) -> Result<GameKind, ConfigError> {
        self.env.parse()
    }

    /// The value at or below which a construction counts as failed.
    pub fn low_value_threshold(&self) -> f64 {
        self.reward_failure + self.epsilon_failure
    }

    /// Check every value and build the configuration of the selected game.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownEnvironment`],
    /// [`ConfigError::Agent`] for an unknown update rule, or [`ConfigError::Invalid`] for
    /// the first problem found.
    pub fn validate(&self) -> Result<GameConfig, ConfigError> {
        let kind = self.game_kind()?;
        if self.trials == 0 {
            return Err(invalid("TRIALS", "must be at least 1"));
        }
        if self.episodes == 0 {
            return Err(invalid("EPISODES", "must be at least 1"));
        }
        let episode = self.episode_settings()?;
        let learning = self.learning_config()?;

        match kind {
            GameKind::Naming => Ok(GameConfig::Naming(NamingGameConfig { episode, learning })),
            GameKind::Guessing => {
                if self.categories_per_object > self.amount_categories {
                    return Err(invalid(
                        "CATEGORIES_PER_OBJECT",
                        format!(
                            "{} exceeds AMOUNT_CATEGORIES ({})",
                            self.categories_per_object, self.amount_categories
                        ),
                    ));
                }
                Ok(GameConfig::Guessing(GuessingGameConfig {
                    episode,
                    learning,
                    amount_categories: self.amount_categories,
                    categories_per_object: self.categories_per_object,
                }))
            }
        }
    }

    /// Check the world and context sizes.
    pub fn episode_settings(&self) -> Result<EpisodeSettings, ConfigError> {
        if self.population_size < 2 {
            return Err(invalid(
                "POPULATION_SIZE",
                format!("{} agents cannot form a speaker-hearer pair", self.population_size),
            ));
        }
        if self.context_min_size == 0 {
            return Err(invalid("CONTEXT_MIN_SIZE", "must be at least 1"));
        }
        if self.context_min_size > self.context_max_size {
            return Err(invalid(
                "CONTEXT_MIN_SIZE",
                format!(
                    "{} exceeds CONTEXT_MAX_SIZE ({})",
                    self.context_min_size, self.context_max_size
                ),
            ));
        }
        if self.context_max_size > self.world_size {
            return Err(invalid(
                "CONTEXT_MAX_SIZE",
                format!(
                    "{} exceeds WORLD_SIZE ({})",
                    self.context_max_size, self.world_size
                ),
            ));
        }
        Ok(EpisodeSettings {
            world_size: self.world_size,
            population_size: self.population_size,
            context_min_size: self.context_min_size,
            context_max_size: self.context_max_size,
            print_every: self.print_every,
        })
    }

    /// Parse the update rule and check the learning parameters.
    pub fn learning_config(&self) -> Result<LearningConfig, ConfigError> {
        let update_rule = self.update_rule.parse::<UpdateRule>()?;
        if !(0.0..=1.0).contains(&self.eps_greedy) {
            return Err(invalid(
                "EPS_GREEDY",
                format!("{} is not a probability", self.eps_greedy),
            ));
        }
        if !(0.0..=1.0).contains(&self.learning_rate) {
            return Err(invalid(
                "LEARNING_RATE",
                format!("{} is outside [0, 1]", self.learning_rate),
            ));
        }
        Ok(LearningConfig {
            eps_greedy: self.eps_greedy,
            initial_q_value: self.initial_q_val,
            learning_rate: self.learning_rate,
            reward_success: self.reward_success,
            reward_failure: self.reward_failure,
            epsilon_failure: self.epsilon_failure,
            update_rule,
            delete_sa_pair: self.delete_sa_pair,
            lateral_inhibition: self.lateral_inhibition,
        })
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

fn default_env() -> String {
    GameKind::Naming.as_str().to_owned()
}

const fn default_trials() -> u32 {
    1
}

const fn default_episodes() -> u32 {
    5000
}

const fn default_seed() -> u64 {
    42
}

const fn default_world_size() -> usize {
    10
}

const fn default_population_size() -> usize {
    10
}

const fn default_context_min_size() -> usize {
    5
}

const fn default_context_max_size() -> usize {
    8
}

const fn default_amount_categories() -> usize {
    50
}

const fn default_categories_per_object() -> usize {
    5
}

const fn default_eps_greedy() -> f64 {
    0.1
}

const fn default_initial_q_val() -> f64 {
    0.5
}

const fn default_learning_rate() -> f64 {
    0.5
}

const fn default_reward_success() -> f64 {
    1.0
}

const fn default_reward_failure() -> f64 {
    -1.0
}

const fn default_epsilon_failure() -> f64 {
    0.01
}

fn default_update_rule() -> String {
    UpdateRule::Interpolated.as_str().to_owned()
}

const fn default_true() -> bool {
    true
}

fn default_log_path() -> PathBuf {
    PathBuf::from("data/log")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ExperimentConfig::default();
        assert_eq!(config.seed, 42);
        assert_eq!(config.episodes, 5000);
        let game = config.validate();
        assert!(matches!(game, Ok(GameConfig::Naming(_))));
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r"
ENV: gg
TRIALS: 3
EPISODES: 200
SEED: 7
WORLD_SIZE: 12
POPULATION_SIZE: 4
CONTEXT_MIN_SIZE: 2
CONTEXT_MAX_SIZE: 4
AMOUNT_CATEGORIES: 20
CATEGORIES_PER_OBJECT: 3
EPS_GREEDY: 0.05
INITIAL_Q_VAL: 0.4
LEARNING_RATE: 0.2
REWARD_SUCCESS: 0.1
REWARD_FAILURE: -0.1
EPSILON_FAILURE: 0.0
UPDATE_RULE: basic
DELETE_SA_PAIR: false
LATERAL_INHIBITION: false
IGNORE_LOW_SA_PAIR: true
PRINT_EVERY: 50
LOG_PATH: runs
";
        let config = ExperimentConfig::parse(yaml);
        assert!(config.is_ok());
        let config = config.unwrap_or_default();
        assert_eq!(config.trials, 3);
        assert_eq!(config.log_path, PathBuf::from("runs"));
        assert!(config.ignore_low_sa_pair);

        let game = config.validate();
        assert!(matches!(game, Ok(GameConfig::Guessing(_))));
        if let Ok(GameConfig::Guessing(game)) = game {
            assert_eq!(game.amount_categories, 20);
            assert_eq!(game.episode.population_size, 4);
            assert_eq!(game.learning.update_rule, UpdateRule::Basic);
            assert!(!game.learning.delete_sa_pair);
            assert!(!game.learning.lateral_inhibition);
        }
    }

    #[test]
    fn parse_minimal_yaml() {
        let config = ExperimentConfig::parse("SEED: 9\n").unwrap_or_default();
        assert_eq!(config.seed, 9);
        assert_eq!(config.population_size, 10);
        assert_eq!(config.update_rule, "interpolated");
    }

    #[test]
    fn parse_empty_yaml() {
        assert!(ExperimentConfig::parse("").is_ok());
    }

    #[test]
    fn unknown_update_rule_fails_fast() {
        let config = ExperimentConfig {
            update_rule: String::from("fancy"),
            ..ExperimentConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Agent {
                source: AgentError::UnknownUpdateRule(name)
            }) if name == "fancy"
        ));
    }

    #[test]
    fn unknown_environment_fails_fast() {
        let config = ExperimentConfig {
            env: String::from("chess"),
            ..ExperimentConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnknownEnvironment(name)) if name == "chess"
        ));
    }

    fn rejected_field(config: &ExperimentConfig) -> Option<&'static str> {
        match config.validate() {
            Err(ConfigError::Invalid { field, .. }) => Some(field),
            _ => None,
        }
    }

    #[test]
    fn invalid_values_name_their_field() {
        let base = ExperimentConfig::default();
        let cases = [
            (ExperimentConfig { population_size: 1, ..base.clone() }, "POPULATION_SIZE"),
            (ExperimentConfig { context_min_size: 0, ..base.clone() }, "CONTEXT_MIN_SIZE"),
            (ExperimentConfig { context_min_size: 9, ..base.clone() }, "CONTEXT_MIN_SIZE"),
            (ExperimentConfig { context_max_size: 11, ..base.clone() }, "CONTEXT_MAX_SIZE"),
            (ExperimentConfig { eps_greedy: 1.5, ..base.clone() }, "EPS_GREEDY"),
            (ExperimentConfig { learning_rate: -0.1, ..base.clone() }, "LEARNING_RATE"),
            (ExperimentConfig { trials: 0, ..base.clone() }, "TRIALS"),
            (ExperimentConfig { episodes: 0, ..base.clone() }, "EPISODES"),
            (
                ExperimentConfig {
                    env: String::from("gg"),
                    categories_per_object: 60,
                    ..base
                },
                "CATEGORIES_PER_OBJECT",
            ),
        ];
        for (config, field) in &cases {
            assert_eq!(rejected_field(config), Some(*field));
        }
    }

    #[test]
    fn categories_are_not_checked_for_naming_game() {
        let config = ExperimentConfig {
            categories_per_object: 60,
            ..ExperimentConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn trace_interval() {
        let settings = ExperimentConfig {
            print_every: 10,
            ..ExperimentConfig::default()
        }
        .episode_settings();
        assert!(settings.is_ok_and(|s| s.traces(0) && s.traces(20) && !s.traces(5)));
        let never = ExperimentConfig::default().episode_settings();
        assert!(never.is_ok_and(|s| !s.traces(0)));
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("lexgame-config.yaml");
        if path.exists() {
            let config = ExperimentConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
            assert!(config.is_ok_and(|c| c.validate().is_ok()));
        }
    }
}
