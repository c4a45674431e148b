// Rules configuration for Elemental Trek

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ConfigError;
use crate::model::Difficulty;

/// Shipped rules document, compiled into the binary.
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../config/game.toml");

const PROBABILITY_TOLERANCE: f64 = 1e-9;

/// Terrain-level weighting and victory reward for one difficulty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultySettings {
    /// Experience granted to each equipped item on victory.
    pub exp_reward: u32,
    /// Chance of a level 1, 2 and 3 cell; sums to 1.
    pub level_probabilities: [f64; 3],
}

impl DifficultySettings {
    fn validate(&self, difficulty: Difficulty) -> Result<(), ConfigError> {
        if self.exp_reward == 0 {
            return Err(ConfigError::ZeroReward { difficulty });
        }
        if self
            .level_probabilities
            .iter()
            .any(|p| !p.is_finite() || !(0.0..=1.0).contains(p))
        {
            return Err(ConfigError::InvalidLevelProbability { difficulty });
        }
        let sum: f64 = self.level_probabilities.iter().sum();
        if (sum - 1.0).abs() > PROBABILITY_TOLERANCE {
            return Err(ConfigError::InvalidProbabilities { difficulty, sum });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyTable {
    #[serde(default = "default_easy")]
    pub easy: DifficultySettings,
    #[serde(default = "default_normal")]
    pub normal: DifficultySettings,
    #[serde(default = "default_hard")]
    pub hard: DifficultySettings,
    #[serde(default = "default_expert")]
    pub expert: DifficultySettings,
}

fn default_easy() -> DifficultySettings {
    DifficultySettings { exp_reward: 30, level_probabilities: [0.7, 0.2, 0.1] }
}

fn default_normal() -> DifficultySettings {
    DifficultySettings { exp_reward: 50, level_probabilities: [0.4, 0.4, 0.2] }
}

fn default_hard() -> DifficultySettings {
    DifficultySettings { exp_reward: 80, level_probabilities: [0.2, 0.4, 0.4] }
}

fn default_expert() -> DifficultySettings {
    DifficultySettings { exp_reward: 120, level_probabilities: [0.1, 0.3, 0.6] }
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self {
            easy: default_easy(),
            normal: default_normal(),
            hard: default_hard(),
            expert: default_expert(),
        }
    }
}

impl DifficultyTable {
    pub fn get(&self, difficulty: Difficulty) -> &DifficultySettings {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Normal => &self.normal,
            Difficulty::Hard => &self.hard,
            Difficulty::Expert => &self.expert,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default = "default_max_health")]
    pub max_health: u32,
    /// Health restored when a victory is acknowledged, capped at `max_health`.
    #[serde(default = "default_victory_heal")]
    pub victory_heal: u32,
    /// Delay between lethal damage and the game-over signal.
    #[serde(default = "default_game_over_delay_ms")]
    pub game_over_delay_ms: u32,
    /// How long a notification toast stays up before dismissing itself.
    #[serde(default = "default_toast_auto_hide_ms")]
    pub toast_auto_hide_ms: u32,
    #[serde(default)]
    pub difficulty: DifficultyTable,
}

fn default_max_health() -> u32 {
    1000
}

fn default_victory_heal() -> u32 {
    300
}

fn default_game_over_delay_ms() -> u32 {
    1500
}

fn default_toast_auto_hide_ms() -> u32 {
    5000
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_health: default_max_health(),
            victory_heal: default_victory_heal(),
            game_over_delay_ms: default_game_over_delay_ms(),
            toast_auto_hide_ms: default_toast_auto_hide_ms(),
            difficulty: DifficultyTable::default(),
        }
    }
}

impl GameConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_health == 0 {
            return Err(ConfigError::ZeroHealth);
        }
        for difficulty in Difficulty::ALL {
            self.difficulty.get(difficulty).validate(difficulty)?;
        }
        Ok(())
    }

    /// The shipped document, or the compiled-in defaults if it is rejected.
    pub fn load_embedded() -> Self {
        match Self::from_toml_str(DEFAULT_CONFIG_TOML) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "embedded config rejected, using defaults");
                Self::default()
            }
        }
    }

    pub fn settings(&self, difficulty: Difficulty) -> &DifficultySettings {
        self.difficulty.get(difficulty)
    }
}
