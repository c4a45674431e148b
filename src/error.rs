//! Error types for storage and configuration.
//!
//! None of these escape the engine's command surface: storage failures are
//! logged and the in-memory state stays authoritative, config failures fall
//! back to the compiled-in defaults.

use thiserror::Error;

use crate::model::Difficulty;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not be reached (no window, storage disabled).
    #[error("storage backend unavailable")]
    Unavailable,
    #[error("storage backend error: {0}")]
    Backend(String),
    #[error("failed to encode value: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config document: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("{difficulty} level probabilities sum to {sum}, expected 1")]
    InvalidProbabilities { difficulty: Difficulty, sum: f64 },
    #[error("{difficulty} has a level probability outside [0, 1]")]
    InvalidLevelProbability { difficulty: Difficulty },
    #[error("{difficulty} grants no experience")]
    ZeroReward { difficulty: Difficulty },
    #[error("max_health must be positive")]
    ZeroHealth,
}
