//! Match configuration.
//!
//! - `GameType`: the starting total every leg counts down from (301 or 501)
//! - `MatchConfig`: game type plus the number of legs in a set
//!
//! Configuration serializes with `serde`; the game type is written as its
//! plain starting score so JSON reads naturally (`{"game_type": 501}`).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while building or parsing a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unsupported game type {0} (expected 301 or 501)")]
    UnsupportedGameType(u32),
    #[error("a set needs at least one leg")]
    NoLegs,
    #[error("invalid config json: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Game type. Determines the starting score of every leg.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum GameType {
    Three01,
    #[default]
    Five01,
}

impl GameType {
    /// Starting score for a leg of this type.
    #[must_use]
    pub const fn starting_score(self) -> i64 {
        match self {
            GameType::Three01 => 301,
            GameType::Five01 => 501,
        }
    }
}

impl TryFrom<u32> for GameType {
    type Error = ConfigError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            301 => Ok(GameType::Three01),
            501 => Ok(GameType::Five01),
            other => Err(ConfigError::UnsupportedGameType(other)),
        }
    }
}

impl From<GameType> for u32 {
    fn from(game_type: GameType) -> Self {
        game_type.starting_score() as u32
    }
}

impl std::fmt::Display for GameType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.starting_score())
    }
}

/// Configuration for a set.
///
/// `max_legs` should be odd so a set cannot end level, but even values are
/// accepted: the first player to `legs_needed()` still wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub game_type: GameType,
    pub max_legs: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            game_type: GameType::Five01,
            max_legs: 5,
        }
    }
}

impl MatchConfig {
    /// Create a configuration.
    #[must_use]
    pub fn new(game_type: GameType, max_legs: u32) -> Self {
        Self {
            game_type,
            max_legs,
        }
    }

    /// Set the game type.
    #[must_use]
    pub fn with_game_type(mut self, game_type: GameType) -> Self {
        self.game_type = game_type;
        self
    }

    /// Set the number of legs in the set.
    #[must_use]
    pub fn with_max_legs(mut self, max_legs: u32) -> Self {
        self.max_legs = max_legs;
        self
    }

    /// Legs a player must win to take the set: `floor(max_legs / 2) + 1`.
    #[must_use]
    pub const fn legs_needed(&self) -> u32 {
        self.max_legs / 2 + 1
    }

    /// Check the configuration is playable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_legs == 0 {
            return Err(ConfigError::NoLegs);
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: MatchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
