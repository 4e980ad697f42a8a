//! Core data model: players, configuration, turns, legs, and the set.
//!
//! This module only holds state. The transitions that keep it consistent
//! (recording turns, undo, leg and set completion) live in `crate::rules`.

pub mod player;
pub mod config;
pub mod turn;
pub mod leg;
pub mod set;

pub use player::{Player, PlayerId};
pub use config::{ConfigError, GameType, MatchConfig};
pub use turn::{Turn, TurnId};
pub use leg::Leg;
pub use set::{MatchSet, Players, SnapshotError};
