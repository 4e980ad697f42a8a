//! # darts-scorer
//!
//! Match state engine for two-player darts scored under 301/501 rules.
//!
//! ## Model
//!
//! A **set** is played as a series of **legs**; each leg counts both
//! players down from the starting score, one **turn** at a time. A player
//! who reaches exactly zero wins the leg, and the first player to win a
//! majority of the set's legs wins the set.
//!
//! ## Design Principles
//!
//! 1. **No Silent Failures**: Invalid operations leave the state untouched
//!    and say why via `Rejection`.
//!
//! 2. **Recompute, Don't Cache**: Remaining scores are derived from the
//!    turn history, so undo can never leave them stale.
//!
//! 3. **Cheap Snapshots**: Turn histories are persistent `im` vectors, so
//!    sets can be cloned per transition for undo/redo.
//!
//! ## Modules
//!
//! - `core`: Players, configuration, turns, legs, the set
//! - `rules`: State transitions and their outcomes
//! - `history`: Undo/redo over set snapshots

pub mod core;
pub mod rules;
pub mod history;

// Re-export commonly used types
pub use crate::core::{
    ConfigError, GameType, Leg, MatchConfig, MatchSet, Player, PlayerId, SnapshotError, Turn,
    TurnId,
};

pub use crate::rules::{Rejection, TurnOutcome, TurnResult, NO_CURRENT_PLAYER};

pub use crate::history::MatchHistory;
