//! Match state engine.
//!
//! Transitions over `MatchSet`:
//! - Recording a turn and detecting checkouts
//! - Undoing the last turn of a leg
//! - Advancing to the next leg, resetting the set
//! - Deciding the set winner
//!
//! Each transition either applies completely or returns a `Rejection`
//! without touching the set.

pub mod engine;
pub mod outcome;

pub use engine::NO_CURRENT_PLAYER;
pub use outcome::{Rejection, TurnOutcome, TurnResult};
