//! Outcomes of engine operations.
//!
//! Every mutating operation either applies completely or is rejected with
//! a `Rejection` and leaves the set untouched.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::PlayerId;

/// Why an operation did nothing.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum Rejection {
    #[error("no leg in progress")]
    NoCurrentLeg,
    #[error("set is already finished")]
    SetFinished,
    #[error("leg is already finished")]
    LegFinished,
    /// The throw would take the player below zero.
    #[error("bust: {points} scored with {remaining} remaining")]
    Bust { remaining: i64, points: i64 },
    #[error("no turns to remove")]
    NoTurns,
    #[error("current leg is still in progress")]
    LegInProgress,
    #[error("all {max_legs} legs have been played")]
    LegLimitReached { max_legs: u32 },
}

/// A recorded turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOutcome {
    /// Leg continues; `remaining` is what the thrower has left.
    Scored { player: PlayerId, remaining: i64 },
    /// The thrower checked out.
    LegWon { winner: PlayerId, set_won: bool },
}

impl TurnOutcome {
    #[must_use]
    pub fn leg_finished(&self) -> bool {
        matches!(self, TurnOutcome::LegWon { .. })
    }

    /// The leg winner, if this turn finished the leg.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            TurnOutcome::LegWon { winner, .. } => Some(*winner),
            TurnOutcome::Scored { .. } => None,
        }
    }
}

/// Flat view of a turn result for presentation layers:
/// `{ leg_finished, winner }`, with rejections reading as `{ false, None }`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnResult {
    pub leg_finished: bool,
    pub winner: Option<PlayerId>,
}

impl From<&Result<TurnOutcome, Rejection>> for TurnResult {
    fn from(result: &Result<TurnOutcome, Rejection>) -> Self {
        match result {
            Ok(outcome) => Self {
                leg_finished: outcome.leg_finished(),
                winner: outcome.winner(),
            },
            Err(_) => Self::default(),
        }
    }
}

impl From<Result<TurnOutcome, Rejection>> for TurnResult {
    fn from(result: Result<TurnOutcome, Rejection>) -> Self {
        Self::from(&result)
    }
}
