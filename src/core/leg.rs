//! A single leg: one game counted down from the starting score to zero.
//!
//! Turns are kept in play order in an `im::Vector`, so cloning a leg (and
//! the set that owns it) shares the turn history instead of copying it.
//! Remaining scores are always recomputed from that history rather than
//! cached, which keeps them consistent across undo.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use super::set::SnapshotError;
use super::turn::{Turn, TurnId};

/// One leg of a set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leg {
    /// Leg number within the set (starts at 1).
    pub leg_number: u32,

    /// Score every player starts the leg on.
    pub starting_score: i64,

    /// Turns in play order.
    turns: Vector<Turn>,

    pub(crate) is_finished: bool,

    /// Seat index of the player to throw next.
    pub(crate) current_player_index: usize,

    /// Leg-scoped turn id sequence.
    next_turn_id: TurnId,
}

impl Leg {
    /// Create an empty, unfinished leg with player 1 to throw.
    #[must_use]
    pub fn new(leg_number: u32, starting_score: i64) -> Self {
        Self {
            leg_number,
            starting_score,
            turns: Vector::new(),
            is_finished: false,
            current_player_index: 0,
            next_turn_id: TurnId::FIRST,
        }
    }

    /// Turns in play order.
    #[must_use]
    pub fn turns(&self) -> &Vector<Turn> {
        &self.turns
    }

    /// Number of recorded turns.
    #[must_use]
    pub fn turn_count(&self) -> usize {
        self.turns.len()
    }

    /// The most recent turn, if any.
    #[must_use]
    pub fn last_turn(&self) -> Option<&Turn> {
        self.turns.back()
    }

    /// Turns thrown by one player, in order.
    pub fn turns_for(&self, player: PlayerId) -> impl Iterator<Item = &Turn> {
        self.turns.iter().filter(move |t| t.player == player)
    }

    /// Whether some player has checked out.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.is_finished
    }

    /// Seat index of the player to throw next.
    #[must_use]
    pub fn current_player_index(&self) -> usize {
        self.current_player_index
    }

    /// The player who checked out, once the leg is finished.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        if !self.is_finished {
            return None;
        }
        self.last_turn().map(|t| t.player)
    }

    /// Starting score minus everything `player` has scored this leg.
    #[must_use]
    pub fn remaining_score(&self, player: PlayerId) -> i64 {
        let scored: i64 = self.turns_for(player).map(|t| t.points).sum();
        self.starting_score - scored
    }

    /// Remaining score for each of the first `player_count` players.
    #[must_use]
    pub fn remaining_scores(&self, player_count: usize) -> FxHashMap<PlayerId, i64> {
        PlayerId::all(player_count)
            .map(|p| (p, self.remaining_score(p)))
            .collect()
    }

    /// Append a turn with the next id in sequence.
    pub(crate) fn push_turn(&mut self, player: PlayerId, points: i64, running_score: i64) -> &Turn {
        let id = self.next_turn_id;
        self.next_turn_id = id.next();
        self.turns.push_back(Turn::new(id, player, points, running_score));
        &self.turns[self.turns.len() - 1]
    }

    /// Remove the most recent turn without touching the rest.
    pub(crate) fn pop_turn(&mut self) -> Option<Turn> {
        self.turns.pop_back()
    }

    /// Rebuild ids and running scores from the points history.
    ///
    /// Ids restart at 1 and each running score is recomputed from the
    /// starting score, as if the remaining turns were thrown fresh. The
    /// next thrower becomes the seat after the last turn's player (seat 0
    /// for an empty leg).
    pub(crate) fn replay(&mut self, player_count: usize) {
        let mut scored: FxHashMap<PlayerId, i64> = FxHashMap::default();
        let mut next_id = TurnId::FIRST;

        for turn in self.turns.iter_mut() {
            let total = scored.entry(turn.player).or_insert(0);
            *total += turn.points;
            turn.id = next_id;
            turn.running_score = self.starting_score - *total;
            next_id = next_id.next();
        }
        self.next_turn_id = next_id;

        self.current_player_index = match self.turns.back() {
            Some(last) => (seat_of(last.player) + 1) % player_count.max(1),
            None => 0,
        };
    }

    /// Check a restored leg against the scoring rules for `seats`.
    ///
    /// Turn ids run 1..=n with the counter on n+1, every turn belongs to a
    /// seated player, running scores match the points history and never go
    /// below zero, and the leg is finished exactly when its last turn
    /// checked out.
    pub(crate) fn check(&self, seats: &[PlayerId]) -> Result<(), SnapshotError> {
        if self.current_player_index >= seats.len() {
            return Err(SnapshotError::SeatOutOfRange(self.current_player_index));
        }

        let mut scored: FxHashMap<PlayerId, i64> = FxHashMap::default();
        let mut expected_id = TurnId::FIRST;
        for (i, turn) in self.turns.iter().enumerate() {
            if !seats.contains(&turn.player) {
                return Err(SnapshotError::UnknownPlayer(turn.player));
            }
            if turn.id != expected_id {
                return Err(SnapshotError::TurnSequence(turn.id));
            }
            let total = scored.entry(turn.player).or_insert(0);
            *total = total
                .checked_add(turn.points)
                .ok_or(SnapshotError::RunningScore(turn.id))?;
            if turn.running_score < 0 || self.starting_score.checked_sub(*total) != Some(turn.running_score) {
                return Err(SnapshotError::RunningScore(turn.id));
            }
            if turn.is_checkout() && i + 1 != self.turns.len() {
                return Err(SnapshotError::FinishedMismatch(self.leg_number));
            }
            expected_id = expected_id.next();
        }
        if self.next_turn_id != expected_id {
            return Err(SnapshotError::TurnSequence(self.next_turn_id));
        }

        let checked_out = self.last_turn().is_some_and(Turn::is_checkout);
        if self.is_finished != checked_out {
            return Err(SnapshotError::FinishedMismatch(self.leg_number));
        }
        Ok(())
    }
}

/// Seat index for a player ID.
pub(crate) fn seat_of(player: PlayerId) -> usize {
    (player.raw() as usize).saturating_sub(1)
}
