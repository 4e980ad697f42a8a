//! Turn records.
//!
//! A turn is one player's visit to the oche: the points scored and the
//! score that player has left afterwards. Turns are immutable once
//! recorded; undo pops them and rebuilds the rest of the leg.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// Turn identifier, sequential within a leg starting at 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TurnId(pub u32);

impl TurnId {
    /// The first turn of a leg.
    pub const FIRST: TurnId = TurnId(1);

    /// Create a new turn ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// The ID after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for TurnId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A recorded turn.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Turn {
    pub id: TurnId,

    /// The player who threw.
    pub player: PlayerId,

    /// Points scored this turn.
    pub points: i64,

    /// Score the player has left immediately after this turn.
    pub running_score: i64,
}

impl Turn {
    /// Create a new turn record.
    #[must_use]
    pub fn new(id: TurnId, player: PlayerId, points: i64, running_score: i64) -> Self {
        Self {
            id,
            player,
            points,
            running_score,
        }
    }

    /// Whether this turn checked out (left exactly zero).
    #[must_use]
    pub fn is_checkout(&self) -> bool {
        self.running_score == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_id_sequence() {
        assert_eq!(TurnId::FIRST, TurnId::new(1));
        assert_eq!(TurnId::FIRST.next(), TurnId::new(2));
        assert_eq!(format!("{}", TurnId::new(7)), "#7");
    }

    #[test]
    fn test_turn_checkout() {
        let turn = Turn::new(TurnId::FIRST, PlayerId::new(1), 60, 441);
        assert!(!turn.is_checkout());

        let finish = Turn::new(TurnId::new(9), PlayerId::new(1), 81, 0);
        assert!(finish.is_checkout());
    }

    #[test]
    fn test_turn_serialization() {
        let turn = Turn::new(TurnId::new(3), PlayerId::new(2), 100, 401);
        let json = serde_json::to_string(&turn).unwrap();
        let deserialized: Turn = serde_json::from_str(&json).unwrap();
        assert_eq!(turn, deserialized);
    }
}
