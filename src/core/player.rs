//! Player identification and per-match player records.
//!
//! ## PlayerId
//!
//! Type-safe player identifier. Ids are 1-based and assigned in seating
//! order: the first player is `PlayerId(1)`, the second `PlayerId(2)`.
//!
//! ## Player
//!
//! Display name plus the number of legs won in the current set.

use serde::{Deserialize, Serialize};

/// Player identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Player ID for a 0-based seat index.
    #[must_use]
    pub const fn from_seat(seat: usize) -> Self {
        Self(seat as u8 + 1)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Iterate over the IDs of a match with `player_count` players.
    ///
    /// ```
    /// use darts_scorer::core::PlayerId;
    ///
    /// let ids: Vec<_> = PlayerId::all(2).collect();
    /// assert_eq!(ids, vec![PlayerId::new(1), PlayerId::new(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count).map(PlayerId::from_seat)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// A player seated in a set.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Legs won in the current set.
    pub legs_won: u32,
}

impl Player {
    /// Create a player with no legs won.
    ///
    /// The name is trimmed; a blank name falls back to the id's display
    /// form (`"Player 1"`, `"Player 2"`).
    pub fn new(id: PlayerId, name: &str) -> Self {
        let trimmed = name.trim();
        let name = if trimmed.is_empty() {
            id.to_string()
        } else {
            trimmed.to_string()
        };

        Self {
            id,
            name,
            legs_won: 0,
        }
    }

    /// Record a leg win.
    pub fn add_leg_win(&mut self) {
        self.legs_won += 1;
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} legs)", self.name, self.legs_won)
    }
}
