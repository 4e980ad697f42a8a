//! The set: aggregate root of a match.
//!
//! Owns the two players (seat order fixed), the configuration, and the
//! leg currently being played. Finished legs are not kept; only the
//! players' leg tallies survive them.
//!
//! State transitions live in `crate::rules`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use super::config::{ConfigError, GameType, MatchConfig};
use super::leg::Leg;
use super::player::{Player, PlayerId};
use super::turn::TurnId;

/// Players seated in a set. Darts singles: two, stored inline.
pub type Players = SmallVec<[Player; 2]>;

/// Why a restored set was refused.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("expected players 1 and 2 in seat order")]
    Seating,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("leg {leg_number} starts on {found}, game type needs {expected}")]
    StartingScore {
        leg_number: u32,
        found: i64,
        expected: i64,
    },
    #[error("no seat {0}")]
    SeatOutOfRange(usize),
    #[error("{0} is not seated")]
    UnknownPlayer(PlayerId),
    #[error("turn {0} out of sequence")]
    TurnSequence(TurnId),
    #[error("running score of turn {0} does not match the points thrown")]
    RunningScore(TurnId),
    #[error("leg {0} finished flag does not match its checkout")]
    FinishedMismatch(u32),
    #[error("winner does not match the leg tallies")]
    Winner,
}

/// A set of legs between two players.
///
/// Deserializing re-checks the scoring rules, so a restored set is always
/// one the engine could have produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMatchSet")]
pub struct MatchSet {
    pub(crate) players: Players,
    pub(crate) config: MatchConfig,
    pub(crate) current_leg: Option<Leg>,
    pub(crate) is_finished: bool,
    pub(crate) winner: Option<PlayerId>,
}

/// Wire form of `MatchSet`, checked before it becomes one.
#[derive(Deserialize)]
struct RawMatchSet {
    players: Players,
    config: MatchConfig,
    current_leg: Option<Leg>,
    is_finished: bool,
    winner: Option<PlayerId>,
}

impl TryFrom<RawMatchSet> for MatchSet {
    type Error = SnapshotError;

    fn try_from(raw: RawMatchSet) -> Result<Self, Self::Error> {
        let set = MatchSet {
            players: raw.players,
            config: raw.config,
            current_leg: raw.current_leg,
            is_finished: raw.is_finished,
            winner: raw.winner,
        };
        set.check()?;
        Ok(set)
    }
}

impl Default for MatchSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl MatchSet {
    /// A set with no players and no leg, using the default configuration.
    #[must_use]
    pub fn empty() -> Self {
        Self::with_config(Players::new(), MatchConfig::default())
    }

    pub(crate) fn with_config(players: Players, config: MatchConfig) -> Self {
        Self {
            players,
            config,
            current_leg: None,
            is_finished: false,
            winner: None,
        }
    }

    /// Check the set against the scoring rules.
    ///
    /// An empty set (no players, no leg) is accepted; otherwise exactly
    /// players 1 and 2 are seated in order, the configuration is valid,
    /// the current leg passes `Leg::check`, and the winner is set exactly
    /// when a player holds the legs needed.
    pub fn check(&self) -> Result<(), SnapshotError> {
        self.config.validate()?;

        if self.players.is_empty() {
            if self.current_leg.is_some() || self.is_finished || self.winner.is_some() {
                return Err(SnapshotError::Seating);
            }
            return Ok(());
        }

        let seated = self
            .players
            .iter()
            .map(|p| p.id)
            .eq(PlayerId::all(2));
        if !seated {
            return Err(SnapshotError::Seating);
        }

        if let Some(leg) = &self.current_leg {
            let expected = self.config.game_type.starting_score();
            if leg.starting_score != expected {
                return Err(SnapshotError::StartingScore {
                    leg_number: leg.leg_number,
                    found: leg.starting_score,
                    expected,
                });
            }
            let seats: Vec<PlayerId> = self.players.iter().map(|p| p.id).collect();
            leg.check(&seats)?;
        }

        let needed = self.config.legs_needed();
        let decided = self
            .players
            .iter()
            .find(|p| p.legs_won >= needed)
            .map(|p| p.id);
        if self.winner != decided || self.is_finished != decided.is_some() {
            return Err(SnapshotError::Winner);
        }
        if self.is_finished && self.current_leg.as_ref().is_some_and(|leg| !leg.is_finished) {
            return Err(SnapshotError::Winner);
        }
        Ok(())
    }

    /// Players in seat order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Look up a player by ID.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Number of seated players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    #[must_use]
    pub fn game_type(&self) -> GameType {
        self.config.game_type
    }

    #[must_use]
    pub fn max_legs(&self) -> u32 {
        self.config.max_legs
    }

    /// Legs a player must win to take the set.
    #[must_use]
    pub fn legs_needed(&self) -> u32 {
        self.config.legs_needed()
    }

    /// The leg in play, if a match has started.
    #[must_use]
    pub fn current_leg(&self) -> Option<&Leg> {
        self.current_leg.as_ref()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.is_finished
    }

    /// The set winner, once decided.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    /// The player due to throw in the current leg.
    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        let leg = self.current_leg.as_ref()?;
        self.players.get(leg.current_player_index)
    }
}
