//! Match state engine: the transitions over a `MatchSet`.
//!
//! Scoring is subtract-to-zero. A turn that would leave the thrower below
//! zero is rejected; a turn that leaves exactly zero wins the leg, and the
//! first player to win a majority of `max_legs` wins the set.
//!
//! ## Caller contract
//!
//! `points` is trusted. The engine does not check the 0-180 range of a
//! three-dart visit, nor that points are non-negative; a presentation
//! layer collecting input is expected to do that. The only rule enforced
//! here is that remaining scores never go below zero.
//!
//! ## Undo
//!
//! `remove_last_turn` only works inside an unfinished leg. A checkout
//! cannot be taken back through it; use `crate::history::MatchHistory`
//! to step back across leg boundaries.

use log::{debug, info, trace};

use crate::core::{GameType, Leg, MatchConfig, MatchSet, Player, PlayerId, Players, Turn};

use super::outcome::{Rejection, TurnOutcome};

/// Shown by `current_player_name` when no leg is in progress.
pub const NO_CURRENT_PLAYER: &str = "-";

/// Number of seats in a set.
const PLAYER_COUNT: usize = 2;

impl MatchSet {
    /// Start a new set and its first leg.
    ///
    /// Names are trimmed; blank names become `"Player 1"` / `"Player 2"`.
    ///
    /// ```
    /// use darts_scorer::core::{GameType, MatchSet};
    ///
    /// let set = MatchSet::start_new("", "  Bob  ", GameType::Three01, 3);
    /// assert_eq!(set.players()[0].name, "Player 1");
    /// assert_eq!(set.players()[1].name, "Bob");
    /// assert_eq!(set.current_leg().map(|l| l.starting_score), Some(301));
    /// ```
    #[must_use]
    pub fn start_new(name1: &str, name2: &str, game_type: GameType, max_legs: u32) -> Self {
        Self::from_config(name1, name2, &MatchConfig::new(game_type, max_legs))
    }

    /// Start a new set from a configuration.
    #[must_use]
    pub fn from_config(name1: &str, name2: &str, config: &MatchConfig) -> Self {
        let players: Players = [name1, name2]
            .iter()
            .enumerate()
            .map(|(seat, name)| Player::new(PlayerId::from_seat(seat), name))
            .collect();

        let mut set = Self::with_config(players, *config);
        set.current_leg = Some(set.create_leg(1));

        debug!(
            "new set: {} vs {}, {} best of {}",
            set.players[0].name, set.players[1].name, config.game_type, config.max_legs
        );
        set
    }

    /// A fresh leg for this set: empty history, player 1 to throw, turn ids
    /// starting at 1.
    #[must_use]
    pub fn create_leg(&self, leg_number: u32) -> Leg {
        Leg::new(leg_number, self.config.game_type.starting_score())
    }

    /// Record a turn for the player due to throw.
    ///
    /// Sets come from `from_config` or a checked `Deserialize`, so the
    /// next-thrower index always names a seated player.
    ///
    /// On a checkout the leg finishes, the thrower's leg tally goes up and
    /// the set winner is re-evaluated; the next-thrower index stays put.
    /// Otherwise play passes to the other player.
    pub fn add_turn(&mut self, points: i64) -> Result<TurnOutcome, Rejection> {
        if self.is_finished {
            trace!("turn of {} rejected: set finished", points);
            return Err(Rejection::SetFinished);
        }
        let leg = self.current_leg.as_mut().ok_or(Rejection::NoCurrentLeg)?;
        if leg.is_finished {
            trace!("turn of {} rejected: leg finished", points);
            return Err(Rejection::LegFinished);
        }

        let seat = leg.current_player_index;
        let player = self.players[seat].id;
        let remaining = leg.remaining_score(player);
        let after = match remaining.checked_sub(points) {
            Some(after) if after >= 0 => after,
            _ => {
                trace!("{} busts: {} scored with {} remaining", player, points, remaining);
                return Err(Rejection::Bust { remaining, points });
            }
        };

        let turn_id = leg.push_turn(player, points, after).id;
        debug!(
            "leg {} turn {}: {} scores {}, {} left",
            leg.leg_number, turn_id, player, points, after
        );

        if after > 0 {
            leg.current_player_index = (leg.current_player_index + 1) % PLAYER_COUNT;
            return Ok(TurnOutcome::Scored {
                player,
                remaining: after,
            });
        }

        leg.is_finished = true;
        let leg_number = leg.leg_number;
        let winner = &mut self.players[seat];
        winner.add_leg_win();
        info!("{} wins leg {} ({} legs)", winner.name, leg_number, winner.legs_won);
        let set_won = self.update_winner() == Some(player);

        Ok(TurnOutcome::LegWon {
            winner: player,
            set_won,
        })
    }

    /// Pure form of `add_turn`: returns the next set, leaving `self` as is.
    ///
    /// Turn history is persistent, so the copy shares it with `self`.
    #[must_use]
    pub fn with_turn(&self, points: i64) -> (MatchSet, Result<TurnOutcome, Rejection>) {
        let mut next = self.clone();
        let result = next.add_turn(points);
        (next, result)
    }

    /// Undo the most recent turn of the current leg.
    ///
    /// The remaining turns are replayed from the starting score, so ids,
    /// running scores and the next thrower are exactly what they would be
    /// had the removed turn never been thrown. Finished legs are refused.
    pub fn remove_last_turn(&mut self) -> Result<Turn, Rejection> {
        let leg = self.current_leg.as_mut().ok_or(Rejection::NoCurrentLeg)?;
        if leg.is_finished {
            return Err(Rejection::LegFinished);
        }
        let removed = leg.pop_turn().ok_or(Rejection::NoTurns)?;
        leg.replay(PLAYER_COUNT);

        debug!(
            "leg {}: removed {} of {} by {}",
            leg.leg_number, removed.points, removed.id, removed.player
        );
        Ok(removed)
    }

    /// Remaining score of `player` in the current leg.
    #[must_use]
    pub fn remaining_score(&self, player: PlayerId) -> Option<i64> {
        self.current_leg.as_ref().map(|leg| leg.remaining_score(player))
    }

    /// Whether the current leg is over and the set is not.
    #[must_use]
    pub fn can_start_next_leg(&self) -> bool {
        self.next_leg_blocker().is_none()
    }

    fn next_leg_blocker(&self) -> Option<Rejection> {
        match &self.current_leg {
            None => Some(Rejection::NoCurrentLeg),
            Some(_) if self.is_finished => Some(Rejection::SetFinished),
            Some(leg) if !leg.is_finished => Some(Rejection::LegInProgress),
            Some(_) => None,
        }
    }

    /// Replace the finished leg with the next one. Returns the new leg
    /// number.
    pub fn start_next_leg(&mut self) -> Result<u32, Rejection> {
        if let Some(blocker) = self.next_leg_blocker() {
            return Err(blocker);
        }
        let next_number = self
            .current_leg
            .as_ref()
            .map_or(1, |leg| leg.leg_number + 1);
        if next_number > self.config.max_legs {
            return Err(Rejection::LegLimitReached {
                max_legs: self.config.max_legs,
            });
        }

        self.current_leg = Some(self.create_leg(next_number));
        debug!("leg {} started", next_number);
        Ok(next_number)
    }

    /// Clear all leg tallies and the winner, and drop the current leg.
    /// Players and configuration are kept.
    pub fn reset(&mut self) {
        for player in self.players.iter_mut() {
            player.legs_won = 0;
        }
        self.is_finished = false;
        self.winner = None;
        self.current_leg = None;
        debug!("set reset");
    }

    /// Decide the set if a player has reached the legs needed.
    ///
    /// Players are scanned in seat order and the first qualifying player
    /// wins. Once decided, the winner never changes (until `reset`).
    pub fn update_winner(&mut self) -> Option<PlayerId> {
        if self.is_finished {
            return self.winner;
        }
        let needed = self.config.legs_needed();
        if let Some(player) = self.players.iter().find(|p| p.legs_won >= needed) {
            info!("{} wins the set with {} legs", player.name, player.legs_won);
            self.winner = Some(player.id);
            self.is_finished = true;
        }
        self.winner
    }

    /// Name of the player due to throw, or `NO_CURRENT_PLAYER`.
    #[must_use]
    pub fn current_player_name(&self) -> &str {
        self.current_player()
            .map_or(NO_CURRENT_PLAYER, |p| p.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(id: u8) -> PlayerId {
        PlayerId::new(id)
    }

    fn new_set() -> MatchSet {
        MatchSet::start_new("Ann", "Bob", GameType::Five01, 5)
    }

    /// Play a leg where player 1 checks out in four visits and player 2
    /// scores 20 a visit.
    fn win_leg_for_player_one(set: &mut MatchSet) -> TurnOutcome {
        for points in [140, 140, 140] {
            set.add_turn(points).unwrap();
            set.add_turn(20).unwrap();
        }
        set.add_turn(81).unwrap()
    }

    #[test]
    fn test_start_new() {
        let set = MatchSet::start_new("", "  Bob  ", GameType::Three01, 3);

        assert_eq!(set.players()[0].name, "Player 1");
        assert_eq!(set.players()[1].name, "Bob");
        assert_eq!(set.players()[0].id, p(1));
        assert_eq!(set.players()[1].id, p(2));
        assert!(set.players().iter().all(|pl| pl.legs_won == 0));

        let leg = set.current_leg().unwrap();
        assert_eq!(leg.leg_number, 1);
        assert_eq!(leg.starting_score, 301);
        assert_eq!(leg.current_player_index(), 0);
        assert!(!set.is_finished());
    }

    #[test]
    fn test_add_turn_alternates() {
        let mut set = new_set();

        let outcome = set.add_turn(60).unwrap();
        assert_eq!(outcome, TurnOutcome::Scored { player: p(1), remaining: 441 });
        assert_eq!(set.current_player_name(), "Bob");

        set.add_turn(45).unwrap();
        assert_eq!(set.current_player_name(), "Ann");
        assert_eq!(set.remaining_score(p(2)), Some(456));
    }

    #[test]
    fn test_checkout_wins_leg() {
        let mut set = new_set();
        let outcome = win_leg_for_player_one(&mut set);

        assert_eq!(outcome, TurnOutcome::LegWon { winner: p(1), set_won: false });
        let leg = set.current_leg().unwrap();
        assert!(leg.is_finished());
        assert_eq!(leg.winner(), Some(p(1)));
        assert_eq!(leg.current_player_index(), 0);
        assert_eq!(set.players()[0].legs_won, 1);
        assert!(!set.is_finished());
    }

    #[test]
    fn test_bust_rejected() {
        let mut set = MatchSet::start_new("Ann", "Bob", GameType::Three01, 3);
        set.add_turn(161).unwrap();
        set.add_turn(100).unwrap();
        set.add_turn(100).unwrap();
        set.add_turn(100).unwrap();
        assert_eq!(set.remaining_score(p(1)), Some(40));

        let before = set.clone();
        assert_eq!(
            set.add_turn(45),
            Err(Rejection::Bust { remaining: 40, points: 45 })
        );
        assert_eq!(set, before);
    }

    #[test]
    fn test_extreme_points_bust_instead_of_overflow() {
        let mut set = new_set();
        let before = set.clone();

        assert_eq!(
            set.add_turn(i64::MIN),
            Err(Rejection::Bust { remaining: 501, points: i64::MIN })
        );
        assert_eq!(
            set.add_turn(i64::MAX),
            Err(Rejection::Bust { remaining: 501, points: i64::MAX })
        );
        assert_eq!(set, before);
    }

    #[test]
    fn test_add_turn_without_leg() {
        let mut set = MatchSet::empty();
        assert_eq!(set.add_turn(60), Err(Rejection::NoCurrentLeg));
        assert_eq!(set.current_player_name(), NO_CURRENT_PLAYER);
    }

    #[test]
    fn test_add_turn_after_checkout() {
        let mut set = new_set();
        win_leg_for_player_one(&mut set);

        let before = set.clone();
        assert_eq!(set.add_turn(20), Err(Rejection::LegFinished));
        assert_eq!(set, before);
    }

    #[test]
    fn test_remove_last_turn() {
        let mut set = new_set();
        set.add_turn(60).unwrap();
        set.add_turn(45).unwrap();
        set.add_turn(100).unwrap();

        let removed = set.remove_last_turn().unwrap();
        assert_eq!(removed.points, 100);

        let leg = set.current_leg().unwrap();
        assert_eq!(leg.turn_count(), 2);
        assert_eq!(leg.current_player_index(), 0);
        assert_eq!(leg.turns()[0].running_score, 441);
        assert_eq!(leg.turns()[1].running_score, 456);
    }

    #[test]
    fn test_remove_last_turn_rejections() {
        let mut empty = MatchSet::empty();
        assert_eq!(empty.remove_last_turn(), Err(Rejection::NoCurrentLeg));

        let mut set = new_set();
        assert_eq!(set.remove_last_turn(), Err(Rejection::NoTurns));

        win_leg_for_player_one(&mut set);
        let before = set.clone();
        assert_eq!(set.remove_last_turn(), Err(Rejection::LegFinished));
        assert_eq!(set, before);
    }

    #[test]
    fn test_remove_only_turn_resets_index() {
        let mut set = new_set();
        set.add_turn(60).unwrap();
        set.remove_last_turn().unwrap();

        let leg = set.current_leg().unwrap();
        assert_eq!(leg.turn_count(), 0);
        assert_eq!(leg.current_player_index(), 0);
    }

    #[test]
    fn test_start_next_leg() {
        let mut set = new_set();
        assert!(!set.can_start_next_leg());
        assert_eq!(set.start_next_leg(), Err(Rejection::LegInProgress));

        win_leg_for_player_one(&mut set);
        assert!(set.can_start_next_leg());
        assert_eq!(set.start_next_leg(), Ok(2));

        let leg = set.current_leg().unwrap();
        assert_eq!(leg.leg_number, 2);
        assert_eq!(leg.turn_count(), 0);
        assert_eq!(leg.current_player_index(), 0);
        assert_eq!(leg.remaining_score(p(1)), 501);
    }

    #[test]
    fn test_set_won() {
        let mut set = MatchSet::start_new("Ann", "Bob", GameType::Five01, 3);

        win_leg_for_player_one(&mut set);
        set.start_next_leg().unwrap();
        let outcome = win_leg_for_player_one(&mut set);

        assert_eq!(outcome, TurnOutcome::LegWon { winner: p(1), set_won: true });
        assert!(set.is_finished());
        assert_eq!(set.winner(), Some(p(1)));
        assert!(!set.can_start_next_leg());
        assert_eq!(set.start_next_leg(), Err(Rejection::SetFinished));
        assert_eq!(set.add_turn(10), Err(Rejection::SetFinished));
    }

    #[test]
    fn test_leg_limit() {
        let mut single = MatchSet::start_new("Ann", "Bob", GameType::Five01, 1);
        win_leg_for_player_one(&mut single);
        assert!(single.is_finished());

        let mut even = MatchSet::start_new("Ann", "Bob", GameType::Five01, 2);
        win_leg_for_player_one(&mut even);
        even.start_next_leg().unwrap();
        // Player 2 takes leg two: 1-1, nobody has the two legs needed.
        for _ in 0..3 {
            even.add_turn(20).unwrap();
            even.add_turn(140).unwrap();
        }
        even.add_turn(20).unwrap();
        even.add_turn(81).unwrap();
        assert!(!even.is_finished());
        assert_eq!(even.start_next_leg(), Err(Rejection::LegLimitReached { max_legs: 2 }));
    }

    #[test]
    fn test_update_winner_needs_majority() {
        let mut set = new_set();
        set.players[1].legs_won = 2;
        assert_eq!(set.update_winner(), None);
        assert!(!set.is_finished());

        set.players[1].legs_won = 3;
        assert_eq!(set.update_winner(), Some(p(2)));
        assert!(set.is_finished());

        set.players[0].legs_won = 4;
        assert_eq!(set.update_winner(), Some(p(2)));
    }

    #[test]
    fn test_reset() {
        let mut set = MatchSet::start_new("Ann", "Bob", GameType::Three01, 1);
        set.add_turn(301).unwrap();
        assert!(set.is_finished());

        set.reset();
        assert!(!set.is_finished());
        assert_eq!(set.winner(), None);
        assert!(set.current_leg().is_none());
        assert!(set.players().iter().all(|pl| pl.legs_won == 0));
        assert_eq!(set.players()[0].name, "Ann");
        assert_eq!(set.game_type(), GameType::Three01);
        assert_eq!(set.max_legs(), 1);
        assert_eq!(set.current_player_name(), NO_CURRENT_PLAYER);
    }

    #[test]
    fn test_with_turn_is_pure() {
        let set = new_set();
        let (next, result) = set.with_turn(100);

        assert!(result.is_ok());
        assert_eq!(set.current_leg().unwrap().turn_count(), 0);
        assert_eq!(next.current_leg().unwrap().turn_count(), 1);
        assert_eq!(next.remaining_score(p(1)), Some(401));
    }
}
