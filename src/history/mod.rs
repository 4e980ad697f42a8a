//! Snapshot history over immutable set values.
//!
//! `MatchHistory` keeps every accepted state of a set in an `im::Vector`.
//! Snapshots share their turn history structurally, so keeping one per
//! operation is cheap. Stepping back restores a whole earlier set, which
//! also reaches across checkouts and leg changes that
//! `MatchSet::remove_last_turn` refuses.
//!
//! ## Example
//!
//! ```
//! use darts_scorer::core::{GameType, MatchSet};
//! use darts_scorer::history::MatchHistory;
//!
//! let mut history = MatchHistory::new(MatchSet::start_new("Ann", "Bob", GameType::Three01, 1));
//! history.apply(|set| set.add_turn(301)).unwrap();
//! assert!(history.current().is_finished());
//!
//! history.undo();
//! assert!(!history.current().is_finished());
//! history.redo();
//! assert!(history.current().is_finished());
//! ```

use im::Vector;
use log::debug;

use crate::core::MatchSet;
use crate::rules::Rejection;

/// Undo/redo cursor over set snapshots.
#[derive(Clone, Debug)]
pub struct MatchHistory {
    snapshots: Vector<MatchSet>,
    /// Index of the current snapshot.
    cursor: usize,
}

impl MatchHistory {
    /// Start a history at `initial`.
    #[must_use]
    pub fn new(initial: MatchSet) -> Self {
        Self {
            snapshots: Vector::unit(initial),
            cursor: 0,
        }
    }

    /// The current set.
    #[must_use]
    pub fn current(&self) -> &MatchSet {
        &self.snapshots[self.cursor]
    }

    /// Number of snapshots held, including any redo tail.
    ///
    /// Never zero: the initial set is always kept.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always false; see `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Run `op` against a copy of the current set.
    ///
    /// On success the copy becomes the new current snapshot and any redo
    /// tail is discarded. On rejection nothing is recorded.
    pub fn apply<T>(
        &mut self,
        op: impl FnOnce(&mut MatchSet) -> Result<T, Rejection>,
    ) -> Result<T, Rejection> {
        let mut next = self.current().clone();
        let value = op(&mut next)?;
        self.push(next);
        Ok(value)
    }

    /// Record an infallible change (such as `MatchSet::reset`).
    pub fn record(&mut self, op: impl FnOnce(&mut MatchSet)) {
        let mut next = self.current().clone();
        op(&mut next);
        self.push(next);
    }

    /// Make `next` the current snapshot, dropping the redo tail.
    fn push(&mut self, next: MatchSet) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push_back(next);
        self.cursor += 1;
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Step back one snapshot. Returns false if already at the start.
    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.cursor -= 1;
        debug!("history undo to snapshot {}", self.cursor);
        true
    }

    /// Step forward one snapshot. Returns false if nothing to redo.
    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.cursor += 1;
        debug!("history redo to snapshot {}", self.cursor);
        true
    }
}
