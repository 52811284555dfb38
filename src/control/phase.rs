// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Commit state machine of the actuator control.
//!
//! ```text
//!            drag(v)                 begin_commit()
//!   Clean ───────────▶ Dirty{v} ─────────────────▶ Committing{v}
//!     ▲                  ▲  │ drag(v')                 │   │
//!     │                  │  └──────┘                   │   │
//!     │                  └──────── commit_failed() ────┘   │
//!     └─────────────────────────── commit_succeeded(v') ───┘
//! ```
//!
//! The pending value lives inside the phase, so a commit can only carry the
//! value that was pending when it started and a second commit cannot start
//! while one is outstanding.

use crate::types::Position;

/// Observable phase of an actuator control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlPhase {
    /// The shown position is the confirmed one and nothing is in flight.
    Clean,
    /// The user moved the slider; the new position is not yet sent.
    Dirty,
    /// A command is outstanding; input is blocked until it resolves.
    Committing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Clean,
    Dirty { pending: Position },
    Committing { pending: Position },
}

/// Confirmed/pending positions and the transitions between them.
///
/// # Examples
///
/// ```
/// use smarthome_client::control::{ControlPhase, ControlState};
/// use smarthome_client::types::Position;
///
/// let mut state = ControlState::new(Position::new(50).unwrap());
/// assert!(state.drag(Position::new(80).unwrap()));
/// assert_eq!(state.phase(), ControlPhase::Dirty);
///
/// let sent = state.begin_commit().unwrap();
/// assert_eq!(sent.value(), 80);
/// assert!(state.begin_commit().is_none());
///
/// state.commit_succeeded(sent);
/// assert_eq!(state.phase(), ControlPhase::Clean);
/// assert_eq!(state.confirmed().value(), 80);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlState {
    confirmed: Position,
    phase: Phase,
    consecutive_failures: u32,
}

impl ControlState {
    /// Creates a clean state at the given confirmed position.
    #[must_use]
    pub fn new(confirmed: Position) -> Self {
        Self {
            confirmed,
            phase: Phase::Clean,
            consecutive_failures: 0,
        }
    }

    /// Returns the observable phase.
    #[must_use]
    pub fn phase(&self) -> ControlPhase {
        match self.phase {
            Phase::Clean => ControlPhase::Clean,
            Phase::Dirty { .. } => ControlPhase::Dirty,
            Phase::Committing { .. } => ControlPhase::Committing,
        }
    }

    /// Returns the last position acknowledged by the backend.
    #[must_use]
    pub fn confirmed(&self) -> Position {
        self.confirmed
    }

    /// Returns the position the slider shows.
    #[must_use]
    pub fn pending(&self) -> Position {
        match self.phase {
            Phase::Clean => self.confirmed,
            Phase::Dirty { pending } | Phase::Committing { pending } => pending,
        }
    }

    /// Returns how many commits failed since the last success.
    #[must_use]
    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    /// Moves the slider to `value`.
    ///
    /// Returns `false` and changes nothing while a commit is outstanding.
    pub fn drag(&mut self, value: Position) -> bool {
        match self.phase {
            Phase::Committing { .. } => false,
            Phase::Clean | Phase::Dirty { .. } => {
                self.phase = Phase::Dirty { pending: value };
                true
            }
        }
    }

    /// Starts a commit and returns the position to send.
    ///
    /// From `Clean` the confirmed position is re-sent. Returns `None` while a
    /// commit is already outstanding.
    pub fn begin_commit(&mut self) -> Option<Position> {
        match self.phase {
            Phase::Committing { .. } => None,
            Phase::Clean | Phase::Dirty { .. } => {
                let pending = self.pending();
                self.phase = Phase::Committing { pending };
                Some(pending)
            }
        }
    }

    /// Applies a successful commit; the echoed position wins over the sent one.
    ///
    /// Returns `false` if no commit was outstanding.
    pub fn commit_succeeded(&mut self, echoed: Position) -> bool {
        if !matches!(self.phase, Phase::Committing { .. }) {
            return false;
        }
        self.confirmed = echoed;
        self.phase = Phase::Clean;
        self.consecutive_failures = 0;
        true
    }

    /// Applies a failed commit: back to `Dirty` with the pending value kept.
    ///
    /// Returns `false` if no commit was outstanding.
    pub fn commit_failed(&mut self) -> bool {
        let Phase::Committing { pending } = self.phase else {
            return false;
        };
        self.phase = Phase::Dirty { pending };
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(v: u8) -> Position {
        Position::new(v).unwrap()
    }

    #[test]
    fn drag_makes_dirty_without_touching_confirmed() {
        let mut state = ControlState::new(pos(50));
        assert_eq!(state.phase(), ControlPhase::Clean);
        assert_eq!(state.pending(), pos(50));

        assert!(state.drag(pos(42)));
        assert_eq!(state.phase(), ControlPhase::Dirty);
        assert_eq!(state.pending(), pos(42));
        assert_eq!(state.confirmed(), pos(50));
    }

    #[test]
    fn drag_is_blocked_while_committing() {
        let mut state = ControlState::new(pos(50));
        state.drag(pos(60));
        state.begin_commit();

        assert!(!state.drag(pos(10)));
        assert_eq!(state.pending(), pos(60));
        assert_eq!(state.phase(), ControlPhase::Committing);
    }

    #[test]
    fn echoed_value_takes_precedence() {
        let mut state = ControlState::new(pos(50));
        state.drag(pos(95));
        state.begin_commit();

        assert!(state.commit_succeeded(pos(90)));
        assert_eq!(state.confirmed(), pos(90));
        assert_eq!(state.pending(), pos(90));
        assert_eq!(state.phase(), ControlPhase::Clean);
    }

    #[test]
    fn failure_retains_pending() {
        let mut state = ControlState::new(pos(50));
        state.drag(pos(42));
        state.begin_commit();

        assert!(state.commit_failed());
        assert_eq!(state.phase(), ControlPhase::Dirty);
        assert_eq!(state.pending(), pos(42));
        assert_eq!(state.confirmed(), pos(50));
        assert_eq!(state.consecutive_failures(), 1);

        // Retry from Dirty sends the retained value
        assert_eq!(state.begin_commit(), Some(pos(42)));
        state.commit_failed();
        assert_eq!(state.consecutive_failures(), 2);

        state.begin_commit();
        state.commit_succeeded(pos(42));
        assert_eq!(state.consecutive_failures(), 0);
    }

    #[test]
    fn commit_from_clean_resends_confirmed() {
        let mut state = ControlState::new(pos(30));
        assert_eq!(state.begin_commit(), Some(pos(30)));
        assert_eq!(state.phase(), ControlPhase::Committing);
    }

    #[test]
    fn resolutions_without_commit_are_rejected() {
        let mut state = ControlState::new(pos(30));
        assert!(!state.commit_succeeded(pos(70)));
        assert!(!state.commit_failed());
        assert_eq!(state, ControlState::new(pos(30)));
    }
}
