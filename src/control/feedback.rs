// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transient commit feedback.

use std::time::Duration;

use tokio::time::Instant;

/// How long a feedback message stays visible.
pub const FEEDBACK_DURATION: Duration = Duration::from_millis(3000);

/// Whether feedback reports success or failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedbackKind {
    /// The backend confirmed the new position.
    Success,
    /// The commit failed.
    Error,
}

/// A message shown after a commit resolved, expiring after [`FEEDBACK_DURATION`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feedback {
    kind: FeedbackKind,
    message: &'static str,
    raised_at: Instant,
}

impl Feedback {
    /// Shown when the backend confirmed the position.
    pub const POSITION_SET: &'static str = "New position set";
    /// Shown when the backend answered without a usable position.
    pub const SET_FAILED: &'static str = "Set failed";
    /// Shown when the command could not be delivered.
    pub const UPDATE_ERROR: &'static str = "Error updating status";

    pub(crate) fn position_set(raised_at: Instant) -> Self {
        Self {
            kind: FeedbackKind::Success,
            message: Self::POSITION_SET,
            raised_at,
        }
    }

    pub(crate) fn set_failed(raised_at: Instant) -> Self {
        Self {
            kind: FeedbackKind::Error,
            message: Self::SET_FAILED,
            raised_at,
        }
    }

    pub(crate) fn update_error(raised_at: Instant) -> Self {
        Self {
            kind: FeedbackKind::Error,
            message: Self::UPDATE_ERROR,
            raised_at,
        }
    }

    /// Returns the kind of feedback.
    #[must_use]
    pub fn kind(&self) -> FeedbackKind {
        self.kind
    }

    /// Returns the message text.
    #[must_use]
    pub fn message(&self) -> &'static str {
        self.message
    }

    /// Returns `true` for success feedback.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.kind == FeedbackKind::Success
    }

    /// Returns the instant the feedback disappears.
    #[must_use]
    pub fn expires_at(&self) -> Instant {
        self.raised_at + FEEDBACK_DURATION
    }

    /// Returns `true` if the feedback is no longer visible at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at()
    }
}
