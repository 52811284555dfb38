// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Actuator live control.
//!
//! - [`ControlState`] - the Clean/Dirty/Committing state machine
//! - [`Feedback`] - transient success/error message after a commit
//! - [`ControlWidget`] - ties both to backend commands

mod feedback;
mod phase;
mod widget;

pub use feedback::{FEEDBACK_DURATION, Feedback, FeedbackKind};
pub use phase::{ControlPhase, ControlState};
pub use widget::{CommitOutcome, ControlWidget};
