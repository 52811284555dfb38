// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Live position control for a roller-blind actuator.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tokio::time::Instant;

use super::{ControlPhase, ControlState, Feedback};
use crate::error::Error;
use crate::protocol::Backend;
use crate::response::{ActuatorRecord, CommandStatusResponse};
use crate::types::Position;

/// Callback invoked with each newly confirmed position.
type UpdatedCallback = Arc<dyn Fn(Position) + Send + Sync>;

/// Result of a [`ControlWidget::commit`] call.
#[derive(Debug)]
pub enum CommitOutcome {
    /// The backend confirmed this position.
    Confirmed(Position),
    /// The commit failed; the pending position is kept for a retry.
    Failed(Error),
    /// A commit was already outstanding; no request was issued.
    Ignored,
}

impl CommitOutcome {
    /// Returns the confirmed position, if the commit succeeded.
    #[must_use]
    pub fn confirmed(&self) -> Option<Position> {
        match self {
            Self::Confirmed(position) => Some(*position),
            Self::Failed(_) | Self::Ignored => None,
        }
    }
}

#[derive(Debug)]
struct Inner {
    control: ControlState,
    feedback: Option<Feedback>,
}

/// Slider-style control that sets an actuator position on explicit commit.
///
/// Dragging only changes the pending position. [`commit`](Self::commit)
/// sends it as `POST /actuators/{id}/act?command={position}`; the position
/// echoed in the response becomes the confirmed one. While a commit is
/// outstanding, dragging and further commits are refused.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use smarthome_client::control::{CommitOutcome, ControlWidget};
/// use smarthome_client::protocol::HttpClient;
/// use smarthome_client::types::Position;
///
/// # async fn example() -> smarthome_client::Result<()> {
/// let backend = Arc::new(HttpClient::new("http://localhost:8080")?);
/// let widget = ControlWidget::new(backend, "a1", Position::new(50)?);
/// widget.on_updated(|position| println!("blind now at {position}"));
///
/// widget.drag(Position::new(80)?);
/// match widget.commit().await {
///     CommitOutcome::Confirmed(p) => println!("confirmed {p}"),
///     CommitOutcome::Failed(e) => eprintln!("failed: {e}"),
///     CommitOutcome::Ignored => {}
/// }
/// if let Some(feedback) = widget.feedback() {
///     println!("{}", feedback.message());
/// }
/// # Ok(())
/// # }
/// ```
pub struct ControlWidget<B: Backend> {
    backend: Arc<B>,
    actuator_id: String,
    inner: Mutex<Inner>,
    on_updated: RwLock<Option<UpdatedCallback>>,
}

impl<B: Backend> std::fmt::Debug for ControlWidget<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControlWidget")
            .field("actuator_id", &self.actuator_id)
            .field("inner", &*self.inner.lock())
            .finish_non_exhaustive()
    }
}

impl<B: Backend> ControlWidget<B> {
    /// Creates a clean control at the given confirmed position.
    #[must_use]
    pub fn new(backend: Arc<B>, actuator_id: impl Into<String>, initial: Position) -> Self {
        Self {
            backend,
            actuator_id: actuator_id.into(),
            inner: Mutex::new(Inner {
                control: ControlState::new(initial),
                feedback: None,
            }),
            on_updated: RwLock::new(None),
        }
    }

    /// Creates a control for a listed actuator, starting at its reported status.
    #[must_use]
    pub fn from_record(backend: Arc<B>, record: &ActuatorRecord) -> Self {
        Self::new(backend, record.actuator_id.clone(), record.initial_position())
    }

    /// Registers the callback invoked after each confirmed commit.
    ///
    /// Replaces any previously registered callback.
    pub fn on_updated<F>(&self, callback: F)
    where
        F: Fn(Position) + Send + Sync + 'static,
    {
        *self.on_updated.write() = Some(Arc::new(callback));
    }

    /// Returns the actuator this control drives.
    #[must_use]
    pub fn actuator_id(&self) -> &str {
        &self.actuator_id
    }

    /// Returns the current phase.
    #[must_use]
    pub fn phase(&self) -> ControlPhase {
        self.inner.lock().control.phase()
    }

    /// Returns the position the slider shows.
    #[must_use]
    pub fn pending(&self) -> Position {
        self.inner.lock().control.pending()
    }

    /// Returns the last position acknowledged by the backend.
    #[must_use]
    pub fn confirmed(&self) -> Position {
        self.inner.lock().control.confirmed()
    }

    /// Returns how many commits failed since the last success.
    #[must_use]
    pub fn consecutive_failures(&self) -> u32 {
        self.inner.lock().control.consecutive_failures()
    }

    /// Returns `true` if the slider and the commit action accept input.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.phase() != ControlPhase::Committing
    }

    /// Returns the label of the commit action.
    #[must_use]
    pub fn commit_label(&self) -> &'static str {
        match self.phase() {
            ControlPhase::Committing => "Setting...",
            ControlPhase::Clean | ControlPhase::Dirty => "Set",
        }
    }

    /// Returns the feedback visible now, if any.
    #[must_use]
    pub fn feedback(&self) -> Option<Feedback> {
        self.feedback_at(Instant::now())
    }

    /// Returns the feedback visible at `now`, if any.
    #[must_use]
    pub fn feedback_at(&self, now: Instant) -> Option<Feedback> {
        let mut inner = self.inner.lock();
        if inner.feedback.is_some_and(|f| f.is_expired_at(now)) {
            inner.feedback = None;
        }
        inner.feedback
    }

    /// Moves the slider to `value`.
    ///
    /// Returns `false` and leaves the pending position unchanged while a
    /// commit is outstanding.
    pub fn drag(&self, value: Position) -> bool {
        let accepted = self.inner.lock().control.drag(value);
        if !accepted {
            tracing::debug!(actuator = %self.actuator_id, value = %value, "Slider input blocked while committing");
        }
        accepted
    }

    /// Sends the pending position to the backend.
    ///
    /// Exactly one request is outstanding per control; calling `commit` while
    /// one is in flight returns [`CommitOutcome::Ignored`]. On failure the
    /// control returns to `Dirty` with the pending value kept, and error
    /// feedback is raised. Dropping the returned future before the backend
    /// answers also returns the control to `Dirty`, without feedback.
    pub async fn commit(&self) -> CommitOutcome {
        let pending = {
            let mut inner = self.inner.lock();
            let Some(pending) = inner.control.begin_commit() else {
                tracing::debug!(actuator = %self.actuator_id, "Commit already outstanding");
                return CommitOutcome::Ignored;
            };
            inner.feedback = None;
            pending
        };

        let path = format!(
            "/actuators/{}/act?command={}",
            urlencoding::encode(&self.actuator_id),
            pending.value()
        );

        tracing::debug!(actuator = %self.actuator_id, command = %pending, "Sending actuator command");

        let outstanding = OutstandingCommit {
            inner: &self.inner,
            actuator_id: &self.actuator_id,
            armed: true,
        };
        let result = self.backend.post(&path, None).await;
        outstanding.disarm();

        let response = match result {
            Ok(response) => response,
            Err(e) => return self.fail(Error::from(e), Feedback::update_error),
        };

        let parsed: CommandStatusResponse = match response.parse() {
            Ok(parsed) => parsed,
            Err(e) => return self.fail(Error::from(e), Feedback::update_error),
        };

        match parsed.position() {
            Ok(position) => self.succeed(position),
            Err(e) => {
                tracing::error!(actuator = %self.actuator_id, status = ?parsed.raw_status(), "Invalid status received");
                self.fail(Error::from(e), Feedback::set_failed)
            }
        }
    }

    fn succeed(&self, position: Position) -> CommitOutcome {
        {
            let mut inner = self.inner.lock();
            inner.control.commit_succeeded(position);
            inner.feedback = Some(Feedback::position_set(Instant::now()));
        }

        tracing::debug!(actuator = %self.actuator_id, position = %position, "Actuator position confirmed");

        let callback = self.on_updated.read().clone();
        if let Some(callback) = callback {
            callback(position);
        }
        CommitOutcome::Confirmed(position)
    }

    fn fail(&self, error: Error, feedback: fn(Instant) -> Feedback) -> CommitOutcome {
        tracing::error!(actuator = %self.actuator_id, error = %error, "Error updating status");

        let mut inner = self.inner.lock();
        inner.control.commit_failed();
        inner.feedback = Some(feedback(Instant::now()));
        CommitOutcome::Failed(error)
    }
}

/// Fails the outstanding commit if the future is dropped before the backend answers.
struct OutstandingCommit<'a> {
    inner: &'a Mutex<Inner>,
    actuator_id: &'a str,
    armed: bool,
}

impl OutstandingCommit<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for OutstandingCommit<'_> {
    fn drop(&mut self) {
        if self.armed {
            tracing::debug!(actuator = %self.actuator_id, "Commit dropped before it resolved");
            self.inner.lock().control.commit_failed();
        }
    }
}
