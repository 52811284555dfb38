// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sensor/actuator registration form.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use super::FunctionalityDraft;
use crate::catalog::fetch_type_catalog;
use crate::error::Error;
use crate::protocol::Backend;
use crate::response::CreatedRecord;
use crate::types::{
    ConditionalGroup, FieldSpec, FunctionalityKind, FunctionalitySchema, TypeDescriptor,
};

/// Callback invoked with the record the backend created.
type AddedCallback = Arc<dyn Fn(&CreatedRecord) + Send + Sync>;

/// Lifecycle of a registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormPhase {
    /// Accepting input.
    Editing,
    /// A create request is outstanding.
    Submitting,
    /// The form was submitted successfully or cancelled.
    Closed,
}

/// Result of a [`RegistrationForm::submit`] call.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The backend created the record; the draft was cleared and the form closed.
    Created(CreatedRecord),
    /// The submission failed; the draft is unchanged and the form stays open.
    Failed(Error),
    /// No request was issued because the form is not editable
    /// (a submission is already outstanding, or the form is closed).
    Ignored,
}

impl SubmitOutcome {
    /// Returns `true` if the record was created.
    #[must_use]
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

#[derive(Debug)]
struct FormState {
    kind: FunctionalityKind,
    draft: FunctionalityDraft,
    catalog: Vec<TypeDescriptor>,
    phase: FormPhase,
    last_failure: Option<String>,
    /// Set while a create request is outstanding, across resets.
    in_flight: bool,
    /// Bumped by `initialize` and `cancel` so late responses don't touch a reset form.
    generation: u64,
}

impl FormState {
    fn schema(&self) -> FunctionalitySchema {
        let type_id = self
            .draft
            .get(self.kind.type_field())
            .map(TypeDescriptor::new);
        FunctionalitySchema::select(self.kind, type_id.as_ref())
    }
}

/// Form collecting a new sensor or actuator for a device.
///
/// The form shows a name field, a type selector fed by the backend catalog,
/// and, for the decimal- and integer-value actuator types, limit fields.
/// Submitting posts the draft to `/sensors` or `/actuators`.
///
/// All methods take `&self`; the form can be shared between the code
/// handling input events and the code awaiting the submission.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use smarthome_client::form::{RegistrationForm, SubmitOutcome};
/// use smarthome_client::protocol::HttpClient;
/// use smarthome_client::types::{FunctionalityKind, TypeDescriptor};
///
/// # async fn example() -> smarthome_client::Result<()> {
/// let backend = Arc::new(HttpClient::new("http://localhost:8080")?);
/// let form = RegistrationForm::open(backend, "d1", FunctionalityKind::Actuator).await;
///
/// form.on_added(|record| println!("created {:?}", record.body()));
/// form.set_field("actuatorName", "Blind1");
/// form.set_type_descriptor(TypeDescriptor::new("DecimalValueActuator"));
/// for field in form.visible_fields() {
///     println!("{} ({:?})", field.label, field.input);
/// }
///
/// if let SubmitOutcome::Failed(e) = form.submit().await {
///     eprintln!("could not add actuator: {e}");
/// }
/// # Ok(())
/// # }
/// ```
pub struct RegistrationForm<B: Backend> {
    backend: Arc<B>,
    state: Mutex<FormState>,
    on_added: RwLock<Option<AddedCallback>>,
}

impl<B: Backend> std::fmt::Debug for RegistrationForm<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("state", &*self.state.lock())
            .field("has_on_added", &self.on_added.read().is_some())
            .finish_non_exhaustive()
    }
}

impl<B: Backend> RegistrationForm<B> {
    /// Creates an editable form without fetching the type catalog.
    #[must_use]
    pub fn new(backend: Arc<B>, device_id: impl Into<String>, kind: FunctionalityKind) -> Self {
        Self {
            backend,
            state: Mutex::new(FormState {
                kind,
                draft: FunctionalityDraft::new(device_id),
                catalog: Vec::new(),
                phase: FormPhase::Editing,
                last_failure: None,
                in_flight: false,
                generation: 0,
            }),
            on_added: RwLock::new(None),
        }
    }

    /// Creates an editable form and fetches the type catalog for `kind`.
    pub async fn open(
        backend: Arc<B>,
        device_id: impl Into<String>,
        kind: FunctionalityKind,
    ) -> Self {
        let form = Self::new(backend, device_id, kind);
        form.refresh_catalog().await;
        form
    }

    /// Registers the callback invoked after a record was created.
    ///
    /// Replaces any previously registered callback.
    pub fn on_added<F>(&self, callback: F)
    where
        F: Fn(&CreatedRecord) + Send + Sync + 'static,
    {
        *self.on_added.write() = Some(Arc::new(callback));
    }

    /// Resets the form for a device and kind, then fetches the type catalog.
    ///
    /// The draft restarts as `{deviceID}`, nothing from a previous draft
    /// survives, and the form becomes editable again. A submission still
    /// outstanding from before the reset keeps blocking [`submit`](Self::submit)
    /// until it resolves; its response does not touch the new draft.
    pub async fn initialize(&self, device_id: impl Into<String>, kind: FunctionalityKind) {
        {
            let mut state = self.state.lock();
            state.kind = kind;
            state.draft = FunctionalityDraft::new(device_id);
            state.catalog.clear();
            state.phase = FormPhase::Editing;
            state.last_failure = None;
            state.generation += 1;
        }
        self.refresh_catalog().await;
    }

    /// Re-fetches the type catalog for the current kind.
    ///
    /// Fetch failures leave an empty catalog.
    pub async fn refresh_catalog(&self) {
        let (kind, generation) = {
            let state = self.state.lock();
            (state.kind, state.generation)
        };

        let catalog = fetch_type_catalog(&*self.backend, kind).await;

        let mut state = self.state.lock();
        if state.generation == generation {
            state.catalog = catalog;
        }
    }

    /// Sets a draft field.
    ///
    /// Writes to `deviceID` are ignored; the device stays the one the form
    /// was initialized with. Returns `false` when the write was ignored,
    /// either for that reason or because the form is not editable.
    pub fn set_field(&self, name: impl Into<String>, value: impl Into<String>) -> bool {
        let name = name.into();
        let mut state = self.state.lock();
        if state.phase != FormPhase::Editing {
            tracing::debug!(field = %name, phase = ?state.phase, "Ignoring input on non-editable form");
            return false;
        }
        state.draft.set(name, value)
    }

    /// Selects the sensor or actuator type.
    ///
    /// Changing the type only changes which conditional fields are visible;
    /// values already entered in now-hidden fields stay in the draft and
    /// reappear if their group is selected again.
    pub fn set_type_descriptor(&self, type_id: TypeDescriptor) -> bool {
        let field = self.state.lock().kind.type_field();
        self.set_field(field, type_id.as_str())
    }

    /// Returns the currently selected type, if any.
    #[must_use]
    pub fn selected_type(&self) -> Option<TypeDescriptor> {
        let state = self.state.lock();
        state
            .draft
            .get(state.kind.type_field())
            .map(TypeDescriptor::new)
    }

    /// Returns the schema selected by the current kind and type.
    #[must_use]
    pub fn schema(&self) -> FunctionalitySchema {
        self.state.lock().schema()
    }

    /// Returns the fields the form currently shows.
    #[must_use]
    pub fn visible_fields(&self) -> Vec<FieldSpec> {
        self.schema().fields()
    }

    /// Returns the visible conditional field group, if any.
    #[must_use]
    pub fn conditional_group(&self) -> Option<ConditionalGroup> {
        self.schema().conditional_group()
    }

    /// Returns required fields that are absent or blank.
    #[must_use]
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        let state = self.state.lock();
        state
            .schema()
            .required_fields()
            .into_iter()
            .filter(|name| !state.draft.has_value(name))
            .collect()
    }

    /// Returns a snapshot of the draft.
    #[must_use]
    pub fn draft(&self) -> FunctionalityDraft {
        self.state.lock().draft.clone()
    }

    /// Returns the kind of functionality being registered.
    #[must_use]
    pub fn kind(&self) -> FunctionalityKind {
        self.state.lock().kind
    }

    /// Returns the selectable types from the backend catalog.
    #[must_use]
    pub fn catalog(&self) -> Vec<TypeDescriptor> {
        self.state.lock().catalog.clone()
    }

    /// Returns the current phase.
    #[must_use]
    pub fn phase(&self) -> FormPhase {
        self.state.lock().phase
    }

    /// Returns `true` unless the form was submitted successfully or cancelled.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.phase() != FormPhase::Closed
    }

    /// Returns the message of the last failed submission, if any.
    #[must_use]
    pub fn last_failure(&self) -> Option<String> {
        self.state.lock().last_failure.clone()
    }

    /// Discards the draft and closes the form.
    pub fn cancel(&self) {
        let mut state = self.state.lock();
        state.draft.clear();
        state.phase = FormPhase::Closed;
        state.last_failure = None;
        state.generation += 1;
    }

    /// Submits the draft to the backend.
    ///
    /// Only one submission can be outstanding; calling `submit` while one is
    /// in flight returns [`SubmitOutcome::Ignored`] without a request, even
    /// after the form was re-initialized. A draft without its name is
    /// rejected locally. Dropping the returned future before it resolves
    /// leaves the form editable with the draft kept.
    pub async fn submit(&self) -> SubmitOutcome {
        let (kind, payload, generation) = {
            let mut state = self.state.lock();
            if state.in_flight || state.phase != FormPhase::Editing {
                tracing::debug!(phase = ?state.phase, in_flight = state.in_flight, "Ignoring submit");
                return SubmitOutcome::Ignored;
            }

            let missing = state
                .schema()
                .required_fields()
                .into_iter()
                .find(|name| !state.draft.has_value(name));
            if let Some(name) = missing {
                state.last_failure = Some(format!("{name} is required"));
                return SubmitOutcome::Failed(Error::MissingField(name.to_string()));
            }

            state.phase = FormPhase::Submitting;
            state.in_flight = true;
            state.last_failure = None;
            (state.kind, state.draft.to_json(), state.generation)
        };

        let pending = PendingSubmit {
            state: &self.state,
            generation,
            armed: true,
        };

        tracing::debug!(kind = %kind, draft = %payload, "Submitting functionality");

        let result = match self
            .backend
            .post(kind.collection_path(), Some(&payload))
            .await
        {
            Ok(response) => response.json().map_err(Error::from),
            Err(e) => Err(Error::from(e)),
        };
        pending.disarm();

        match result {
            Ok(body) => {
                let record = CreatedRecord::new(kind, body);
                {
                    let mut state = self.state.lock();
                    state.in_flight = false;
                    if state.generation == generation {
                        state.draft.clear();
                        state.phase = FormPhase::Closed;
                    }
                }
                // The record exists on the backend even if the form was reset meanwhile
                let callback = self.on_added.read().clone();
                if let Some(callback) = callback {
                    callback(&record);
                }
                SubmitOutcome::Created(record)
            }
            Err(e) => {
                tracing::error!(kind = %kind, error = %e, "Error adding {kind}");
                let mut state = self.state.lock();
                state.in_flight = false;
                if state.generation == generation {
                    state.phase = FormPhase::Editing;
                    state.last_failure = Some(format!("Error adding {kind}: {e}"));
                }
                SubmitOutcome::Failed(e)
            }
        }
    }
}

/// Returns the form to `Editing` if a submission is dropped before it resolves.
struct PendingSubmit<'a> {
    state: &'a Mutex<FormState>,
    generation: u64,
    armed: bool,
}

impl PendingSubmit<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for PendingSubmit<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = self.state.lock();
        state.in_flight = false;
        if state.generation == self.generation && state.phase == FormPhase::Submitting {
            tracing::debug!(kind = %state.kind, "Submission dropped before it resolved");
            state.phase = FormPhase::Editing;
        }
    }
}
