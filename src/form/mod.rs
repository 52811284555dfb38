// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Registration of new sensors and actuators.
//!
//! - [`FunctionalityDraft`] - the record being filled in
//! - [`RegistrationForm`] - type-dependent fields, catalog, and submission

mod draft;
mod registration;

pub use draft::{DEVICE_ID_FIELD, FunctionalityDraft};
pub use registration::{FormPhase, RegistrationForm, SubmitOutcome};
