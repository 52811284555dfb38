// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for functionality registration and actuator control.
//!
//! # Types
//!
//! - [`Position`] - Actuator position (0-100)
//! - [`FunctionalityKind`] - Sensor or actuator
//! - [`TypeDescriptor`] - Backend type identifier
//! - [`FunctionalitySchema`] - Field set selected by kind and type

mod kind;
mod position;
mod schema;

pub use kind::FunctionalityKind;
pub use position::Position;
pub use schema::{
    ActuatorSubtype, ConditionalGroup, FieldSpec, FunctionalitySchema, InputKind, TypeDescriptor,
    type_label,
};
