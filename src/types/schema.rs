// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Type descriptors and the field schemas they select.
//!
//! The backend owns the catalog of sensor and actuator types. The client
//! only recognizes three actuator subtypes: two of them unlock extra
//! fields on the registration form, the third gets a live position
//! control. Every (kind, subtype) pair maps to a fixed [`FunctionalitySchema`],
//! so the set of fields a form shows is an exhaustive match instead of a
//! runtime string comparison scattered through the form code.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::FunctionalityKind;

/// Opaque identifier naming a sensor or actuator type.
///
/// # Examples
///
/// ```
/// use smarthome_client::types::{ActuatorSubtype, TypeDescriptor};
///
/// let id = TypeDescriptor::new("DecimalValueActuator");
/// assert_eq!(id.as_str(), "DecimalValueActuator");
/// assert_eq!(id.actuator_subtype(), ActuatorSubtype::DecimalValue);
/// assert_eq!(id.label(), "Decimal Value Actuator");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeDescriptor(String);

impl TypeDescriptor {
    /// Creates a type descriptor from its identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Classifies this identifier as an actuator subtype.
    #[must_use]
    pub fn actuator_subtype(&self) -> ActuatorSubtype {
        ActuatorSubtype::from_type_id(&self.0)
    }

    /// Returns a display label with a space before each capital letter.
    #[must_use]
    pub fn label(&self) -> String {
        type_label(&self.0)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeDescriptor {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Turns a type identifier like `RollerBlindActuator` into `Roller Blind Actuator`.
///
/// ```
/// use smarthome_client::types::type_label;
///
/// assert_eq!(type_label("TemperatureSensor"), "Temperature Sensor");
/// assert_eq!(type_label("switch"), "switch");
/// ```
#[must_use]
pub fn type_label(id: &str) -> String {
    let mut label = String::with_capacity(id.len() + 4);
    for c in id.chars() {
        if c.is_ascii_uppercase() && !label.is_empty() {
            label.push(' ');
        }
        label.push(c);
    }
    label
}

/// Actuator subtypes the client treats specially.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActuatorSubtype {
    /// `RollerBlindActuator`: gets a live 0-100 position control.
    RollerBlind,
    /// `DecimalValueActuator`: registered with decimal limits and precision.
    DecimalValue,
    /// `IntegerValueActuator`: registered with integer limits.
    IntegerValue,
    /// Any other actuator type; no extra fields, no live control.
    Other,
}

impl ActuatorSubtype {
    /// Backend identifier of the roller-blind actuator type.
    pub const ROLLER_BLIND_ID: &'static str = "RollerBlindActuator";
    /// Backend identifier of the decimal-value actuator type.
    pub const DECIMAL_VALUE_ID: &'static str = "DecimalValueActuator";
    /// Backend identifier of the integer-value actuator type.
    pub const INTEGER_VALUE_ID: &'static str = "IntegerValueActuator";

    /// Classifies a raw type identifier.
    #[must_use]
    pub fn from_type_id(id: &str) -> Self {
        match id {
            Self::ROLLER_BLIND_ID => Self::RollerBlind,
            Self::DECIMAL_VALUE_ID => Self::DecimalValue,
            Self::INTEGER_VALUE_ID => Self::IntegerValue,
            _ => Self::Other,
        }
    }

    /// Returns `true` if actuators of this subtype expose a live position control.
    #[must_use]
    pub const fn has_position_control(&self) -> bool {
        matches!(self, Self::RollerBlind)
    }
}

/// How a form field accepts input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    /// Free text.
    Text,
    /// Selection from the backend type catalog.
    Select,
    /// Decimal-capable numeric input.
    Decimal,
    /// Integer-only numeric input.
    Integer,
}

/// A single field shown on the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldSpec {
    /// Draft key the field writes to.
    pub name: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    /// Kind of input control.
    pub input: InputKind,
    /// Whether the field must be present before the draft is submitted.
    pub required: bool,
}

impl FieldSpec {
    const fn new(name: &'static str, label: &'static str, input: InputKind, required: bool) -> Self {
        Self {
            name,
            label,
            input,
            required,
        }
    }
}

/// Group of fields revealed by selecting a specific actuator subtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionalGroup {
    /// `upperLimit`, `lowerLimit`, `precision` as decimal inputs.
    DecimalLimits,
    /// `upperLimit`, `lowerLimit` as integer inputs.
    IntegerLimits,
}

impl ConditionalGroup {
    /// Returns the fields of this group.
    #[must_use]
    pub const fn fields(&self) -> &'static [FieldSpec] {
        match self {
            Self::DecimalLimits => DECIMAL_LIMIT_FIELDS,
            Self::IntegerLimits => INTEGER_LIMIT_FIELDS,
        }
    }
}

const SENSOR_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("sensorName", "Sensor Name", InputKind::Text, true),
    FieldSpec::new("sensorTypeID", "Sensor Type", InputKind::Select, false),
];

const ACTUATOR_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("actuatorName", "Actuator Name", InputKind::Text, true),
    FieldSpec::new("actuatorTypeID", "Actuator Type", InputKind::Select, false),
];

const DECIMAL_LIMIT_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("upperLimit", "Upper Limit", InputKind::Decimal, false),
    FieldSpec::new("lowerLimit", "Lower Limit", InputKind::Decimal, false),
    FieldSpec::new("precision", "Precision", InputKind::Decimal, false),
];

const INTEGER_LIMIT_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("upperLimit", "Upper Limit", InputKind::Integer, false),
    FieldSpec::new("lowerLimit", "Lower Limit", InputKind::Integer, false),
];

/// The field schema selected by a functionality kind and its chosen type.
///
/// # Examples
///
/// ```
/// use smarthome_client::types::{
///     ConditionalGroup, FunctionalityKind, FunctionalitySchema, TypeDescriptor,
/// };
///
/// let decimal = TypeDescriptor::new("DecimalValueActuator");
/// let schema = FunctionalitySchema::select(FunctionalityKind::Actuator, Some(&decimal));
/// assert_eq!(schema.conditional_group(), Some(ConditionalGroup::DecimalLimits));
///
/// let names: Vec<_> = schema.fields().iter().map(|f| f.name).collect();
/// assert_eq!(
///     names,
///     ["actuatorName", "actuatorTypeID", "upperLimit", "lowerLimit", "precision"]
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionalitySchema {
    /// Any sensor type.
    Sensor,
    /// An actuator of the given subtype (or none selected yet: `Other`).
    Actuator(ActuatorSubtype),
}

impl FunctionalitySchema {
    /// Selects the schema for a kind and an optional selected type.
    #[must_use]
    pub fn select(kind: FunctionalityKind, type_id: Option<&TypeDescriptor>) -> Self {
        match kind {
            FunctionalityKind::Sensor => Self::Sensor,
            FunctionalityKind::Actuator => Self::Actuator(
                type_id.map_or(ActuatorSubtype::Other, TypeDescriptor::actuator_subtype),
            ),
        }
    }

    /// Returns the kind this schema belongs to.
    #[must_use]
    pub const fn kind(&self) -> FunctionalityKind {
        match self {
            Self::Sensor => FunctionalityKind::Sensor,
            Self::Actuator(_) => FunctionalityKind::Actuator,
        }
    }

    /// Returns the conditional field group visible under this schema, if any.
    #[must_use]
    pub const fn conditional_group(&self) -> Option<ConditionalGroup> {
        match self {
            Self::Actuator(ActuatorSubtype::DecimalValue) => Some(ConditionalGroup::DecimalLimits),
            Self::Actuator(ActuatorSubtype::IntegerValue) => Some(ConditionalGroup::IntegerLimits),
            Self::Sensor | Self::Actuator(ActuatorSubtype::RollerBlind | ActuatorSubtype::Other) => {
                None
            }
        }
    }

    /// Returns the base fields shown regardless of the selected type.
    #[must_use]
    pub const fn base_fields(&self) -> &'static [FieldSpec] {
        match self {
            Self::Sensor => SENSOR_FIELDS,
            Self::Actuator(_) => ACTUATOR_FIELDS,
        }
    }

    /// Returns every visible field, base fields first.
    #[must_use]
    pub fn fields(&self) -> Vec<FieldSpec> {
        let mut fields = self.base_fields().to_vec();
        if let Some(group) = self.conditional_group() {
            fields.extend_from_slice(group.fields());
        }
        fields
    }

    /// Returns the names of required fields.
    #[must_use]
    pub fn required_fields(&self) -> Vec<&'static str> {
        self.fields()
            .into_iter()
            .filter(|f| f.required)
            .map(|f| f.name)
            .collect()
    }
}
