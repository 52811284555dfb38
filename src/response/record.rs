// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sensor, actuator and device records.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ParseError;
use crate::types::{FunctionalityKind, Position, TypeDescriptor};

/// Identifiers arrive as strings from the current backend and as numbers
/// from older deployments.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number identifier, got {other}"
        ))),
    }
}

/// An actuator as listed or returned by the backend.
///
/// # Examples
///
/// ```
/// use smarthome_client::response::ActuatorRecord;
///
/// let json = r#"{
///     "actuatorId": "a1",
///     "actuatorName": "Blind",
///     "actuatorTypeID": "RollerBlindActuator",
///     "deviceID": "d1",
///     "status": "50"
/// }"#;
/// let record: ActuatorRecord = serde_json::from_str(json).unwrap();
/// assert_eq!(record.actuator_id, "a1");
/// assert_eq!(record.initial_position().value(), 50);
/// assert!(record.has_position_control());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActuatorRecord {
    /// Backend identifier of the actuator.
    #[serde(rename = "actuatorId", deserialize_with = "string_or_number")]
    pub actuator_id: String,
    /// Display name.
    #[serde(rename = "actuatorName")]
    pub actuator_name: String,
    /// Type identifier.
    #[serde(rename = "actuatorTypeID")]
    pub actuator_type_id: TypeDescriptor,
    /// Owning device, when the backend includes it.
    #[serde(rename = "deviceID", default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    /// Last reported status, as sent by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,
}

impl ActuatorRecord {
    /// Returns `true` if this actuator gets a live position control.
    #[must_use]
    pub fn has_position_control(&self) -> bool {
        self.actuator_type_id.actuator_subtype().has_position_control()
    }

    /// Returns the position a control for this actuator starts at.
    #[must_use]
    pub fn initial_position(&self) -> Position {
        Position::from_initial_status(self.status.as_ref())
    }
}

/// A sensor as listed or returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorRecord {
    /// Backend identifier of the sensor.
    #[serde(
        rename = "sensorId",
        default,
        deserialize_with = "string_or_number"
    )]
    pub sensor_id: String,
    /// Display name.
    #[serde(rename = "sensorName")]
    pub sensor_name: String,
    /// Type identifier.
    #[serde(rename = "sensorTypeID")]
    pub sensor_type_id: TypeDescriptor,
    /// Owning device, when the backend includes it.
    #[serde(rename = "deviceID", default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
}

/// A device as returned by `GET /devices/{id}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DeviceRecord {
    /// Whether the device is active, reported as a boolean or `"true"`/`"false"`.
    #[serde(rename = "deviceStatus", default)]
    device_status: Option<Value>,
}

impl DeviceRecord {
    /// Returns `true` if the backend reports the device as active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        match &self.device_status {
            Some(Value::Bool(active)) => *active,
            Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }
}

/// A record the backend returned after creating a sensor or actuator.
///
/// The body is kept as-is so callers can read fields this crate does not
/// model (links, settings).
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedRecord {
    kind: FunctionalityKind,
    body: Value,
}

impl CreatedRecord {
    /// Wraps a created record body.
    #[must_use]
    pub fn new(kind: FunctionalityKind, body: Value) -> Self {
        Self { kind, body }
    }

    /// Returns the kind of functionality that was created.
    #[must_use]
    pub fn kind(&self) -> FunctionalityKind {
        self.kind
    }

    /// Returns the raw record body.
    #[must_use]
    pub fn body(&self) -> &Value {
        &self.body
    }

    /// Parses the record as an actuator.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the record is not a well-formed actuator.
    pub fn as_actuator(&self) -> Result<ActuatorRecord, ParseError> {
        ActuatorRecord::deserialize(&self.body).map_err(Into::into)
    }

    /// Parses the record as a sensor.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the record is not a well-formed sensor.
    pub fn as_sensor(&self) -> Result<SensorRecord, ParseError> {
        SensorRecord::deserialize(&self.body).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn numeric_actuator_id() {
        let record: ActuatorRecord = serde_json::from_value(json!({
            "actuatorId": 7,
            "actuatorName": "Valve",
            "actuatorTypeID": "IntegerValueActuator"
        }))
        .unwrap();
        assert_eq!(record.actuator_id, "7");
        assert!(!record.has_position_control());
        assert_eq!(record.initial_position(), Position::FALLBACK);
    }

    #[test]
    fn sensor_without_id() {
        let record: SensorRecord = serde_json::from_value(json!({
            "sensorName": "Outside",
            "sensorTypeID": "TemperatureSensor",
            "deviceID": "d1"
        }))
        .unwrap();
        assert_eq!(record.sensor_id, "");
        assert_eq!(record.device_id.as_deref(), Some("d1"));
    }

    #[test]
    fn device_status_variants() {
        let parse = |v: Value| serde_json::from_value::<DeviceRecord>(v).unwrap();
        assert!(parse(json!({"deviceStatus": true})).is_active());
        assert!(parse(json!({"deviceStatus": "true"})).is_active());
        assert!(!parse(json!({"deviceStatus": "false"})).is_active());
        assert!(!parse(json!({})).is_active());
    }

    #[test]
    fn created_record_parses_by_kind() {
        let record = CreatedRecord::new(
            FunctionalityKind::Actuator,
            json!({
                "actuatorId": "a9",
                "actuatorName": "Blind1",
                "actuatorTypeID": "DecimalValueActuator",
                "_links": {"self": {"href": "http://localhost:8080/actuators/a9"}}
            }),
        );
        assert_eq!(record.kind(), FunctionalityKind::Actuator);
        assert_eq!(record.as_actuator().unwrap().actuator_name, "Blind1");
        assert!(record.as_sensor().is_err());
    }
}
