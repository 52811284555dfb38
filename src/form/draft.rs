// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-progress functionality record.

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

/// Draft key holding the owning device.
pub const DEVICE_ID_FIELD: &str = "deviceID";

/// A not-yet-submitted sensor or actuator record.
///
/// The draft is a flat mapping from field name to string value. The owning
/// device is fixed when the draft is created and can never be overwritten
/// through [`set`](Self::set); it is always part of the serialized record.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use smarthome_client::form::FunctionalityDraft;
///
/// let mut draft = FunctionalityDraft::new("d1");
/// draft.set("actuatorName", "Blind1");
/// draft.set("deviceID", "someone-else");
///
/// assert_eq!(draft.device_id(), "d1");
/// assert_eq!(
///     draft.to_json(),
///     json!({"deviceID": "d1", "actuatorName": "Blind1"})
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionalityDraft {
    device_id: String,
    fields: BTreeMap<String, String>,
}

impl FunctionalityDraft {
    /// Creates an empty draft owned by the given device.
    #[must_use]
    pub fn new(device_id: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Returns the owning device.
    #[must_use]
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Returns the value of a field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        if name == DEVICE_ID_FIELD {
            return Some(&self.device_id);
        }
        self.fields.get(name).map(String::as_str)
    }

    /// Sets a field, returning `false` if the field is the protected device id.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> bool {
        let name = name.into();
        if name == DEVICE_ID_FIELD {
            return false;
        }
        self.fields.insert(name, value.into());
        true
    }

    /// Removes a field and returns its previous value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.fields.remove(name)
    }

    /// Returns `true` if the field is present with a non-blank value.
    #[must_use]
    pub fn has_value(&self, name: &str) -> bool {
        self.get(name).is_some_and(|v| !v.trim().is_empty())
    }

    /// Iterates over user-set fields (excluding the device id).
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns `true` if no field besides the device id is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Discards every user-set field.
    pub fn clear(&mut self) {
        self.fields.clear();
    }

    /// Returns the record as a JSON object, device id included.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut map = serde_json::Map::with_capacity(self.fields.len() + 1);
        map.insert(
            DEVICE_ID_FIELD.to_string(),
            Value::String(self.device_id.clone()),
        );
        for (k, v) in &self.fields {
            map.insert(k.clone(), Value::String(v.clone()));
        }
        Value::Object(map)
    }
}

impl Serialize for FunctionalityDraft {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        map.serialize_entry(DEVICE_ID_FIELD, &self.device_id)?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn device_id_is_protected() {
        let mut draft = FunctionalityDraft::new("d1");
        assert!(!draft.set(DEVICE_ID_FIELD, "d2"));
        assert_eq!(draft.get(DEVICE_ID_FIELD), Some("d1"));
        assert!(draft.is_empty());
    }

    #[test]
    fn clear_keeps_device() {
        let mut draft = FunctionalityDraft::new("d1");
        draft.set("sensorName", "Outside");
        draft.clear();
        assert!(draft.is_empty());
        assert_eq!(draft.to_json(), json!({"deviceID": "d1"}));
    }

    #[test]
    fn blank_values_do_not_count() {
        let mut draft = FunctionalityDraft::new("d1");
        draft.set("sensorName", "   ");
        assert!(!draft.has_value("sensorName"));
        assert!(!draft.has_value("sensorTypeID"));
        draft.set("sensorName", "Hall");
        assert!(draft.has_value("sensorName"));
    }

    #[test]
    fn serialize_matches_to_json() {
        let mut draft = FunctionalityDraft::new("d1");
        draft.set("actuatorName", "Blind1");
        draft.set("precision", "0.5");
        assert_eq!(serde_json::to_value(&draft).unwrap(), draft.to_json());
    }
}
