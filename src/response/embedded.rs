// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HAL collection envelopes.

use serde_json::Value;

/// Extracts the entries of a collection response.
///
/// Accepts the HAL form `{"_embedded": {"<key>": [...]}}` as well as a bare
/// JSON array. Returns `None` when neither shape is present; an empty HAL
/// collection (the backend omits `_embedded` entirely when there is nothing
/// to list) is also `None`.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use smarthome_client::response::embedded_list;
///
/// let hal = json!({"_embedded": {"sensorTypeDTOList": [{"sensorTypeID": "WindSensor"}]}});
/// assert_eq!(embedded_list(&hal, "sensorTypeDTOList").unwrap().len(), 1);
///
/// let bare = json!([{"sensorTypeID": "WindSensor"}]);
/// assert_eq!(embedded_list(&bare, "sensorTypeDTOList").unwrap().len(), 1);
///
/// assert!(embedded_list(&json!({"_links": {}}), "sensorTypeDTOList").is_none());
/// ```
#[must_use]
pub fn embedded_list<'a>(value: &'a Value, key: &str) -> Option<&'a [Value]> {
    match value {
        Value::Array(entries) => Some(entries),
        Value::Object(map) => map
            .get("_embedded")?
            .get(key)?
            .as_array()
            .map(Vec::as_slice),
        _ => None,
    }
}
