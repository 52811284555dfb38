// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Type catalog retrieval.
//!
//! The backend publishes which sensor and actuator types exist. A catalog
//! that cannot be fetched or parsed never fails the caller: it degrades to
//! an empty list and the condition is logged.

use serde_json::Value;

use crate::protocol::Backend;
use crate::response::embedded_list;
use crate::types::{FunctionalityKind, TypeDescriptor};

/// Fetches the type catalog for a functionality kind.
///
/// Entries without a usable `<kind>TypeID` string are skipped. Transport
/// failures, non-success statuses and malformed bodies all yield an empty
/// list.
///
/// # Examples
///
/// ```no_run
/// use smarthome_client::catalog::fetch_type_catalog;
/// use smarthome_client::protocol::HttpClient;
/// use smarthome_client::types::FunctionalityKind;
///
/// # async fn example() -> smarthome_client::Result<()> {
/// let client = HttpClient::new("http://localhost:8080")?;
/// let types = fetch_type_catalog(&client, FunctionalityKind::Actuator).await;
/// for t in &types {
///     println!("{}", t.label());
/// }
/// # Ok(())
/// # }
/// ```
pub async fn fetch_type_catalog<B: Backend>(
    backend: &B,
    kind: FunctionalityKind,
) -> Vec<TypeDescriptor> {
    let response = match backend.get(kind.catalog_path()).await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(kind = %kind, error = %e, "Failed to fetch type catalog");
            return Vec::new();
        }
    };

    match response.json() {
        Ok(value) => parse_catalog(&value, kind),
        Err(e) => {
            tracing::warn!(kind = %kind, error = %e, "Type catalog is not valid JSON");
            Vec::new()
        }
    }
}

/// Extracts type descriptors from a catalog response body.
#[must_use]
pub fn parse_catalog(value: &Value, kind: FunctionalityKind) -> Vec<TypeDescriptor> {
    let Some(entries) = embedded_list(value, kind.catalog_list_key()) else {
        tracing::warn!(kind = %kind, "Type catalog not found in response");
        return Vec::new();
    };

    let id_field = kind.type_field();
    let types: Vec<TypeDescriptor> = entries
        .iter()
        .filter_map(|entry| entry.get(id_field).and_then(Value::as_str))
        .map(TypeDescriptor::new)
        .collect();

    if types.len() < entries.len() {
        tracing::warn!(
            kind = %kind,
            skipped = entries.len() - types.len(),
            "Skipped type catalog entries without {id_field}"
        );
    }

    types
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::protocol::mock::{MockBackend, MockReply};

    #[test]
    fn parse_hal_catalog() {
        let body = json!({
            "_embedded": {
                "actuatorTypeDTOList": [
                    {"actuatorTypeID": "RollerBlindActuator"},
                    {"actuatorTypeID": "DecimalValueActuator"},
                    {"unrelated": 1}
                ]
            },
            "_links": {"self": {"href": "http://localhost:8080/actuatortypes"}}
        });
        let types = parse_catalog(&body, FunctionalityKind::Actuator);
        assert_eq!(
            types,
            [
                TypeDescriptor::new("RollerBlindActuator"),
                TypeDescriptor::new("DecimalValueActuator"),
            ]
        );
    }

    #[test]
    fn parse_uses_kind_specific_keys() {
        let body = json!({"_embedded": {"actuatorTypeDTOList": [{"actuatorTypeID": "X"}]}});
        assert!(parse_catalog(&body, FunctionalityKind::Sensor).is_empty());
    }

    #[tokio::test]
    async fn fetch_sensor_catalog() {
        let backend = MockBackend::new();
        backend.reply(
            "/sensortypes",
            MockReply::json(&json!([{"sensorTypeID": "WindSensor"}])),
        );

        let types = fetch_type_catalog(&backend, FunctionalityKind::Sensor).await;
        assert_eq!(types, [TypeDescriptor::new("WindSensor")]);
        assert_eq!(backend.requests()[0].path, "/sensortypes");
    }

    #[tokio::test]
    async fn failed_fetch_yields_empty_catalog() {
        let backend = MockBackend::new();
        backend.reply("/actuatortypes", MockReply::Status(500));
        assert!(
            fetch_type_catalog(&backend, FunctionalityKind::Actuator)
                .await
                .is_empty()
        );
    }

    #[tokio::test]
    async fn malformed_body_yields_empty_catalog() {
        let backend = MockBackend::new();
        backend.reply("/actuatortypes", MockReply::Body("<html>".to_string()));
        assert!(
            fetch_type_catalog(&backend, FunctionalityKind::Actuator)
                .await
                .is_empty()
        );
    }
}
