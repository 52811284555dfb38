// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Actuator command response parsing.

use serde::Deserialize;
use serde_json::Value;

use crate::error::ParseError;
use crate::types::Position;

/// Response to an actuator command.
///
/// The backend echoes the resulting position as `status`, either as a
/// numeric string (`{"status": "80"}`) or as a number.
///
/// # Examples
///
/// ```
/// use smarthome_client::response::CommandStatusResponse;
///
/// let response: CommandStatusResponse = serde_json::from_str(r#"{"status": "80"}"#).unwrap();
/// assert_eq!(response.position().unwrap().value(), 80);
///
/// let response: CommandStatusResponse = serde_json::from_str(r#"{"status": "up"}"#).unwrap();
/// assert!(response.position().is_err());
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct CommandStatusResponse {
    #[serde(default)]
    status: Option<Value>,
}

impl CommandStatusResponse {
    /// Returns the raw echoed status, if present.
    #[must_use]
    pub fn raw_status(&self) -> Option<&Value> {
        self.status.as_ref()
    }

    /// Returns the echoed position.
    ///
    /// Integers outside 0-100 are clamped: the backend is the source of truth
    /// for the valid range, and the control can only display 0-100.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::MissingField` if `status` is absent or null, and
    /// `ParseError::InvalidValue` if it is not an integer.
    pub fn position(&self) -> Result<Position, ParseError> {
        let raw = match &self.status {
            None | Some(Value::Null) => {
                return Err(ParseError::MissingField("status".to_string()));
            }
            Some(raw) => raw,
        };

        let value = Position::parse_status(raw).ok_or_else(|| ParseError::InvalidValue {
            field: "status".to_string(),
            message: format!("not an integer: {raw}"),
        })?;

        if !(0..=100).contains(&value) {
            tracing::warn!(status = value, "Backend echoed a position outside 0-100, clamping");
        }
        Ok(Position::clamped(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> CommandStatusResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn numeric_status() {
        assert_eq!(parse(r#"{"status": 42}"#).position().unwrap().value(), 42);
    }

    #[test]
    fn missing_status() {
        assert!(matches!(
            parse("{}").position(),
            Err(ParseError::MissingField(ref f)) if f == "status"
        ));
        assert!(matches!(
            parse(r#"{"status": null}"#).position(),
            Err(ParseError::MissingField(_))
        ));
    }

    #[test]
    fn non_numeric_status() {
        assert!(matches!(
            parse(r#"{"status": "half"}"#).position(),
            Err(ParseError::InvalidValue { ref field, .. }) if field == "status"
        ));
    }

    #[test]
    fn out_of_range_status_is_clamped() {
        assert_eq!(parse(r#"{"status": "120"}"#).position().unwrap(), Position::MAX);
        assert_eq!(parse(r#"{"status": -4}"#).position().unwrap(), Position::MIN);
    }

    #[test]
    fn extra_fields_are_ignored() {
        let response = parse(r#"{"status": "10", "actuatorId": "a1", "_links": {}}"#);
        assert_eq!(response.position().unwrap().value(), 10);
    }
}
