// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the smart-home client.
//!
//! This module provides the error hierarchy for handling failures across
//! the library: value validation, backend communication, and response
//! parsing. None of these errors is fatal to a component; every failing
//! user action leaves the component interactive so the user can retry.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while talking to the backend.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a backend response.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A draft is missing a field that must be present before submission.
    #[error("required field is missing: {0}")]
    MissingField(String),
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: i64,
        /// Maximum allowed value.
        max: i64,
        /// The actual value that was provided.
        actual: i64,
    },

    /// An unknown functionality kind name was provided.
    #[error("invalid functionality kind: {0}")]
    InvalidKind(String),
}

/// Errors related to backend communication.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed at the transport level.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status code.
    #[error("HTTP {code} - {reason}")]
    Status {
        /// The numeric status code.
        code: u16,
        /// The canonical reason phrase.
        reason: String,
    },

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

/// Errors related to parsing backend responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected field is missing from the response.
    #[error("missing field in response: {0}")]
    MissingField(String),

    /// Failed to parse a specific value.
    #[error("failed to parse {field}: {message}")]
    InvalidValue {
        /// The field that failed to parse.
        field: String,
        /// Description of the parsing failure.
        message: String,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_error_display() {
        let err = ValueError::OutOfRange {
            min: 0,
            max: 100,
            actual: 150,
        };
        assert_eq!(err.to_string(), "value 150 is out of range [0, 100]");
    }

    #[test]
    fn status_error_display() {
        let err = ProtocolError::Status {
            code: 422,
            reason: "Unprocessable Entity".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 422 - Unprocessable Entity");
    }

    #[test]
    fn error_from_parse_error() {
        let err: Error = ParseError::MissingField("status".to_string()).into();
        assert!(matches!(err, Error::Parse(ParseError::MissingField(ref f)) if f == "status"));
    }

    #[test]
    fn missing_field_display() {
        let err = Error::MissingField("actuatorName".to_string());
        assert_eq!(err.to_string(), "required field is missing: actuatorName");
    }
}
