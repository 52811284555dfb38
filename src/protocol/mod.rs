// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Backend communication.
//!
//! Every component in this crate reaches the smart-home backend through the
//! [`Backend`] trait. The crate ships an HTTP+JSON implementation,
//! [`HttpClient`], configured through [`HttpConfig`] with the base endpoint
//! injected by the caller.
//!
//! Paths passed to a backend are relative to its base endpoint and may carry
//! a query string, for example `/actuators/a1/act?command=80`.

#[cfg(feature = "http")]
mod http;
#[cfg(test)]
pub(crate) mod mock;

#[cfg(feature = "http")]
pub use http::{HttpClient, HttpConfig};

use serde_json::Value;

use crate::error::{ParseError, ProtocolError};

/// A successful response from the backend.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// The raw JSON response body.
    body: String,
}

impl ApiResponse {
    /// Creates a new response with the given body.
    #[must_use]
    pub fn new(body: String) -> Self {
        Self { body }
    }

    /// Returns the raw response body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Parses the response as a specific type.
    ///
    /// # Errors
    ///
    /// Returns error if the JSON cannot be parsed into the target type.
    pub fn parse<T: serde::de::DeserializeOwned>(&self) -> Result<T, ParseError> {
        serde_json::from_str(&self.body).map_err(Into::into)
    }

    /// Parses the response as an untyped JSON value.
    ///
    /// # Errors
    ///
    /// Returns error if the body is not valid JSON.
    pub fn json(&self) -> Result<Value, ParseError> {
        self.parse()
    }
}

/// Trait for transports that can reach the smart-home backend.
///
/// Implementations only move bytes: status codes outside 2xx must be
/// reported as [`ProtocolError::Status`], and the body of a successful
/// response is returned unparsed.
#[allow(async_fn_in_trait)]
pub trait Backend {
    /// Issues a `GET` for the given path.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request fails or the status is not a success.
    async fn get(&self, path: &str) -> Result<ApiResponse, ProtocolError>;

    /// Issues a `POST` for the given path with an optional JSON body.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request fails or the status is not a success.
    async fn post(&self, path: &str, body: Option<&Value>) -> Result<ApiResponse, ProtocolError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_response_body() {
        let response = ApiResponse::new(r#"{"status": "80"}"#.to_string());
        let value = response.json().unwrap();
        assert_eq!(value["status"], "80");
    }

    #[test]
    fn parse_empty_body_fails() {
        let response = ApiResponse::new(String::new());
        assert!(matches!(response.json(), Err(ParseError::Json(_))));
    }
}
