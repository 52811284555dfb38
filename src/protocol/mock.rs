// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory backend for unit tests.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::Semaphore;

use crate::error::ProtocolError;
use crate::protocol::{ApiResponse, Backend};

/// Scripted reply for a path.
#[derive(Debug, Clone)]
pub(crate) enum MockReply {
    /// 2xx with the given body.
    Body(String),
    /// Non-success status code.
    Status(u16),
}

impl MockReply {
    pub(crate) fn json(value: &Value) -> Self {
        Self::Body(value.to_string())
    }
}

/// A request the backend received.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Recorded {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

/// Backend double answering from a path→reply table.
///
/// Unscripted paths answer 404. When constructed with [`MockBackend::gated`],
/// every request waits for a [`MockBackend::release`] before answering.
#[derive(Debug, Default)]
pub(crate) struct MockBackend {
    replies: Mutex<HashMap<String, MockReply>>,
    requests: Mutex<Vec<Recorded>>,
    gate: Option<Arc<Semaphore>>,
}

impl MockBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn gated() -> Self {
        Self {
            gate: Some(Arc::new(Semaphore::new(0))),
            ..Self::default()
        }
    }

    pub(crate) fn reply(&self, path: &str, reply: MockReply) {
        self.replies.lock().insert(path.to_string(), reply);
    }

    pub(crate) fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1);
        }
    }

    pub(crate) fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().clone()
    }

    async fn answer(
        &self,
        method: &'static str,
        path: &str,
        body: Option<&Value>,
    ) -> Result<ApiResponse, ProtocolError> {
        self.requests.lock().push(Recorded {
            method,
            path: path.to_string(),
            body: body.cloned(),
        });

        if let Some(gate) = &self.gate {
            gate.acquire()
                .await
                .map_err(|e| ProtocolError::InvalidAddress(e.to_string()))?
                .forget();
        }

        let reply = self.replies.lock().get(path).cloned();
        match reply {
            Some(MockReply::Body(body)) => Ok(ApiResponse::new(body)),
            Some(MockReply::Status(code)) => Err(ProtocolError::Status {
                code,
                reason: "Scripted".to_string(),
            }),
            None => Err(ProtocolError::Status {
                code: 404,
                reason: "Not Found".to_string(),
            }),
        }
    }
}

impl Backend for MockBackend {
    async fn get(&self, path: &str) -> Result<ApiResponse, ProtocolError> {
        self.answer("GET", path, None).await
    }

    async fn post(&self, path: &str, body: Option<&Value>) -> Result<ApiResponse, ProtocolError> {
        self.answer("POST", path, body).await
    }
}
