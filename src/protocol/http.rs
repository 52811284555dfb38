// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP+JSON backend implementation.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, Url};
use serde_json::Value;

use crate::error::ProtocolError;
use crate::protocol::{ApiResponse, Backend};

// ============================================================================
// HttpConfig - Configuration of the backend endpoint
// ============================================================================

/// Configuration for the smart-home backend endpoint.
///
/// The endpoint is always injected: nothing in the crate assumes a fixed
/// address, so the same components run against a local backend, a staging
/// deployment, or a mock server in tests.
///
/// # Examples
///
/// ```
/// use smarthome_client::protocol::HttpConfig;
/// use std::time::Duration;
///
/// // Defaults to http://localhost:8080
/// let config = HttpConfig::default();
/// assert_eq!(config.base_url(), "http://localhost:8080");
///
/// let config = HttpConfig::new("home.example.org")
///     .with_https()
///     .with_timeout(Duration::from_secs(5));
/// assert_eq!(config.base_url(), "https://home.example.org");
///
/// let config = HttpConfig::from_url("http://10.0.0.2:9000/api/").unwrap();
/// assert_eq!(config.base_url(), "http://10.0.0.2:9000/api");
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    host: String,
    port: u16,
    use_https: bool,
    base_path: String,
    timeout: Duration,
}

impl HttpConfig {
    /// Default backend host.
    pub const DEFAULT_HOST: &'static str = "localhost";
    /// Default backend port.
    pub const DEFAULT_PORT: u16 = 8080;
    /// Default HTTPS port.
    pub const DEFAULT_HTTPS_PORT: u16 = 443;
    /// Default transport timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration for the specified host on the default port.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: Self::DEFAULT_PORT,
            use_https: false,
            base_path: String::new(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Parses a configuration from a full base URL.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::InvalidAddress` if the URL cannot be parsed,
    /// has no host, or uses a scheme other than `http`/`https`.
    pub fn from_url(url: &str) -> Result<Self, ProtocolError> {
        let parsed =
            Url::parse(url).map_err(|e| ProtocolError::InvalidAddress(format!("{url}: {e}")))?;

        let use_https = match parsed.scheme() {
            "http" => false,
            "https" => true,
            other => {
                return Err(ProtocolError::InvalidAddress(format!(
                    "unsupported scheme: {other}"
                )));
            }
        };

        let host = parsed
            .host_str()
            .ok_or_else(|| ProtocolError::InvalidAddress(format!("{url}: missing host")))?;

        let port = parsed
            .port_or_known_default()
            .unwrap_or(Self::DEFAULT_PORT);

        Ok(Self {
            host: host.to_string(),
            port,
            use_https,
            base_path: parsed.path().trim_end_matches('/').to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
        })
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Enables HTTPS.
    ///
    /// If the port is still the default backend port, it is changed to 443.
    #[must_use]
    pub fn with_https(mut self) -> Self {
        self.use_https = true;
        if self.port == Self::DEFAULT_PORT {
            self.port = Self::DEFAULT_HTTPS_PORT;
        }
        self
    }

    /// Sets a path prefix prepended to every request path.
    #[must_use]
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        let base_path = base_path.into();
        let trimmed = base_path.trim_end_matches('/');
        self.base_path = if trimmed.is_empty() || trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{trimmed}")
        };
        self
    }

    /// Sets the transport timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns whether HTTPS is enabled.
    #[must_use]
    pub fn use_https(&self) -> bool {
        self.use_https
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the base URL from this configuration.
    #[must_use]
    pub fn base_url(&self) -> String {
        let scheme = if self.use_https { "https" } else { "http" };
        let port_suffix =
            if (self.use_https && self.port == 443) || (!self.use_https && self.port == 80) {
                String::new()
            } else {
                format!(":{}", self.port)
            };
        format!("{scheme}://{}{port_suffix}{}", self.host, self.base_path)
    }

    /// Creates an `HttpClient` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn into_client(self) -> Result<HttpClient, ProtocolError> {
        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(HttpClient {
            base_url: self.base_url(),
            client,
        })
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_HOST)
    }
}

// ============================================================================
// HttpClient
// ============================================================================

/// HTTP client for the smart-home backend.
///
/// # Examples
///
/// ```no_run
/// use smarthome_client::protocol::{Backend, HttpClient};
///
/// # async fn example() -> smarthome_client::Result<()> {
/// let client = HttpClient::new("http://localhost:8080")?;
/// let response = client.get("/actuatortypes").await?;
/// println!("{}", response.body());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    client: Client,
}

impl HttpClient {
    /// Creates a client for the given base URL with the default timeout.
    ///
    /// A URL without a scheme is treated as plain HTTP.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::InvalidAddress` if the URL is unusable, or
    /// an error if the HTTP client cannot be created.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProtocolError> {
        let base_url = base_url.into();
        let config = if base_url.contains("://") {
            HttpConfig::from_url(&base_url)?
        } else {
            HttpConfig::from_url(&format!("http://{base_url}"))?
        };
        config.into_client()
    }

    /// Returns the base URL of the backend.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the absolute URL for a backend-relative path.
    fn build_url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    async fn execute(&self, request: RequestBuilder) -> Result<ApiResponse, ProtocolError> {
        let response = request.send().await.map_err(ProtocolError::Http)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProtocolError::Status {
                code: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response.text().await.map_err(ProtocolError::Http)?;

        tracing::debug!(body = %body, "Received HTTP response");

        Ok(ApiResponse::new(body))
    }
}

impl Backend for HttpClient {
    async fn get(&self, path: &str) -> Result<ApiResponse, ProtocolError> {
        let url = self.build_url(path);

        tracing::debug!(url = %url, "Sending HTTP GET");

        self.execute(self.client.get(&url)).await
    }

    async fn post(&self, path: &str, body: Option<&Value>) -> Result<ApiResponse, ProtocolError> {
        let url = self.build_url(path);

        tracing::debug!(url = %url, has_body = body.is_some(), "Sending HTTP POST");

        let request = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json");
        let request = match body {
            Some(body) => request.json(body),
            None => request,
        };

        self.execute(request).await
    }
}
