// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP transport implementation for AquaIllumination lights.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::{ParseError, ProtocolError, Result};
use crate::protocol::Transport;
use crate::response::{ColorsResponse, IdentityResponse, PowerResponse, ScheduleResponse};
use crate::types::Intensity;

// ============================================================================
// HttpConfig - Configuration for HTTP lights
// ============================================================================

/// Configuration for an AquaIllumination light reachable over HTTP.
///
/// This is a simple configuration struct that holds connection parameters.
/// The API is stateless - each operation is an independent request against
/// the light's local REST endpoints under `/api`.
///
/// # Examples
///
/// ```
/// use aquar_lib::protocol::HttpConfig;
/// use std::time::Duration;
///
/// // Simple configuration
/// let config = HttpConfig::new("192.168.1.50");
///
/// // With all options
/// let config = HttpConfig::new("192.168.1.50")
///     .with_port(8080)
///     .with_timeout(Duration::from_secs(5));
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    host: String,
    port: u16,
    timeout: Duration,
}

impl HttpConfig {
    /// Default HTTP port.
    pub const DEFAULT_PORT: u16 = 80;
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a new HTTP configuration for the specified host.
    ///
    /// # Arguments
    ///
    /// * `host` - The hostname or IP address of the light
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: Self::DEFAULT_PORT,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the request timeout.
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

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the base URL of the light's API from this configuration.
    #[must_use]
    pub fn base_url(&self) -> String {
        let port_suffix = if self.port == Self::DEFAULT_PORT {
            String::new()
        } else {
            format!(":{}", self.port)
        };
        format!("http://{}{port_suffix}/api", self.host)
    }

    /// Creates an [`HttpClient`] from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn into_client(self) -> std::result::Result<HttpClient, ProtocolError> {
        if self.host.is_empty() {
            return Err(ProtocolError::InvalidAddress("host is required".to_string()));
        }

        let base_url = self.base_url();

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(HttpClient { base_url, client })
    }
}

// ============================================================================
// HttpClient - Transport over the light's local REST API
// ============================================================================

/// HTTP client for communicating with an AquaIllumination light.
///
/// Talks to the light's local REST API (`/api/identity`, `/api/power`,
/// `/api/colors`, `/api/schedule/enable`). Every response carries a
/// `response_code` field; anything non-zero is surfaced as
/// [`ProtocolError::DeviceStatus`].
///
/// # Examples
///
/// ```no_run
/// use aquar_lib::protocol::{HttpClient, Transport};
///
/// # async fn example() -> aquar_lib::Result<()> {
/// let client = HttpClient::new("192.168.1.50")?;
/// let identity = client.identity().await?;
/// println!("serial: {}", identity.serial_number());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    client: Client,
}

fn check_status(value: &serde_json::Value) -> std::result::Result<(), ProtocolError> {
    match value.get("response_code").and_then(serde_json::Value::as_i64) {
        Some(0) | None => Ok(()),
        Some(code) => Err(ProtocolError::DeviceStatus(code)),
    }
}

impl HttpClient {
    /// Creates a new HTTP client for the specified host.
    ///
    /// # Arguments
    ///
    /// * `host` - The hostname or IP address of the light
    ///
    /// # Errors
    ///
    /// Returns error if the host is empty or the HTTP client cannot be
    /// created.
    pub fn new(host: impl Into<String>) -> std::result::Result<Self, ProtocolError> {
        HttpConfig::new(host).into_client()
    }

    /// Returns the base URL of the light's API.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn read_body(response: reqwest::Response) -> Result<String> {
        if !response.status().is_success() {
            return Err(ProtocolError::ConnectionFailed(format!(
                "HTTP {} - {}",
                response.status().as_u16(),
                response.status().canonical_reason().unwrap_or("Unknown")
            ))
            .into());
        }

        let body = response.text().await.map_err(ProtocolError::Http)?;
        tracing::debug!(body = %body, "Received HTTP response");
        Ok(body)
    }

    /// Parses a response body, surfacing a non-zero device `response_code`
    /// before any shape mismatch: failure payloads carry nothing but the
    /// code.
    fn parse_checked<T: DeserializeOwned>(body: &str) -> Result<T> {
        let value: serde_json::Value = serde_json::from_str(body).map_err(ParseError::Json)?;
        check_status(&value)?;
        serde_json::from_value(value).map_err(|e| ParseError::Json(e).into())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        tracing::debug!(url = %url, "Sending HTTP request");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(ProtocolError::Http)?;

        let body = Self::read_body(response).await?;
        Self::parse_checked(&body)
    }

    async fn send_json<B, T>(&self, method: reqwest::Method, path: &str, body: &B) -> Result<T>
    where
        B: serde::Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        tracing::debug!(url = %url, method = %method, "Sending HTTP request");

        let response = self
            .client
            .request(method, &url)
            .json(body)
            .send()
            .await
            .map_err(ProtocolError::Http)?;

        let body = Self::read_body(response).await?;
        Self::parse_checked(&body)
    }
}

impl Transport for HttpClient {
    async fn identity(&self) -> Result<IdentityResponse> {
        self.get_json("/identity").await
    }

    async fn power_capabilities(&self) -> Result<PowerResponse> {
        self.get_json("/power").await
    }

    async fn raw_brightness(&self) -> Result<ColorsResponse> {
        self.get_json("/colors").await
    }

    async fn set_raw_brightness(&self, colors: &BTreeMap<String, Intensity>) -> Result<()> {
        let _ack: serde_json::Value = self
            .send_json(reqwest::Method::POST, "/colors", colors)
            .await?;
        Ok(())
    }

    async fn schedule_state(&self) -> Result<bool> {
        let schedule: ScheduleResponse = self.get_json("/schedule/enable").await?;
        Ok(schedule.enabled())
    }

    async fn set_schedule_state(&self, enable: bool) -> Result<()> {
        let body = serde_json::json!({ "enable": enable });
        let _ack: serde_json::Value = self
            .send_json(reqwest::Method::PUT, "/schedule/enable", &body)
            .await?;
        Ok(())
    }
}
