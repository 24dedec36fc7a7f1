// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP device builder.

use std::time::Duration;

use crate::device::Device;
use crate::error::Error;
use crate::protocol::{HttpClient, HttpConfig};

/// Builder for connecting to a light over HTTP.
///
/// Created via [`Device::http`] or [`Device::http_config`].
///
/// # Examples
///
/// ```no_run
/// use aquar_lib::Device;
/// use std::time::Duration;
///
/// # async fn example() -> aquar_lib::Result<()> {
/// let device = Device::http("192.168.1.50")
///     .with_name("Display Tank")
///     .with_timeout(Duration::from_secs(5))
///     .build()
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct HttpDeviceBuilder {
    config: HttpConfig,
    name: Option<String>,
}

impl HttpDeviceBuilder {
    /// Creates a new builder with the specified HTTP configuration.
    pub(crate) fn new(config: HttpConfig) -> Self {
        Self { config, name: None }
    }

    /// Attaches a caller-chosen name to the device.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.config = self.config.with_port(port);
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_timeout(timeout);
        self
    }

    /// Connects to the light and builds the device.
    ///
    /// This reads the light's identity and power capabilities.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created, the connection
    /// fails, the light is not its group's parent, or its firmware is
    /// unsupported.
    pub async fn build(self) -> Result<Device<HttpClient>, Error> {
        let client = self.config.into_client().map_err(Error::Protocol)?;
        Device::connect_named(client, self.name).await
    }
}
