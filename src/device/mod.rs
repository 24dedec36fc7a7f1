// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! High-level device abstraction for AquaIllumination lights.
//!
//! A [`Device`] is one connected light (the parent of its linked group)
//! together with the power profiles of every fixture in the group. It
//! exposes the brightness operations - read all channels, set all channels,
//! patch a subset, nudge a single channel - on top of a [`Transport`]
//! implementation.
//!
//! # Consistency
//!
//! The composite operations
//! ([`patch_colors_brightness`](Device::patch_colors_brightness) and
//! [`update_color_brightness`](Device::update_color_brightness)) are a read
//! followed by a write, with no coordination against other controllers. If
//! something else changes the light between the two steps, the write wins
//! and the concurrent change is lost. The device API offers no
//! version/ETag mechanism to detect this; callers that need stronger
//! guarantees must serialize access themselves.
//!
//! # Examples
//!
//! ```no_run
//! use aquar_lib::Device;
//!
//! #[tokio::main]
//! async fn main() -> aquar_lib::Result<()> {
//!     let device = Device::http("192.168.1.50").build().await?;
//!
//!     // Nudge one channel up by ten percentage points
//!     device.update_color_brightness("royal", 10.0).await?;
//!
//!     Ok(())
//! }
//! ```

#[cfg(feature = "http")]
mod http_builder;

#[cfg(feature = "http")]
pub use http_builder::HttpDeviceBuilder;

use std::collections::BTreeMap;

use crate::budget::LightGroup;
use crate::error::{Error, Result};
#[cfg(feature = "http")]
use crate::protocol::{HttpClient, HttpConfig};
use crate::protocol::Transport;
use crate::response::IdentityResponse;
use crate::types::FirmwareVersion;

/// A connected AquaIllumination light and its linked group.
///
/// The type parameter `T` is the transport used to reach the light;
/// [`HttpClient`] in normal use.
///
/// Constructed via [`Device::http`] (or [`Device::connect`] with a custom
/// transport), which reads the light's identity and power capabilities once.
/// The resulting profiles are immutable; reconnect if the physical setup
/// changes.
#[derive(Debug)]
pub struct Device<T: Transport> {
    transport: T,
    name: Option<String>,
    identity: IdentityResponse,
    firmware: FirmwareVersion,
    group: LightGroup,
}

#[cfg(feature = "http")]
impl Device<HttpClient> {
    /// Creates a builder for a light reachable over HTTP.
    ///
    /// # Arguments
    ///
    /// * `host` - The hostname or IP address of the light
    #[must_use]
    pub fn http(host: impl Into<String>) -> HttpDeviceBuilder {
        HttpDeviceBuilder::new(HttpConfig::new(host))
    }

    /// Creates a builder from an existing HTTP configuration.
    #[must_use]
    pub fn http_config(config: HttpConfig) -> HttpDeviceBuilder {
        HttpDeviceBuilder::new(config)
    }
}

impl<T: Transport> Device<T> {
    /// Connects through the given transport.
    ///
    /// Reads the light's identity and the power capabilities of its linked
    /// group, then builds the immutable conversion profiles.
    ///
    /// # Errors
    ///
    /// - [`Error::NotParent`] if the addressed light is a secondary; only
    ///   the parent of a group can be controlled.
    /// - [`Error::UnsupportedFirmware`] if the firmware is outside the
    ///   supported range.
    /// - Protocol or parse errors if either request fails.
    pub async fn connect(transport: T) -> Result<Self> {
        Self::connect_named(transport, None).await
    }

    /// Connects through the given transport, attaching a caller-chosen
    /// name.
    ///
    /// # Errors
    ///
    /// Same as [`connect`](Self::connect).
    pub async fn connect_named(transport: T, name: Option<String>) -> Result<Self> {
        let identity = transport.identity().await?;

        if let Some(parent) = identity.parent() {
            return Err(Error::NotParent {
                parent: parent.to_string(),
            });
        }

        let firmware = identity.firmware()?;
        if !firmware.is_supported() {
            return Err(Error::UnsupportedFirmware {
                version: identity.firmware_str().to_string(),
            });
        }

        let power = transport.power_capabilities().await?;
        let group = LightGroup::from_power_response(&power, identity.serial_number())?;

        tracing::debug!(
            serial = %identity.serial_number(),
            product = %identity.product(),
            linked = group.devices().len(),
            "connected to light"
        );

        Ok(Self {
            transport,
            name,
            identity,
            firmware,
            group,
        })
    }

    /// Returns the caller-chosen name, if one was set.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the light's serial number.
    #[must_use]
    pub fn serial_number(&self) -> &str {
        self.identity.serial_number()
    }

    /// Returns the product name (e.g. `"Hydra TwentySix"`).
    #[must_use]
    pub fn product(&self) -> &str {
        self.identity.product()
    }

    /// Returns the product sub-type if the light reported one.
    #[must_use]
    pub fn product_type(&self) -> Option<&str> {
        self.identity.product_type()
    }

    /// Returns the light's firmware version.
    #[must_use]
    pub fn firmware_version(&self) -> FirmwareVersion {
        self.firmware
    }

    /// Returns the light's UTC manufacture timestamp, if it reported one.
    #[must_use]
    pub fn mfg_date_utc(&self) -> Option<chrono::NaiveDateTime> {
        self.identity.mfg_date_utc()
    }

    /// Returns the linked group's power profiles.
    #[must_use]
    pub fn group(&self) -> &LightGroup {
        &self.group
    }

    /// Returns the underlying transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns the color channel identifiers of the connected light.
    ///
    /// The set is discovered at connection time and fixed for the life of
    /// the session.
    #[must_use]
    pub fn colors(&self) -> Vec<String> {
        self.group.primary().colors().map(str::to_string).collect()
    }

    /// Reads the current brightness of every color channel, in percent.
    ///
    /// Values above 100 mean the channel is overdriven (HD).
    ///
    /// # Errors
    ///
    /// Returns error if the read fails or the light reports a channel this
    /// session does not know.
    pub async fn colors_brightness(&self) -> Result<BTreeMap<String, f64>> {
        let raw = self.transport.raw_brightness().await?;
        let primary = self.group.primary();

        let mut brightness = BTreeMap::new();
        for (color, &intensity) in raw.colors() {
            let percentage = primary.intensity_to_percentage(color, intensity)?;
            brightness.insert(color.clone(), percentage);
        }
        Ok(brightness)
    }

    /// Sets the brightness of every color channel, in percent.
    ///
    /// The request must cover the full channel set. Intensities are
    /// computed with the primary light's tables and checked against every
    /// group member's power budget before anything is written; on any
    /// error the light is left untouched.
    ///
    /// # Errors
    ///
    /// See [`LightGroup::plan`] for validation errors; transport errors are
    /// passed through.
    pub async fn set_colors_brightness(&self, settings: &BTreeMap<String, f64>) -> Result<()> {
        let intensities = self.group.plan(settings)?;
        self.transport.set_raw_brightness(&intensities).await
    }

    /// Updates a subset of color channels, leaving the rest at their
    /// current brightness.
    ///
    /// Reads the current setting, overlays `patch`, and writes the merged
    /// full set. Not atomic against concurrent controllers (see the module
    /// docs).
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidData`] if `patch` is empty (nothing is read or
    ///   written).
    /// - Any error of [`colors_brightness`](Self::colors_brightness) or
    ///   [`set_colors_brightness`](Self::set_colors_brightness).
    pub async fn patch_colors_brightness(&self, patch: &BTreeMap<String, f64>) -> Result<()> {
        if patch.is_empty() {
            return Err(Error::InvalidData(
                "patch must name at least one color".to_string(),
            ));
        }

        let mut settings = self.colors_brightness().await?;
        for (color, &percentage) in patch {
            settings.insert(color.clone(), percentage);
        }

        self.set_colors_brightness(&settings).await
    }

    /// Adjusts a single color channel by a delta, in percentage points.
    ///
    /// A zero delta is a no-op and performs no I/O. The adjusted value is
    /// validated during the write, so a delta that pushes the channel
    /// negative or past its HD ceiling fails there and leaves the light
    /// untouched.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidData`] if `color` is empty, or is not a channel of
    ///   the connected light.
    /// - Any error of [`colors_brightness`](Self::colors_brightness) or
    ///   [`set_colors_brightness`](Self::set_colors_brightness).
    #[allow(clippy::float_cmp)]
    pub async fn update_color_brightness(&self, color: &str, delta: f64) -> Result<()> {
        if color.is_empty() {
            return Err(Error::InvalidData("color must not be empty".to_string()));
        }
        if delta == 0.0 {
            return Ok(());
        }

        let mut settings = self.colors_brightness().await?;
        let Some(current) = settings.get_mut(color) else {
            return Err(Error::InvalidData(format!(
                "unknown color channel: {color}"
            )));
        };
        *current += delta;

        self.set_colors_brightness(&settings).await
    }

    /// Reads whether the light's built-in schedule is enabled.
    ///
    /// While the schedule runs, manual brightness settings are overridden
    /// by the light's own program.
    ///
    /// # Errors
    ///
    /// Returns error if the read fails.
    pub async fn schedule_enabled(&self) -> Result<bool> {
        self.transport.schedule_state().await
    }

    /// Enables or disables the light's built-in schedule.
    ///
    /// Disable it to take manual control of the color channels.
    ///
    /// # Errors
    ///
    /// Returns error if the write fails.
    pub async fn set_schedule_enabled(&self, enable: bool) -> Result<()> {
        self.transport.set_schedule_state(enable).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::json;

    use crate::error::ParseError;
    use crate::response::{ColorsResponse, PowerResponse};
    use crate::types::Intensity;

    #[derive(Debug)]
    struct MockTransport {
        identity: serde_json::Value,
        power: serde_json::Value,
        colors: serde_json::Value,
        read_calls: AtomicUsize,
        write_calls: AtomicUsize,
        written: Mutex<Option<BTreeMap<String, Intensity>>>,
    }

    impl MockTransport {
        fn new(identity: serde_json::Value, power: serde_json::Value) -> Self {
            Self {
                identity,
                power,
                colors: all_raw(0),
                read_calls: AtomicUsize::new(0),
                write_calls: AtomicUsize::new(0),
                written: Mutex::new(None),
            }
        }

        fn with_colors(mut self, colors: serde_json::Value) -> Self {
            self.colors = colors;
            self
        }

        fn reads(&self) -> usize {
            self.read_calls.load(Ordering::SeqCst)
        }

        fn writes(&self) -> usize {
            self.write_calls.load(Ordering::SeqCst)
        }

        fn written(&self) -> Option<BTreeMap<String, Intensity>> {
            self.written.lock().unwrap().clone()
        }
    }

    impl Transport for MockTransport {
        async fn identity(&self) -> Result<IdentityResponse> {
            Ok(serde_json::from_value(self.identity.clone()).map_err(ParseError::Json)?)
        }

        async fn power_capabilities(&self) -> Result<PowerResponse> {
            Ok(serde_json::from_value(self.power.clone()).map_err(ParseError::Json)?)
        }

        async fn raw_brightness(&self) -> Result<ColorsResponse> {
            self.read_calls.fetch_add(1, Ordering::SeqCst);
            Ok(serde_json::from_value(self.colors.clone()).map_err(ParseError::Json)?)
        }

        async fn set_raw_brightness(&self, colors: &BTreeMap<String, Intensity>) -> Result<()> {
            self.write_calls.fetch_add(1, Ordering::SeqCst);
            *self.written.lock().unwrap() = Some(colors.clone());
            Ok(())
        }

        async fn schedule_state(&self) -> Result<bool> {
            Ok(true)
        }

        async fn set_schedule_state(&self, _enable: bool) -> Result<()> {
            Ok(())
        }
    }

    fn identity(firmware: &str, parent: &str) -> serde_json::Value {
        json!({
            "serial_number": "D8976003AAAA",
            "parent": parent,
            "firmware": firmware,
            "product": "Hydra TwentySix",
            "product_type": "Standard",
            "response_code": 0
        })
    }

    fn hydra_power() -> serde_json::Value {
        json!({
            "devices": [{
                "serial_number": "D8976003AAAA",
                "type": "Hydra TwentySix",
                "max_power": 90000,
                "hd": {
                    "blue": 23137,
                    "cool_white": 32272,
                    "violet": 8654,
                    "green": 8769,
                    "deep_red": 6950,
                    "royal": 33350,
                    "uv": 8577
                },
                "normal": {
                    "blue": 19975,
                    "cool_white": 23592,
                    "violet": 7317,
                    "green": 4190,
                    "deep_red": 3768,
                    "royal": 23888,
                    "uv": 7270
                }
            }],
            "response_code": 0
        })
    }

    fn all_raw(value: u16) -> serde_json::Value {
        json!({
            "deep_red": value,
            "uv": value,
            "violet": value,
            "cool_white": value,
            "green": value,
            "blue": value,
            "royal": value,
            "response_code": 0
        })
    }

    fn all_settings(pct: f64) -> BTreeMap<String, f64> {
        ["blue", "cool_white", "deep_red", "green", "royal", "uv", "violet"]
            .into_iter()
            .map(|color| (color.to_string(), pct))
            .collect()
    }

    async fn connected() -> Device<MockTransport> {
        let transport = MockTransport::new(identity("2.2.0", ""), hydra_power());
        Device::connect(transport).await.unwrap()
    }

    #[tokio::test]
    async fn connect_reads_identity_and_power() {
        let device = connected().await;

        assert_eq!(device.serial_number(), "D8976003AAAA");
        assert_eq!(device.product(), "Hydra TwentySix");
        assert_eq!(device.firmware_version(), FirmwareVersion::new(2, 2, 0));
        assert_eq!(device.name(), None);
        assert_eq!(device.colors().len(), 7);
        assert!(device.group().primary().is_primary());
    }

    #[tokio::test]
    async fn connect_with_name() {
        let transport = MockTransport::new(identity("2.2.0", ""), hydra_power());
        let device = Device::connect_named(transport, Some("Display Tank".to_string()))
            .await
            .unwrap();
        assert_eq!(device.name(), Some("Display Tank"));
    }

    #[tokio::test]
    async fn connect_rejects_secondary_light() {
        let transport = MockTransport::new(identity("2.2.0", "D8976003FFFF"), hydra_power());

        let err = Device::connect(transport).await.unwrap_err();
        match err {
            Error::NotParent { parent } => assert_eq!(parent, "D8976003FFFF"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn connect_rejects_unsupported_firmware() {
        let transport = MockTransport::new(identity("10.0.0", ""), hydra_power());

        let err = Device::connect(transport).await.unwrap_err();
        assert!(matches!(err, Error::UnsupportedFirmware { version } if version == "10.0.0"));
    }

    #[tokio::test]
    async fn colors_brightness_converts_hd_values() {
        let transport = MockTransport::new(identity("2.2.0", ""), hydra_power()).with_colors(
            json!({
                "deep_red": 0,
                "uv": 424,
                "violet": 1262,
                "cool_white": 0,
                "green": 0,
                "blue": 0,
                "royal": 1435,
                "response_code": 0
            }),
        );
        let device = Device::connect(transport).await.unwrap();

        let brightness = device.colors_brightness().await.unwrap();
        assert_eq!(brightness.len(), 7);
        assert!((brightness["uv"] - 42.4).abs() < 1e-12);
        assert!((brightness["violet"] - 104.787_399_207_325_41).abs() < 1e-9);
        assert!((brightness["royal"] - 117.230_282_987_273_94).abs() < 1e-9);
        assert!(brightness["deep_red"].abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn set_colors_brightness_writes_intensities() {
        let device = connected().await;

        let mut settings = all_settings(0.0);
        settings.insert("uv".to_string(), 42.0);
        settings.insert("violet".to_string(), 105.0);
        settings.insert("royal".to_string(), 117.0);

        device.set_colors_brightness(&settings).await.unwrap();

        let written = device.transport().written().unwrap();
        assert_eq!(written["uv"].value(), 420);
        assert_eq!(written["violet"].value(), 1273);
        assert_eq!(written["royal"].value(), 1429);
        assert_eq!(written["blue"].value(), 0);
    }

    #[tokio::test]
    async fn set_colors_brightness_requires_full_set() {
        let device = connected().await;

        let mut settings = all_settings(50.0);
        settings.remove("green");

        let err = device.set_colors_brightness(&settings).await.unwrap_err();
        assert!(matches!(err, Error::AllColorsMustBeSpecified { .. }));
        assert_eq!(device.transport().writes(), 0);
    }

    #[tokio::test]
    async fn set_colors_brightness_enforces_budget() {
        let device = connected().await;

        // cool_white 113% + royal 108% over a full-brightness base exceeds
        // the Hydra's 90 W supply.
        let mut settings = all_settings(100.0);
        settings.insert("deep_red".to_string(), 0.0);
        settings.insert("cool_white".to_string(), 113.0);
        settings.insert("royal".to_string(), 108.0);

        let err = device.set_colors_brightness(&settings).await.unwrap_err();
        assert!(matches!(err, Error::PowerLimitExceeded { .. }));
        assert_eq!(device.transport().writes(), 0);
    }

    #[tokio::test]
    async fn patch_overlays_current_brightness() {
        let device = connected().await;

        let mut patch = BTreeMap::new();
        patch.insert("blue".to_string(), 20.0);
        device.patch_colors_brightness(&patch).await.unwrap();

        assert_eq!(device.transport().reads(), 1);
        let written = device.transport().written().unwrap();
        assert_eq!(written["blue"].value(), 200);
        assert_eq!(written["royal"].value(), 0);
    }

    #[tokio::test]
    async fn patch_rejects_empty_map() {
        let device = connected().await;

        let err = device
            .patch_colors_brightness(&BTreeMap::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
        assert_eq!(device.transport().reads(), 0);
        assert_eq!(device.transport().writes(), 0);
    }

    #[tokio::test]
    async fn update_adjusts_single_channel() {
        let device = connected().await;

        device.update_color_brightness("blue", 20.0).await.unwrap();

        let written = device.transport().written().unwrap();
        assert_eq!(written["blue"].value(), 200);
        assert_eq!(written["uv"].value(), 0);
    }

    #[tokio::test]
    async fn update_with_zero_delta_is_a_no_op() {
        let device = connected().await;

        device.update_color_brightness("blue", 0.0).await.unwrap();

        assert_eq!(device.transport().reads(), 0);
        assert_eq!(device.transport().writes(), 0);
    }

    #[tokio::test]
    async fn update_rejects_empty_color() {
        let device = connected().await;

        let err = device.update_color_brightness("", 10.0).await.unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
        assert_eq!(device.transport().reads(), 0);
    }

    #[tokio::test]
    async fn update_rejects_unknown_color() {
        let device = connected().await;

        let err = device
            .update_color_brightness("moonlight", 10.0)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
        assert_eq!(device.transport().writes(), 0);
    }

    #[tokio::test]
    async fn update_below_zero_fails_during_write_validation() {
        let device = connected().await;

        let err = device
            .update_color_brightness("blue", -10.0)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Value(_)));
        assert_eq!(device.transport().writes(), 0);
    }
}
