// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Power capability response parsing.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Response from the `/api/power` endpoint.
///
/// Lists the power curves of every light in the linked group: the connected
/// (parent) light plus any paired secondaries. For each light the response
/// carries two milliwatt tables per color channel (draw at 100%, draw at the
/// channel's HD ceiling) and the total the power supply can sustain:
///
/// ```json
/// {
///     "devices": [
///         {
///             "serial_number": "D89760043242",
///             "type": "Prime HD",
///             "max_power": 48000,
///             "normal": {"royal": 13440, "blue": 8712},
///             "hd": {"royal": 16400, "blue": 9670}
///         }
///     ],
///     "response_code": 0
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct PowerResponse {
    devices: Vec<LightPower>,
    response_code: i64,
}

impl PowerResponse {
    /// Returns the per-light power capability snapshots, in the order the
    /// device enumerated them.
    #[must_use]
    pub fn devices(&self) -> &[LightPower] {
        &self.devices
    }

    /// Returns the device status code (zero means success).
    #[must_use]
    pub fn response_code(&self) -> i64 {
        self.response_code
    }
}

/// Power capability snapshot for a single light fixture.
#[derive(Debug, Clone, Deserialize)]
pub struct LightPower {
    serial_number: String,

    #[serde(rename = "type")]
    product: String,

    /// Absent on some non-HD models.
    #[serde(default)]
    max_power: Option<u32>,

    /// Milliwatts drawn per channel at 100% brightness.
    normal: BTreeMap<String, u32>,

    /// Milliwatts drawn per channel at the channel's HD ceiling. Absent on
    /// non-HD models.
    #[serde(default)]
    hd: Option<BTreeMap<String, u32>>,
}

impl LightPower {
    /// Returns the light's serial number.
    #[must_use]
    pub fn serial_number(&self) -> &str {
        &self.serial_number
    }

    /// Returns the product name (e.g. `"Prime HD"`).
    #[must_use]
    pub fn product(&self) -> &str {
        &self.product
    }

    /// Returns the total milliwatts the power supply can sustain, if
    /// reported.
    #[must_use]
    pub fn max_power(&self) -> Option<u32> {
        self.max_power
    }

    /// Returns the normal-mode (100%) milliwatt table.
    #[must_use]
    pub fn normal(&self) -> &BTreeMap<String, u32> {
        &self.normal
    }

    /// Returns the HD-mode milliwatt table, if the light has one.
    #[must_use]
    pub fn hd(&self) -> Option<&BTreeMap<String, u32>> {
        self.hd.as_ref()
    }
}
