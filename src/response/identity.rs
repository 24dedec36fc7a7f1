// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Identity response parsing.

use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::error::ParseError;
use crate::types::FirmwareVersion;

/// Response from the `/api/identity` endpoint.
///
/// The light reports its serial number, firmware, product name and a handful
/// of manufacturing details:
///
/// ```json
/// {
///     "serial_number": "D8976003AAAA",
///     "parent": "",
///     "firmware": "2.2.0",
///     "product": "Hydra TwentySix",
///     "product_type": "HD",
///     "mfg_date_utc": "2017-05-09 15:18:50",
///     "response_code": 0
/// }
/// ```
///
/// A non-empty `parent` means the light is a secondary in a linked group and
/// cannot be controlled directly.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityResponse {
    serial_number: String,

    #[serde(default)]
    parent: String,

    firmware: String,

    product: String,

    #[serde(default)]
    product_type: Option<String>,

    #[serde(default)]
    mfg_date_utc: Option<String>,

    response_code: i64,
}

impl IdentityResponse {
    /// Returns the light's serial number.
    #[must_use]
    pub fn serial_number(&self) -> &str {
        &self.serial_number
    }

    /// Returns the serial number of the group parent, if this light is a
    /// secondary.
    #[must_use]
    pub fn parent(&self) -> Option<&str> {
        if self.parent.is_empty() {
            None
        } else {
            Some(&self.parent)
        }
    }

    /// Returns `true` if this light is the parent of its group (or
    /// standalone).
    #[must_use]
    pub fn is_parent(&self) -> bool {
        self.parent.is_empty()
    }

    /// Returns the raw firmware version string.
    #[must_use]
    pub fn firmware_str(&self) -> &str {
        &self.firmware
    }

    /// Parses the reported firmware version.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the firmware string is not a dotted version.
    pub fn firmware(&self) -> Result<FirmwareVersion, ParseError> {
        self.firmware
            .parse()
            .map_err(|_| ParseError::InvalidValue {
                field: "firmware".to_string(),
                message: format!("not a dotted version: {}", self.firmware),
            })
    }

    /// Returns the product name (e.g. `"Hydra TwentySix"`).
    #[must_use]
    pub fn product(&self) -> &str {
        &self.product
    }

    /// Returns the product sub-type if reported (e.g. `"HD"`).
    #[must_use]
    pub fn product_type(&self) -> Option<&str> {
        self.product_type.as_deref()
    }

    /// Parses the UTC manufacture timestamp if the light reported one.
    #[must_use]
    pub fn mfg_date_utc(&self) -> Option<NaiveDateTime> {
        self.mfg_date_utc
            .as_deref()
            .and_then(|s| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").ok())
    }

    /// Returns the device status code (zero means success).
    #[must_use]
    pub fn response_code(&self) -> i64 {
        self.response_code
    }
}
