// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Power budgeting across a linked group of lights.
//!
//! Physically paired fixtures share one brightness setting but have
//! independent power curves and supplies. A setting that is safe for the
//! connected light can still overdrive a paired one (say, a Hydra paired
//! with a lower-powered Prime), so every light's limit is checked
//! independently before anything is written to the device.

use std::collections::BTreeMap;

use crate::error::{Error, ParseError, Result};
use crate::profile::DeviceProfile;
use crate::response::PowerResponse;
use crate::types::Intensity;

/// The linked group of lights behind one connection: the primary (parent)
/// light plus zero or more paired secondaries.
///
/// The group translates full-set percentage requests into native intensities
/// and enforces every member's power budget. Conversion always uses the
/// primary's tables - all linked lights receive identical intensities, and
/// the percentage semantics are defined by the primary.
#[derive(Debug, Clone, PartialEq)]
pub struct LightGroup {
    /// Primary first, then secondaries in the order the device enumerated
    /// them.
    devices: Vec<DeviceProfile>,
}

impl LightGroup {
    /// Builds the group from a power-capability response.
    ///
    /// `parent_serial` identifies the connected light; its snapshot becomes
    /// the primary profile and is checked first during budgeting.
    ///
    /// # Errors
    ///
    /// Returns a parse error if the response has no entry for the connected
    /// light.
    pub fn from_power_response(power: &PowerResponse, parent_serial: &str) -> Result<Self> {
        let mut primary = None;
        let mut secondaries = Vec::new();

        for snapshot in power.devices() {
            let profile = DeviceProfile::from_snapshot(snapshot, parent_serial);
            if profile.is_primary() && primary.is_none() {
                primary = Some(profile);
            } else {
                secondaries.push(profile);
            }
        }

        let Some(primary) = primary else {
            return Err(ParseError::UnexpectedFormat(format!(
                "power capabilities do not include the connected light {parent_serial}"
            ))
            .into());
        };

        let mut devices = Vec::with_capacity(1 + secondaries.len());
        devices.push(primary);
        devices.extend(secondaries);

        Ok(Self { devices })
    }

    /// Returns the primary light's profile.
    #[must_use]
    pub fn primary(&self) -> &DeviceProfile {
        // Construction guarantees a non-empty list with the primary first.
        &self.devices[0]
    }

    /// Returns the paired secondary profiles, in enumeration order.
    pub fn secondaries(&self) -> impl Iterator<Item = &DeviceProfile> {
        self.devices[1..].iter()
    }

    /// Returns all profiles, primary first.
    #[must_use]
    pub fn devices(&self) -> &[DeviceProfile] {
        &self.devices
    }

    /// Translates a full-set percentage request into native intensities,
    /// enforcing every light's power budget.
    ///
    /// Pure computation - nothing is written to any device. The caller
    /// persists the returned intensities only when this succeeds.
    ///
    /// # Errors
    ///
    /// - [`Error::AllColorsMustBeSpecified`] if the request does not cover
    ///   every channel of the primary light.
    /// - [`Error::Value`] if a percentage is out of range for its channel,
    ///   or names a channel the primary does not have.
    /// - [`Error::PowerLimitExceeded`] if the draw would exceed the budget
    ///   of the primary or any secondary. The primary is checked first and
    ///   the first violation aborts, so no further device is evaluated.
    pub fn plan(&self, settings: &BTreeMap<String, f64>) -> Result<BTreeMap<String, Intensity>> {
        let missing: Vec<String> = self
            .primary()
            .colors()
            .filter(|color| !settings.contains_key(*color))
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(Error::AllColorsMustBeSpecified { missing });
        }

        let mut intensities = BTreeMap::new();
        for (color, &percentage) in settings {
            let intensity = self.primary().percentage_to_intensity(color, percentage)?;
            intensities.insert(color.clone(), intensity);
        }

        for device in &self.devices {
            let requested_mw = device.total_milliwatts(&intensities);
            if requested_mw > f64::from(device.max_mw()) {
                tracing::warn!(
                    serial = %device.serial(),
                    requested_mw,
                    budget_mw = device.max_mw(),
                    "brightness request exceeds power budget"
                );
                return Err(Error::PowerLimitExceeded {
                    serial: device.serial().to_string(),
                    requested_mw,
                    budget_mw: device.max_mw(),
                });
            }
        }

        Ok(intensities)
    }
}
