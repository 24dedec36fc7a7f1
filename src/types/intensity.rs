// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Native intensity type for AquaIllumination lights.
//!
//! This module provides a type-safe representation of the device's native
//! brightness unit, ensuring values are always within the valid range of
//! 0-2000.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Native per-channel brightness in device units (0-2000).
///
/// AquaIllumination lights report and accept brightness as an integer on a
/// 0-2000 scale. The lower half, 0-1000, maps linearly to 0-100% brightness.
/// The upper half, 1001-2000, is the HD (overdrive) range; how much
/// percentage headroom it represents depends on the channel's power curve.
///
/// # Examples
///
/// ```
/// use aquar_lib::types::Intensity;
///
/// let half = Intensity::new(500).unwrap();
/// assert_eq!(half.value(), 500);
/// assert!(!half.is_hd());
///
/// let overdriven = Intensity::new(1429).unwrap();
/// assert!(overdriven.is_hd());
///
/// // Invalid values return error
/// assert!(Intensity::new(2001).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Intensity(u16);

impl Intensity {
    /// Minimum intensity (channel off).
    pub const MIN: Self = Self(0);

    /// Intensity at 100% brightness, the top of the non-HD range.
    pub const FULL: Self = Self(1000);

    /// Maximum intensity (full HD overdrive).
    pub const MAX: Self = Self(2000);

    /// Creates a new intensity value.
    ///
    /// # Arguments
    ///
    /// * `value` - The native intensity (0-2000)
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::IntensityOutOfRange`] if value exceeds 2000.
    pub fn new(value: u16) -> Result<Self, ValueError> {
        if value > Self::MAX.0 {
            return Err(ValueError::IntensityOutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Returns the native intensity value.
    #[must_use]
    pub const fn value(&self) -> u16 {
        self.0
    }

    /// Returns `true` if this value lies in the HD (overdrive) range.
    #[must_use]
    pub const fn is_hd(&self) -> bool {
        self.0 > Self::FULL.0
    }

    /// Returns how far into the HD range this value is, as a fraction in
    /// [0.0, 1.0]. Zero for any non-HD value.
    #[must_use]
    pub fn hd_fraction(&self) -> f64 {
        f64::from(self.0.saturating_sub(Self::FULL.0)) / 1000.0
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u16> for Intensity {
    type Error = ValueError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Intensity> for u16 {
    fn from(intensity: Intensity) -> Self {
        intensity.0
    }
}
