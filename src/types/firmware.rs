// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Firmware version type for AquaIllumination lights.
//!
//! The identity endpoint reports the firmware as a dotted version string
//! (e.g. `"2.2.0"`). This module provides parsing and ordered comparison so
//! the library can gate connections on the firmware range it was written
//! against.

use std::fmt;
use std::str::FromStr;

/// Error returned when parsing a firmware version string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirmwareParseError {
    input: String,
}

impl FirmwareParseError {
    fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }

    /// Returns the input string that failed to parse.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for FirmwareParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed to parse firmware version: '{}' (expected 'major.minor' or 'major.minor.patch')",
            self.input
        )
    }
}

impl std::error::Error for FirmwareParseError {}

/// A firmware version reported by an AquaIllumination light.
///
/// Versions are compared component-wise, so `2.2.0 > 2.0.0 > 1.9.9`.
///
/// # Examples
///
/// ```
/// use aquar_lib::types::FirmwareVersion;
///
/// let fw: FirmwareVersion = "2.2.0".parse().unwrap();
/// assert!(fw.is_supported());
///
/// let fw: FirmwareVersion = "10.0.0".parse().unwrap();
/// assert!(!fw.is_supported());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FirmwareVersion {
    major: u32,
    minor: u32,
    patch: u32,
}

impl FirmwareVersion {
    /// Oldest firmware version this library supports.
    pub const MIN_SUPPORTED: Self = Self::new(2, 0, 0);

    /// Newest firmware version this library supports.
    pub const MAX_SUPPORTED: Self = Self::new(2, 2, 0);

    /// Creates a firmware version from its components.
    #[must_use]
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Returns `true` if this version lies within the supported range.
    #[must_use]
    pub fn is_supported(&self) -> bool {
        (Self::MIN_SUPPORTED..=Self::MAX_SUPPORTED).contains(self)
    }

    /// Returns the major version component.
    #[must_use]
    pub const fn major(&self) -> u32 {
        self.major
    }

    /// Returns the minor version component.
    #[must_use]
    pub const fn minor(&self) -> u32 {
        self.minor
    }

    /// Returns the patch version component.
    #[must_use]
    pub const fn patch(&self) -> u32 {
        self.patch
    }
}

impl FromStr for FirmwareVersion {
    type Err = FirmwareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('.');

        let mut component = |required: bool| -> Result<u32, FirmwareParseError> {
            match parts.next() {
                Some(part) => part.parse().map_err(|_| FirmwareParseError::new(s)),
                None if required => Err(FirmwareParseError::new(s)),
                None => Ok(0),
            }
        };

        let major = component(true)?;
        let minor = component(true)?;
        // The patch component is optional, mirroring device firmware strings
        // like "2.0".
        let patch = component(false)?;

        if parts.next().is_some() {
            return Err(FirmwareParseError::new(s));
        }

        Ok(Self::new(major, minor, patch))
    }
}

impl fmt::Display for FirmwareVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
