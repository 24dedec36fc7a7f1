// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for AquaIllumination light control.
//!
//! This module provides type-safe representations of values used when talking
//! to AquaIllumination lights. Each type ensures values are within their valid
//! ranges at construction time, preventing runtime errors.
//!
//! # Types
//!
//! - [`Intensity`] - Native per-channel brightness (0-2000)
//! - [`FirmwareVersion`] - Dotted firmware version with supported-range check

mod firmware;
mod intensity;

pub use firmware::{FirmwareParseError, FirmwareVersion};
pub use intensity::Intensity;
