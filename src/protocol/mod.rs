// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport implementations for communicating with AquaIllumination
//! lights.
//!
//! The [`Transport`] trait is the seam between the brightness engine and the
//! wire: it reads identity, power capabilities and raw intensities, and
//! persists new intensities. [`HttpClient`] is the stock implementation,
//! speaking the light's local REST API; tests (and exotic deployments)
//! supply their own.

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::{HttpClient, HttpConfig};

use std::collections::BTreeMap;

use crate::error::Result;
use crate::response::{ColorsResponse, IdentityResponse, PowerResponse};
use crate::types::Intensity;

/// Trait for transports that can talk to an AquaIllumination light.
///
/// Implementations return fully parsed responses and surface device-side
/// failures (non-zero `response_code`) as errors, so callers never see a
/// half-failed payload. No retries happen at this level; a failed call is
/// reported as-is.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Reads the light's identity (`/api/identity`).
    ///
    /// # Errors
    ///
    /// Returns error if the request fails, the response cannot be parsed,
    /// or the device reports a non-zero status.
    async fn identity(&self) -> Result<IdentityResponse>;

    /// Reads the power capabilities of the whole linked group
    /// (`/api/power`).
    ///
    /// # Errors
    ///
    /// Returns error if the request fails, the response cannot be parsed,
    /// or the device reports a non-zero status.
    async fn power_capabilities(&self) -> Result<PowerResponse>;

    /// Reads the current raw channel intensities (`/api/colors`).
    ///
    /// # Errors
    ///
    /// Returns error if the request fails, the response cannot be parsed,
    /// or the device reports a non-zero status.
    async fn raw_brightness(&self) -> Result<ColorsResponse>;

    /// Writes raw channel intensities (`POST /api/colors`).
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the device reports a non-zero
    /// status.
    async fn set_raw_brightness(&self, colors: &BTreeMap<String, Intensity>) -> Result<()>;

    /// Reads whether the light's built-in schedule is enabled
    /// (`/api/schedule/enable`).
    ///
    /// # Errors
    ///
    /// Returns error if the request fails, the response cannot be parsed,
    /// or the device reports a non-zero status.
    async fn schedule_state(&self) -> Result<bool>;

    /// Enables or disables the light's built-in schedule
    /// (`PUT /api/schedule/enable`).
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the device reports a non-zero
    /// status.
    async fn set_schedule_state(&self, enable: bool) -> Result<()>;
}
