// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Raw color intensity response parsing.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::types::Intensity;

/// Response from the `/api/colors` endpoint.
///
/// The color channels are dynamic: every key other than `response_code` names
/// a channel, and the set varies by product model. Values are native
/// intensities on the 0-2000 scale:
///
/// ```json
/// {
///     "deep_red": 0,
///     "uv": 424,
///     "royal": 1435,
///     "response_code": 0
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ColorsResponse {
    response_code: i64,

    #[serde(flatten)]
    colors: BTreeMap<String, Intensity>,
}

impl ColorsResponse {
    /// Returns the channel-to-intensity map.
    #[must_use]
    pub fn colors(&self) -> &BTreeMap<String, Intensity> {
        &self.colors
    }

    /// Consumes the response, returning the channel-to-intensity map.
    #[must_use]
    pub fn into_colors(self) -> BTreeMap<String, Intensity> {
        self.colors
    }

    /// Returns the device status code (zero means success).
    #[must_use]
    pub fn response_code(&self) -> i64 {
        self.response_code
    }
}
