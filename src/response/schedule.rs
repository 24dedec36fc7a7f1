// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Schedule state response parsing.

use serde::Deserialize;

/// Response from the `/api/schedule/enable` endpoint.
///
/// Reports whether the light is running its built-in schedule (`true`) or is
/// under manual color control (`false`):
///
/// ```json
/// {"enable": true, "response_code": 0}
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleResponse {
    enable: bool,
    response_code: i64,
}

impl ScheduleResponse {
    /// Returns `true` if the light's built-in schedule is enabled.
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.enable
    }

    /// Returns the device status code (zero means success).
    #[must_use]
    pub fn response_code(&self) -> i64 {
        self.response_code
    }
}
