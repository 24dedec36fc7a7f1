// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response types for the AquaIllumination HTTP API.
//!
//! Every endpoint answers with a JSON object carrying a `response_code`
//! field; zero means success and anything else is a device-side failure. The
//! types here parse the payloads, leaving the status-code check to the
//! protocol layer.

mod colors;
mod identity;
mod power;
mod schedule;

pub use colors::ColorsResponse;
pub use identity::IdentityResponse;
pub use power::{LightPower, PowerResponse};
pub use schedule::ScheduleResponse;
