// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `AquaR` Lib - A Rust library to control AquaIllumination aquarium lights.
//!
//! This library provides async APIs to interact with AquaIllumination HD
//! lights (Hydra, Prime) via their local HTTP API.
//!
//! # Supported Features
//!
//! - **Brightness control**: Read and set all color channels, patch a
//!   subset, or nudge a single channel, in percent - including the HD
//!   (overdrive) range above 100%
//! - **Power budgeting**: Requests are checked against the power supply
//!   limits of the connected light *and* every paired fixture before
//!   anything is written
//! - **Schedule control**: Switch the light between its built-in schedule
//!   and manual control
//! - **Identity queries**: Serial number, product, firmware version
//!
//! # Brightness Model
//!
//! The device's native unit is an integer intensity on a 0-2000 scale per
//! channel: 0-1000 maps linearly to 0-100%, and 1001-2000 covers the HD
//! range, whose percentage ceiling depends on the channel's power curve.
//! All conversions are derived from the power capabilities the light
//! reports at connection time; nothing is hardcoded per model.
//!
//! # Quick Start
//!
//! ```no_run
//! use aquar_lib::Device;
//!
//! #[tokio::main]
//! async fn main() -> aquar_lib::Result<()> {
//!     // Connect to the parent light of a (possibly linked) group
//!     let device = Device::http("192.168.1.50").build().await?;
//!
//!     // Take manual control
//!     device.set_schedule_enabled(false).await?;
//!
//!     // Read current brightness, in percent per channel
//!     let brightness = device.colors_brightness().await?;
//!     println!("royal: {}%", brightness["royal"]);
//!
//!     // Overdrive royal to 110%, leaving the other channels alone
//!     let patch = [("royal".to_string(), 110.0)].into_iter().collect();
//!     device.patch_colors_brightness(&patch).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Linked Groups
//!
//! AquaIllumination lights can be physically paired; the group then shares
//! one brightness setting. Connect to the group's *parent* light - the
//! library refuses secondaries. Power budgets are enforced per fixture: a
//! setting that is safe for the parent but would overload a paired light
//! with a weaker power supply is rejected as a whole.

pub mod budget;
pub mod device;
pub mod error;
pub mod profile;
pub mod protocol;
pub mod response;
pub mod types;

pub use budget::LightGroup;
#[cfg(feature = "http")]
pub use device::HttpDeviceBuilder;
pub use device::Device;
pub use error::{Error, ParseError, ProtocolError, Result, ValueError};
pub use profile::DeviceProfile;
#[cfg(feature = "http")]
pub use protocol::{HttpClient, HttpConfig};
pub use protocol::Transport;
pub use response::{ColorsResponse, IdentityResponse, LightPower, PowerResponse, ScheduleResponse};
pub use types::{FirmwareParseError, FirmwareVersion, Intensity};
