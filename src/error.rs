// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `AquaR` library.
//!
//! This module provides a comprehensive error hierarchy for handling failures
//! across the library: value validation, protocol communication, JSON parsing,
//! and light-control operations.

use thiserror::Error;

/// The main error type for this library.
///
/// This enum encompasses all possible errors that can occur when interacting
/// with AquaIllumination lights.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred during protocol communication.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a response.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A full-set brightness request did not cover every color channel known
    /// to the primary light.
    #[error("all colors must be specified (missing: {})", missing.join(", "))]
    AllColorsMustBeSpecified {
        /// Colors known to the primary light but absent from the request.
        missing: Vec<String>,
    },

    /// The requested setting would draw more power than a light's supply can
    /// sustain.
    #[error(
        "power limit exceeded on {serial}: requested {requested_mw:.0} mW, budget {budget_mw} mW"
    )]
    PowerLimitExceeded {
        /// Serial number of the light whose budget would be exceeded.
        serial: String,
        /// Total power draw the request works out to, in milliwatts.
        requested_mw: f64,
        /// The light's power budget in milliwatts.
        budget_mw: u32,
    },

    /// A caller-supplied argument is structurally invalid.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// The connected light is not the parent of its group.
    ///
    /// Only the parent of a linked group can be controlled; connect to the
    /// device identified by `parent` instead.
    #[error("light is not the parent of its group (parent is {parent})")]
    NotParent {
        /// Serial number of the parent light.
        parent: String,
    },

    /// The connected light runs a firmware version outside the supported
    /// range.
    #[error("unsupported firmware version: {version}")]
    UnsupportedFirmware {
        /// The firmware version reported by the light.
        version: String,
    },
}

/// Errors related to value validation and constraints.
///
/// These errors occur when a brightness or intensity value falls outside its
/// legal domain for a given color channel.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValueError {
    /// A percentage brightness is outside the channel's legal range.
    ///
    /// The upper bound is channel- and device-specific: 100% for non-HD
    /// channels, higher where the channel has HD headroom.
    #[error("brightness {value}% for color {color} is out of range [0, {max}%]")]
    BrightnessOutOfRange {
        /// The color channel the value was destined for.
        color: String,
        /// The rejected percentage.
        value: f64,
        /// Maximum percentage the channel supports.
        max: f64,
    },

    /// A native intensity value is outside the device scale.
    #[error("intensity {0} is out of range [0, 2000]")]
    IntensityOutOfRange(u16),

    /// A color channel is not known to the light's power tables.
    #[error("unknown color channel: {0}")]
    UnknownColor(String),
}

/// Errors related to HTTP protocol communication.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Connection to the light failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// The light answered with a non-zero `response_code`.
    #[error("device returned status code {0}")]
    DeviceStatus(i64),
}

/// Errors related to parsing AquaIllumination responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected field is missing from the response.
    #[error("missing field in response: {0}")]
    MissingField(String),

    /// Unexpected response format.
    #[error("unexpected response format: {0}")]
    UnexpectedFormat(String),

    /// Failed to parse a specific value.
    #[error("failed to parse {field}: {message}")]
    InvalidValue {
        /// The field that failed to parse.
        field: String,
        /// Description of the parsing failure.
        message: String,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
