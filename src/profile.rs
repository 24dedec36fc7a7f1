// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-light power profiles and brightness unit conversion.
//!
//! AquaIllumination lights expose three views of the same brightness value:
//!
//! - **percentage** - what users see: 0-100% plus an HD (overdrive) range
//!   above 100% whose ceiling depends on the channel's power curve,
//! - **intensity** - the device's native 0-2000 integer scale
//!   ([`Intensity`]), where 0-1000 maps linearly to 0-100% and 1001-2000
//!   covers the HD range,
//! - **milliwatts** - the electrical draw a given intensity works out to.
//!
//! A [`DeviceProfile`] holds one light's immutable power tables and performs
//! all three conversions. The HD ceiling of a channel follows from its
//! tables: a channel drawing `normal` mW at 100% and `hd` mW fully
//! overdriven tops out at `hd / normal * 100` percent.
//!
//! # Rounding
//!
//! Percentage-to-intensity conversion rounds to the nearest unit on the
//! 0-100% segment and rounds *down* on the HD segment, matching the device's
//! own arithmetic (a Hydra TwentySix maps royal 117% to 1429, not 1430).

use std::collections::BTreeMap;

use crate::error::ValueError;
use crate::response::LightPower;
use crate::types::Intensity;

/// Power curve of a single color channel: draw at 100% and draw at the HD
/// ceiling, both in milliwatts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ChannelPower {
    normal_mw: u32,
    hd_mw: u32,
}

impl ChannelPower {
    /// Invariant: `normal_mw <= hd_mw`. Snapshots that violate it (or lack
    /// an HD table) are clamped to a zero-overdrive curve.
    fn new(normal_mw: u32, hd_mw: u32) -> Self {
        Self {
            normal_mw,
            hd_mw: hd_mw.max(normal_mw),
        }
    }

    /// Overdrive headroom as a fraction of the normal-mode draw.
    fn hd_headroom(&self) -> f64 {
        if self.normal_mw == 0 {
            0.0
        } else {
            f64::from(self.hd_mw - self.normal_mw) / f64::from(self.normal_mw)
        }
    }

    /// Highest percentage this channel accepts.
    fn max_percentage(&self) -> f64 {
        100.0 + self.hd_headroom() * 100.0
    }
}

/// One physical light's channel power curves and budget.
///
/// Built once from a power-capability snapshot at connection time and
/// immutable afterwards. The profile whose serial matches the connected
/// (parent) light is the *primary*: its channel set and conversion tables
/// define the brightness semantics for the whole linked group.
///
/// # Examples
///
/// ```
/// use aquar_lib::profile::DeviceProfile;
/// use aquar_lib::response::LightPower;
///
/// let snapshot: LightPower = serde_json::from_str(r#"{
///     "serial_number": "D89760043242",
///     "type": "Prime HD",
///     "max_power": 48000,
///     "normal": {"royal": 13440},
///     "hd": {"royal": 16400}
/// }"#).unwrap();
///
/// let profile = DeviceProfile::from_snapshot(&snapshot, "D89760043242");
/// assert!(profile.is_primary());
///
/// // royal can be overdriven to 16400/13440 = 122.02%
/// let ceiling = profile.max_percentage("royal").unwrap();
/// assert!((ceiling - 122.023_809_523_809_52).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceProfile {
    serial: String,
    product: String,
    is_primary: bool,
    channels: BTreeMap<String, ChannelPower>,
    max_mw: u32,
}

impl DeviceProfile {
    /// Builds a profile from one entry of the power-capability response.
    ///
    /// `parent_serial` is the serial of the connected light; the profile is
    /// primary iff the snapshot describes that light. Channels missing from
    /// the HD table (or whole snapshots without one, on non-HD models) get a
    /// zero-overdrive curve. A snapshot without `max_power` is budgeted at
    /// the sum of its channels' normal-mode draw.
    #[must_use]
    pub fn from_snapshot(snapshot: &LightPower, parent_serial: &str) -> Self {
        let channels = snapshot
            .normal()
            .iter()
            .map(|(color, &normal_mw)| {
                let hd_mw = snapshot
                    .hd()
                    .and_then(|hd| hd.get(color))
                    .copied()
                    .unwrap_or(normal_mw);
                (color.clone(), ChannelPower::new(normal_mw, hd_mw))
            })
            .collect();

        let max_mw = snapshot
            .max_power()
            .unwrap_or_else(|| snapshot.normal().values().sum());

        Self {
            serial: snapshot.serial_number().to_string(),
            product: snapshot.product().to_string(),
            is_primary: snapshot.serial_number() == parent_serial,
            channels,
            max_mw,
        }
    }

    /// Returns the light's serial number.
    #[must_use]
    pub fn serial(&self) -> &str {
        &self.serial
    }

    /// Returns the product name (e.g. `"Prime HD"`).
    #[must_use]
    pub fn product(&self) -> &str {
        &self.product
    }

    /// Returns `true` if this profile describes the connected (parent)
    /// light.
    #[must_use]
    pub fn is_primary(&self) -> bool {
        self.is_primary
    }

    /// Returns the total milliwatts this light's power supply can sustain.
    #[must_use]
    pub fn max_mw(&self) -> u32 {
        self.max_mw
    }

    /// Returns the light's color channel identifiers, in stable order.
    pub fn colors(&self) -> impl Iterator<Item = &str> {
        self.channels.keys().map(String::as_str)
    }

    /// Returns `true` if the light has the named color channel.
    #[must_use]
    pub fn has_color(&self, color: &str) -> bool {
        self.channels.contains_key(color)
    }

    fn channel(&self, color: &str) -> Result<ChannelPower, ValueError> {
        self.channels
            .get(color)
            .copied()
            .ok_or_else(|| ValueError::UnknownColor(color.to_string()))
    }

    /// Returns the highest percentage the named channel accepts (100 for
    /// channels without HD headroom).
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::UnknownColor`] for a channel the light does not
    /// have.
    pub fn max_percentage(&self, color: &str) -> Result<f64, ValueError> {
        Ok(self.channel(color)?.max_percentage())
    }

    /// Converts a percentage brightness to the device's native intensity.
    ///
    /// 0-100% maps linearly to 0-1000; the channel's HD range maps onto
    /// 1001-2000.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::UnknownColor`] for an unknown channel, or
    /// [`ValueError::BrightnessOutOfRange`] if `percentage` is negative,
    /// not finite, or above the channel's ceiling.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn percentage_to_intensity(
        &self,
        color: &str,
        percentage: f64,
    ) -> Result<Intensity, ValueError> {
        let channel = self.channel(color)?;

        let out_of_range = |max: f64| ValueError::BrightnessOutOfRange {
            color: color.to_string(),
            value: percentage,
            max,
        };

        if !percentage.is_finite() || percentage < 0.0 {
            return Err(out_of_range(channel.max_percentage()));
        }

        if percentage <= 100.0 {
            // Cast is safe: the value is bounded by 1000.
            return Intensity::new((percentage * 10.0).round() as u16);
        }

        let max = channel.max_percentage();
        if percentage > max {
            return Err(out_of_range(max));
        }

        let hd_fraction = (percentage - 100.0) / (max - 100.0);
        // The HD segment rounds down; see the module docs.
        Intensity::new((hd_fraction * 1000.0).floor() as u16 + 1000)
    }

    /// Converts a native intensity back to a percentage brightness.
    ///
    /// Inverse of [`percentage_to_intensity`](Self::percentage_to_intensity)
    /// up to rounding. The result is not rounded.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::UnknownColor`] for an unknown channel.
    pub fn intensity_to_percentage(
        &self,
        color: &str,
        intensity: Intensity,
    ) -> Result<f64, ValueError> {
        let channel = self.channel(color)?;

        if intensity.is_hd() {
            Ok(100.0 + channel.hd_headroom() * intensity.hd_fraction() * 100.0)
        } else {
            Ok(f64::from(intensity.value()) / 10.0)
        }
    }

    /// Computes the electrical draw of the named channel at a given
    /// intensity, in milliwatts.
    ///
    /// Linear from 0 to the normal-mode draw over 0-1000, then linear from
    /// the normal-mode draw to the HD draw over 1001-2000; non-decreasing in
    /// the intensity.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::UnknownColor`] for an unknown channel.
    pub fn intensity_to_milliwatts(
        &self,
        color: &str,
        intensity: Intensity,
    ) -> Result<f64, ValueError> {
        let channel = self.channel(color)?;

        if intensity.is_hd() {
            let headroom_mw = f64::from(channel.hd_mw - channel.normal_mw);
            Ok(f64::from(channel.normal_mw) + intensity.hd_fraction() * headroom_mw)
        } else {
            Ok(f64::from(channel.normal_mw) * f64::from(intensity.value()) / 1000.0)
        }
    }

    /// Computes this light's total draw for a full intensity setting, in
    /// milliwatts.
    ///
    /// Channels this light does not have draw nothing and are skipped; a
    /// paired fixture without, say, a `uv` emitter consumes no power for the
    /// group's `uv` setting.
    #[must_use]
    pub fn total_milliwatts(&self, intensities: &BTreeMap<String, Intensity>) -> f64 {
        intensities
            .iter()
            .filter_map(|(color, &intensity)| self.intensity_to_milliwatts(color, intensity).ok())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hydra26hd() -> LightPower {
        serde_json::from_value(json!({
            "serial_number": "D8976003AAAA",
            "type": "Hydra TwentySix",
            "max_power": 90000,
            "hd": {
                "blue": 23137,
                "cool_white": 32272,
                "violet": 8654,
                "green": 8769,
                "deep_red": 6950,
                "royal": 33350,
                "uv": 8577
            },
            "normal": {
                "blue": 19975,
                "cool_white": 23592,
                "violet": 7317,
                "green": 4190,
                "deep_red": 3768,
                "royal": 23888,
                "uv": 7270
            }
        }))
        .unwrap()
    }

    fn primehd() -> LightPower {
        serde_json::from_value(json!({
            "serial_number": "D89760043242",
            "type": "Prime HD",
            "max_power": 48000,
            "hd": {
                "royal": 16400,
                "cool_white": 15400,
                "green": 4100,
                "violet": 4000,
                "uv": 4630,
                "blue": 9670,
                "deep_red": 3380
            },
            "normal": {
                "royal": 13440,
                "cool_white": 12756,
                "green": 3132,
                "violet": 3458,
                "uv": 3876,
                "blue": 8712,
                "deep_red": 2626
            }
        }))
        .unwrap()
    }

    fn hydra() -> DeviceProfile {
        DeviceProfile::from_snapshot(&hydra26hd(), "D8976003AAAA")
    }

    fn prime() -> DeviceProfile {
        DeviceProfile::from_snapshot(&primehd(), "D89760043242")
    }

    fn intensity(value: u16) -> Intensity {
        Intensity::new(value).unwrap()
    }

    #[test]
    fn profile_identity() {
        let profile = hydra();
        assert_eq!(profile.serial(), "D8976003AAAA");
        assert_eq!(profile.product(), "Hydra TwentySix");
        assert!(profile.is_primary());
        assert_eq!(profile.max_mw(), 90000);

        let secondary = DeviceProfile::from_snapshot(&hydra26hd(), "D8976003BBBB");
        assert!(!secondary.is_primary());
    }

    #[test]
    fn profile_colors() {
        let profile = prime();
        let colors: Vec<_> = profile.colors().collect();
        assert_eq!(colors.len(), 7);
        assert!(profile.has_color("royal"));
        assert!(!profile.has_color("warm_white"));
    }

    #[test]
    fn non_hd_snapshot_has_no_overdrive() {
        let snapshot: LightPower = serde_json::from_value(json!({
            "serial_number": "D897600400FF",
            "type": "Prime",
            "normal": {"royal": 13440, "blue": 8712}
        }))
        .unwrap();
        let profile = DeviceProfile::from_snapshot(&snapshot, "D897600400FF");

        assert!((profile.max_percentage("royal").unwrap() - 100.0).abs() < f64::EPSILON);
        // Budget defaults to the sum of normal-mode draw.
        assert_eq!(profile.max_mw(), 13440 + 8712);

        assert!(profile.percentage_to_intensity("royal", 100.0).is_ok());
        assert!(profile.percentage_to_intensity("royal", 100.1).is_err());
    }

    #[test]
    fn percentage_to_intensity_endpoints() {
        for profile in [hydra(), prime()] {
            let colors: Vec<String> = profile.colors().map(str::to_string).collect();
            for color in &colors {
                assert_eq!(
                    profile.percentage_to_intensity(color, 0.0).unwrap(),
                    Intensity::MIN
                );
                assert_eq!(
                    profile.percentage_to_intensity(color, 100.0).unwrap(),
                    Intensity::FULL
                );
                let max = profile.max_percentage(color).unwrap();
                assert_eq!(
                    profile.percentage_to_intensity(color, max).unwrap(),
                    Intensity::MAX
                );
            }
        }
    }

    #[test]
    fn percentage_to_intensity_rounds_on_linear_segment() {
        let profile = hydra();
        assert_eq!(
            profile.percentage_to_intensity("uv", 42.0).unwrap().value(),
            420
        );
        assert_eq!(
            profile
                .percentage_to_intensity("uv", 33.333)
                .unwrap()
                .value(),
            333
        );
    }

    // HD intensities pinned by the device's own arithmetic for a Hydra
    // TwentySix: violet 105% -> 1273, royal 117% -> 1429, uv 116% -> 1889,
    // violet 116% -> 1875.
    #[test]
    fn percentage_to_intensity_hd_hydra26() {
        let profile = hydra();
        for (color, pct, expected) in [
            ("violet", 105.0, 1273),
            ("royal", 117.0, 1429),
            ("uv", 116.0, 1889),
            ("violet", 116.0, 1875),
        ] {
            assert_eq!(
                profile.percentage_to_intensity(color, pct).unwrap().value(),
                expected,
                "{color} at {pct}%"
            );
        }
    }

    #[test]
    fn percentage_to_intensity_hd_primehd() {
        let profile = prime();
        for (color, pct, expected) in [
            ("cool_white", 76.0, 760),
            ("blue", 108.0, 1727),
            ("royal", 117.0, 1771),
        ] {
            assert_eq!(
                profile.percentage_to_intensity(color, pct).unwrap().value(),
                expected,
                "{color} at {pct}%"
            );
        }
    }

    #[test]
    fn percentage_to_intensity_rejects_out_of_range() {
        let profile = hydra();

        assert!(matches!(
            profile.percentage_to_intensity("royal", -0.1),
            Err(ValueError::BrightnessOutOfRange { .. })
        ));
        assert!(matches!(
            profile.percentage_to_intensity("royal", f64::NAN),
            Err(ValueError::BrightnessOutOfRange { .. })
        ));

        // Hydra royal tops out at 33350/23888*100 = 139.6098...
        let err = profile
            .percentage_to_intensity("royal", 140.0)
            .unwrap_err();
        match err {
            ValueError::BrightnessOutOfRange { color, value, max } => {
                assert_eq!(color, "royal");
                assert!((value - 140.0).abs() < f64::EPSILON);
                assert!((max - 139.609_845_947_589_4).abs() < 1e-6);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn percentage_to_intensity_unknown_color() {
        let profile = hydra();
        assert!(matches!(
            profile.percentage_to_intensity("warm_white", 50.0),
            Err(ValueError::UnknownColor(_))
        ));
    }

    // Percentages pinned by the reference device: 424 -> 42.4%,
    // 1262 -> 104.787...% (violet), 1435 -> 117.230...% (royal).
    #[test]
    fn intensity_to_percentage_hydra26() {
        let profile = hydra();

        let pct = profile
            .intensity_to_percentage("uv", intensity(424))
            .unwrap();
        assert!((pct - 42.4).abs() < 1e-12);

        let pct = profile
            .intensity_to_percentage("violet", intensity(1262))
            .unwrap();
        assert!((pct - 104.787_399_207_325_41).abs() < 1e-9);

        let pct = profile
            .intensity_to_percentage("royal", intensity(1435))
            .unwrap();
        assert!((pct - 117.230_282_987_273_94).abs() < 1e-9);
    }

    #[test]
    fn round_trip_within_tolerance() {
        for profile in [hydra(), prime()] {
            let colors: Vec<String> = profile.colors().map(str::to_string).collect();
            for color in &colors {
                let max = profile.max_percentage(color).unwrap();
                let mut pct = 0.0;
                while pct <= max {
                    let i = profile.percentage_to_intensity(color, pct).unwrap();
                    let back = profile.intensity_to_percentage(color, i).unwrap();
                    // One intensity unit is 0.1% on the linear segment and
                    // (max - 100)/1000 on the HD segment; either way the
                    // round trip stays within 0.05% plus the floor step.
                    let tolerance = if pct > 100.0 { (max - 100.0) / 1000.0 } else { 0.05 };
                    assert!(
                        (back - pct).abs() <= tolerance + 1e-9,
                        "{color}: {pct}% -> {} -> {back}%",
                        i.value()
                    );
                    pct += 0.37;
                }
            }
        }
    }

    #[test]
    fn milliwatts_endpoints() {
        let profile = prime();

        let off = profile
            .intensity_to_milliwatts("royal", Intensity::MIN)
            .unwrap();
        assert!(off.abs() < f64::EPSILON);

        let full = profile
            .intensity_to_milliwatts("royal", Intensity::FULL)
            .unwrap();
        assert!((full - 13440.0).abs() < f64::EPSILON);

        let hd = profile
            .intensity_to_milliwatts("royal", Intensity::MAX)
            .unwrap();
        assert!((hd - 16400.0).abs() < f64::EPSILON);
    }

    #[test]
    fn milliwatts_monotonic() {
        for profile in [hydra(), prime()] {
            let colors: Vec<String> = profile.colors().map(str::to_string).collect();
            for color in &colors {
                let mut previous = -1.0;
                for value in 0..=2000 {
                    let mw = profile
                        .intensity_to_milliwatts(color, intensity(value))
                        .unwrap();
                    assert!(mw >= previous, "{color} draw decreased at {value}");
                    previous = mw;
                }
            }
        }
    }

    #[test]
    fn total_milliwatts_all_full_equals_budget() {
        // For both reference models the budget is exactly the sum of the
        // normal-mode tables, so 100% everywhere lands on the limit.
        for profile in [hydra(), prime()] {
            let intensities: BTreeMap<String, Intensity> = profile
                .colors()
                .map(|color| (color.to_string(), Intensity::FULL))
                .collect();
            let draw = profile.total_milliwatts(&intensities);
            assert!((draw - f64::from(profile.max_mw())).abs() < 1e-6);
        }
    }

    #[test]
    fn total_milliwatts_skips_unknown_channels() {
        let profile = prime();
        let mut intensities = BTreeMap::new();
        intensities.insert("royal".to_string(), Intensity::FULL);
        intensities.insert("moonlight".to_string(), Intensity::FULL);

        let draw = profile.total_milliwatts(&intensities);
        assert!((draw - 13440.0).abs() < f64::EPSILON);
    }
}
