// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Power-related types.
//!
//! The TV reports nothing about itself. Its power state is inferred from the
//! wattage measured by an external sensor (typically a smart plug), which is
//! modelled here as a [`PowerReading`] and turned into a [`DerivedState`] by
//! the [`PowerStateMonitor`](crate::monitor::PowerStateMonitor).

use std::fmt;

/// The inferred power state of the appliance.
///
/// # Examples
///
/// ```
/// use smartify_tv::types::PowerState;
///
/// assert_eq!(PowerState::On.as_str(), "on");
/// assert_eq!(PowerState::from(false), PowerState::Off);
/// assert!(PowerState::On.is_on());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerState {
    /// Power draw is at or below the threshold, or unknown.
    #[default]
    Off,
    /// Power draw is above the threshold.
    On,
}

impl PowerState {
    /// Returns the lowercase string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::On => "on",
        }
    }

    /// Returns `true` if the appliance is considered on.
    #[must_use]
    pub const fn is_on(&self) -> bool {
        matches!(self, Self::On)
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<bool> for PowerState {
    fn from(value: bool) -> Self {
        if value { Self::On } else { Self::Off }
    }
}

/// A point-in-time value of the power sensor.
///
/// # Examples
///
/// ```
/// use smartify_tv::types::PowerReading;
///
/// assert_eq!(PowerReading::parse("42.5"), PowerReading::Watts(42.5));
/// assert_eq!(PowerReading::parse("unknown"), PowerReading::Unknown);
/// assert_eq!(PowerReading::parse("unavailable"), PowerReading::Unavailable);
/// assert!(matches!(PowerReading::parse("n/a"), PowerReading::Invalid(_)));
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerReading {
    /// Numeric power draw in Watts.
    Watts(f64),
    /// The sensor exists but has not reported a value yet.
    Unknown,
    /// The sensor exists but is offline.
    Unavailable,
    /// The sensor itself cannot be found.
    Absent,
    /// The sensor reported something that is not a number.
    Invalid(String),
}

impl PowerReading {
    /// Interprets a raw sensor state string.
    ///
    /// `"unknown"` and `"unavailable"` map to their variants, a finite
    /// floating point number maps to [`PowerReading::Watts`] and anything
    /// else to [`PowerReading::Invalid`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed {
            "unknown" => Self::Unknown,
            "unavailable" => Self::Unavailable,
            _ => match trimmed.parse::<f64>() {
                Ok(watts) if watts.is_finite() => Self::Watts(watts),
                _ => Self::Invalid(raw.to_string()),
            },
        }
    }

    /// Returns the wattage if the reading is numeric.
    #[must_use]
    pub fn watts(&self) -> Option<f64> {
        match self {
            Self::Watts(watts) => Some(*watts),
            _ => None,
        }
    }
}

impl From<f64> for PowerReading {
    fn from(watts: f64) -> Self {
        Self::Watts(watts)
    }
}

impl fmt::Display for PowerReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Watts(watts) => write!(f, "{watts} W"),
            Self::Unknown => f.write_str("unknown"),
            Self::Unavailable => f.write_str("unavailable"),
            Self::Absent => f.write_str("absent"),
            Self::Invalid(raw) => write!(f, "invalid ({raw})"),
        }
    }
}

/// Power state and availability derived from one power reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct DerivedState {
    /// Inferred power state.
    pub power: PowerState,
    /// Whether both the power sensor and the IR transport are usable.
    pub available: bool,
}

impl DerivedState {
    /// Creates a derived state.
    #[must_use]
    pub const fn new(power: PowerState, available: bool) -> Self {
        Self { power, available }
    }

    /// The state reported when nothing usable is known.
    #[must_use]
    pub const fn unavailable() -> Self {
        Self::new(PowerState::Off, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_whitespace() {
        assert_eq!(PowerReading::parse(" 12.0\n"), PowerReading::Watts(12.0));
    }

    #[test]
    fn parse_rejects_non_finite() {
        assert!(matches!(PowerReading::parse("NaN"), PowerReading::Invalid(_)));
        assert!(matches!(PowerReading::parse("inf"), PowerReading::Invalid(_)));
    }

    #[test]
    fn parse_keywords_are_exact() {
        assert!(matches!(
            PowerReading::parse("Unknown"),
            PowerReading::Invalid(_)
        ));
    }

    #[test]
    fn watts_accessor() {
        assert_eq!(PowerReading::Watts(3.5).watts(), Some(3.5));
        assert_eq!(PowerReading::Absent.watts(), None);
    }

    #[test]
    fn power_state_display() {
        assert_eq!(PowerState::Off.to_string(), "off");
        assert_eq!(PowerState::default(), PowerState::Off);
    }

    #[test]
    fn unavailable_is_off() {
        let state = DerivedState::unavailable();
        assert_eq!(state.power, PowerState::Off);
        assert!(!state.available);
    }
}
