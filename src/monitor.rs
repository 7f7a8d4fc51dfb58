// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Power state inference from power-draw readings.

use crate::types::{DerivedState, PowerReading, PowerState};

/// Derives the TV on/off state and availability from a power reading.
///
/// The TV is on only when the measured draw is strictly above the threshold.
/// Standby consumption of a typical TV stays well below the default of 10 W.
///
/// # Examples
///
/// ```
/// use smartify_tv::monitor::PowerStateMonitor;
/// use smartify_tv::types::{PowerReading, PowerState};
///
/// let monitor = PowerStateMonitor::default();
///
/// let state = monitor.observe(&PowerReading::Watts(15.0), true);
/// assert_eq!(state.power, PowerState::On);
/// assert!(state.available);
///
/// let state = monitor.observe(&PowerReading::Watts(10.0), true);
/// assert_eq!(state.power, PowerState::Off);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerStateMonitor {
    threshold: f64,
}

impl PowerStateMonitor {
    /// Default on/off threshold in Watts.
    pub const DEFAULT_THRESHOLD: f64 = 10.0;

    /// Creates a monitor with a custom threshold in Watts.
    #[must_use]
    pub const fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Returns the threshold in Watts.
    #[must_use]
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Derives the appliance state from one reading.
    ///
    /// `transport_available` is the IR transport's own reachability. It only
    /// matters when the sensor produced a value: a TV whose remote is
    /// unreachable is reported unavailable even when its power is known.
    #[must_use]
    pub fn observe(&self, reading: &PowerReading, transport_available: bool) -> DerivedState {
        match reading {
            PowerReading::Absent => {
                tracing::warn!("Power sensor not found");
                DerivedState::unavailable()
            }
            PowerReading::Unknown | PowerReading::Unavailable => {
                tracing::warn!(reading = %reading, "Power sensor state is unavailable or unknown");
                DerivedState::unavailable()
            }
            PowerReading::Invalid(raw) => {
                tracing::warn!(value = %raw, "Invalid power value");
                DerivedState::new(PowerState::Off, transport_available)
            }
            PowerReading::Watts(watts) => {
                let power = PowerState::from(*watts > self.threshold);
                DerivedState::new(power, transport_available)
            }
        }
    }
}

impl Default for PowerStateMonitor {
    fn default() -> Self {
        Self::new(Self::DEFAULT_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observe(reading: PowerReading) -> DerivedState {
        PowerStateMonitor::default().observe(&reading, true)
    }

    #[test]
    fn above_threshold_is_on() {
        assert_eq!(
            observe(PowerReading::Watts(15.0)),
            DerivedState::new(PowerState::On, true)
        );
    }

    #[test]
    fn threshold_itself_is_off() {
        assert_eq!(
            observe(PowerReading::Watts(10.0)),
            DerivedState::new(PowerState::Off, true)
        );
    }

    #[test]
    fn below_threshold_is_off() {
        assert_eq!(
            observe(PowerReading::Watts(5.0)),
            DerivedState::new(PowerState::Off, true)
        );
    }

    #[test]
    fn unknown_is_off_and_unavailable() {
        assert_eq!(observe(PowerReading::Unknown), DerivedState::unavailable());
        assert_eq!(
            observe(PowerReading::Unavailable),
            DerivedState::unavailable()
        );
    }

    #[test]
    fn absent_is_off_and_unavailable() {
        assert_eq!(observe(PowerReading::Absent), DerivedState::unavailable());
    }

    #[test]
    fn invalid_value_is_off_but_keeps_transport_availability() {
        let monitor = PowerStateMonitor::default();
        let reading = PowerReading::Invalid("abc".to_string());
        assert_eq!(
            monitor.observe(&reading, true),
            DerivedState::new(PowerState::Off, true)
        );
        assert_eq!(
            monitor.observe(&reading, false),
            DerivedState::new(PowerState::Off, false)
        );
    }

    #[test]
    fn unreachable_transport_makes_appliance_unavailable() {
        let state = PowerStateMonitor::default().observe(&PowerReading::Watts(80.0), false);
        assert_eq!(state, DerivedState::new(PowerState::On, false));
    }

    #[test]
    fn custom_threshold() {
        let monitor = PowerStateMonitor::new(50.0);
        assert!((monitor.threshold() - 50.0).abs() < f64::EPSILON);
        assert_eq!(
            monitor.observe(&PowerReading::Watts(40.0), true).power,
            PowerState::Off
        );
        assert_eq!(
            monitor.observe(&PowerReading::Watts(50.5), true).power,
            PowerState::On
        );
    }
}
