// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State change representation.
//!
//! A [`StateChange`] is one discrete update to an
//! [`ApplianceState`](super::ApplianceState). Power and availability come from
//! the power sensor; everything else is optimistic and recorded when the
//! matching command has been sent.
//!
//! # Examples
//!
//! ```
//! use smartify_tv::state::{ApplianceState, StateChange};
//! use smartify_tv::types::VolumeLevel;
//!
//! let mut state = ApplianceState::new();
//!
//! // Apply returns true if state actually changed
//! assert!(state.apply(&StateChange::Muted(true)));
//! assert!(!state.apply(&StateChange::Muted(true)));
//!
//! state.apply(&StateChange::Volume(VolumeLevel::MAX));
//! assert_eq!(state.volume(), VolumeLevel::MAX);
//! ```

use crate::types::{Channel, DerivedState, VolumeLevel};

use super::PlaybackState;

/// Represents a change in appliance state.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateChange {
    /// Power and availability derived from a power reading.
    Derived(DerivedState),

    /// Playback state after a playback command.
    Playback(PlaybackState),

    /// Local volume level after a volume step.
    Volume(VolumeLevel),

    /// Mute flag after a mute command.
    Muted(bool),

    /// Cached channel after a channel was dialed.
    Channel(Channel),

    /// A learning session started or ended.
    Learning(bool),
}

impl StateChange {
    /// Creates a derived power change.
    #[must_use]
    pub fn derived(state: DerivedState) -> Self {
        Self::Derived(state)
    }

    /// Returns `true` if this change comes from the power sensor.
    #[must_use]
    pub fn is_derived(&self) -> bool {
        matches!(self, Self::Derived(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PowerState;

    #[test]
    fn only_sensor_changes_are_derived() {
        assert!(StateChange::derived(DerivedState::new(PowerState::On, true)).is_derived());
        assert!(!StateChange::Muted(true).is_derived());
        assert!(!StateChange::Learning(true).is_derived());
    }

    #[test]
    fn serializes_with_snake_case_tags() {
        let json = serde_json::to_string(&StateChange::Playback(PlaybackState::Paused)).unwrap();
        assert_eq!(json, r#"{"playback":"paused"}"#);

        let json = serde_json::to_string(&StateChange::Channel(Channel::new(12).unwrap())).unwrap();
        assert_eq!(json, r#"{"channel":12}"#);
    }
}
