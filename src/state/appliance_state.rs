// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Appliance state tracking.

use crate::types::{Channel, DerivedState, PowerState, VolumeLevel};

use super::{PlaybackState, StateChange};

/// Tracked state of one TV.
///
/// Starts off and unavailable until the first power reading. Volume, mute,
/// channel and playback are optimistic: they reflect the commands that were
/// sent and are never confirmed by the TV.
///
/// # Examples
///
/// ```
/// use smartify_tv::state::{ApplianceState, PlaybackState};
/// use smartify_tv::types::PowerState;
///
/// let state = ApplianceState::new();
/// assert_eq!(state.power(), PowerState::Off);
/// assert!(!state.is_available());
/// assert_eq!(state.playback(), PlaybackState::Idle);
/// assert_eq!(state.volume().to_string(), "0.2");
/// assert_eq!(state.media_title(), "Channel 1");
/// ```
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ApplianceState {
    derived: DerivedState,
    playback: PlaybackState,
    volume: VolumeLevel,
    muted: bool,
    channel: Channel,
    learning: bool,
}

impl ApplianceState {
    /// Creates the initial state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the derived power state and availability.
    #[must_use]
    pub const fn derived(&self) -> DerivedState {
        self.derived
    }

    /// Returns the derived power state.
    #[must_use]
    pub const fn power(&self) -> PowerState {
        self.derived.power
    }

    /// Returns whether the TV can currently be controlled.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.derived.available
    }

    /// Returns the playback state.
    #[must_use]
    pub const fn playback(&self) -> PlaybackState {
        self.playback
    }

    /// Returns the local volume level.
    #[must_use]
    pub const fn volume(&self) -> VolumeLevel {
        self.volume
    }

    /// Returns the mute flag.
    #[must_use]
    pub const fn is_muted(&self) -> bool {
        self.muted
    }

    /// Returns the last dialed channel.
    #[must_use]
    pub const fn channel(&self) -> Channel {
        self.channel
    }

    /// Returns `true` while a learning session runs.
    #[must_use]
    pub const fn is_learning(&self) -> bool {
        self.learning
    }

    /// Returns the title shown by media players.
    #[must_use]
    pub fn media_title(&self) -> String {
        format!("Channel {}", self.channel)
    }

    /// Applies a state change.
    ///
    /// Returns `true` if the state actually changed.
    pub fn apply(&mut self, change: &StateChange) -> bool {
        match change {
            StateChange::Derived(derived) => replace(&mut self.derived, *derived),
            StateChange::Playback(playback) => replace(&mut self.playback, *playback),
            StateChange::Volume(volume) => replace(&mut self.volume, *volume),
            StateChange::Muted(muted) => replace(&mut self.muted, *muted),
            StateChange::Channel(channel) => replace(&mut self.channel, *channel),
            StateChange::Learning(learning) => replace(&mut self.learning, *learning),
        }
    }
}

fn replace<V: PartialEq>(slot: &mut V, value: V) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}
