// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Optimistic playback tracking.

use std::fmt;

use crate::types::{CommandName, PowerState};

/// Playback state as last commanded.
///
/// The TV never reports it back; the value only reflects what was sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    /// Nothing playing.
    #[default]
    Idle,
    /// Playing.
    Playing,
    /// Paused.
    Paused,
}

impl PlaybackState {
    /// Returns the lowercase name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Playing => "playing",
            Self::Paused => "paused",
        }
    }
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A playback request from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaybackAction {
    /// Start playing.
    Play,
    /// Pause.
    Pause,
    /// Stop.
    Stop,
    /// Pause if playing, play otherwise.
    PlayPause,
}

/// Command to send and state to enter for a playback request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackTransition {
    /// Remote button to press.
    pub command: CommandName,
    /// Playback state once the button was sent.
    pub next: PlaybackState,
}

impl PlaybackAction {
    /// Plans the transition for this action.
    ///
    /// Returns `None` when the TV is off: nothing is sent and the state
    /// stays as it is.
    ///
    /// # Examples
    ///
    /// ```
    /// use smartify_tv::state::{PlaybackAction, PlaybackState};
    /// use smartify_tv::types::{CommandName, PowerState};
    ///
    /// let t = PlaybackAction::PlayPause
    ///     .plan(PlaybackState::Playing, PowerState::On)
    ///     .unwrap();
    /// assert_eq!(t.command, CommandName::Pause);
    /// assert_eq!(t.next, PlaybackState::Paused);
    ///
    /// assert!(PlaybackAction::Play.plan(PlaybackState::Idle, PowerState::Off).is_none());
    /// ```
    #[must_use]
    pub const fn plan(self, current: PlaybackState, power: PowerState) -> Option<PlaybackTransition> {
        if !power.is_on() {
            return None;
        }
        let (command, next) = match self {
            Self::Play => (CommandName::Play, PlaybackState::Playing),
            Self::Pause => (CommandName::Pause, PlaybackState::Paused),
            Self::Stop => (CommandName::Stop, PlaybackState::Idle),
            Self::PlayPause => match current {
                PlaybackState::Playing => (CommandName::Pause, PlaybackState::Paused),
                PlaybackState::Idle | PlaybackState::Paused => {
                    (CommandName::Play, PlaybackState::Playing)
                }
            },
        };
        Some(PlaybackTransition { command, next })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STATES: [PlaybackState; 3] = [
        PlaybackState::Idle,
        PlaybackState::Playing,
        PlaybackState::Paused,
    ];

    const ALL_ACTIONS: [PlaybackAction; 4] = [
        PlaybackAction::Play,
        PlaybackAction::Pause,
        PlaybackAction::Stop,
        PlaybackAction::PlayPause,
    ];

    #[test]
    fn every_action_is_a_no_op_when_off() {
        for action in ALL_ACTIONS {
            for state in ALL_STATES {
                assert_eq!(action.plan(state, PowerState::Off), None);
            }
        }
    }

    #[test]
    fn direct_actions_ignore_current_state() {
        for state in ALL_STATES {
            let play = PlaybackAction::Play.plan(state, PowerState::On).unwrap();
            assert_eq!(play.command, CommandName::Play);
            assert_eq!(play.next, PlaybackState::Playing);

            let pause = PlaybackAction::Pause.plan(state, PowerState::On).unwrap();
            assert_eq!(pause.command, CommandName::Pause);
            assert_eq!(pause.next, PlaybackState::Paused);

            let stop = PlaybackAction::Stop.plan(state, PowerState::On).unwrap();
            assert_eq!(stop.command, CommandName::Stop);
            assert_eq!(stop.next, PlaybackState::Idle);
        }
    }

    #[test]
    fn play_pause_toggles() {
        let mut state = PlaybackState::Idle;
        let mut sent = Vec::new();
        for _ in 0..3 {
            let t = PlaybackAction::PlayPause
                .plan(state, PowerState::On)
                .unwrap();
            sent.push(t.command);
            state = t.next;
        }
        assert_eq!(
            sent,
            vec![CommandName::Play, CommandName::Pause, CommandName::Play]
        );
        assert_eq!(state, PlaybackState::Playing);
    }

    #[test]
    fn play_pause_from_paused_plays() {
        let t = PlaybackAction::PlayPause
            .plan(PlaybackState::Paused, PowerState::On)
            .unwrap();
        assert_eq!(t.command, CommandName::Play);
    }
}
