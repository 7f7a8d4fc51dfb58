// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Logical names of the buttons on the emulated remote.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// A button of the emulated TV remote.
///
/// The vocabulary is closed: these are the only names the controller will
/// ever ask the IR transport to send or learn. The string form (see
/// [`CommandName::as_str`]) is the key under which the IR blaster stores the
/// learned code.
///
/// # Examples
///
/// ```
/// use smartify_tv::types::CommandName;
///
/// let name: CommandName = "VOLUME_UP".parse().unwrap();
/// assert_eq!(name, CommandName::VolumeUp);
/// assert_eq!(CommandName::digit(7), Some(CommandName::Key7));
/// assert_eq!(CommandName::PlayPause.to_string(), "PLAYPAUSE");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum CommandName {
    /// Power the TV on.
    PowerOn,
    /// Power the TV off.
    PowerOff,
    /// One volume step up.
    VolumeUp,
    /// One volume step down.
    VolumeDown,
    /// Mute audio.
    Mute,
    /// Unmute audio.
    Unmute,
    /// Next channel.
    ChannelUp,
    /// Previous channel.
    ChannelDown,
    /// Cycle the input source.
    Source,
    /// Start or resume playback.
    Play,
    /// Stop playback.
    Stop,
    /// Pause playback.
    Pause,
    /// Single play/pause toggle button.
    PlayPause,
    /// Digit 0.
    Key0,
    /// Digit 1.
    Key1,
    /// Digit 2.
    Key2,
    /// Digit 3.
    Key3,
    /// Digit 4.
    Key4,
    /// Digit 5.
    Key5,
    /// Digit 6.
    Key6,
    /// Digit 7.
    Key7,
    /// Digit 8.
    Key8,
    /// Digit 9.
    Key9,
    /// Navigate up.
    Up,
    /// Navigate down.
    Down,
    /// Navigate left.
    Left,
    /// Navigate right.
    Right,
    /// Confirm.
    Ok,
    /// Leave the current menu.
    Exit,
}

impl CommandName {
    /// Every command of the vocabulary, in remote layout order.
    pub const ALL: [Self; 29] = [
        Self::PowerOn,
        Self::PowerOff,
        Self::VolumeUp,
        Self::VolumeDown,
        Self::Mute,
        Self::Unmute,
        Self::ChannelUp,
        Self::ChannelDown,
        Self::Source,
        Self::Play,
        Self::Stop,
        Self::Pause,
        Self::PlayPause,
        Self::Key0,
        Self::Key1,
        Self::Key2,
        Self::Key3,
        Self::Key4,
        Self::Key5,
        Self::Key6,
        Self::Key7,
        Self::Key8,
        Self::Key9,
        Self::Up,
        Self::Down,
        Self::Left,
        Self::Right,
        Self::Ok,
        Self::Exit,
    ];

    const DIGITS: [Self; 10] = [
        Self::Key0,
        Self::Key1,
        Self::Key2,
        Self::Key3,
        Self::Key4,
        Self::Key5,
        Self::Key6,
        Self::Key7,
        Self::Key8,
        Self::Key9,
    ];

    /// Returns the name under which the code is learned and transmitted.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PowerOn => "POWER_ON",
            Self::PowerOff => "POWER_OFF",
            Self::VolumeUp => "VOLUME_UP",
            Self::VolumeDown => "VOLUME_DOWN",
            Self::Mute => "MUTE",
            Self::Unmute => "UNMUTE",
            Self::ChannelUp => "CHANNEL_UP",
            Self::ChannelDown => "CHANNEL_DOWN",
            Self::Source => "SOURCE",
            Self::Play => "PLAY",
            Self::Stop => "STOP",
            Self::Pause => "PAUSE",
            Self::PlayPause => "PLAYPAUSE",
            Self::Key0 => "KEY_0",
            Self::Key1 => "KEY_1",
            Self::Key2 => "KEY_2",
            Self::Key3 => "KEY_3",
            Self::Key4 => "KEY_4",
            Self::Key5 => "KEY_5",
            Self::Key6 => "KEY_6",
            Self::Key7 => "KEY_7",
            Self::Key8 => "KEY_8",
            Self::Key9 => "KEY_9",
            Self::Up => "UP",
            Self::Down => "DOWN",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::Ok => "OK",
            Self::Exit => "EXIT",
        }
    }

    /// Returns the digit key for `digit`, or `None` if it is not 0-9.
    #[must_use]
    pub const fn digit(digit: u8) -> Option<Self> {
        if digit < 10 {
            Some(Self::DIGITS[digit as usize])
        } else {
            None
        }
    }

    /// Returns `true` for the digit keys `KEY_0`..`KEY_9`.
    #[must_use]
    pub const fn is_digit(&self) -> bool {
        matches!(
            self,
            Self::Key0
                | Self::Key1
                | Self::Key2
                | Self::Key3
                | Self::Key4
                | Self::Key5
                | Self::Key6
                | Self::Key7
                | Self::Key8
                | Self::Key9
        )
    }
}

impl fmt::Display for CommandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandName {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| ValueError::UnknownCommandName(s.to_string()))
    }
}

impl TryFrom<String> for CommandName {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CommandName> for &'static str {
    fn from(name: CommandName) -> Self {
        name.as_str()
    }
}
