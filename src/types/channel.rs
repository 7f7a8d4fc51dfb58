// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! TV channel number type.

use std::fmt;

use crate::error::ValueError;
use crate::types::CommandName;

/// A channel number that can be dialled on the remote (1-999).
///
/// # Examples
///
/// ```
/// use smartify_tv::types::{Channel, CommandName};
///
/// let channel = Channel::new(205).unwrap();
/// assert_eq!(
///     channel.digit_commands(),
///     vec![CommandName::Key2, CommandName::Key0, CommandName::Key5]
/// );
///
/// assert!(Channel::new(0).is_err());
/// assert!(Channel::new(1000).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(try_from = "u32", into = "u16")]
pub struct Channel(u16);

impl Channel {
    /// Lowest channel number.
    pub const MIN: u16 = 1;
    /// Highest channel number (three digit keys).
    pub const MAX: u16 = 999;

    /// Creates a channel, validating the range.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::ChannelOutOfRange`] if `number` is outside 1-999.
    pub fn new(number: u32) -> Result<Self, ValueError> {
        match u16::try_from(number) {
            Ok(value) if (Self::MIN..=Self::MAX).contains(&value) => Ok(Self(value)),
            _ => Err(ValueError::ChannelOutOfRange {
                min: Self::MIN,
                max: Self::MAX,
                actual: number,
            }),
        }
    }

    /// Returns the channel number.
    #[must_use]
    pub const fn value(&self) -> u16 {
        self.0
    }

    /// Returns the digit keys that dial this channel, most significant first.
    ///
    /// No leading zeros are produced.
    #[must_use]
    pub fn digit_commands(&self) -> Vec<CommandName> {
        self.0
            .to_string()
            .bytes()
            .filter_map(|b| CommandName::digit(b - b'0'))
            .collect()
    }
}

impl Default for Channel {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for Channel {
    type Error = ValueError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Channel> for u16 {
    fn from(channel: Channel) -> Self {
        channel.0
    }
}
