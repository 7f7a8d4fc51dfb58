// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Results of host intents.

use std::fmt;
use std::str::FromStr;

use crate::command::DispatchOutcome;
use crate::types::CommandName;

/// What a host intent did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Every command was transmitted.
    Sent,
    /// Some commands were never learned and were not transmitted.
    NotLearned(Vec<CommandName>),
    /// Nothing was transmitted.
    Skipped(SkipReason),
}

impl Outcome {
    /// Summarizes the dispatch results of one intent.
    #[must_use]
    pub fn from_dispatches(outcomes: &[DispatchOutcome]) -> Self {
        let missing: Vec<_> = outcomes
            .iter()
            .filter(|outcome| !outcome.is_sent())
            .map(DispatchOutcome::command)
            .collect();
        if missing.is_empty() {
            Self::Sent
        } else {
            Self::NotLearned(missing)
        }
    }

    /// Returns `true` if everything was transmitted.
    #[must_use]
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent)
    }

    /// Returns `true` if the intent was skipped.
    #[must_use]
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }
}

impl From<DispatchOutcome> for Outcome {
    fn from(outcome: DispatchOutcome) -> Self {
        Self::from_dispatches(&[outcome])
    }
}

/// Why an intent transmitted nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// Playback controls need the TV to be on.
    PoweredOff,
    /// Turn on was requested while the TV already draws power.
    AlreadyOn,
    /// Turn off was requested while the TV is already off.
    AlreadyOff,
    /// The request has no IR equivalent.
    Unsupported,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::PoweredOff => "powered off",
            Self::AlreadyOn => "already on",
            Self::AlreadyOff => "already off",
            Self::Unsupported => "unsupported",
        })
    }
}

/// Kind of media a host asks to play.
///
/// Only channels can be reached with the remote.
///
/// # Examples
///
/// ```
/// use smartify_tv::controller::MediaKind;
///
/// let kind: MediaKind = "channel".parse().unwrap();
/// assert_eq!(kind, MediaKind::Channel);
/// assert_eq!("music".parse::<MediaKind>().unwrap(), MediaKind::Other("music".into()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MediaKind {
    /// A TV channel; the media id is the channel number.
    Channel,
    /// A URL.
    Url,
    /// An application.
    App,
    /// Anything else.
    Other(String),
}

impl FromStr for MediaKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "channel" => Self::Channel,
            "url" => Self::Url,
            "app" => Self::App,
            other => Self::Other(other.to_string()),
        })
    }
}
