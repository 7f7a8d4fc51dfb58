// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Seams to the outside world: the IR transport and the power sensor.
//!
//! The controller never talks to hardware itself. It drives an
//! [`IrTransport`] (something that can send and learn named IR codes, such
//! as a Broadlink blaster exposed by a home-automation host) and reads a
//! [`PowerSource`] (something that measures the TV's power draw).
//!
//! With the `http` feature, [`crate::homeassistant`] provides both on top of
//! the Home Assistant REST API.

use std::fmt;
use std::str::FromStr;

use crate::error::TransportError;
use crate::types::{ApplianceId, CommandName, PowerReading};

/// Kind of IR blaster platform behind a transport.
///
/// The controller only knows how to read the learned-command store of
/// recognized platforms. For any other platform it cannot tell whether a
/// command was learned and lets every command through.
///
/// # Examples
///
/// ```
/// use smartify_tv::transport::RemotePlatform;
///
/// let platform: RemotePlatform = "Broadlink".parse().unwrap();
/// assert_eq!(platform, RemotePlatform::Broadlink);
/// assert!(platform.is_recognized());
///
/// let other: RemotePlatform = "tuya".parse().unwrap();
/// assert!(!other.is_recognized());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RemotePlatform {
    /// Broadlink RM family, codes stored in the host's `.storage` directory.
    Broadlink,
    /// Any other platform, by its lowercase name.
    Other(String),
}

impl RemotePlatform {
    /// Returns `true` if learned commands can be checked for this platform.
    #[must_use]
    pub fn is_recognized(&self) -> bool {
        matches!(self, Self::Broadlink)
    }

    /// Returns the lowercase platform name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Broadlink => "broadlink",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for RemotePlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for RemotePlatform {
    fn from(value: String) -> Self {
        let lower = value.to_lowercase();
        match lower.as_str() {
            "broadlink" => Self::Broadlink,
            _ => Self::Other(lower),
        }
    }
}

impl From<RemotePlatform> for String {
    fn from(platform: RemotePlatform) -> Self {
        platform.as_str().to_string()
    }
}

impl FromStr for RemotePlatform {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

/// Acknowledgement of a learn request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LearnAck {
    /// The request was accepted; the physical teaching interaction is still
    /// running and its end will not be signalled.
    Pending,
    /// The transport knows the teaching interaction has finished.
    Completed,
}

/// An IR blaster that can send and learn named commands.
///
/// Both operations are fire-and-forget from the controller's point of view:
/// success means the request was handed over, not that the TV reacted.
#[allow(async_fn_in_trait)]
pub trait IrTransport {
    /// Transmits a learned command for an appliance.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the request could not be delivered.
    async fn transmit(
        &self,
        appliance: &ApplianceId,
        command: CommandName,
    ) -> Result<(), TransportError>;

    /// Puts the blaster into learning mode for a command of an appliance.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the request could not be delivered.
    async fn learn(
        &self,
        appliance: &ApplianceId,
        command: CommandName,
    ) -> Result<LearnAck, TransportError>;

    /// Returns whether the transport is currently reachable.
    async fn is_available(&self) -> bool;
}

/// A sensor measuring the appliance's power draw.
#[allow(async_fn_in_trait)]
pub trait PowerSource {
    /// Reads the current value of the sensor.
    ///
    /// Failures are folded into the reading ([`PowerReading::Absent`] or
    /// [`PowerReading::Unavailable`]) so the caller always gets a value.
    async fn current_reading(&self) -> PowerReading;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_parse_is_case_insensitive() {
        assert_eq!(
            RemotePlatform::from("BROADLINK".to_string()),
            RemotePlatform::Broadlink
        );
        assert_eq!(
            RemotePlatform::from("Xiaomi_Miio".to_string()),
            RemotePlatform::Other("xiaomi_miio".to_string())
        );
    }

    #[test]
    fn platform_serde_is_plain_string() {
        let json = serde_json::to_string(&RemotePlatform::Broadlink).unwrap();
        assert_eq!(json, "\"broadlink\"");

        let parsed: RemotePlatform = serde_json::from_str("\"tuya\"").unwrap();
        assert_eq!(parsed.to_string(), "tuya");
    }
}
