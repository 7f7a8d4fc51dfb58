// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Appliance identifier type.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use crate::error::ValueError;

/// Stable identifier of a configured appliance.
///
/// The identifier is opaque. It is assigned once when the appliance is
/// configured and must never be regenerated afterwards: the IR blaster files
/// learned codes under it, so a new identifier means every command has to be
/// learned again.
///
/// # Examples
///
/// ```
/// use smartify_tv::types::ApplianceId;
///
/// let id = ApplianceId::generate();
/// assert!(id.as_str().starts_with("smartify_tv_"));
///
/// let restored = ApplianceId::new("smartify_tv_0123abcd").unwrap();
/// assert_eq!(restored.to_string(), "smartify_tv_0123abcd");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ApplianceId(String);

impl ApplianceId {
    /// Prefix of generated identifiers.
    pub const PREFIX: &'static str = "smartify_tv_";

    /// Generates a new identifier from a random UUID.
    #[must_use]
    pub fn generate() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Builds the identifier for a known UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(format!("{}{}", Self::PREFIX, uuid.simple()))
    }

    /// Wraps an identifier restored from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::InvalidApplianceId`] if the identifier is empty
    /// or contains whitespace.
    pub fn new(id: impl Into<String>) -> Result<Self, ValueError> {
        let id = id.into();
        if id.is_empty() || id.chars().any(char::is_whitespace) {
            return Err(ValueError::InvalidApplianceId(id));
        }
        Ok(Self(id))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApplianceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApplianceId({})", self.0)
    }
}

impl fmt::Display for ApplianceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ApplianceId {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ApplianceId {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ApplianceId> for String {
    fn from(id: ApplianceId) -> Self {
        id.0
    }
}

impl AsRef<str> for ApplianceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_creates_unique_ids() {
        assert_ne!(ApplianceId::generate(), ApplianceId::generate());
    }

    #[test]
    fn generated_id_is_lowercase_hex() {
        let uuid = Uuid::parse_str("A1A2A3A4-B1B2-C1C2-D1D2-D3D4D5D6D7D8").unwrap();
        let id = ApplianceId::from_uuid(uuid);
        assert_eq!(id.as_str(), "smartify_tv_a1a2a3a4b1b2c1c2d1d2d3d4d5d6d7d8");
    }

    #[test]
    fn rejects_blank_ids() {
        assert!(ApplianceId::new("").is_err());
        assert!(ApplianceId::new("living room").is_err());
    }

    #[test]
    fn debug_format() {
        let id = ApplianceId::new("tv1").unwrap();
        assert_eq!(format!("{id:?}"), "ApplianceId(tv1)");
    }

    #[test]
    fn serde_round_trip_is_plain_string() {
        let id = ApplianceId::new("tv1").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"tv1\"");
        assert!(serde_json::from_str::<ApplianceId>("\"\"").is_err());
    }
}
