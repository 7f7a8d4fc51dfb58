// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Learned-command stores.
//!
//! The IR blaster subsystem owns a persisted list of the codes it has
//! learned, keyed by appliance. The controller only ever reloads that list
//! in full to find out which commands can be sent; it never writes to it.
//!
//! # Stores
//!
//! - [`BroadlinkStore`]: the JSON file the Broadlink integration keeps in the
//!   host's `.storage` directory
//! - [`MemoryStore`]: an in-memory map, for hosts that keep codes elsewhere
//!   and for tests

mod broadlink;
mod memory;

pub use broadlink::BroadlinkStore;
pub use memory::MemoryStore;

use std::collections::BTreeMap;

use crate::error::StoreError;
use crate::types::{ApplianceId, CommandName};

/// The learned codes of one appliance.
///
/// Keys are command names exactly as stored, values are the opaque codes.
/// A command without an entry has not been learned yet.
///
/// # Examples
///
/// ```
/// use smartify_tv::store::LearnedCommandSet;
/// use smartify_tv::types::CommandName;
///
/// let set: LearnedCommandSet = [("POWER_ON", "JgBQAAAB"), ("MUTE", "JgBGAJKV")]
///     .into_iter()
///     .collect();
///
/// assert!(set.contains(CommandName::PowerOn));
/// assert!(!set.contains(CommandName::PowerOff));
/// assert_eq!(set.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct LearnedCommandSet(BTreeMap<String, serde_json::Value>);

impl LearnedCommandSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if a code was learned for `command`.
    #[must_use]
    pub fn contains(&self, command: CommandName) -> bool {
        self.0.contains_key(command.as_str())
    }

    /// Returns the opaque code learned for `command`.
    #[must_use]
    pub fn code(&self, command: CommandName) -> Option<&serde_json::Value> {
        self.0.get(command.as_str())
    }

    /// Records a code for `command`, replacing any previous one.
    pub fn insert(&mut self, command: CommandName, code: impl Into<serde_json::Value>) {
        self.0.insert(command.as_str().to_string(), code.into());
    }

    /// Returns the stored names in sorted order.
    ///
    /// Names learned outside of the remote vocabulary are included.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Returns the number of learned codes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if nothing was learned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for LearnedCommandSet
where
    K: Into<String>,
    V: Into<serde_json::Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, code)| (name.into(), code.into()))
                .collect(),
        )
    }
}

/// A persisted source of learned commands.
#[allow(async_fn_in_trait)]
pub trait LearnedCommandStore {
    /// Loads every code learned for `appliance`.
    ///
    /// Returns `Ok(None)` if the store, or the appliance's entry in it, does
    /// not exist.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store exists but cannot be read or parsed.
    async fn load(&self, appliance: &ApplianceId)
    -> Result<Option<LearnedCommandSet>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_names_are_kept() {
        let set: LearnedCommandSet = [("HDMI_2", "abc")].into_iter().collect();
        assert_eq!(set.names().collect::<Vec<_>>(), vec!["HDMI_2"]);
        assert!(!set.is_empty());
    }

    #[test]
    fn insert_replaces_code() {
        let mut set = LearnedCommandSet::new();
        set.insert(CommandName::Play, "first");
        set.insert(CommandName::Play, "second");
        assert_eq!(set.len(), 1);
        assert_eq!(
            set.code(CommandName::Play),
            Some(&serde_json::Value::from("second"))
        );
    }

    #[test]
    fn deserializes_from_plain_object() {
        let set: LearnedCommandSet =
            serde_json::from_str(r#"{"VOLUME_UP": ["a", "b"], "OK": "c"}"#).unwrap();
        assert!(set.contains(CommandName::VolumeUp));
        assert!(set.contains(CommandName::Ok));
    }
}
