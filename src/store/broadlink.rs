// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Broadlink learned-code file.

use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::{LearnedCommandSet, LearnedCommandStore};
use crate::error::StoreError;
use crate::types::ApplianceId;

/// Reads the codes the Broadlink integration stores for one blaster.
///
/// The file lives at `<config>/.storage/broadlink_remote_<mac>_codes` and
/// looks like:
///
/// ```json
/// {
///   "version": 1,
///   "key": "broadlink_remote_34ea34b43b5a_codes",
///   "data": {
///     "smartify_tv_0123abcd": { "POWER_ON": "JgBQAAAB...", "VOLUME_UP": ["...", "..."] }
///   }
/// }
/// ```
///
/// Reads run on tokio's blocking pool so a slow disk never stalls the task
/// delivering power events.
///
/// # Examples
///
/// ```
/// use smartify_tv::store::BroadlinkStore;
///
/// let store = BroadlinkStore::in_config_dir("/config", "34:EA:34:B4:3B:5A");
/// assert_eq!(
///     store.path().to_str(),
///     Some("/config/.storage/broadlink_remote_34ea34b43b5a_codes")
/// );
/// ```
#[derive(Debug, Clone)]
pub struct BroadlinkStore {
    path: PathBuf,
}

impl BroadlinkStore {
    /// Name of the host's private storage directory.
    pub const STORAGE_DIR: &'static str = ".storage";

    /// Creates a store for the blaster with hardware address `mac` inside
    /// the given storage directory.
    ///
    /// The address may use any of the usual separators; it is normalized to
    /// lowercase hex digits.
    #[must_use]
    pub fn new(storage_dir: impl Into<PathBuf>, mac: &str) -> Self {
        let mut path = storage_dir.into();
        path.push(Self::file_name(mac));
        Self { path }
    }

    /// Creates a store relative to the host configuration directory.
    #[must_use]
    pub fn in_config_dir(config_dir: impl AsRef<Path>, mac: &str) -> Self {
        Self::new(config_dir.as_ref().join(Self::STORAGE_DIR), mac)
    }

    /// Returns the file name used for a blaster.
    #[must_use]
    pub fn file_name(mac: &str) -> String {
        let normalized: String = mac
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_lowercase())
            .collect();
        format!("broadlink_remote_{normalized}_codes")
    }

    /// Returns the path of the code file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_blocking(path: &Path, appliance: &str) -> Result<Option<LearnedCommandSet>, StoreError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::Io(e)),
        };

        let document: Value = serde_json::from_str(&content)?;
        let data = document
            .get("data")
            .and_then(Value::as_object)
            .ok_or_else(|| StoreError::InvalidFormat("missing \"data\" object".to_string()))?;

        match data.get(appliance) {
            None => Ok(None),
            Some(Value::Object(codes)) => Ok(Some(
                codes
                    .iter()
                    .map(|(name, code)| (name.clone(), code.clone()))
                    .collect(),
            )),
            Some(_) => Err(StoreError::InvalidFormat(format!(
                "entry for {appliance} is not an object"
            ))),
        }
    }
}

impl LearnedCommandStore for BroadlinkStore {
    async fn load(
        &self,
        appliance: &ApplianceId,
    ) -> Result<Option<LearnedCommandSet>, StoreError> {
        let path = self.path.clone();
        let key = appliance.to_string();

        tracing::debug!(path = %path.display(), appliance = %key, "Reading Broadlink codes");

        tokio::task::spawn_blocking(move || Self::read_blocking(&path, &key))
            .await
            .map_err(|e| StoreError::Worker(e.to_string()))?
    }
}
