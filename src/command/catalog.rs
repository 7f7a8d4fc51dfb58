// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Knowledge of which commands have been learned.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::store::{LearnedCommandSet, LearnedCommandStore};
use crate::transport::RemotePlatform;
use crate::types::{ApplianceId, CommandName};

/// The set of commands an appliance can currently transmit.
///
/// For a recognized platform the catalog fails closed: until the store has
/// been loaded, nothing is known. For any other platform every command is
/// assumed learned.
///
/// # Examples
///
/// ```
/// use smartify_tv::command::CommandCatalog;
/// use smartify_tv::store::LearnedCommandSet;
/// use smartify_tv::transport::RemotePlatform;
/// use smartify_tv::types::CommandName;
///
/// let catalog = CommandCatalog::new(RemotePlatform::Broadlink);
/// assert!(!catalog.is_known(CommandName::PowerOn));
///
/// catalog.replace([("POWER_ON", "JgBQ")].into_iter().collect::<LearnedCommandSet>());
/// assert!(catalog.is_known(CommandName::PowerOn));
/// assert!(!catalog.is_known(CommandName::PowerOff));
///
/// let permissive = CommandCatalog::new(RemotePlatform::Other("tuya".into()));
/// assert!(permissive.is_known(CommandName::PowerOff));
/// ```
#[derive(Debug)]
pub struct CommandCatalog {
    platform: RemotePlatform,
    inner: RwLock<CatalogInner>,
}

#[derive(Debug, Default)]
struct CatalogInner {
    learned: Option<LearnedCommandSet>,
    refreshed_at: Option<DateTime<Utc>>,
}

/// Point-in-time view of a catalog, for diagnostics.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CatalogSnapshot {
    /// Platform of the remote.
    pub platform: RemotePlatform,
    /// Whether the store was loaded at least once.
    pub loaded: bool,
    /// Learned command names, sorted.
    pub learned: Vec<String>,
    /// When the catalog was last replaced.
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl CommandCatalog {
    /// Creates an empty, never loaded catalog.
    #[must_use]
    pub fn new(platform: RemotePlatform) -> Self {
        Self {
            platform,
            inner: RwLock::new(CatalogInner::default()),
        }
    }

    /// Returns the remote platform.
    #[must_use]
    pub fn platform(&self) -> &RemotePlatform {
        &self.platform
    }

    /// Returns `true` if `command` can be transmitted.
    #[must_use]
    pub fn is_known(&self, command: CommandName) -> bool {
        if !self.platform.is_recognized() {
            return true;
        }
        self.inner
            .read()
            .learned
            .as_ref()
            .is_some_and(|set| set.contains(command))
    }

    /// Returns `true` once the store has been loaded.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.inner.read().learned.is_some()
    }

    /// Replaces the whole catalog.
    pub fn replace(&self, set: LearnedCommandSet) {
        let mut inner = self.inner.write();
        inner.learned = Some(set);
        inner.refreshed_at = Some(Utc::now());
    }

    /// Reloads the catalog from `store` and returns the number of learned
    /// commands.
    ///
    /// A missing store or entry, and any store error, leave an empty catalog
    /// behind. Errors are logged, never returned. Unrecognized platforms have
    /// no store to read and are left untouched.
    pub async fn refresh<S: LearnedCommandStore>(&self, appliance: &ApplianceId, store: &S) -> usize {
        if !self.platform.is_recognized() {
            tracing::debug!(
                appliance = %appliance,
                platform = %self.platform,
                "Platform has no learned-command store, all commands allowed"
            );
            return 0;
        }

        let set = match store.load(appliance).await {
            Ok(Some(set)) => set,
            Ok(None) => {
                tracing::debug!(appliance = %appliance, "No learned commands stored");
                LearnedCommandSet::new()
            }
            Err(e) => {
                tracing::warn!(appliance = %appliance, error = %e, "Failed to load learned commands");
                LearnedCommandSet::new()
            }
        };

        let count = set.len();
        self.replace(set);
        tracing::debug!(appliance = %appliance, count, "Learned commands refreshed");
        count
    }

    /// Returns a snapshot for diagnostics.
    #[must_use]
    pub fn snapshot(&self) -> CatalogSnapshot {
        let inner = self.inner.read();
        CatalogSnapshot {
            platform: self.platform.clone(),
            loaded: inner.learned.is_some(),
            learned: inner
                .learned
                .as_ref()
                .map(|set| set.names().map(str::to_string).collect())
                .unwrap_or_default(),
            refreshed_at: inner.refreshed_at,
        }
    }
}
