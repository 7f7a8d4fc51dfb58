// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory learned-command store.

use std::collections::HashMap;

use parking_lot::RwLock;

use super::{LearnedCommandSet, LearnedCommandStore};
use crate::error::StoreError;
use crate::types::{ApplianceId, CommandName};

/// Learned commands kept in memory.
///
/// Cloning the store is not supported; share it behind an `Arc` when a
/// transport and a controller need to see the same codes.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<ApplianceId, LearnedCommandSet>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole set of an appliance.
    pub fn insert(&self, appliance: ApplianceId, set: LearnedCommandSet) {
        self.entries.write().insert(appliance, set);
    }

    /// Records a single learned code.
    pub fn record(
        &self,
        appliance: &ApplianceId,
        command: CommandName,
        code: impl Into<serde_json::Value>,
    ) {
        self.entries
            .write()
            .entry(appliance.clone())
            .or_default()
            .insert(command, code);
    }

    /// Removes an appliance's entry.
    pub fn remove(&self, appliance: &ApplianceId) -> Option<LearnedCommandSet> {
        self.entries.write().remove(appliance)
    }
}

impl LearnedCommandStore for MemoryStore {
    async fn load(
        &self,
        appliance: &ApplianceId,
    ) -> Result<Option<LearnedCommandSet>, StoreError> {
        Ok(self.entries.read().get(appliance).cloned())
    }
}
