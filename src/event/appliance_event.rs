// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Appliance event types.

use crate::state::{ApplianceState, StateChange};
use crate::types::ApplianceId;

/// Events emitted by controllers and the appliance manager.
///
/// # Examples
///
/// ```
/// use smartify_tv::event::ApplianceEvent;
/// use smartify_tv::state::{ApplianceState, StateChange};
/// use smartify_tv::types::ApplianceId;
///
/// let id = ApplianceId::generate();
///
/// let added = ApplianceEvent::appliance_added(id.clone());
/// assert!(added.is_lifecycle());
///
/// let muted = ApplianceEvent::state_changed(id.clone(), StateChange::Muted(true), ApplianceState::new());
/// assert!(muted.is_state_change());
/// assert_eq!(muted.appliance_id(), &id);
/// ```
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub enum ApplianceEvent {
    /// An appliance was added to the manager.
    ApplianceAdded {
        /// The ID of the added appliance.
        appliance_id: ApplianceId,
    },

    /// An appliance was removed from the manager.
    ApplianceRemoved {
        /// The ID of the removed appliance.
        appliance_id: ApplianceId,
    },

    /// Appliance state changed.
    ///
    /// Emitted after a power reading changed the derived state, and after a
    /// command updated the optimistic state.
    StateChanged {
        /// The ID of the appliance.
        appliance_id: ApplianceId,
        /// The specific change that occurred.
        change: StateChange,
        /// The complete new state of the appliance.
        new_state: ApplianceState,
    },
}

impl ApplianceEvent {
    /// Returns the appliance ID associated with this event.
    #[must_use]
    pub fn appliance_id(&self) -> &ApplianceId {
        match self {
            Self::ApplianceAdded { appliance_id }
            | Self::ApplianceRemoved { appliance_id }
            | Self::StateChanged { appliance_id, .. } => appliance_id,
        }
    }

    /// Returns `true` if this is a lifecycle event (added/removed).
    #[must_use]
    pub fn is_lifecycle(&self) -> bool {
        matches!(
            self,
            Self::ApplianceAdded { .. } | Self::ApplianceRemoved { .. }
        )
    }

    /// Returns `true` if this is a state change event.
    #[must_use]
    pub fn is_state_change(&self) -> bool {
        matches!(self, Self::StateChanged { .. })
    }

    /// Creates an appliance added event.
    #[must_use]
    pub fn appliance_added(appliance_id: ApplianceId) -> Self {
        Self::ApplianceAdded { appliance_id }
    }

    /// Creates an appliance removed event.
    #[must_use]
    pub fn appliance_removed(appliance_id: ApplianceId) -> Self {
        Self::ApplianceRemoved { appliance_id }
    }

    /// Creates a state changed event.
    #[must_use]
    pub fn state_changed(
        appliance_id: ApplianceId,
        change: StateChange,
        new_state: ApplianceState,
    ) -> Self {
        Self::StateChanged {
            appliance_id,
            change,
            new_state,
        }
    }
}
