// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Power source backed by a Home Assistant sensor entity.

use super::HomeAssistantClient;
use crate::transport::PowerSource;
use crate::types::PowerReading;

/// Reads a power sensor (in Watts) through the REST API.
#[derive(Debug, Clone)]
pub struct HomeAssistantPowerSensor {
    client: HomeAssistantClient,
    entity_id: String,
}

impl HomeAssistantPowerSensor {
    /// Creates a power source for the sensor entity `entity_id`.
    #[must_use]
    pub fn new(client: HomeAssistantClient, entity_id: impl Into<String>) -> Self {
        Self {
            client,
            entity_id: entity_id.into(),
        }
    }

    /// Returns the sensor entity id.
    #[must_use]
    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }
}

impl PowerSource for HomeAssistantPowerSensor {
    async fn current_reading(&self) -> PowerReading {
        match self.client.entity_state(&self.entity_id).await {
            Ok(Some(state)) => PowerReading::parse(&state.state),
            Ok(None) => PowerReading::Absent,
            Err(e) => {
                tracing::warn!(entity = %self.entity_id, error = %e, "Failed to read power sensor");
                PowerReading::Unavailable
            }
        }
    }
}
