// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IR transport backed by a Home Assistant `remote` entity.

use serde_json::json;

use super::HomeAssistantClient;
use crate::error::TransportError;
use crate::transport::{IrTransport, LearnAck};
use crate::types::{ApplianceId, CommandName};

/// Sends and learns codes through the `remote.send_command` and
/// `remote.learn_command` services.
///
/// Codes are addressed by the appliance ID as `device` and the command name
/// as `command`, which is also how the blaster files them in its store.
#[derive(Debug, Clone)]
pub struct HomeAssistantRemote {
    client: HomeAssistantClient,
    entity_id: String,
}

impl HomeAssistantRemote {
    /// Service domain of remote entities.
    pub const DOMAIN: &'static str = "remote";

    /// Creates a transport for the remote entity `entity_id`.
    #[must_use]
    pub fn new(client: HomeAssistantClient, entity_id: impl Into<String>) -> Self {
        Self {
            client,
            entity_id: entity_id.into(),
        }
    }

    /// Returns the remote entity id.
    #[must_use]
    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    fn service_data(&self, appliance: &ApplianceId, command: CommandName) -> serde_json::Value {
        json!({
            "entity_id": self.entity_id,
            "device": appliance.as_str(),
            "command": command.as_str(),
        })
    }
}

impl IrTransport for HomeAssistantRemote {
    async fn transmit(
        &self,
        appliance: &ApplianceId,
        command: CommandName,
    ) -> Result<(), TransportError> {
        self.client
            .call_service(
                Self::DOMAIN,
                "send_command",
                &self.service_data(appliance, command),
            )
            .await
    }

    async fn learn(
        &self,
        appliance: &ApplianceId,
        command: CommandName,
    ) -> Result<LearnAck, TransportError> {
        self.client
            .call_service(
                Self::DOMAIN,
                "learn_command",
                &self.service_data(appliance, command),
            )
            .await?;
        // The service returns as soon as the blaster listens.
        Ok(LearnAck::Pending)
    }

    async fn is_available(&self) -> bool {
        match self.client.entity_state(&self.entity_id).await {
            Ok(Some(state)) if !state.is_unavailable() => true,
            Ok(Some(state)) => {
                tracing::warn!(entity = %self.entity_id, state = %state.state, "Remote entity is unavailable or unknown");
                false
            }
            Ok(None) => {
                tracing::warn!(entity = %self.entity_id, "Remote entity not found");
                false
            }
            Err(e) => {
                tracing::warn!(entity = %self.entity_id, error = %e, "Failed to read remote entity");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::homeassistant::HomeAssistantConfig;

    #[test]
    fn service_data_names_device_and_command() {
        let client = HomeAssistantConfig::new("http://ha.local", "t")
            .into_client()
            .unwrap();
        let remote = HomeAssistantRemote::new(client, "remote.rm4");
        let data = remote.service_data(&ApplianceId::new("smartify_tv_1").unwrap(), CommandName::Key4);

        assert_eq!(
            data,
            json!({"entity_id": "remote.rm4", "device": "smartify_tv_1", "command": "KEY_4"})
        );
    }
}
