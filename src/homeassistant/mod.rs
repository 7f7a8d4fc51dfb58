// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Home Assistant adapters.
//!
//! Implements the [`IrTransport`](crate::transport::IrTransport) and
//! [`PowerSource`](crate::transport::PowerSource) seams on top of the Home
//! Assistant REST API:
//!
//! | Type | Endpoint |
//! |------|----------|
//! | [`HomeAssistantRemote::transmit`](crate::transport::IrTransport::transmit) | `POST /api/services/remote/send_command` |
//! | [`HomeAssistantRemote::learn`](crate::transport::IrTransport::learn) | `POST /api/services/remote/learn_command` |
//! | [`HomeAssistantRemote::is_available`](crate::transport::IrTransport::is_available) | `GET /api/states/<remote>` |
//! | [`HomeAssistantPowerSensor`] | `GET /api/states/<sensor>` |
//!
//! Requires the `http` feature.
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use smartify_tv::controller::{ApplianceConfig, DeviceController, RemoteConfig};
//! use smartify_tv::event::EventBus;
//! use smartify_tv::homeassistant::{HomeAssistantConfig, HomeAssistantPowerSensor, HomeAssistantRemote};
//! use smartify_tv::store::BroadlinkStore;
//! use smartify_tv::transport::RemotePlatform;
//!
//! # async fn example() -> smartify_tv::Result<()> {
//! let client = HomeAssistantConfig::new("http://homeassistant.local:8123", "token").into_client()?;
//!
//! let config = ApplianceConfig::new(
//!     "sensor.tv_plug_power",
//!     RemoteConfig::new("remote.rm4", RemotePlatform::Broadlink).with_hardware_address("34ea34b43b5a"),
//! );
//! let remote = HomeAssistantRemote::new(client.clone(), &config.remote.entity_id);
//! let sensor = HomeAssistantPowerSensor::new(client, &config.power_source);
//! let store = BroadlinkStore::in_config_dir("/config", "34ea34b43b5a");
//!
//! let tv = DeviceController::new(config, Arc::new(remote), Arc::new(store), EventBus::new());
//! tv.initialize().await;
//! tv.sync_power(&sensor).await;
//! tv.set_channel(42).await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod remote;
mod sensor;

pub use client::{EntityState, HomeAssistantClient, HomeAssistantConfig};
pub use remote::HomeAssistantRemote;
pub use sensor::HomeAssistantPowerSensor;
