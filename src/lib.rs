// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `SmartifyTV` - Turn an IR-controlled TV into a smart media player.
//!
//! A TV driven by an infrared blaster cannot report anything back. This
//! library emulates its remote control on top of two external facilities:
//!
//! - an [`IrTransport`] that sends and learns named IR codes
//!   (for example a Broadlink blaster exposed by Home Assistant)
//! - a [`PowerSource`] measuring the TV's power draw, from which the on/off
//!   state is inferred
//!
//! # Supported Features
//!
//! - **Power inference**: On when the draw is strictly above a threshold (10 W)
//! - **Paced transmissions**: At least 500 ms between two commands of a TV
//! - **Learned-command gating**: Commands the blaster never learned are not sent
//! - **Channel dialing**: Channel numbers sent as a sequence of digit keys
//! - **Optimistic state**: Volume, mute, channel and playback tracked locally
//! - **Learning sessions**: Teach new codes, one session at a time per TV
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use smartify_tv::controller::{ApplianceConfig, RemoteConfig};
//! use smartify_tv::homeassistant::{HomeAssistantConfig, HomeAssistantRemote};
//! use smartify_tv::manager::{ApplianceManager, PowerEvent};
//! use smartify_tv::store::BroadlinkStore;
//! use smartify_tv::transport::RemotePlatform;
//! use smartify_tv::types::{CommandName, PowerReading};
//!
//! #[tokio::main]
//! async fn main() -> smartify_tv::Result<()> {
//!     let client = HomeAssistantConfig::new("http://homeassistant.local:8123", "token")
//!         .into_client()?;
//!     let manager = ApplianceManager::new();
//!
//!     let config = ApplianceConfig::new(
//!         "sensor.tv_plug_power",
//!         RemoteConfig::new("remote.rm4", RemotePlatform::Broadlink),
//!     );
//!     let remote = Arc::new(HomeAssistantRemote::new(client, &config.remote.entity_id));
//!     let store = Arc::new(BroadlinkStore::in_config_dir("/config", "34ea34b43b5a"));
//!     let tv = manager.add(config, remote, store).await;
//!
//!     // Feed power readings as they arrive
//!     manager
//!         .handle_power_event(&PowerEvent::new("sensor.tv_plug_power", PowerReading::parse("83.4")))
//!         .await;
//!
//!     // Teach a code, then use it
//!     tv.learn(CommandName::Mute).await?;
//!     tv.mute().await?;
//!     tv.set_channel(205).await?;
//!     Ok(())
//! }
//! ```

pub mod command;
pub mod controller;
pub mod error;
pub mod event;
#[cfg(feature = "http")]
pub mod homeassistant;
pub mod learning;
pub mod manager;
pub mod monitor;
pub mod state;
pub mod store;
pub mod transport;
pub mod types;

#[cfg(test)]
mod testing;

pub use controller::{ApplianceConfig, DeviceController, MediaKind, Outcome, SkipReason};
pub use error::{Error, Result, StoreError, TransportError, ValueError};
pub use learning::LearnOutcome;
pub use manager::{ApplianceManager, PowerEvent};
pub use transport::{IrTransport, LearnAck, PowerSource, RemotePlatform};
pub use types::{ApplianceId, Channel, CommandName, PowerReading, PowerState};
