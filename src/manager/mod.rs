// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Appliance manager for coordinating multiple emulated TVs.
//!
//! The [`ApplianceManager`] owns one [`DeviceController`](crate::controller::DeviceController)
//! per configured TV. It provides:
//!
//! - **Centralized appliance management**: add, remove and look up appliances
//! - **Power event routing**: readings of a power sensor reach every TV
//!   that uses it
//! - **Event system**: subscribe to lifecycle and state events of all
//!   appliances via one broadcast channel
//!
//! # Examples
//!
//! ## Event Subscription
//!
//! ```no_run
//! use smartify_tv::event::ApplianceEvent;
//! use smartify_tv::manager::ApplianceManager;
//! use smartify_tv::store::MemoryStore;
//! # use smartify_tv::error::TransportError;
//! # use smartify_tv::transport::{IrTransport, LearnAck};
//! # use smartify_tv::types::{ApplianceId, CommandName};
//! # struct Blaster;
//! # impl IrTransport for Blaster {
//! #     async fn transmit(&self, _: &ApplianceId, _: CommandName) -> Result<(), TransportError> { Ok(()) }
//! #     async fn learn(&self, _: &ApplianceId, _: CommandName) -> Result<LearnAck, TransportError> { Ok(LearnAck::Pending) }
//! #     async fn is_available(&self) -> bool { true }
//! # }
//!
//! # fn example() {
//! let manager: ApplianceManager<Blaster, MemoryStore> = ApplianceManager::new();
//! let mut events = manager.subscribe();
//!
//! tokio::spawn(async move {
//!     while let Ok(event) = events.recv().await {
//!         if let ApplianceEvent::StateChanged { appliance_id, change, .. } = event {
//!             println!("{appliance_id}: {change:?}");
//!         }
//!     }
//! });
//! # }
//! ```

mod appliance_manager;

pub use appliance_manager::{ApplianceManager, PowerEvent};
