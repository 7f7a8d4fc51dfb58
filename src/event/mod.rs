// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event system for appliance state changes.
//!
//! This module provides a pub/sub event system for notifying subscribers about
//! appliance lifecycle and state changes. The [`EventBus`] uses tokio's
//! broadcast channel to allow multiple subscribers to receive events.
//!
//! # Examples
//!
//! ```
//! use smartify_tv::event::{ApplianceEvent, EventBus};
//! use smartify_tv::types::ApplianceId;
//!
//! let bus = EventBus::new();
//!
//! // Subscribe to events
//! let mut rx = bus.subscribe();
//!
//! // Publish an event
//! bus.publish(ApplianceEvent::appliance_added(ApplianceId::generate()));
//! ```

mod appliance_event;
mod event_bus;

pub use appliance_event::ApplianceEvent;
pub use event_bus::EventBus;
