// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Broadcast channel shared by the manager and its controllers.

use tokio::sync::broadcast;

use super::ApplianceEvent;

/// Fan-out of [`ApplianceEvent`]s.
///
/// Every controller of a manager publishes on a clone of the same bus, so a
/// single subscription sees the whole house. A subscriber that falls more
/// than `capacity` events behind gets `RecvError::Lagged` and skips ahead;
/// publishers never wait.
///
/// # Examples
///
/// ```
/// use smartify_tv::event::{ApplianceEvent, EventBus};
/// use smartify_tv::types::ApplianceId;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let bus = EventBus::with_capacity(16);
/// let mut rx = bus.subscribe();
///
/// let id = ApplianceId::generate();
/// bus.publish(ApplianceEvent::appliance_added(id.clone()));
///
/// assert_eq!(rx.recv().await.unwrap().appliance_id(), &id);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<ApplianceEvent>,
}

impl EventBus {
    /// Events buffered per subscriber by [`EventBus::new`].
    pub const DEFAULT_CAPACITY: usize = 256;

    /// Creates a bus buffering [`DEFAULT_CAPACITY`](Self::DEFAULT_CAPACITY)
    /// events.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Creates a bus buffering `capacity` events per subscriber.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribes to events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ApplianceEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Publishes `event` and returns how many subscribers received it.
    ///
    /// With nobody listening the event is dropped and `0` is returned.
    pub fn publish(&self, event: ApplianceEvent) -> usize {
        let appliance = event.appliance_id().clone();
        match self.sender.send(event) {
            Ok(receivers) => receivers,
            Err(_) => {
                tracing::trace!(appliance = %appliance, "No event subscribers");
                0
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
