// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Appliance manager for coordinating multiple emulated TVs.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tokio::sync::{RwLock, broadcast, watch};

use crate::controller::{ApplianceConfig, DeviceController};
use crate::error::Error;
use crate::event::{ApplianceEvent, EventBus};
use crate::state::ApplianceState;
use crate::store::LearnedCommandStore;
use crate::transport::IrTransport;
use crate::types::{ApplianceId, PowerReading};

/// A new reading of a power sensor.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerEvent {
    /// Entity id of the sensor.
    pub source: String,
    /// The new reading.
    pub reading: PowerReading,
}

impl PowerEvent {
    /// Creates a power event.
    #[must_use]
    pub fn new(source: impl Into<String>, reading: PowerReading) -> Self {
        Self {
            source: source.into(),
            reading,
        }
    }
}

/// Manager for coordinating multiple emulated TVs.
///
/// Each appliance gets its own controller with its own pacing lane, catalog
/// and learning session. Controllers are handed out as `Arc`s; an intent
/// still running when its appliance is removed runs to completion.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use smartify_tv::controller::{ApplianceConfig, RemoteConfig};
/// use smartify_tv::manager::{ApplianceManager, PowerEvent};
/// use smartify_tv::store::MemoryStore;
/// use smartify_tv::transport::RemotePlatform;
/// use smartify_tv::types::PowerReading;
/// # use smartify_tv::error::TransportError;
/// # use smartify_tv::transport::{IrTransport, LearnAck};
/// # use smartify_tv::types::{ApplianceId, CommandName};
/// # struct Blaster;
/// # impl IrTransport for Blaster {
/// #     async fn transmit(&self, _: &ApplianceId, _: CommandName) -> Result<(), TransportError> { Ok(()) }
/// #     async fn learn(&self, _: &ApplianceId, _: CommandName) -> Result<LearnAck, TransportError> { Ok(LearnAck::Pending) }
/// #     async fn is_available(&self) -> bool { true }
/// # }
///
/// #[tokio::main]
/// async fn main() -> smartify_tv::Result<()> {
///     let manager = ApplianceManager::new();
///     let store = Arc::new(MemoryStore::new());
///
///     let config = ApplianceConfig::new(
///         "sensor.tv_power",
///         RemoteConfig::new("remote.rm4", RemotePlatform::Broadlink),
///     );
///     let tv = manager.add(config, Arc::new(Blaster), store).await;
///
///     manager
///         .handle_power_event(&PowerEvent::new("sensor.tv_power", PowerReading::Watts(75.0)))
///         .await;
///
///     tv.volume_up().await?;
///     Ok(())
/// }
/// ```
pub struct ApplianceManager<T, S> {
    /// Controllers, keyed by appliance ID.
    appliances: Arc<RwLock<HashMap<ApplianceId, Arc<DeviceController<T, S>>>>>,
    /// Event bus shared with every controller.
    event_bus: EventBus,
}

impl<T, S> ApplianceManager<T, S>
where
    T: IrTransport,
    S: LearnedCommandStore,
{
    /// Creates an empty manager.
    #[must_use]
    pub fn new() -> Self {
        Self::with_event_bus(EventBus::new())
    }

    /// Creates a manager with a custom event bus capacity.
    #[must_use]
    pub fn with_capacity(event_capacity: usize) -> Self {
        Self::with_event_bus(EventBus::with_capacity(event_capacity))
    }

    fn with_event_bus(event_bus: EventBus) -> Self {
        Self {
            appliances: Arc::new(RwLock::new(HashMap::new())),
            event_bus,
        }
    }

    // =========================================================================
    // Subscription
    // =========================================================================

    /// Subscribes to the events of all appliances.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ApplianceEvent> {
        self.event_bus.subscribe()
    }

    /// Returns the number of active event subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.event_bus.subscriber_count()
    }

    // =========================================================================
    // Appliance Management
    // =========================================================================

    /// Adds an appliance and loads its learned commands.
    ///
    /// An appliance already registered under the same ID is replaced by a
    /// controller with fresh state.
    pub async fn add(
        &self,
        config: ApplianceConfig,
        transport: Arc<T>,
        store: Arc<S>,
    ) -> Arc<DeviceController<T, S>> {
        let appliance_id = config.id.clone();
        let controller = Arc::new(DeviceController::new(
            config,
            transport,
            store,
            self.event_bus.clone(),
        ));
        controller.initialize().await;

        let replaced = self
            .appliances
            .write()
            .await
            .insert(appliance_id.clone(), Arc::clone(&controller))
            .is_some();
        if replaced {
            tracing::info!(appliance = %appliance_id, "Appliance reloaded");
        }

        self.event_bus
            .publish(ApplianceEvent::appliance_added(appliance_id));

        controller
    }

    /// Removes an appliance.
    ///
    /// Returns `true` if the appliance was found and removed.
    pub async fn remove(&self, appliance_id: &ApplianceId) -> bool {
        let removed = self.appliances.write().await.remove(appliance_id).is_some();

        if removed {
            self.event_bus
                .publish(ApplianceEvent::appliance_removed(appliance_id.clone()));
        }

        removed
    }

    /// Returns the controller of an appliance.
    pub async fn get(&self, appliance_id: &ApplianceId) -> Option<Arc<DeviceController<T, S>>> {
        self.appliances.read().await.get(appliance_id).cloned()
    }

    /// Returns the controller of an appliance, or an error if it is unknown.
    ///
    /// # Errors
    ///
    /// Returns `Error::ApplianceNotFound` if no appliance has this ID.
    pub async fn require(
        &self,
        appliance_id: &ApplianceId,
    ) -> Result<Arc<DeviceController<T, S>>, Error> {
        self.get(appliance_id).await.ok_or(Error::ApplianceNotFound)
    }

    /// Returns a list of all appliance IDs.
    pub async fn ids(&self) -> Vec<ApplianceId> {
        self.appliances.read().await.keys().cloned().collect()
    }

    /// Returns the number of managed appliances.
    pub async fn len(&self) -> usize {
        self.appliances.read().await.len()
    }

    /// Returns `true` if no appliance is managed.
    pub async fn is_empty(&self) -> bool {
        self.appliances.read().await.is_empty()
    }

    // =========================================================================
    // State
    // =========================================================================

    /// Returns the current state of an appliance.
    pub async fn state(&self, appliance_id: &ApplianceId) -> Option<ApplianceState> {
        self.get(appliance_id).await.map(|controller| controller.state())
    }

    /// Returns a watch receiver for an appliance's state.
    pub async fn watch(&self, appliance_id: &ApplianceId) -> Option<watch::Receiver<ApplianceState>> {
        self.get(appliance_id).await.map(|controller| controller.watch())
    }

    // =========================================================================
    // Power Events
    // =========================================================================

    /// Delivers a power reading to every appliance using its sensor.
    ///
    /// Returns the number of appliances that received it.
    pub async fn handle_power_event(&self, event: &PowerEvent) -> usize {
        let targets: Vec<_> = self
            .appliances
            .read()
            .await
            .values()
            .filter(|controller| controller.config().power_source == event.source)
            .cloned()
            .collect();

        for controller in &targets {
            controller.handle_power_reading(&event.reading).await;
        }

        if targets.is_empty() {
            tracing::trace!(source = %event.source, "Power event for unknown sensor");
        }
        targets.len()
    }

    /// Delivers power events until the sending side closes.
    ///
    /// Events dropped because this consumer fell behind are logged and
    /// skipped; the next reading of the same sensor supersedes them.
    pub async fn run_power_events(&self, mut events: broadcast::Receiver<PowerEvent>) {
        loop {
            match events.recv().await {
                Ok(event) => {
                    self.handle_power_event(&event).await;
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Power event consumer lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::debug!("Power event stream closed");
                    break;
                }
            }
        }
    }
}

impl<T, S> Default for ApplianceManager<T, S>
where
    T: IrTransport,
    S: LearnedCommandStore,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S> Clone for ApplianceManager<T, S> {
    fn clone(&self) -> Self {
        Self {
            appliances: Arc::clone(&self.appliances),
            event_bus: self.event_bus.clone(),
        }
    }
}

impl<T, S> fmt::Debug for ApplianceManager<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApplianceManager")
            .field("event_bus", &self.event_bus)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::RemoteConfig;
    use crate::store::MemoryStore;
    use crate::testing::RecordingTransport;
    use crate::transport::RemotePlatform;
    use crate::types::{CommandName, PowerState};

    type Manager = ApplianceManager<RecordingTransport, MemoryStore>;

    fn config(power_source: &str) -> ApplianceConfig {
        ApplianceConfig::new(
            power_source,
            RemoteConfig::new("remote.rm", RemotePlatform::Broadlink),
        )
    }

    async fn add(manager: &Manager, power_source: &str) -> Arc<DeviceController<RecordingTransport, MemoryStore>> {
        manager
            .add(
                config(power_source),
                Arc::new(RecordingTransport::new()),
                Arc::new(MemoryStore::new()),
            )
            .await
    }

    #[tokio::test]
    async fn new_manager_is_empty() {
        let manager = Manager::new();

        assert_eq!(manager.len().await, 0);
        assert!(manager.is_empty().await);
        assert!(manager.ids().await.is_empty());
    }

    #[tokio::test]
    async fn add_publishes_event() {
        let manager = Manager::new();
        let mut events = manager.subscribe();

        let tv = add(&manager, "sensor.a").await;

        let event = events.recv().await.unwrap();
        assert!(
            matches!(event, ApplianceEvent::ApplianceAdded { ref appliance_id } if appliance_id == tv.id())
        );
        assert_eq!(manager.len().await, 1);
        assert!(manager.ids().await.contains(tv.id()));
    }

    #[tokio::test]
    async fn add_loads_learned_commands() {
        let manager = Manager::new();
        let config = config("sensor.a");
        let store = Arc::new(MemoryStore::new());
        store.record(&config.id, CommandName::Mute, "x");

        let tv = manager
            .add(config, Arc::new(RecordingTransport::new()), store)
            .await;
        assert!(tv.is_command_known(CommandName::Mute));
    }

    #[tokio::test]
    async fn remove_publishes_event() {
        let manager = Manager::new();
        let tv = add(&manager, "sensor.a").await;
        let mut events = manager.subscribe();

        assert!(manager.remove(tv.id()).await);
        assert!(!manager.remove(tv.id()).await);

        let event = events.recv().await.unwrap();
        assert!(
            matches!(event, ApplianceEvent::ApplianceRemoved { ref appliance_id } if appliance_id == tv.id())
        );
        assert!(manager.get(tv.id()).await.is_none());
    }

    #[tokio::test]
    async fn require_unknown_appliance_fails() {
        let manager = Manager::new();
        let err = manager
            .require(&ApplianceId::generate())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ApplianceNotFound));
        assert!(manager.state(&ApplianceId::generate()).await.is_none());
        assert!(manager.watch(&ApplianceId::generate()).await.is_none());
    }

    #[tokio::test]
    async fn power_events_reach_matching_appliances() {
        let manager = Manager::new();
        let a = add(&manager, "sensor.shared").await;
        let b = add(&manager, "sensor.shared").await;
        let c = add(&manager, "sensor.other").await;

        let delivered = manager
            .handle_power_event(&PowerEvent::new("sensor.shared", PowerReading::Watts(50.0)))
            .await;

        assert_eq!(delivered, 2);
        assert_eq!(a.derived_state().power, PowerState::On);
        assert_eq!(b.derived_state().power, PowerState::On);
        assert_eq!(c.derived_state().power, PowerState::Off);
        assert!(!c.is_available());
    }

    #[tokio::test]
    async fn run_power_events_drains_until_closed() {
        let manager = Manager::new();
        let tv = add(&manager, "sensor.a").await;
        let (tx, rx) = broadcast::channel(8);

        tx.send(PowerEvent::new("sensor.a", PowerReading::Watts(80.0)))
            .unwrap();
        tx.send(PowerEvent::new("sensor.a", PowerReading::Unavailable))
            .unwrap();
        drop(tx);

        manager.run_power_events(rx).await;

        assert_eq!(tv.derived_state().power, PowerState::Off);
        assert!(!tv.is_available());
    }

    #[tokio::test]
    async fn lagged_events_are_skipped() {
        let manager = Manager::new();
        let tv = add(&manager, "sensor.a").await;
        let (tx, rx) = broadcast::channel(1);

        tx.send(PowerEvent::new("sensor.a", PowerReading::Watts(1.0)))
            .unwrap();
        tx.send(PowerEvent::new("sensor.a", PowerReading::Watts(99.0)))
            .unwrap();
        drop(tx);

        manager.run_power_events(rx).await;
        assert_eq!(tv.derived_state().power, PowerState::On);
    }

    #[tokio::test]
    async fn clone_shares_appliances() {
        let manager = Manager::new();
        let clone = manager.clone();
        add(&manager, "sensor.a").await;
        assert_eq!(clone.len().await, 1);
    }
}
