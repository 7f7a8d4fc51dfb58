// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-appliance controller.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::watch;

use super::{ApplianceConfig, MediaKind, Outcome, SkipReason};
use crate::command::{
    CatalogSnapshot, ChannelSequencer, CommandCatalog, CommandDispatcher, CommandPacer,
    DispatchOutcome, PacingLane,
};
use crate::error::{Result, ValueError};
use crate::event::{ApplianceEvent, EventBus};
use crate::learning::{LearnOutcome, LearningSession, LearningTarget};
use crate::monitor::PowerStateMonitor;
use crate::state::{ApplianceState, PlaybackAction, PlaybackState, StateChange};
use crate::store::LearnedCommandStore;
use crate::transport::{IrTransport, PowerSource};
use crate::types::{
    ApplianceId, Channel, CommandName, DerivedState, PowerReading, PowerState, VolumeLevel,
};

/// Emulates the remote control of one TV.
///
/// Owns everything that belongs to a single appliance: the pacing lane, the
/// learned-command catalog, the learning session and the tracked state.
/// Intents issued concurrently are serialized on the pacing lane; power
/// readings only touch the state and never wait for it.
///
/// State changes are published on the shared [`EventBus`] and on a
/// per-controller watch channel.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use smartify_tv::controller::{ApplianceConfig, DeviceController, Outcome, RemoteConfig};
/// use smartify_tv::error::TransportError;
/// use smartify_tv::event::EventBus;
/// use smartify_tv::store::MemoryStore;
/// use smartify_tv::transport::{IrTransport, LearnAck, RemotePlatform};
/// use smartify_tv::types::{ApplianceId, CommandName, PowerReading, PowerState};
///
/// struct Blaster;
///
/// impl IrTransport for Blaster {
///     async fn transmit(&self, _: &ApplianceId, _: CommandName) -> Result<(), TransportError> {
///         Ok(())
///     }
///     async fn learn(&self, _: &ApplianceId, _: CommandName) -> Result<LearnAck, TransportError> {
///         Ok(LearnAck::Pending)
///     }
///     async fn is_available(&self) -> bool {
///         true
///     }
/// }
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> smartify_tv::Result<()> {
/// let config = ApplianceConfig::new(
///     "sensor.tv_power",
///     RemoteConfig::new("remote.rm4", RemotePlatform::Broadlink),
/// );
/// let store = Arc::new(MemoryStore::new());
/// store.record(&config.id, CommandName::PowerOn, "JgBQ");
///
/// let tv = DeviceController::new(config, Arc::new(Blaster), store, EventBus::new());
/// tv.initialize().await;
///
/// tv.handle_power_reading(&PowerReading::Watts(1.2)).await;
/// assert_eq!(tv.derived_state().power, PowerState::Off);
///
/// assert_eq!(tv.turn_on().await?, Outcome::Sent);
/// assert_eq!(tv.mute().await?, Outcome::NotLearned(vec![CommandName::Mute]));
/// # Ok(())
/// # }
/// ```
pub struct DeviceController<T, S> {
    config: ApplianceConfig,
    monitor: PowerStateMonitor,
    pacer: CommandPacer,
    catalog: Arc<CommandCatalog>,
    dispatcher: CommandDispatcher<T>,
    learning: LearningSession,
    transport: Arc<T>,
    store: Arc<S>,
    state: RwLock<ApplianceState>,
    state_tx: watch::Sender<ApplianceState>,
    events: EventBus,
}

/// Extra attributes exposed to the host for troubleshooting.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Diagnostics {
    /// Appliance identifier.
    pub appliance_id: ApplianceId,
    /// Display name.
    pub name: String,
    /// Entity id of the power sensor.
    pub power_source: String,
    /// Entity id of the remote.
    pub remote_entity: String,
    /// Hardware address of the blaster, when configured.
    pub hardware_address: Option<String>,
    /// Learned commands and last refresh.
    pub catalog: CatalogSnapshot,
    /// Current state.
    pub state: ApplianceState,
}

impl<T, S> DeviceController<T, S>
where
    T: IrTransport,
    S: LearnedCommandStore,
{
    /// Creates a controller with fresh state.
    ///
    /// Nothing is learned until [`initialize`](Self::initialize) loads the
    /// store.
    #[must_use]
    pub fn new(config: ApplianceConfig, transport: Arc<T>, store: Arc<S>, events: EventBus) -> Self {
        let catalog = Arc::new(CommandCatalog::new(config.remote.platform.clone()));
        let dispatcher =
            CommandDispatcher::new(config.id.clone(), Arc::clone(&transport), Arc::clone(&catalog));
        let state = ApplianceState::new();
        let (state_tx, _) = watch::channel(state.clone());

        Self {
            monitor: PowerStateMonitor::new(config.settings.power_threshold),
            pacer: CommandPacer::new(config.settings.pacing_interval()),
            learning: LearningSession::new(config.settings.learning_window()),
            catalog,
            dispatcher,
            transport,
            store,
            state: RwLock::new(state),
            state_tx,
            events,
            config,
        }
    }

    // ========== Identity ==========

    /// Returns the appliance identifier.
    #[must_use]
    pub fn id(&self) -> &ApplianceId {
        &self.config.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ApplianceConfig {
        &self.config
    }

    // ========== Lifecycle ==========

    /// Loads the learned commands. Returns how many were found.
    pub async fn initialize(&self) -> usize {
        let count = self.refresh_learned_commands().await;
        tracing::info!(
            appliance = %self.id(),
            name = %self.name(),
            platform = %self.config.remote.platform,
            learned = count,
            "Appliance initialized"
        );
        count
    }

    /// Reloads the learned commands from the store.
    pub async fn refresh_learned_commands(&self) -> usize {
        self.catalog.refresh(self.id(), self.store.as_ref()).await
    }

    /// Reads `source` once and applies the reading.
    pub async fn sync_power<P: PowerSource>(&self, source: &P) -> DerivedState {
        let reading = source.current_reading().await;
        self.handle_power_reading(&reading).await
    }

    /// Derives power and availability from a new power reading.
    pub async fn handle_power_reading(&self, reading: &PowerReading) -> DerivedState {
        let transport_available = self.transport.is_available().await;
        let derived = self.monitor.observe(reading, transport_available);

        let previous = self.derived_state();
        if self.apply(StateChange::derived(derived)) && previous.power != derived.power {
            tracing::info!(
                appliance = %self.id(),
                power = %derived.power,
                available = derived.available,
                "Power state changed"
            );
        }
        derived
    }

    // ========== Power ==========

    /// Turns the TV on unless it already draws power.
    ///
    /// The derived state is left alone; it changes with the next power
    /// reading.
    ///
    /// # Errors
    ///
    /// Returns `Error::Transport` if the transport refused the command.
    pub async fn turn_on(&self) -> Result<Outcome> {
        let mut lane = self.ready_lane().await;
        if self.derived_state().power == PowerState::On {
            tracing::debug!(appliance = %self.id(), "Already on");
            return Ok(Outcome::Skipped(SkipReason::AlreadyOn));
        }
        Ok(self.send_on(&mut lane, CommandName::PowerOn).await?.into())
    }

    /// Turns the TV off unless it is already off.
    ///
    /// # Errors
    ///
    /// Returns `Error::Transport` if the transport refused the command.
    pub async fn turn_off(&self) -> Result<Outcome> {
        let mut lane = self.ready_lane().await;
        if self.derived_state().power == PowerState::Off {
            tracing::debug!(appliance = %self.id(), "Already off");
            return Ok(Outcome::Skipped(SkipReason::AlreadyOff));
        }
        Ok(self.send_on(&mut lane, CommandName::PowerOff).await?.into())
    }

    // ========== Volume ==========

    /// Presses volume up and raises the local level by one step.
    ///
    /// # Errors
    ///
    /// Returns `Error::Transport` if the transport refused the command.
    pub async fn volume_up(&self) -> Result<Outcome> {
        let mut lane = self.ready_lane().await;
        let outcome = self.send_on(&mut lane, CommandName::VolumeUp).await?;
        let level = self.volume().step_up();
        self.apply(StateChange::Volume(level));
        Ok(outcome.into())
    }

    /// Presses volume down and lowers the local level by one step.
    ///
    /// # Errors
    ///
    /// Returns `Error::Transport` if the transport refused the command.
    pub async fn volume_down(&self) -> Result<Outcome> {
        let mut lane = self.ready_lane().await;
        let outcome = self.send_on(&mut lane, CommandName::VolumeDown).await?;
        let level = self.volume().step_down();
        self.apply(StateChange::Volume(level));
        Ok(outcome.into())
    }

    /// Mutes or unmutes.
    ///
    /// # Errors
    ///
    /// Returns `Error::Transport` if the transport refused the command.
    pub async fn set_mute(&self, muted: bool) -> Result<Outcome> {
        let mut lane = self.ready_lane().await;
        self.send_mute(&mut lane, muted).await
    }

    /// Mutes.
    ///
    /// # Errors
    ///
    /// Returns `Error::Transport` if the transport refused the command.
    pub async fn mute(&self) -> Result<Outcome> {
        self.set_mute(true).await
    }

    /// Flips the mute flag.
    ///
    /// # Errors
    ///
    /// Returns `Error::Transport` if the transport refused the command.
    pub async fn toggle_mute(&self) -> Result<Outcome> {
        let mut lane = self.ready_lane().await;
        let muted = !self.is_muted();
        self.send_mute(&mut lane, muted).await
    }

    async fn send_mute(&self, lane: &mut PacingLane<'_>, muted: bool) -> Result<Outcome> {
        self.apply(StateChange::Muted(muted));
        let command = if muted {
            CommandName::Mute
        } else {
            CommandName::Unmute
        };
        Ok(self.send_on(lane, command).await?.into())
    }

    // ========== Channels ==========

    /// Presses channel up.
    ///
    /// # Errors
    ///
    /// Returns `Error::Transport` if the transport refused the command.
    pub async fn channel_up(&self) -> Result<Outcome> {
        Ok(self.transmit(CommandName::ChannelUp).await?.into())
    }

    /// Presses channel down.
    ///
    /// # Errors
    ///
    /// Returns `Error::Transport` if the transport refused the command.
    pub async fn channel_down(&self) -> Result<Outcome> {
        Ok(self.transmit(CommandName::ChannelDown).await?.into())
    }

    /// Dials a channel number digit by digit.
    ///
    /// The cached channel is updated before the first digit is sent.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` if `number` is outside 1-999 (nothing is sent)
    /// and `Error::Transport` if the transport refused a digit.
    pub async fn set_channel(&self, number: u32) -> Result<Outcome> {
        let channel = Channel::new(number)?;
        self.apply(StateChange::Channel(channel));

        let outcomes = ChannelSequencer::new(&self.pacer, &self.dispatcher)
            .dial(channel)
            .await?;
        Ok(Outcome::from_dispatches(&outcomes))
    }

    /// Plays a piece of media.
    ///
    /// Channels are dialed; every other kind of media is ignored.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` if a channel id is not a number in range, and
    /// `Error::Transport` if the transport refused a digit.
    pub async fn play_media(&self, kind: &MediaKind, media_id: &str) -> Result<Outcome> {
        match kind {
            MediaKind::Channel => {
                let number = media_id
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| ValueError::InvalidMediaId(media_id.to_string()))?;
                self.set_channel(number).await
            }
            MediaKind::Url | MediaKind::App | MediaKind::Other(_) => {
                tracing::debug!(appliance = %self.id(), kind = ?kind, media_id, "Media kind not supported");
                Ok(Outcome::Skipped(SkipReason::Unsupported))
            }
        }
    }

    // ========== Playback ==========

    /// Starts playback.
    ///
    /// # Errors
    ///
    /// Returns `Error::Transport` if the transport refused the command.
    pub async fn play(&self) -> Result<Outcome> {
        self.playback_action(PlaybackAction::Play).await
    }

    /// Pauses playback.
    ///
    /// # Errors
    ///
    /// Returns `Error::Transport` if the transport refused the command.
    pub async fn pause(&self) -> Result<Outcome> {
        self.playback_action(PlaybackAction::Pause).await
    }

    /// Stops playback.
    ///
    /// # Errors
    ///
    /// Returns `Error::Transport` if the transport refused the command.
    pub async fn stop(&self) -> Result<Outcome> {
        self.playback_action(PlaybackAction::Stop).await
    }

    /// Pauses when playing, plays otherwise.
    ///
    /// # Errors
    ///
    /// Returns `Error::Transport` if the transport refused the command.
    pub async fn play_pause(&self) -> Result<Outcome> {
        self.playback_action(PlaybackAction::PlayPause).await
    }

    async fn playback_action(&self, action: PlaybackAction) -> Result<Outcome> {
        let mut lane = self.ready_lane().await;
        let (current, power) = {
            let state = self.state.read();
            (state.playback(), state.power())
        };
        let Some(transition) = action.plan(current, power) else {
            tracing::debug!(appliance = %self.id(), action = ?action, "TV is off, playback ignored");
            return Ok(Outcome::Skipped(SkipReason::PoweredOff));
        };

        let outcome = self.send_on(&mut lane, transition.command).await?;
        self.apply(StateChange::Playback(transition.next));
        Ok(outcome.into())
    }

    // ========== Raw commands and learning ==========

    /// Sends any command of the remote vocabulary.
    ///
    /// # Errors
    ///
    /// Returns `Error::Transport` if the transport refused the command.
    pub async fn send_command(&self, command: CommandName) -> Result<Outcome> {
        Ok(self.transmit(command).await?.into())
    }

    /// Teaches `command` to the blaster.
    ///
    /// Normal commands keep flowing while the session runs.
    ///
    /// # Errors
    ///
    /// Returns `Error::Transport` if the blaster refused to enter learning
    /// mode.
    pub async fn learn(&self, command: CommandName) -> Result<LearnOutcome> {
        let target = LearningTarget {
            appliance: self.id(),
            transport: self.transport.as_ref(),
            catalog: &self.catalog,
            store: self.store.as_ref(),
        };
        self.learning
            .learn(&target, command, |active| {
                self.apply(StateChange::Learning(active));
            })
            .await
    }

    // ========== State ==========

    /// Returns a snapshot of the whole state.
    #[must_use]
    pub fn state(&self) -> ApplianceState {
        self.state.read().clone()
    }

    /// Subscribes to state snapshots.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<ApplianceState> {
        self.state_tx.subscribe()
    }

    /// Returns the derived power state and availability.
    #[must_use]
    pub fn derived_state(&self) -> DerivedState {
        self.state.read().derived()
    }

    /// Returns whether the TV can currently be controlled.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.state.read().is_available()
    }

    /// Returns the optimistic playback state.
    #[must_use]
    pub fn playback(&self) -> PlaybackState {
        self.state.read().playback()
    }

    /// Returns the local volume level.
    #[must_use]
    pub fn volume(&self) -> VolumeLevel {
        self.state.read().volume()
    }

    /// Returns the mute flag.
    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.state.read().is_muted()
    }

    /// Returns the last dialed channel.
    #[must_use]
    pub fn channel(&self) -> Channel {
        self.state.read().channel()
    }

    /// Returns the title shown by media players.
    #[must_use]
    pub fn media_title(&self) -> String {
        self.state.read().media_title()
    }

    /// Returns `true` while a learning session runs.
    #[must_use]
    pub fn is_learning(&self) -> bool {
        self.learning.is_learning()
    }

    /// Returns `true` if `command` can currently be sent.
    #[must_use]
    pub fn is_command_known(&self, command: CommandName) -> bool {
        self.catalog.is_known(command)
    }

    /// Returns extra attributes for troubleshooting.
    #[must_use]
    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics {
            appliance_id: self.config.id.clone(),
            name: self.config.name.clone(),
            power_source: self.config.power_source.clone(),
            remote_entity: self.config.remote.entity_id.clone(),
            hardware_address: self.config.remote.hardware_address.clone(),
            catalog: self.catalog.snapshot(),
            state: self.state(),
        }
    }

    // ========== Internals ==========

    async fn transmit(&self, command: CommandName) -> Result<DispatchOutcome> {
        let mut lane = self.pacer.acquire().await;
        self.send_on(&mut lane, command).await
    }

    /// Takes the lane and waits for a free slot. State read while the lane
    /// is held cannot be changed by another intent.
    async fn ready_lane(&self) -> PacingLane<'_> {
        let lane = self.pacer.acquire().await;
        lane.ready().await;
        lane
    }

    async fn send_on(
        &self,
        lane: &mut PacingLane<'_>,
        command: CommandName,
    ) -> Result<DispatchOutcome> {
        lane.await_slot().await;
        self.dispatcher.send(command).await
    }

    /// Applies a change, then notifies watchers and the event bus.
    fn apply(&self, change: StateChange) -> bool {
        let new_state = {
            let mut state = self.state.write();
            if !state.apply(&change) {
                return false;
            }
            state.clone()
        };

        self.state_tx.send_replace(new_state.clone());
        self.events.publish(ApplianceEvent::state_changed(
            self.config.id.clone(),
            change,
            new_state,
        ));
        true
    }
}

impl<T, S> fmt::Debug for DeviceController<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceController")
            .field("id", &self.config.id)
            .field("name", &self.config.name)
            .field("platform", &self.config.remote.platform)
            .field("state", &*self.state.read())
            .finish_non_exhaustive()
    }
}
