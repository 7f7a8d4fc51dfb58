// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end tests of the appliance manager on a paused clock.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use smartify_tv::controller::{ApplianceConfig, RemoteConfig};
use smartify_tv::error::{TransportError, ValueError};
use smartify_tv::event::ApplianceEvent;
use smartify_tv::learning::LearnOutcome;
use smartify_tv::manager::{ApplianceManager, PowerEvent};
use smartify_tv::state::{PlaybackState, StateChange};
use smartify_tv::store::MemoryStore;
use smartify_tv::transport::{IrTransport, LearnAck, RemotePlatform};
use smartify_tv::types::{ApplianceId, CommandName, PowerReading, PowerState};
use smartify_tv::{DeviceController, Error, Outcome, SkipReason};
use tokio::time::Instant;

const POWER_SENSOR: &str = "sensor.tv_plug_power";
const CODE: &str = "JgBQAAABKJIUEhQ2FBIUEhQSFBIUEhQSFDYUNhQSFDYUNhQ2";

/// Blaster fake that timestamps transmissions and files learned codes into
/// the store.
#[derive(Debug)]
struct FakeBlaster {
    sent: Mutex<Vec<(CommandName, Instant)>>,
    store: Arc<MemoryStore>,
    reachable: AtomicBool,
}

impl FakeBlaster {
    fn new(store: Arc<MemoryStore>) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            store,
            reachable: AtomicBool::new(true),
        }
    }

    fn sent(&self) -> Vec<CommandName> {
        self.sent.lock().iter().map(|(command, _)| *command).collect()
    }

    fn gaps(&self) -> Vec<Duration> {
        self.sent
            .lock()
            .windows(2)
            .map(|pair| pair[1].1 - pair[0].1)
            .collect()
    }
}

impl IrTransport for FakeBlaster {
    async fn transmit(
        &self,
        _appliance: &ApplianceId,
        command: CommandName,
    ) -> Result<(), TransportError> {
        if !self.reachable.load(Ordering::SeqCst) {
            return Err(TransportError::Unavailable("blaster offline".to_string()));
        }
        self.sent.lock().push((command, Instant::now()));
        Ok(())
    }

    async fn learn(
        &self,
        appliance: &ApplianceId,
        command: CommandName,
    ) -> Result<LearnAck, TransportError> {
        self.store.record(appliance, command, CODE);
        Ok(LearnAck::Pending)
    }

    async fn is_available(&self) -> bool {
        self.reachable.load(Ordering::SeqCst)
    }
}

type Controller = DeviceController<FakeBlaster, MemoryStore>;

struct Harness {
    manager: ApplianceManager<FakeBlaster, MemoryStore>,
    tv: Arc<Controller>,
    blaster: Arc<FakeBlaster>,
}

async fn harness(learned: &[CommandName]) -> Harness {
    let id = ApplianceId::new("smartify_tv_living").unwrap();
    let store = Arc::new(MemoryStore::new());
    for command in learned {
        store.record(&id, *command, CODE);
    }

    let config = ApplianceConfig::new(
        POWER_SENSOR,
        RemoteConfig::new("remote.rm4", RemotePlatform::Broadlink),
    )
    .with_id(id)
    .with_name("Living room TV");

    let blaster = Arc::new(FakeBlaster::new(Arc::clone(&store)));
    let manager = ApplianceManager::new();
    let tv = manager.add(config, Arc::clone(&blaster), store).await;

    Harness {
        manager,
        tv,
        blaster,
    }
}

async fn feed(manager: &ApplianceManager<FakeBlaster, MemoryStore>, raw: &str) -> usize {
    manager
        .handle_power_event(&PowerEvent::new(POWER_SENSOR, PowerReading::parse(raw)))
        .await
}

// ============================================================================
// Power inference
// ============================================================================

mod power {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn threshold_is_strict() {
        let h = harness(&[]).await;

        assert_eq!(feed(&h.manager, "10.0").await, 1);
        assert_eq!(h.tv.derived_state().power, PowerState::Off);
        assert!(h.tv.is_available());

        feed(&h.manager, "10.1").await;
        assert_eq!(h.tv.derived_state().power, PowerState::On);
    }

    #[tokio::test(start_paused = true)]
    async fn unreachable_blaster_makes_tv_unavailable() {
        let h = harness(&[]).await;
        h.blaster.reachable.store(false, Ordering::SeqCst);

        feed(&h.manager, "120").await;

        assert_eq!(h.tv.derived_state().power, PowerState::On);
        assert!(!h.tv.is_available());
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_sensor_makes_tv_unavailable() {
        let h = harness(&[]).await;
        feed(&h.manager, "120").await;

        feed(&h.manager, "unknown").await;

        assert_eq!(h.tv.derived_state().power, PowerState::Off);
        assert!(!h.tv.is_available());
    }

    #[tokio::test(start_paused = true)]
    async fn other_sources_are_ignored() {
        let h = harness(&[]).await;

        let reached = h
            .manager
            .handle_power_event(&PowerEvent::new("sensor.kettle", PowerReading::Watts(2000.0)))
            .await;

        assert_eq!(reached, 0);
        assert_eq!(h.tv.derived_state().power, PowerState::Off);
    }

    #[tokio::test(start_paused = true)]
    async fn turn_on_is_skipped_when_already_on() {
        let h = harness(&[CommandName::PowerOn, CommandName::PowerOff]).await;
        feed(&h.manager, "95").await;

        assert_eq!(h.tv.turn_on().await.unwrap(), Outcome::Skipped(SkipReason::AlreadyOn));
        assert_eq!(h.tv.turn_off().await.unwrap(), Outcome::Sent);
        assert_eq!(h.blaster.sent(), vec![CommandName::PowerOff]);
    }
}

// ============================================================================
// Pacing and gating
// ============================================================================

mod commands {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn concurrent_commands_are_spaced() {
        let h = harness(&[CommandName::VolumeUp, CommandName::ChannelUp, CommandName::Mute]).await;

        let (a, b, c) = tokio::join!(h.tv.volume_up(), h.tv.channel_up(), h.tv.mute());
        assert!(a.unwrap().is_sent());
        assert!(b.unwrap().is_sent());
        assert!(c.unwrap().is_sent());

        assert_eq!(h.blaster.sent().len(), 3);
        for gap in h.blaster.gaps() {
            assert!(gap >= Duration::from_millis(500), "gap {gap:?} too short");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn unlearned_command_is_not_sent() {
        let h = harness(&[]).await;

        let outcome = h.tv.send_command(CommandName::Source).await.unwrap();

        assert_eq!(outcome, Outcome::NotLearned(vec![CommandName::Source]));
        assert!(h.blaster.sent().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn transport_failure_is_an_error() {
        let h = harness(&[CommandName::Exit]).await;
        h.blaster.reachable.store(false, Ordering::SeqCst);

        let err = h.tv.send_command(CommandName::Exit).await.unwrap_err();
        assert!(matches!(err, Error::Transport(TransportError::Unavailable(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn volume_is_tracked_optimistically() {
        let h = harness(&[CommandName::VolumeUp, CommandName::VolumeDown]).await;

        h.tv.volume_up().await.unwrap();
        h.tv.volume_up().await.unwrap();
        h.tv.volume_down().await.unwrap();

        assert_eq!(h.tv.volume().tenths(), 3);
    }
}

// ============================================================================
// Channels
// ============================================================================

mod channels {
    use super::*;

    const DIGITS: [CommandName; 10] = [
        CommandName::Key0,
        CommandName::Key1,
        CommandName::Key2,
        CommandName::Key3,
        CommandName::Key4,
        CommandName::Key5,
        CommandName::Key6,
        CommandName::Key7,
        CommandName::Key8,
        CommandName::Key9,
    ];

    #[tokio::test(start_paused = true)]
    async fn dials_digits_in_order_with_gaps() {
        let h = harness(&DIGITS).await;

        let outcome = h.tv.set_channel(205).await.unwrap();

        assert_eq!(outcome, Outcome::Sent);
        assert_eq!(
            h.blaster.sent(),
            vec![CommandName::Key2, CommandName::Key0, CommandName::Key5]
        );
        for gap in h.blaster.gaps() {
            assert!(gap >= Duration::from_millis(500));
        }
        assert_eq!(h.tv.channel().value(), 205);
        assert_eq!(h.tv.media_title(), "Channel 205");
    }

    #[tokio::test(start_paused = true)]
    async fn out_of_range_channel_sends_nothing() {
        let h = harness(&DIGITS).await;

        for number in [0, 1000] {
            let err = h.tv.set_channel(number).await.unwrap_err();
            assert!(matches!(
                err,
                Error::Value(ValueError::ChannelOutOfRange { actual, .. }) if actual == number
            ));
        }
        assert!(h.blaster.sent().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn interleaved_command_waits_for_sequence() {
        let h = harness(&[CommandName::Key1, CommandName::Key2, CommandName::Mute]).await;

        let (dial, mute) = tokio::join!(h.tv.set_channel(12), async {
            tokio::task::yield_now().await;
            h.tv.mute().await
        });
        dial.unwrap();
        mute.unwrap();

        assert_eq!(
            h.blaster.sent(),
            vec![CommandName::Key1, CommandName::Key2, CommandName::Mute]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn missing_digit_is_reported() {
        let h = harness(&[CommandName::Key4]).await;

        let outcome = h.tv.set_channel(42).await.unwrap();

        assert_eq!(outcome, Outcome::NotLearned(vec![CommandName::Key2]));
        assert_eq!(h.blaster.sent(), vec![CommandName::Key4]);
    }
}

// ============================================================================
// Playback
// ============================================================================

mod playback {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn ignored_while_off() {
        let h = harness(&[CommandName::Play]).await;

        assert_eq!(h.tv.play().await.unwrap(), Outcome::Skipped(SkipReason::PoweredOff));
        assert!(h.blaster.sent().is_empty());
        assert_eq!(h.tv.playback(), PlaybackState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn play_pause_toggles() {
        let h = harness(&[CommandName::Play, CommandName::Pause, CommandName::Stop]).await;
        feed(&h.manager, "70").await;

        h.tv.play_pause().await.unwrap();
        assert_eq!(h.tv.playback(), PlaybackState::Playing);
        h.tv.play_pause().await.unwrap();
        assert_eq!(h.tv.playback(), PlaybackState::Paused);
        h.tv.stop().await.unwrap();
        assert_eq!(h.tv.playback(), PlaybackState::Idle);

        assert_eq!(
            h.blaster.sent(),
            vec![CommandName::Play, CommandName::Pause, CommandName::Stop]
        );
    }
}

// ============================================================================
// Learning
// ============================================================================

mod learning {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn learned_command_becomes_sendable() {
        let h = harness(&[]).await;
        assert!(!h.tv.is_command_known(CommandName::Mute));

        let started = Instant::now();
        let outcome = h.tv.learn(CommandName::Mute).await.unwrap();

        assert_eq!(outcome, LearnOutcome::Finished { learned: true });
        assert!(started.elapsed() >= Duration::from_secs(35));
        assert!(!h.tv.is_learning());
        assert_eq!(h.tv.mute().await.unwrap(), Outcome::Sent);
    }

    #[tokio::test(start_paused = true)]
    async fn second_session_is_refused() {
        let h = harness(&[]).await;

        let (first, second) = tokio::join!(h.tv.learn(CommandName::Key1), async {
            tokio::task::yield_now().await;
            assert!(h.tv.is_learning());
            h.tv.learn(CommandName::Key2).await
        });

        assert_eq!(first.unwrap(), LearnOutcome::Finished { learned: true });
        assert_eq!(second.unwrap(), LearnOutcome::AlreadyInProgress);
        assert!(!h.tv.is_command_known(CommandName::Key2));
    }

    #[tokio::test(start_paused = true)]
    async fn commands_flow_during_learning() {
        let h = harness(&[CommandName::VolumeUp]).await;

        let (learned, volume) = tokio::join!(h.tv.learn(CommandName::Key1), async {
            tokio::task::yield_now().await;
            let sent = h.tv.volume_up().await;
            (sent, h.tv.is_learning())
        });

        learned.unwrap();
        assert!(volume.0.unwrap().is_sent());
        assert!(volume.1, "volume must be sent while the window is open");
    }
}

// ============================================================================
// Events
// ============================================================================

mod events {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn state_changes_are_published() {
        let h = harness(&[CommandName::Mute]).await;
        let mut events = h.manager.subscribe();
        let mut watch = h.tv.watch();

        h.tv.mute().await.unwrap();

        let event = events.recv().await.unwrap();
        match event {
            ApplianceEvent::StateChanged {
                change, new_state, ..
            } => {
                assert_eq!(change, StateChange::Muted(true));
                assert!(new_state.is_muted());
            }
            other => panic!("unexpected event: {other:?}"),
        }

        assert!(watch.has_changed().unwrap());
        assert!(watch.borrow_and_update().is_muted());
    }

    #[tokio::test(start_paused = true)]
    async fn removed_appliance_stops_receiving_readings() {
        let h = harness(&[]).await;
        let id = h.tv.id().clone();

        assert!(h.manager.remove(&id).await);
        assert_eq!(feed(&h.manager, "120").await, 0);
        assert!(matches!(h.manager.require(&id).await, Err(Error::ApplianceNotFound)));
    }
}
