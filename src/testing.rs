// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-crate fakes for unit tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use tokio::time::Instant;

use crate::error::TransportError;
use crate::store::MemoryStore;
use crate::transport::{IrTransport, LearnAck, PowerSource};
use crate::types::{ApplianceId, CommandName, PowerReading};

/// Transport that records what it was asked to do.
#[derive(Debug)]
pub(crate) struct RecordingTransport {
    sent: Mutex<Vec<(CommandName, Instant)>>,
    learned: Mutex<Vec<CommandName>>,
    available: AtomicBool,
    fail: AtomicBool,
    learn_ack: Mutex<LearnAck>,
    store: Option<Arc<MemoryStore>>,
}

impl RecordingTransport {
    pub(crate) fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            learned: Mutex::new(Vec::new()),
            available: AtomicBool::new(true),
            fail: AtomicBool::new(false),
            learn_ack: Mutex::new(LearnAck::Pending),
            store: None,
        }
    }

    /// Learned codes are written into `store`, like a real blaster would.
    pub(crate) fn with_store(mut self, store: Arc<MemoryStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub(crate) fn sent(&self) -> Vec<CommandName> {
        self.sent.lock().iter().map(|(command, _)| *command).collect()
    }

    pub(crate) fn sent_at(&self) -> Vec<(CommandName, Instant)> {
        self.sent.lock().clone()
    }

    pub(crate) fn learned(&self) -> Vec<CommandName> {
        self.learned.lock().clone()
    }

    pub(crate) fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub(crate) fn fail_transmissions(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn set_learn_ack(&self, ack: LearnAck) {
        *self.learn_ack.lock() = ack;
    }
}

impl IrTransport for RecordingTransport {
    async fn transmit(
        &self,
        _appliance: &ApplianceId,
        command: CommandName,
    ) -> Result<(), TransportError> {
        if self.fail.load(Ordering::SeqCst) {
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
        if self.fail.load(Ordering::SeqCst) {
            return Err(TransportError::Unavailable("blaster offline".to_string()));
        }
        self.learned.lock().push(command);
        if let Some(store) = &self.store {
            store.record(appliance, command, "learned");
        }
        Ok(*self.learn_ack.lock())
    }

    async fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }
}

/// Power source returning a settable reading.
#[derive(Debug)]
pub(crate) struct FixedPowerSource(Mutex<PowerReading>);

impl FixedPowerSource {
    pub(crate) fn new(reading: PowerReading) -> Self {
        Self(Mutex::new(reading))
    }
}

impl PowerSource for FixedPowerSource {
    async fn current_reading(&self) -> PowerReading {
        self.0.lock().clone()
    }
}
