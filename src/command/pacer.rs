// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Minimum spacing between transmissions.

use std::time::Duration;

use tokio::sync::{Mutex, MutexGuard};
use tokio::time::Instant;

/// Time of the last transmission of one appliance.
///
/// Timestamps come from tokio's clock so that a paused runtime controls them.
#[derive(Debug, Default)]
pub struct PacingClock {
    last: Option<Instant>,
}

impl PacingClock {
    /// Creates a clock that has never seen a transmission.
    #[must_use]
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Returns when the last slot was granted.
    #[must_use]
    pub const fn last_transmission(&self) -> Option<Instant> {
        self.last
    }

    /// Waits until at least `interval` has passed since the last slot
    /// without taking a new one.
    pub async fn ready(&self, interval: Duration) {
        if let Some(last) = self.last {
            let ready_at = last + interval;
            if Instant::now() < ready_at {
                tracing::trace!(wait = ?(ready_at - Instant::now()), "Pacing transmission");
                tokio::time::sleep_until(ready_at).await;
            }
        }
    }

    /// Waits until at least `interval` has passed since the last slot, then
    /// records the current instant as the new last slot.
    pub async fn await_slot(&mut self, interval: Duration) {
        self.ready(interval).await;
        self.last = Some(Instant::now());
    }
}

/// Serializes the transmissions of one appliance.
///
/// Callers take a [`PacingLane`], wait for a slot on it and send while still
/// holding it. A sequence of commands keeps the same lane from first to last
/// so nothing else is sent in between.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use smartify_tv::command::CommandPacer;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let pacer = CommandPacer::new(Duration::from_millis(10));
///
/// let mut lane = pacer.acquire().await;
/// lane.await_slot().await;
/// // transmit here
/// lane.await_slot().await;
/// // the second transmission is at least 10 ms after the first
/// # }
/// ```
#[derive(Debug)]
pub struct CommandPacer {
    interval: Duration,
    clock: Mutex<PacingClock>,
}

impl CommandPacer {
    /// Default gap between two transmissions.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);

    /// Creates a pacer with the given minimum gap.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            clock: Mutex::new(PacingClock::new()),
        }
    }

    /// Returns the minimum gap between two transmissions.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Takes exclusive use of the appliance's transmission lane.
    ///
    /// Waits while another command or sequence holds it.
    pub async fn acquire(&self) -> PacingLane<'_> {
        PacingLane {
            clock: self.clock.lock().await,
            interval: self.interval,
        }
    }
}

impl Default for CommandPacer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INTERVAL)
    }
}

/// Exclusive access to an appliance's pacing clock.
///
/// Released when dropped.
#[derive(Debug)]
pub struct PacingLane<'a> {
    clock: MutexGuard<'a, PacingClock>,
    interval: Duration,
}

impl PacingLane<'_> {
    /// Waits until a slot is free, leaving it untaken.
    ///
    /// A following [`await_slot`](Self::await_slot) on the same lane returns
    /// at once, so a caller may inspect state in between and still decide
    /// not to transmit.
    pub async fn ready(&self) {
        self.clock.ready(self.interval).await;
    }

    /// Waits for the next transmission slot.
    pub async fn await_slot(&mut self) {
        self.clock.await_slot(self.interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn first_slot_is_immediate() {
        let mut clock = PacingClock::new();
        let start = Instant::now();
        clock.await_slot(Duration::from_millis(500)).await;
        assert_eq!(Instant::now(), start);
        assert_eq!(clock.last_transmission(), Some(start));
    }

    #[tokio::test(start_paused = true)]
    async fn second_slot_waits_remainder() {
        let mut clock = PacingClock::new();
        let start = Instant::now();
        clock.await_slot(Duration::from_millis(500)).await;

        tokio::time::advance(Duration::from_millis(200)).await;
        clock.await_slot(Duration::from_millis(500)).await;

        assert_eq!(Instant::now() - start, Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn ready_waits_without_taking_the_slot() {
        let pacer = CommandPacer::new(Duration::from_millis(500));
        let mut lane = pacer.acquire().await;
        lane.await_slot().await;
        let first = Instant::now();

        lane.ready().await;
        assert_eq!(Instant::now() - first, Duration::from_millis(500));
        assert_eq!(lane.clock.last_transmission(), Some(first));

        lane.await_slot().await;
        assert_eq!(Instant::now() - first, Duration::from_millis(500));
        assert_eq!(lane.clock.last_transmission(), Some(Instant::now()));
    }

    #[tokio::test(start_paused = true)]
    async fn no_wait_after_long_idle() {
        let mut clock = PacingClock::new();
        clock.await_slot(Duration::from_millis(500)).await;
        tokio::time::advance(Duration::from_secs(3)).await;

        let before = Instant::now();
        clock.await_slot(Duration::from_millis(500)).await;
        assert_eq!(Instant::now(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn lanes_are_exclusive() {
        let pacer = CommandPacer::default();
        let lane = pacer.acquire().await;

        let second = tokio::time::timeout(Duration::from_secs(5), pacer.acquire()).await;
        assert!(second.is_err());

        drop(lane);
        let mut lane = pacer.acquire().await;
        lane.await_slot().await;
    }

    #[tokio::test(start_paused = true)]
    async fn gaps_hold_across_lanes() {
        let pacer = CommandPacer::new(Duration::from_millis(300));
        let mut stamps = Vec::new();
        for _ in 0..4 {
            let mut lane = pacer.acquire().await;
            lane.await_slot().await;
            stamps.push(Instant::now());
        }
        for pair in stamps.windows(2) {
            assert!(pair[1] - pair[0] >= Duration::from_millis(300));
        }
    }
}
