// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Channel dialing as a paced sequence of digit keys.

use super::{CommandDispatcher, CommandPacer, DispatchOutcome};
use crate::error::Result;
use crate::transport::IrTransport;
use crate::types::Channel;

/// Dials a channel number one digit key at a time.
///
/// The whole sequence runs on a single pacing lane: no other command of the
/// appliance can slip between two digits.
#[derive(Debug)]
pub struct ChannelSequencer<'a, T> {
    pacer: &'a CommandPacer,
    dispatcher: &'a CommandDispatcher<T>,
}

impl<'a, T: IrTransport> ChannelSequencer<'a, T> {
    /// Creates a sequencer over an appliance's pacer and dispatcher.
    #[must_use]
    pub const fn new(pacer: &'a CommandPacer, dispatcher: &'a CommandDispatcher<T>) -> Self {
        Self { pacer, dispatcher }
    }

    /// Sends the digit keys of `channel`, most significant first.
    ///
    /// Digits that were never learned are skipped without aborting the
    /// sequence.
    ///
    /// # Errors
    ///
    /// Returns `Error::Transport` on the first digit the transport refuses;
    /// the remaining digits are not sent.
    pub async fn dial(&self, channel: Channel) -> Result<Vec<DispatchOutcome>> {
        let digits = channel.digit_commands();
        tracing::debug!(
            appliance = %self.dispatcher.appliance(),
            channel = channel.value(),
            digits = digits.len(),
            "Dialing channel"
        );

        let mut lane = self.pacer.acquire().await;
        let mut outcomes = Vec::with_capacity(digits.len());
        for digit in digits {
            lane.await_slot().await;
            outcomes.push(self.dispatcher.send(digit).await?);
        }
        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::command::CommandCatalog;
    use crate::testing::RecordingTransport;
    use crate::transport::RemotePlatform;
    use crate::types::{ApplianceId, CommandName};

    fn setup() -> (CommandPacer, CommandDispatcher<RecordingTransport>, Arc<RecordingTransport>) {
        let transport = Arc::new(RecordingTransport::new());
        let catalog = Arc::new(CommandCatalog::new(RemotePlatform::Other("any".into())));
        let dispatcher =
            CommandDispatcher::new(ApplianceId::new("tv").unwrap(), Arc::clone(&transport), catalog);
        (CommandPacer::default(), dispatcher, transport)
    }

    #[tokio::test(start_paused = true)]
    async fn dials_digits_in_order_with_gaps() {
        let (pacer, dispatcher, transport) = setup();
        let sequencer = ChannelSequencer::new(&pacer, &dispatcher);

        let outcomes = sequencer.dial(Channel::new(205).unwrap()).await.unwrap();
        assert!(outcomes.iter().all(DispatchOutcome::is_sent));

        let sent = transport.sent_at();
        let commands: Vec<_> = sent.iter().map(|(c, _)| *c).collect();
        assert_eq!(
            commands,
            vec![CommandName::Key2, CommandName::Key0, CommandName::Key5]
        );
        for pair in sent.windows(2) {
            assert!(pair[1].1 - pair[0].1 >= Duration::from_millis(500));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn single_digit_channel() {
        let (pacer, dispatcher, transport) = setup();
        ChannelSequencer::new(&pacer, &dispatcher)
            .dial(Channel::new(7).unwrap())
            .await
            .unwrap();
        assert_eq!(transport.sent(), vec![CommandName::Key7]);
    }

    #[tokio::test(start_paused = true)]
    async fn unlearned_digits_are_skipped() {
        let transport = Arc::new(RecordingTransport::new());
        let catalog = Arc::new(CommandCatalog::new(RemotePlatform::Broadlink));
        catalog.replace([("KEY_1", "a"), ("KEY_3", "b")].into_iter().collect());
        let dispatcher =
            CommandDispatcher::new(ApplianceId::new("tv").unwrap(), Arc::clone(&transport), catalog);
        let pacer = CommandPacer::default();

        let outcomes = ChannelSequencer::new(&pacer, &dispatcher)
            .dial(Channel::new(123).unwrap())
            .await
            .unwrap();

        assert_eq!(
            outcomes,
            vec![
                DispatchOutcome::Sent(CommandName::Key1),
                DispatchOutcome::NotLearned(CommandName::Key2),
                DispatchOutcome::Sent(CommandName::Key3),
            ]
        );
        assert_eq!(transport.sent(), vec![CommandName::Key1, CommandName::Key3]);
    }

    #[tokio::test(start_paused = true)]
    async fn transport_failure_stops_sequence() {
        let (pacer, dispatcher, transport) = setup();
        transport.fail_transmissions(true);

        let result = ChannelSequencer::new(&pacer, &dispatcher)
            .dial(Channel::new(42).unwrap())
            .await;
        assert!(result.is_err());
        assert!(transport.sent().is_empty());
    }
}
