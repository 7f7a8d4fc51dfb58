// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Command pipeline of one appliance.
//!
//! Every transmission goes through the same three steps:
//!
//! | Step | Type | Purpose |
//! |------|------|---------|
//! | Pace | [`CommandPacer`] | Keep at least the pacing interval between two transmissions |
//! | Gate | [`CommandCatalog`] | Drop commands the blaster never learned |
//! | Send | [`CommandDispatcher`] | Hand the command to the [`IrTransport`](crate::transport::IrTransport) |
//!
//! [`ChannelSequencer`] chains the steps for the digit keys of a channel
//! number while keeping the pacing lane for the whole sequence.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use smartify_tv::command::{CommandCatalog, CommandDispatcher, CommandPacer, DispatchOutcome};
//! use smartify_tv::error::TransportError;
//! use smartify_tv::transport::{IrTransport, LearnAck, RemotePlatform};
//! use smartify_tv::types::{ApplianceId, CommandName};
//!
//! struct Blaster;
//!
//! impl IrTransport for Blaster {
//!     async fn transmit(&self, _: &ApplianceId, _: CommandName) -> Result<(), TransportError> {
//!         Ok(())
//!     }
//!     async fn learn(&self, _: &ApplianceId, _: CommandName) -> Result<LearnAck, TransportError> {
//!         Ok(LearnAck::Pending)
//!     }
//!     async fn is_available(&self) -> bool {
//!         true
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> smartify_tv::Result<()> {
//! let catalog = Arc::new(CommandCatalog::new(RemotePlatform::Broadlink));
//! catalog.replace([("MUTE", "JgBG")].into_iter().collect());
//!
//! let pacer = CommandPacer::default();
//! let dispatcher = CommandDispatcher::new(ApplianceId::generate(), Arc::new(Blaster), catalog);
//!
//! let mut lane = pacer.acquire().await;
//! lane.await_slot().await;
//! assert_eq!(dispatcher.send(CommandName::Mute).await?, DispatchOutcome::Sent(CommandName::Mute));
//!
//! lane.await_slot().await;
//! assert_eq!(dispatcher.send(CommandName::Exit).await?, DispatchOutcome::NotLearned(CommandName::Exit));
//! # Ok(())
//! # }
//! ```

mod catalog;
mod dispatcher;
mod pacer;
mod sequencer;

pub use catalog::{CatalogSnapshot, CommandCatalog};
pub use dispatcher::{CommandDispatcher, DispatchOutcome};
pub use pacer::{CommandPacer, PacingClock, PacingLane};
pub use sequencer::ChannelSequencer;
