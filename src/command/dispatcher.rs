// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Gated transmission of single commands.

use std::sync::Arc;

use super::CommandCatalog;
use crate::error::Result;
use crate::transport::IrTransport;
use crate::types::{ApplianceId, CommandName};

/// What happened to a command handed to the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The transport accepted the command.
    Sent(CommandName),
    /// The command was never learned; nothing was transmitted.
    NotLearned(CommandName),
}

impl DispatchOutcome {
    /// Returns the command concerned.
    #[must_use]
    pub const fn command(&self) -> CommandName {
        match self {
            Self::Sent(command) | Self::NotLearned(command) => *command,
        }
    }

    /// Returns `true` if the command was transmitted.
    #[must_use]
    pub const fn is_sent(&self) -> bool {
        matches!(self, Self::Sent(_))
    }
}

/// Sends commands of one appliance through its transport, skipping the ones
/// the catalog does not know.
///
/// The dispatcher does not pace; callers hold a
/// [`PacingLane`](super::PacingLane) around each send.
#[derive(Debug)]
pub struct CommandDispatcher<T> {
    appliance: ApplianceId,
    transport: Arc<T>,
    catalog: Arc<CommandCatalog>,
}

impl<T: IrTransport> CommandDispatcher<T> {
    /// Creates a dispatcher for one appliance.
    #[must_use]
    pub fn new(appliance: ApplianceId, transport: Arc<T>, catalog: Arc<CommandCatalog>) -> Self {
        Self {
            appliance,
            transport,
            catalog,
        }
    }

    /// Returns the appliance this dispatcher sends for.
    #[must_use]
    pub fn appliance(&self) -> &ApplianceId {
        &self.appliance
    }

    /// Returns the catalog consulted before each send.
    #[must_use]
    pub fn catalog(&self) -> &Arc<CommandCatalog> {
        &self.catalog
    }

    /// Transmits `command` if it was learned.
    ///
    /// # Errors
    ///
    /// Returns `Error::Transport` if the transport refused the request.
    pub async fn send(&self, command: CommandName) -> Result<DispatchOutcome> {
        if !self.catalog.is_known(command) {
            tracing::debug!(
                appliance = %self.appliance,
                command = %command,
                "Command not learned, not sending"
            );
            return Ok(DispatchOutcome::NotLearned(command));
        }

        tracing::debug!(appliance = %self.appliance, command = %command, "Sending command");
        self.transport.transmit(&self.appliance, command).await?;
        Ok(DispatchOutcome::Sent(command))
    }
}
