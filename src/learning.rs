// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Teaching new IR codes to the blaster.
//!
//! The blaster gives no feedback once the user has pressed the button on the
//! physical remote. Unless the transport reports completion itself, a
//! session waits a fixed window before reloading the learned commands.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::command::CommandCatalog;
use crate::error::Result;
use crate::store::LearnedCommandStore;
use crate::transport::{IrTransport, LearnAck};
use crate::types::{ApplianceId, CommandName};

/// Result of a learn request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LearnOutcome {
    /// The session ran; `learned` tells whether the command is now known.
    Finished {
        /// Whether the refreshed catalog contains the command.
        learned: bool,
    },
    /// Another session of the same appliance was running; nothing was done.
    AlreadyInProgress,
}

/// Everything a session touches.
#[derive(Debug)]
pub struct LearningTarget<'a, T, S> {
    /// Appliance the code is learned for.
    pub appliance: &'a ApplianceId,
    /// Blaster put into learning mode.
    pub transport: &'a T,
    /// Catalog reloaded after the window.
    pub catalog: &'a CommandCatalog,
    /// Store the catalog is reloaded from.
    pub store: &'a S,
}

/// At most one learning interaction per appliance.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use smartify_tv::learning::LearningSession;
///
/// let session = LearningSession::new(Duration::from_secs(35));
///
/// let first = session.begin();
/// assert!(first.is_some());
/// assert!(session.begin().is_none());
///
/// drop(first);
/// assert!(!session.is_learning());
/// ```
#[derive(Debug)]
pub struct LearningSession {
    window: Duration,
    active: AtomicBool,
}

impl LearningSession {
    /// Default time given to the user to press the button on the remote.
    pub const DEFAULT_WINDOW: Duration = Duration::from_secs(35);

    /// Creates an idle session with the given learning window.
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            active: AtomicBool::new(false),
        }
    }

    /// Returns the learning window.
    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Returns `true` while a session is running.
    #[must_use]
    pub fn is_learning(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Claims the session, or returns `None` if one is already running.
    ///
    /// The claim is released when the guard is dropped.
    #[must_use]
    pub fn begin(&self) -> Option<LearningGuard<'_>> {
        self.active
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| LearningGuard { session: self })
    }

    /// Runs a whole session for `command`.
    ///
    /// `on_active` is called with `true` once the session is claimed and
    /// with `false` when it ends, whatever the result. It is not called for
    /// a refused request.
    ///
    /// # Errors
    ///
    /// Returns `Error::Transport` if the blaster refused to enter learning
    /// mode. The session is released either way.
    pub async fn learn<T, S, F>(
        &self,
        target: &LearningTarget<'_, T, S>,
        command: CommandName,
        on_active: F,
    ) -> Result<LearnOutcome>
    where
        T: IrTransport,
        S: LearnedCommandStore,
        F: Fn(bool),
    {
        match self.begin() {
            Some(guard) => {
                on_active(true);
                let result = guard.run(target, command).await;
                on_active(false);
                result
            }
            None => {
                tracing::info!(
                    appliance = %target.appliance,
                    command = %command,
                    "Learning already in progress, request ignored"
                );
                Ok(LearnOutcome::AlreadyInProgress)
            }
        }
    }
}

impl Default for LearningSession {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WINDOW)
    }
}

/// A claimed learning session.
#[derive(Debug)]
pub struct LearningGuard<'a> {
    session: &'a LearningSession,
}

impl LearningGuard<'_> {
    /// Starts learning, waits for the user and reloads the catalog.
    ///
    /// Consumes the guard; the session is idle again when this returns.
    ///
    /// # Errors
    ///
    /// Returns `Error::Transport` if the blaster refused to enter learning
    /// mode.
    pub async fn run<T, S>(
        self,
        target: &LearningTarget<'_, T, S>,
        command: CommandName,
    ) -> Result<LearnOutcome>
    where
        T: IrTransport,
        S: LearnedCommandStore,
    {
        tracing::info!(appliance = %target.appliance, command = %command, "Learning command");

        let ack = target.transport.learn(target.appliance, command).await?;

        if ack == LearnAck::Pending {
            tracing::debug!(
                appliance = %target.appliance,
                window = ?self.session.window,
                "Waiting for the remote button press"
            );
            tokio::time::sleep(self.session.window).await;
        }

        target.catalog.refresh(target.appliance, target.store).await;
        let learned = target.catalog.is_known(command);

        if learned {
            tracing::info!(appliance = %target.appliance, command = %command, "Command learned");
        } else {
            tracing::warn!(
                appliance = %target.appliance,
                command = %command,
                "Command still unknown after learning"
            );
        }

        Ok(LearnOutcome::Finished { learned })
    }
}

impl Drop for LearningGuard<'_> {
    fn drop(&mut self) {
        self.session.active.store(false, Ordering::Release);
    }
}
