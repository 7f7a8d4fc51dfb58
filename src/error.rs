// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `SmartifyTV` library.
//!
//! Most of the "failures" an IR-driven appliance runs into are policy
//! outcomes rather than errors: an unlearned command is reported through
//! [`Outcome::NotLearned`](crate::controller::Outcome::NotLearned), a busy
//! learning session through
//! [`LearnOutcome::AlreadyInProgress`](crate::learning::LearnOutcome::AlreadyInProgress)
//! and a broken learned-command store degrades to an empty catalog. The types
//! below cover what is left: invalid input, transport failures and store
//! failures surfaced by the store implementations themselves.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while talking to the IR transport or power source.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Error occurred while reading the learned-command store.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Appliance was not found in the manager.
    #[error("appliance not found")]
    ApplianceNotFound,
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A channel number is outside the range the remote can dial.
    #[error("channel {actual} is out of range [{min}, {max}]")]
    ChannelOutOfRange {
        /// Minimum allowed channel.
        min: u16,
        /// Maximum allowed channel.
        max: u16,
        /// The channel that was requested.
        actual: u32,
    },

    /// A command name is not part of the remote vocabulary.
    #[error("unknown command name: {0}")]
    UnknownCommandName(String),

    /// A media identifier could not be interpreted.
    #[error("invalid media id: {0}")]
    InvalidMediaId(String),

    /// An appliance identifier is empty or malformed.
    #[error("invalid appliance id: {0:?}")]
    InvalidApplianceId(String),
}

/// Errors related to the IR transport and the power source.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The transport refused the request.
    #[error("request rejected with status {status}: {message}")]
    Rejected {
        /// Status code reported by the transport.
        status: u16,
        /// Reason or body returned with the rejection.
        message: String,
    },

    /// Authentication against the transport failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The transport is currently unreachable.
    #[error("transport unavailable: {0}")]
    Unavailable(String),

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

/// Errors related to reading a learned-command store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The store file is not valid JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The store file is valid JSON but not shaped like a command store.
    #[error("invalid store format: {0}")]
    InvalidFormat(String),

    /// The background worker reading the store did not complete.
    #[error("store worker failed: {0}")]
    Worker(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
