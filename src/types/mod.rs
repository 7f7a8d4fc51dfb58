// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for the emulated TV remote.
//!
//! Each type keeps its value within the valid range at construction time.
//!
//! # Types
//!
//! - [`ApplianceId`] - Stable identifier of a configured TV
//! - [`CommandName`] - Closed vocabulary of remote buttons
//! - [`Channel`] - Channel number (1-999)
//! - [`PowerReading`] - Raw value of the power sensor
//! - [`PowerState`] / [`DerivedState`] - Inferred on/off state and availability
//! - [`VolumeLevel`] - Optimistic volume (0.0-1.0 in tenths)

mod appliance_id;
mod channel;
mod command_name;
mod power;
mod volume;

pub use appliance_id::ApplianceId;
pub use channel::Channel;
pub use command_name::CommandName;
pub use power::{DerivedState, PowerReading, PowerState};
pub use volume::VolumeLevel;
