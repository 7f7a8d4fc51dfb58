// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The emulated remote control of one TV.
//!
//! A [`DeviceController`] turns host intents (turn on, volume up, dial
//! channel 205, learn `MUTE`...) into paced and gated IR transmissions, and
//! power readings into an on/off state.
//!
//! # Intents
//!
//! | Intent | Commands sent | Condition |
//! |--------|---------------|-----------|
//! | [`turn_on`](DeviceController::turn_on) | `POWER_ON` | TV off |
//! | [`turn_off`](DeviceController::turn_off) | `POWER_OFF` | TV on |
//! | [`volume_up`](DeviceController::volume_up) / [`volume_down`](DeviceController::volume_down) | `VOLUME_UP` / `VOLUME_DOWN` | - |
//! | [`set_mute`](DeviceController::set_mute) | `MUTE` / `UNMUTE` | - |
//! | [`channel_up`](DeviceController::channel_up) / [`channel_down`](DeviceController::channel_down) | `CHANNEL_UP` / `CHANNEL_DOWN` | - |
//! | [`set_channel`](DeviceController::set_channel) | `KEY_0`..`KEY_9` per digit | 1-999 |
//! | [`play`](DeviceController::play) / [`pause`](DeviceController::pause) / [`stop`](DeviceController::stop) / [`play_pause`](DeviceController::play_pause) | `PLAY` / `PAUSE` / `STOP` | TV on |
//!
//! Every intent resolves to an [`Outcome`]: sent, not learned, or skipped.

mod config;
mod device_controller;
mod outcome;

pub use config::{ApplianceConfig, ControllerSettings, RemoteConfig};
pub use device_controller::{DeviceController, Diagnostics};
pub use outcome::{MediaKind, Outcome, SkipReason};
