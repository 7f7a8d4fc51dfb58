// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Appliance state management types.
//!
//! [`ApplianceState`] holds everything a host can show about a TV, while
//! [`StateChange`] represents individual changes that can be applied.
//! [`PlaybackAction::plan`] decides which button a playback request presses.
//!
//! # Examples
//!
//! ```
//! use smartify_tv::state::{ApplianceState, StateChange};
//! use smartify_tv::types::{DerivedState, PowerState};
//!
//! let mut state = ApplianceState::new();
//!
//! let change = StateChange::derived(DerivedState::new(PowerState::On, true));
//! state.apply(&change);
//!
//! assert_eq!(state.power(), PowerState::On);
//! ```

mod appliance_state;
mod playback;
mod state_change;

pub use appliance_state::ApplianceState;
pub use playback::{PlaybackAction, PlaybackState, PlaybackTransition};
pub use state_change::StateChange;
