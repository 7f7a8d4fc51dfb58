// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Optimistic volume level.

use std::fmt;

/// Local approximation of the TV volume in the range `[0.0, 1.0]`.
///
/// The TV never reports its volume, so this value only tracks the
/// `VOLUME_UP` / `VOLUME_DOWN` presses the controller issued. It is kept as
/// a whole number of tenths so repeated steps never drift.
///
/// # Examples
///
/// ```
/// use smartify_tv::types::VolumeLevel;
///
/// let level = VolumeLevel::default();
/// assert!((level.as_f32() - 0.2).abs() < f32::EPSILON);
///
/// let louder = level.step_up();
/// assert!((louder.as_f32() - 0.3).abs() < f32::EPSILON);
///
/// assert_eq!(VolumeLevel::MAX.step_up(), VolumeLevel::MAX);
/// assert_eq!(VolumeLevel::MIN.step_down(), VolumeLevel::MIN);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct VolumeLevel(u8);

impl VolumeLevel {
    /// Number of steps between silence and full volume.
    pub const STEPS: u8 = 10;
    /// Silence.
    pub const MIN: Self = Self(0);
    /// Full volume.
    pub const MAX: Self = Self(Self::STEPS);

    /// Creates a level from a number of tenths, clamped to `0..=10`.
    #[must_use]
    pub const fn from_tenths(tenths: u8) -> Self {
        if tenths > Self::STEPS {
            Self::MAX
        } else {
            Self(tenths)
        }
    }

    /// Returns the level as a number of tenths.
    #[must_use]
    pub const fn tenths(&self) -> u8 {
        self.0
    }

    /// Returns the level as a fraction in `[0.0, 1.0]`.
    #[must_use]
    pub fn as_f32(&self) -> f32 {
        f32::from(self.0) / f32::from(Self::STEPS)
    }

    /// Returns the level one step (0.1) higher, saturating at full volume.
    #[must_use]
    pub const fn step_up(self) -> Self {
        Self::from_tenths(self.0.saturating_add(1))
    }

    /// Returns the level one step (0.1) lower, saturating at silence.
    #[must_use]
    pub const fn step_down(self) -> Self {
        Self(self.0.saturating_sub(1))
    }
}

impl Default for VolumeLevel {
    fn default() -> Self {
        Self(2)
    }
}

impl fmt::Display for VolumeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.as_f32())
    }
}
