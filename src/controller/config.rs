// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Appliance configuration types.

use std::time::Duration;

use crate::learning::LearningSession;
use crate::monitor::PowerStateMonitor;
use crate::transport::RemotePlatform;
use crate::types::ApplianceId;

/// Configuration of one emulated TV.
///
/// The identifier is generated once, when the appliance is first
/// configured, and must be persisted by the host: learned codes are stored
/// under it.
///
/// # Examples
///
/// ```
/// use smartify_tv::controller::{ApplianceConfig, RemoteConfig};
/// use smartify_tv::transport::RemotePlatform;
///
/// let config = ApplianceConfig::new(
///     "sensor.tv_plug_power",
///     RemoteConfig::new("remote.living_room_rm4", RemotePlatform::Broadlink)
///         .with_hardware_address("34:ea:34:b4:3b:5a"),
/// )
/// .with_name("Living Room TV");
///
/// assert!(config.id.as_str().starts_with("smartify_tv_"));
/// assert_eq!(config.name, "Living Room TV");
/// ```
///
/// Loading from JSON:
///
/// ```
/// use smartify_tv::controller::ApplianceConfig;
///
/// let config: ApplianceConfig = serde_json::from_str(r#"{
///     "id": "smartify_tv_4f1c",
///     "power_source": "sensor.tv_power",
///     "remote": { "entity_id": "remote.rm4", "platform": "broadlink" },
///     "settings": { "pacing_interval_ms": 300 }
/// }"#).unwrap();
///
/// assert_eq!(config.name, "SmartifyTV");
/// assert_eq!(config.settings.pacing_interval().as_millis(), 300);
/// assert_eq!(config.settings.learning_window().as_secs(), 35);
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ApplianceConfig {
    /// Stable identifier.
    pub id: ApplianceId,
    /// Display name.
    #[serde(default = "default_name")]
    pub name: String,
    /// Entity id of the power sensor.
    pub power_source: String,
    /// IR remote used to control the TV.
    pub remote: RemoteConfig,
    /// Tuning of the controller.
    #[serde(default)]
    pub settings: ControllerSettings,
}

fn default_name() -> String {
    ApplianceConfig::DEFAULT_NAME.to_string()
}

impl ApplianceConfig {
    /// Display name used when none is given.
    pub const DEFAULT_NAME: &'static str = "SmartifyTV";

    /// Creates a configuration with a freshly generated identifier.
    #[must_use]
    pub fn new(power_source: impl Into<String>, remote: RemoteConfig) -> Self {
        Self {
            id: ApplianceId::generate(),
            name: default_name(),
            power_source: power_source.into(),
            remote,
            settings: ControllerSettings::default(),
        }
    }

    /// Uses an existing identifier, typically one loaded from persistence.
    #[must_use]
    pub fn with_id(mut self, id: ApplianceId) -> Self {
        self.id = id;
        self
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the controller tuning.
    #[must_use]
    pub fn with_settings(mut self, settings: ControllerSettings) -> Self {
        self.settings = settings;
        self
    }
}

/// Reference to the IR remote entity.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RemoteConfig {
    /// Entity id of the remote.
    pub entity_id: String,
    /// Platform providing the remote.
    pub platform: RemotePlatform,
    /// Hardware (MAC) address of the blaster, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hardware_address: Option<String>,
}

impl RemoteConfig {
    /// Creates a remote reference.
    #[must_use]
    pub fn new(entity_id: impl Into<String>, platform: RemotePlatform) -> Self {
        Self {
            entity_id: entity_id.into(),
            platform,
            hardware_address: None,
        }
    }

    /// Sets the hardware address of the blaster.
    #[must_use]
    pub fn with_hardware_address(mut self, address: impl Into<String>) -> Self {
        self.hardware_address = Some(address.into());
        self
    }
}

/// Timing and threshold tuning of a controller.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use smartify_tv::controller::ControllerSettings;
///
/// let settings = ControllerSettings::default()
///     .with_power_threshold(25.0)
///     .with_pacing_interval(Duration::from_millis(800));
///
/// assert_eq!(settings.pacing_interval(), Duration::from_millis(800));
/// assert_eq!(settings.learning_window(), Duration::from_secs(35));
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ControllerSettings {
    /// Power draw in Watts above which the TV is on.
    pub power_threshold: f64,
    /// Minimum gap between two transmissions, in milliseconds.
    pub pacing_interval_ms: u64,
    /// Time given to the user to press a button while learning, in seconds.
    pub learning_window_secs: u64,
}

impl ControllerSettings {
    /// Sets the power threshold in Watts.
    #[must_use]
    pub fn with_power_threshold(mut self, watts: f64) -> Self {
        self.power_threshold = watts;
        self
    }

    /// Sets the pacing interval.
    #[must_use]
    pub fn with_pacing_interval(mut self, interval: Duration) -> Self {
        self.pacing_interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Sets the learning window.
    #[must_use]
    pub fn with_learning_window(mut self, window: Duration) -> Self {
        self.learning_window_secs = window.as_secs();
        self
    }

    /// Returns the pacing interval.
    #[must_use]
    pub const fn pacing_interval(&self) -> Duration {
        Duration::from_millis(self.pacing_interval_ms)
    }

    /// Returns the learning window.
    #[must_use]
    pub const fn learning_window(&self) -> Duration {
        Duration::from_secs(self.learning_window_secs)
    }
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            power_threshold: PowerStateMonitor::DEFAULT_THRESHOLD,
            pacing_interval_ms: 500,
            learning_window_secs: LearningSession::DEFAULT_WINDOW.as_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandPacer;

    #[test]
    fn defaults_match_components() {
        let settings = ControllerSettings::default();
        assert_eq!(settings.pacing_interval(), CommandPacer::DEFAULT_INTERVAL);
        assert_eq!(settings.learning_window(), LearningSession::DEFAULT_WINDOW);
        assert!((settings.power_threshold - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn generated_ids_differ() {
        let remote = RemoteConfig::new("remote.rm", RemotePlatform::Broadlink);
        let a = ApplianceConfig::new("sensor.p", remote.clone());
        let b = ApplianceConfig::new("sensor.p", remote);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn with_id_keeps_persisted_identifier() {
        let id = ApplianceId::new("smartify_tv_abc").unwrap();
        let config = ApplianceConfig::new(
            "sensor.p",
            RemoteConfig::new("remote.rm", RemotePlatform::Broadlink),
        )
        .with_id(id.clone());
        assert_eq!(config.id, id);
    }

    #[test]
    fn json_round_trip_keeps_platform() {
        let config = ApplianceConfig::new(
            "sensor.p",
            RemoteConfig::new("remote.rm", RemotePlatform::Other("tuya".into())),
        );
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("hardware_address"));

        let parsed: ApplianceConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
