use std::time::Duration;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
#[cfg(not(target_arch = "wasm32"))]
use std::{fs, path::Path};

use crate::l10n::Language;

pub const CONFIG_PATH: &str = "config/dependency_gate.ron";

/// What to do when the host cannot tell us whether a dependency is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiUnavailablePolicy {
    /// Show a fatal notice and never activate.
    #[default]
    Halt,
    /// Skip the enabled check and keep waiting for dependencies to load.
    Tolerate,
}

#[derive(Resource, Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Quiet period before a wait notice is shown.
    pub patience_secs: f32,
    /// How often the loaded check is re-polled. Zero polls every tick.
    pub poll_interval_secs: f32,
    pub api_unavailable: ApiUnavailablePolicy,
    pub language: Language,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            patience_secs: 5.0,
            poll_interval_secs: 0.0,
            api_unavailable: ApiUnavailablePolicy::Halt,
            language: Language::English,
        }
    }
}

impl GateConfig {
    /// Falls back to the default window when the value cannot be a duration.
    pub fn patience(&self) -> Duration {
        Duration::try_from_secs_f32(self.patience_secs.max(0.0))
            .unwrap_or_else(|_| Self::default().patience())
    }

    /// `None` polls every tick.
    pub fn poll_interval(&self) -> Option<Duration> {
        Duration::try_from_secs_f32(self.poll_interval_secs)
            .ok()
            .filter(|interval| !interval.is_zero())
    }

    pub fn from_ron(content: &str) -> Result<Self, String> {
        let config = ron::from_str::<GateConfig>(content)
            .map_err(|error| format!("failed to parse gate config RON: {error}"))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), String> {
        for (field, secs) in [
            ("patience_secs", self.patience_secs),
            ("poll_interval_secs", self.poll_interval_secs),
        ] {
            if Duration::try_from_secs_f32(secs).is_err() {
                return Err(format!(
                    "{field} must be a finite, non-negative number of seconds, got {secs}"
                ));
            }
        }
        Ok(())
    }

    /// Reads [`CONFIG_PATH`], falling back to defaults with a warning.
    pub fn load_or_default() -> Self {
        load_persisted_config().unwrap_or_else(|error| {
            warn!("{error}");
            Self::default()
        })
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_persisted_config() -> Result<GateConfig, String> {
    let path = Path::new(CONFIG_PATH);
    if !path.exists() {
        return Ok(GateConfig::default());
    }

    let content = fs::read_to_string(path)
        .map_err(|error| format!("failed to read '{}': {}", path.display(), error))?;
    GateConfig::from_ron(&content).map_err(|error| format!("'{}': {}", path.display(), error))
}

#[cfg(target_arch = "wasm32")]
fn load_persisted_config() -> Result<GateConfig, String> {
    Ok(GateConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let config = GateConfig::from_ron("(patience_secs: 2.5)").unwrap();
        assert_eq!(config.patience(), Duration::from_millis(2500));
        assert_eq!(config.api_unavailable, ApiUnavailablePolicy::Halt);
        assert_eq!(config.poll_interval(), None);
    }

    #[test]
    fn tolerant_policy_and_poll_interval_parse() {
        let config =
            GateConfig::from_ron("(api_unavailable: tolerate, poll_interval_secs: 0.5)").unwrap();
        assert_eq!(config.api_unavailable, ApiUnavailablePolicy::Tolerate);
        assert_eq!(config.poll_interval(), Some(Duration::from_millis(500)));
    }

    #[test]
    fn malformed_config_is_reported() {
        let error = GateConfig::from_ron("(patience_secs: \"soon\")").unwrap_err();
        assert!(error.starts_with("failed to parse gate config RON"));
    }

    #[test]
    fn unrepresentable_durations_are_rejected() {
        let error = GateConfig::from_ron("(patience_secs: inf)").unwrap_err();
        assert!(error.starts_with("patience_secs"));
        assert!(GateConfig::from_ron("(poll_interval_secs: -1.0)").is_err());
        assert!(GateConfig::from_ron("(patience_secs: 1e30)").is_err());
    }

    #[test]
    fn accessors_survive_out_of_range_values() {
        let config = GateConfig {
            patience_secs: f32::INFINITY,
            poll_interval_secs: f32::NAN,
            ..default()
        };
        assert_eq!(config.patience(), GateConfig::default().patience());
        assert_eq!(config.poll_interval(), None);
    }
}
