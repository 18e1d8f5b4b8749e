use serde::{Deserialize, Serialize};
use ss_core::Anchor;
use std::time::Duration;
use thiserror::Error;

/// Vertical lift applied to every hit point so entities do not start
/// embedded in the surface.
pub const SURFACE_NUDGE: f32 = 1.0;

/// Probe attempts made by one placement run unless configured otherwise.
pub const DEFAULT_MAX_PROBE_ATTEMPTS: u32 = 50;

/// Shortest accepted repeat interval, in seconds.
pub const MIN_REPEAT_INTERVAL: f32 = 0.01;

/// Tunable spawn policy, loadable from RON presets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnSettings {
    /// Radius of the disk around the anchor that spawn points are drawn from.
    pub spawn_radius: f32,
    /// Height above the anchor that probes start from; they travel twice
    /// this distance downwards.
    pub probe_height: f32,
    /// Probe attempts per placement run.
    pub max_probe_attempts: u32,
    /// Orient spawned entities to the surface normal.
    pub align_to_surface: bool,
    /// Keep spawning on an interval instead of once.
    pub repeat: bool,
    /// Seconds between spawns when repeating.
    pub repeat_interval: f32,
    /// Maximum number of live spawned entities when repeating.
    pub max_spawn_count: u32,
}

impl Default for SpawnSettings {
    fn default() -> Self {
        Self {
            spawn_radius: 100.0,
            probe_height: 1000.0,
            max_probe_attempts: DEFAULT_MAX_PROBE_ATTEMPTS,
            align_to_surface: true,
            repeat: false,
            repeat_interval: 5.0,
            max_spawn_count: 5,
        }
    }
}

impl SpawnSettings {
    /// Settings for a repeating spawner with the given interval and limit.
    pub fn repeating(repeat_interval: f32, max_spawn_count: u32) -> Self {
        Self {
            repeat: true,
            repeat_interval,
            max_spawn_count,
            ..Default::default()
        }
    }

    /// Check the numeric constraints. Repeat parameters are only checked
    /// when repeating is enabled.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.spawn_radius >= 0.0 && self.spawn_radius.is_finite()) {
            return Err(ConfigError::InvalidRadius(self.spawn_radius));
        }
        if !(self.probe_height >= 0.0 && self.probe_height.is_finite()) {
            return Err(ConfigError::InvalidProbeHeight(self.probe_height));
        }
        if self.repeat {
            if !(self.repeat_interval >= MIN_REPEAT_INTERVAL && self.repeat_interval.is_finite()) {
                return Err(ConfigError::InvalidRepeatInterval(self.repeat_interval));
            }
            if self.max_spawn_count == 0 {
                return Err(ConfigError::ZeroMaxSpawnCount);
            }
        }
        Ok(())
    }

    /// Interval between scheduled spawns. Unrepresentable values map to zero.
    pub fn interval(&self) -> Duration {
        Duration::try_from_secs_f32(self.repeat_interval).unwrap_or(Duration::ZERO)
    }
}

/// Everything one spawn session needs: where to spawn from and how.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpawnConfig {
    pub anchor: Anchor,
    pub settings: SpawnSettings,
}

impl SpawnConfig {
    pub fn new(anchor: Anchor, settings: SpawnSettings) -> Self {
        Self { anchor, settings }
    }
}

/// Spawner misconfiguration, reported once at activation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("no spawn target configured")]
    MissingTarget,
    #[error("spawn radius must be finite and >= 0, got {0}")]
    InvalidRadius(f32),
    #[error("probe height must be finite and >= 0, got {0}")]
    InvalidProbeHeight(f32),
    #[error("repeat interval must be at least 0.01s, got {0}")]
    InvalidRepeatInterval(f32),
    #[error("max spawn count must be >= 1 when repeating")]
    ZeroMaxSpawnCount,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_editor_values() {
        let settings = SpawnSettings::default();
        assert_eq!(settings.spawn_radius, 100.0);
        assert_eq!(settings.probe_height, 1000.0);
        assert_eq!(settings.max_probe_attempts, 50);
        assert!(settings.align_to_surface);
        assert!(!settings.repeat);
        assert_eq!(settings.repeat_interval, 5.0);
        assert_eq!(settings.max_spawn_count, 5);
        assert_eq!(settings.validate(), Ok(()));
    }

    #[test]
    fn repeat_parameters_ignored_when_single_shot() {
        let settings = SpawnSettings {
            repeat_interval: 0.0,
            max_spawn_count: 0,
            ..Default::default()
        };
        assert_eq!(settings.validate(), Ok(()));
    }

    #[test]
    fn invalid_repeat_parameters_rejected() {
        assert_eq!(
            SpawnSettings::repeating(0.0, 3).validate(),
            Err(ConfigError::InvalidRepeatInterval(0.0))
        );
        assert_eq!(
            SpawnSettings::repeating(1.0, 0).validate(),
            Err(ConfigError::ZeroMaxSpawnCount)
        );
        assert!(SpawnSettings::repeating(f32::NAN, 3).validate().is_err());
    }

    #[test]
    fn sub_minimum_interval_rejected() {
        // Rounds to a zero-length Duration, which would fire without bound.
        assert_eq!(
            SpawnSettings::repeating(1e-10, 3).validate(),
            Err(ConfigError::InvalidRepeatInterval(1e-10))
        );
        assert!(SpawnSettings::repeating(0.005, 3).validate().is_err());
        assert_eq!(SpawnSettings::repeating(MIN_REPEAT_INTERVAL, 3).validate(), Ok(()));
        assert!(SpawnSettings::repeating(MIN_REPEAT_INTERVAL, 3).interval() > Duration::ZERO);
    }

    #[test]
    fn negative_extents_rejected() {
        let settings = SpawnSettings {
            spawn_radius: -1.0,
            ..Default::default()
        };
        assert_eq!(settings.validate(), Err(ConfigError::InvalidRadius(-1.0)));

        let settings = SpawnSettings {
            probe_height: -5.0,
            ..Default::default()
        };
        assert_eq!(settings.validate(), Err(ConfigError::InvalidProbeHeight(-5.0)));

        let settings = SpawnSettings {
            spawn_radius: f32::INFINITY,
            ..Default::default()
        };
        assert_eq!(settings.validate(), Err(ConfigError::InvalidRadius(f32::INFINITY)));

        let settings = SpawnSettings {
            probe_height: f32::INFINITY,
            ..Default::default()
        };
        assert_eq!(
            settings.validate(),
            Err(ConfigError::InvalidProbeHeight(f32::INFINITY))
        );
    }

    #[test]
    fn interval_converts_seconds() {
        assert_eq!(SpawnSettings::repeating(2.5, 1).interval(), Duration::from_millis(2500));
    }
}
