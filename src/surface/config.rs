//! Wave surface tuning parameters.
//!
//! All knobs are runtime-mutable and serializable, so a host can ship
//! surface presets in RON files or expose them to an inspector. Geometry
//! knobs (`point_count`, `target_height`) trigger a full chain relayout
//! when changed; the rest take effect on the next step.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use bevy_log::warn;

/// Default tuning values, matching a small pond-like body.
pub mod defaults {
    /// Number of samples across a surface.
    pub const POINT_COUNT: usize = 20;
    /// Smallest chain that still has an interior point to simulate.
    pub const MIN_POINT_COUNT: usize = 3;
    /// Rest line offset below the top edge of the bounds.
    pub const TARGET_HEIGHT: f32 = 20.0;
    /// Restoring acceleration per unit of displacement from the rest line.
    pub const STIFFNESS: f32 = 0.01;
    /// Velocity fraction lost per tick.
    pub const DAMPENING: f32 = 0.005;
    /// Spread sweeps per tick.
    pub const SPREAD_PASSES: u32 = 8;
    /// Velocity transferred per unit of neighbor height difference.
    pub const SPREAD_FACTOR: f32 = 0.5;
    /// Multiplied by a body's per-tick vertical displacement on impact.
    pub const IMPACT_POWER: f32 = 50.0;
    /// Impulse applied by each continuous disturbance pulse.
    pub const CONTINUOUS_IMPACT_POWER: f32 = 100.0;
    /// Seconds between continuous disturbance pulses.
    pub const CONTINUOUS_PULSE_INTERVAL: f32 = 1.0;
}

/// Tuning for one wave surface.
#[derive(Component, Debug, Clone, Serialize, Deserialize, Reflect)]
#[reflect(Component)]
pub struct WaveSurfaceConfig {
    /// Number of samples across the surface. Floored to 3 by
    /// [`WaveSurfaceConfig::sanitized`] so an interior point always exists.
    pub point_count: usize,
    /// Rest line offset below the top edge of the surface bounds.
    pub target_height: f32,
    /// Spring coefficient pulling samples toward the rest line.
    pub stiffness: f32,
    /// Velocity-proportional energy loss.
    pub dampening: f32,
    /// Number of spread sweeps per tick. More passes means waves travel
    /// further per tick, at the cost of stability headroom.
    pub spread_passes: u32,
    /// Velocity leaked to a neighbor per unit of height difference.
    pub spread_factor: f32,
    /// Scales the vertical velocity of impacting bodies.
    pub impact_power: f32,
    /// Whether the periodic disturbance pulse is active.
    pub continuous_impact: bool,
    /// Impulse strength of the periodic disturbance pulse.
    pub continuous_impact_power: f32,
}

impl Default for WaveSurfaceConfig {
    fn default() -> Self {
        Self {
            point_count: defaults::POINT_COUNT,
            target_height: defaults::TARGET_HEIGHT,
            stiffness: defaults::STIFFNESS,
            dampening: defaults::DAMPENING,
            spread_passes: defaults::SPREAD_PASSES,
            spread_factor: defaults::SPREAD_FACTOR,
            impact_power: defaults::IMPACT_POWER,
            continuous_impact: false,
            continuous_impact_power: defaults::CONTINUOUS_IMPACT_POWER,
        }
    }
}

impl WaveSurfaceConfig {
    /// Returns a copy with out-of-range values corrected.
    ///
    /// Misconfiguration is handled here, at configuration time; the
    /// simulation itself never validates or clamps.
    pub fn sanitized(mut self) -> Self {
        if self.point_count < defaults::MIN_POINT_COUNT {
            warn!(
                "point_count {} has no interior samples, raising to {}",
                self.point_count,
                defaults::MIN_POINT_COUNT
            );
            self.point_count = defaults::MIN_POINT_COUNT;
        }
        if self.target_height < 0.0 {
            warn!(
                "target_height {} is above the surface bounds, clamping to 0",
                self.target_height
            );
            self.target_height = 0.0;
        }
        self
    }

    pub fn with_stiffness(mut self, stiffness: f32) -> Self {
        self.stiffness = stiffness;
        self
    }

    pub fn with_dampening(mut self, dampening: f32) -> Self {
        self.dampening = dampening;
        self
    }

    pub fn with_spreading(mut self, passes: u32, factor: f32) -> Self {
        self.spread_passes = passes;
        self.spread_factor = factor;
        self
    }

    pub fn with_continuous_impact(mut self, power: f32) -> Self {
        self.continuous_impact = true;
        self.continuous_impact_power = power;
        self
    }
}

/// Preset tunings for common body types.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub enum SurfacePreset {
    /// Mirror-flat water that ignores impacts entirely.
    Still,
    /// Soft, heavily damped ripples.
    Calm,
    /// Default pond behavior.
    #[default]
    Pond,
    /// Lively water with a standing background disturbance.
    Choppy,
}

impl SurfacePreset {
    /// Builds a config for this preset with the given rest line offset.
    pub fn to_config(self, target_height: f32) -> WaveSurfaceConfig {
        let mut config = WaveSurfaceConfig {
            target_height,
            ..WaveSurfaceConfig::default()
        };

        match self {
            SurfacePreset::Still => {
                config.impact_power = 0.0;
            }
            SurfacePreset::Calm => {
                config.stiffness = 0.008;
                config.dampening = 0.015;
                config.spread_passes = 4;
                config.spread_factor = 0.3;
                config.impact_power = 25.0;
            }
            SurfacePreset::Pond => {}
            SurfacePreset::Choppy => {
                config.stiffness = 0.02;
                config.dampening = 0.002;
                config.spread_factor = 0.6;
                config.impact_power = 80.0;
                config.continuous_impact = true;
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitized_floors_point_count() {
        let config = WaveSurfaceConfig {
            point_count: 0,
            ..WaveSurfaceConfig::default()
        };
        assert_eq!(config.sanitized().point_count, defaults::MIN_POINT_COUNT);

        let config = WaveSurfaceConfig {
            point_count: 2,
            ..WaveSurfaceConfig::default()
        };
        assert_eq!(config.sanitized().point_count, defaults::MIN_POINT_COUNT);
    }

    #[test]
    fn test_sanitized_clamps_target_height() {
        let config = WaveSurfaceConfig {
            target_height: -5.0,
            ..WaveSurfaceConfig::default()
        };
        assert_eq!(config.sanitized().target_height, 0.0);
    }

    #[test]
    fn test_sanitized_leaves_valid_configs_alone() {
        let config = WaveSurfaceConfig::default().sanitized();
        assert_eq!(config.point_count, defaults::POINT_COUNT);
        assert_eq!(config.target_height, defaults::TARGET_HEIGHT);
    }

    #[test]
    fn test_ron_round_trip() {
        let config = SurfacePreset::Choppy
            .to_config(12.0)
            .with_spreading(6, 0.4);

        let text = ron::ser::to_string(&config).unwrap();
        let restored: WaveSurfaceConfig = ron::from_str(&text).unwrap();

        assert_eq!(restored.target_height, 12.0);
        assert_eq!(restored.spread_passes, 6);
        assert_eq!(restored.spread_factor, 0.4);
        assert!(restored.continuous_impact);
    }

    #[test]
    fn test_preset_relationships() {
        let still = SurfacePreset::Still.to_config(20.0);
        let calm = SurfacePreset::Calm.to_config(20.0);
        let pond = SurfacePreset::Pond.to_config(20.0);
        let choppy = SurfacePreset::Choppy.to_config(20.0);

        assert_eq!(still.impact_power, 0.0);
        assert!(calm.dampening > pond.dampening);
        assert!(choppy.stiffness > pond.stiffness);
        assert!(choppy.continuous_impact);
        assert!(!pond.continuous_impact);
        for config in [still, calm, pond, choppy] {
            assert!(config.sanitized().point_count >= defaults::MIN_POINT_COUNT);
        }
    }
}
