//! Bevy plugin wiring for wave surfaces.
//!
//! The per-frame pipeline runs in `Update`, ordered by
//! [`SurfaceUpdateSet`]:
//!
//! 1. **Geometry**: relayout chains whose bounds or geometry knobs
//!    changed, then resize the sensor colliders to match.
//! 2. **Impacts**: complete last tick's deferred measurements, begin new
//!    ones for overlapping bodies, drain external impact events, tick the
//!    continuous-pulse timer.
//! 3. **Simulation**: advance every chain by the frame delta.
//! 4. **Rendering**: publish point snapshots for renderers.
//!
//! Hosts that need fixed-timestep stepping can register
//! [`step_wave_surfaces`] in `FixedUpdate` themselves instead of adding
//! this plugin wholesale.

use bevy::math::Rect;
use bevy::prelude::*;

use bevy_log::debug;

use crate::physics::sensor;
use crate::rendering::profile::publish_surface_profiles;
use crate::sets::SurfaceUpdateSet;

use super::chain::SurfaceChain;
use super::config::{defaults, WaveSurfaceConfig};
use super::impact::{PendingImpacts, SurfaceImpactEvent};

/// Adds wave-surface simulation to an app.
pub struct WaveSurfacePlugin;

impl Plugin for WaveSurfacePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SurfaceImpactEvent>()
            .init_resource::<PendingImpacts>()
            .init_resource::<ContinuousPulseTimer>()
            .register_type::<WaveSurfaceConfig>()
            .register_type::<SurfaceBounds>()
            .configure_sets(
                Update,
                (
                    SurfaceUpdateSet::Geometry,
                    SurfaceUpdateSet::Impacts,
                    SurfaceUpdateSet::Simulation,
                    SurfaceUpdateSet::Rendering,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (sync_surface_geometry, sensor::sync_surface_sensors)
                    .chain()
                    .in_set(SurfaceUpdateSet::Geometry),
            )
            .add_systems(
                Update,
                (
                    sensor::track_surface_overlaps,
                    sensor::complete_deferred_impacts,
                    sensor::begin_body_impacts,
                    apply_surface_impacts,
                    tick_continuous_pulses,
                )
                    .chain()
                    .in_set(SurfaceUpdateSet::Impacts),
            )
            .add_systems(Update, step_wave_surfaces.in_set(SurfaceUpdateSet::Simulation))
            .add_systems(
                Update,
                publish_surface_profiles.in_set(SurfaceUpdateSet::Rendering),
            );
    }
}

/// Component holding a surface's simulation state.
#[derive(Component, Debug)]
pub struct WaveSurface {
    pub chain: SurfaceChain,
}

impl WaveSurface {
    /// Builds a surface laid out across `bounds` per the config's geometry
    /// knobs.
    pub fn new(config: &WaveSurfaceConfig, bounds: Rect) -> Self {
        Self {
            chain: SurfaceChain::new(config.point_count, bounds, config.target_height),
        }
    }
}

/// World-space rectangle of a surface. Mutating it triggers a full chain
/// relayout and sensor resize on the next frame.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct SurfaceBounds(pub Rect);

impl Default for SurfaceBounds {
    fn default() -> Self {
        Self(Rect::new(0.0, 0.0, 100.0, 100.0))
    }
}

/// Timer driving the fixed-interval continuous disturbance pulses,
/// independent of the frame delta.
#[derive(Resource)]
pub struct ContinuousPulseTimer(pub Timer);

impl Default for ContinuousPulseTimer {
    fn default() -> Self {
        Self(Timer::from_seconds(
            defaults::CONTINUOUS_PULSE_INTERVAL,
            TimerMode::Repeating,
        ))
    }
}

/// Relayouts chains whose geometry inputs no longer match their state.
///
/// Comparing against the chain instead of relying on change detection
/// keeps relayouts (which zero all velocities) from firing when a
/// non-geometry knob like `impact_power` is tweaked at runtime.
pub fn sync_surface_geometry(
    mut surfaces: Query<(&mut WaveSurface, &WaveSurfaceConfig, &SurfaceBounds)>,
) {
    for (mut surface, config, bounds) in surfaces.iter_mut() {
        if surface.chain.len() != config.point_count {
            surface.chain.set_point_count(config.point_count);
        }
        if surface.chain.bounds() != bounds.0 || surface.chain.rest_height() != config.target_height
        {
            surface.chain.resize(bounds.0, config.target_height);
        }
    }
}

/// Drains external impact events into their target chains.
pub fn apply_surface_impacts(
    mut events: EventReader<SurfaceImpactEvent>,
    mut surfaces: Query<(&mut WaveSurface, &WaveSurfaceConfig)>,
) {
    for event in events.read() {
        let Ok((mut surface, config)) = surfaces.get_mut(event.surface) else {
            debug!("impact event for missing surface {:?}", event.surface);
            continue;
        };
        surface
            .chain
            .apply_impact(event.position, event.vertical_velocity, config.impact_power);
    }
}

/// Applies the periodic disturbance pulse to every surface that opted in.
pub fn tick_continuous_pulses(
    time: Res<Time>,
    mut timer: ResMut<ContinuousPulseTimer>,
    mut surfaces: Query<(&mut WaveSurface, &WaveSurfaceConfig)>,
) {
    if !timer.0.tick(time.delta()).just_finished() {
        return;
    }

    for (mut surface, config) in surfaces.iter_mut() {
        if config.continuous_impact {
            surface.chain.apply_pulse(config.continuous_impact_power);
        }
    }
}

/// Advances every chain by the frame delta.
pub fn step_wave_surfaces(
    time: Res<Time>,
    mut surfaces: Query<(&mut WaveSurface, &WaveSurfaceConfig)>,
) {
    let delta = time.delta_secs();
    for (mut surface, config) in surfaces.iter_mut() {
        surface.chain.step(delta, config);
    }
}
