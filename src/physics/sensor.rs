//! Rapier glue: overlap sensing and deferred impact measurement.
//!
//! Each surface entity carries a sensor cuboid covering its interaction
//! region (the bounds with `target_height` trimmed off the top). Collision
//! events maintain the set of bodies inside the region; every tick, each
//! overlapping body begins a deferred impact, and the previous tick's
//! captures complete with the body's new position. A body that despawns
//! between capture and completion is dropped silently.
//!
//! The host is responsible for adding `RapierPhysicsPlugin`; this crate
//! only reads positions and collision events from it.

use std::collections::HashSet;

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use bevy_log::debug;

use crate::rendering::profile::SurfaceProfile;
use crate::surface::config::WaveSurfaceConfig;
use crate::surface::impact::{PendingImpact, PendingImpacts};
use crate::surface::plugin::{SurfaceBounds, WaveSurface};

/// Collision groups used by surface sensors.
pub mod collision_groups {
    use bevy_rapier2d::prelude::Group;

    /// Wave surface sensor regions.
    pub const SURFACE: Group = Group::GROUP_1;
}

/// Bodies currently inside a surface's sensor region.
#[derive(Component, Debug, Default)]
pub struct OverlappingBodies {
    bodies: HashSet<Entity>,
}

impl OverlappingBodies {
    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.bodies.iter().copied()
    }

    #[inline]
    pub fn contains(&self, body: Entity) -> bool {
        self.bodies.contains(&body)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

/// Everything a disturbable water surface entity needs.
#[derive(Bundle)]
pub struct WaveSurfaceBundle {
    pub surface: WaveSurface,
    pub config: WaveSurfaceConfig,
    pub bounds: SurfaceBounds,
    pub profile: SurfaceProfile,
    pub overlaps: OverlappingBodies,
    pub collider: Collider,
    pub sensor: Sensor,
    pub active_events: ActiveEvents,
    pub collision_groups: CollisionGroups,
    pub transform: Transform,
    pub global_transform: GlobalTransform,
}

impl WaveSurfaceBundle {
    /// Builds a surface spanning `bounds`, with its sensor collider sized
    /// and positioned over the interaction region.
    pub fn new(config: WaveSurfaceConfig, bounds: Rect) -> Self {
        let config = config.sanitized();
        let surface = WaveSurface::new(&config, bounds);
        let region = surface.chain.interaction_region();

        Self {
            collider: Collider::cuboid(region.width() / 2.0, region.height() / 2.0),
            sensor: Sensor,
            active_events: ActiveEvents::COLLISION_EVENTS,
            // The sensor must see every body type that can fall in.
            collision_groups: CollisionGroups::new(collision_groups::SURFACE, Group::ALL),
            transform: Transform::from_translation(region.center().extend(0.0)),
            global_transform: GlobalTransform::default(),
            bounds: SurfaceBounds(bounds),
            profile: SurfaceProfile::default(),
            overlaps: OverlappingBodies::default(),
            config,
            surface,
        }
    }
}

/// Maintains each surface's overlap set from rapier collision events.
pub fn track_surface_overlaps(
    mut events: EventReader<CollisionEvent>,
    mut surfaces: Query<&mut OverlappingBodies, With<WaveSurface>>,
) {
    for event in events.read() {
        match *event {
            CollisionEvent::Started(first, second, _) => {
                if let Ok(mut overlaps) = surfaces.get_mut(first) {
                    overlaps.bodies.insert(second);
                } else if let Ok(mut overlaps) = surfaces.get_mut(second) {
                    overlaps.bodies.insert(first);
                }
            }
            CollisionEvent::Stopped(first, second, _) => {
                if let Ok(mut overlaps) = surfaces.get_mut(first) {
                    overlaps.bodies.remove(&second);
                } else if let Ok(mut overlaps) = surfaces.get_mut(second) {
                    overlaps.bodies.remove(&first);
                }
            }
        }
    }
}

/// Completes the deferred impacts begun last tick.
///
/// Runs before [`begin_body_impacts`] so every queued capture is exactly
/// one tick old: the positional delta is one tick of real displacement.
pub fn complete_deferred_impacts(
    mut pending: ResMut<PendingImpacts>,
    mut surfaces: Query<(&mut WaveSurface, &WaveSurfaceConfig)>,
    bodies: Query<&GlobalTransform>,
) {
    for impact in pending.take() {
        let Ok(transform) = bodies.get(impact.body) else {
            debug!("deferred impact dropped, body {:?} is gone", impact.body);
            continue;
        };
        let Ok((mut surface, config)) = surfaces.get_mut(impact.surface) else {
            continue;
        };
        let new_position = transform.translation().truncate();
        surface
            .chain
            .complete_impact(impact.token, new_position, config.impact_power);
    }
}

/// Begins a deferred impact for every body overlapping a surface.
///
/// One capture per overlapping body per tick; a body resting in the
/// region keeps producing (zero-displacement) impulses.
pub fn begin_body_impacts(
    mut pending: ResMut<PendingImpacts>,
    mut surfaces: Query<(Entity, &WaveSurface, &mut OverlappingBodies)>,
    bodies: Query<&GlobalTransform, With<RigidBody>>,
) {
    for (entity, surface, mut overlaps) in surfaces.iter_mut() {
        // Entities that despawned without a Stopped event.
        overlaps.bodies.retain(|body| bodies.contains(*body));

        for body in overlaps.iter() {
            let Ok(transform) = bodies.get(body) else {
                continue;
            };
            let position = transform.translation().truncate();
            if let Some(token) = surface.chain.begin_impact(position) {
                pending.push(PendingImpact {
                    surface: entity,
                    body,
                    token,
                });
            }
        }
    }
}

/// Resizes and repositions sensor colliders after geometry changes.
pub fn sync_surface_sensors(
    mut surfaces: Query<
        (&WaveSurface, &mut Collider, &mut Transform),
        Or<(Changed<SurfaceBounds>, Changed<WaveSurfaceConfig>)>,
    >,
) {
    for (surface, mut collider, mut transform) in surfaces.iter_mut() {
        let region = surface.chain.interaction_region();
        *collider = Collider::cuboid(region.width() / 2.0, region.height() / 2.0);
        transform.translation = region.center().extend(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_sensor_covers_interaction_region() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        let bundle = WaveSurfaceBundle::new(WaveSurfaceConfig::default(), bounds);

        // Region spans y in [20, 100]; its center sits at (50, 60).
        assert_eq!(bundle.transform.translation, Vec3::new(50.0, 60.0, 0.0));
        assert_eq!(bundle.bounds.0, bounds);
        assert!(bundle.overlaps.is_empty());
    }

    #[test]
    fn test_bundle_sanitizes_config() {
        let bundle = WaveSurfaceBundle::new(
            WaveSurfaceConfig {
                point_count: 1,
                ..WaveSurfaceConfig::default()
            },
            Rect::new(0.0, 0.0, 100.0, 100.0),
        );

        assert_eq!(bundle.config.point_count, 3);
        assert_eq!(bundle.surface.chain.len(), 3);
    }
}
