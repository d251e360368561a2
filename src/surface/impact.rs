//! Impact delivery for wave surfaces.
//!
//! Two paths feed impulses into a chain:
//!
//! 1. [`SurfaceImpactEvent`]: a host that already knows a body's vertical
//!    velocity sends one event per disturbance.
//! 2. Deferred measurement: the sensor glue captures an [`ImpactToken`]
//!    for every overlapping body, holds it for one tick, and completes it
//!    with the body's new position. The per-tick positional delta becomes
//!    the impulse, so the strength reflects how far the body actually
//!    moved, not an instantaneous velocity reading.
//!
//! A token whose body (or surface) disappears during the one-tick
//! suspension is dropped silently.

use std::collections::VecDeque;

use bevy::math::Vec2;
use bevy::prelude::*;

/// A disturbance from an external impact source.
#[derive(Event, Debug, Clone)]
pub struct SurfaceImpactEvent {
    /// The surface entity to disturb.
    pub surface: Entity,
    /// Where the disturbance happened; the nearest sample takes the hit.
    pub position: Vec2,
    /// Vertical velocity of whatever hit the surface. Scaled by the
    /// surface's `impact_power`.
    pub vertical_velocity: f32,
}

/// Start-of-tick capture for a deferred impact measurement.
///
/// The target sample is chosen when the token is created, from the body's
/// position at that moment; completion only supplies the displacement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactToken {
    start_position: Vec2,
    target_index: usize,
}

impl ImpactToken {
    pub(crate) fn new(start_position: Vec2, target_index: usize) -> Self {
        Self {
            start_position,
            target_index,
        }
    }

    /// Where the body was when the measurement started.
    #[inline]
    pub fn start_position(&self) -> Vec2 {
        self.start_position
    }

    /// The sample index that will receive the impulse.
    #[inline]
    pub fn target_index(&self) -> usize {
        self.target_index
    }
}

/// A deferred impact measurement awaiting its completion tick.
#[derive(Debug, Clone, Copy)]
pub struct PendingImpact {
    /// The surface that will take the impulse.
    pub surface: Entity,
    /// The body being measured.
    pub body: Entity,
    /// Chain-level capture (start position + target sample).
    pub token: ImpactToken,
}

/// Queue of deferred impacts, drained one tick after they are begun.
///
/// Completion runs before new captures each frame, so everything in the
/// queue is exactly one tick old when it is taken.
#[derive(Resource, Debug, Default)]
pub struct PendingImpacts {
    queue: VecDeque<PendingImpact>,
}

impl PendingImpacts {
    /// Queues a freshly begun measurement.
    pub fn push(&mut self, impact: PendingImpact) {
        self.queue.push_back(impact);
    }

    /// Takes every queued measurement, oldest first.
    pub fn take(&mut self) -> impl Iterator<Item = PendingImpact> {
        std::mem::take(&mut self.queue).into_iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn impact(index: usize) -> PendingImpact {
        PendingImpact {
            surface: Entity::from_raw(0),
            body: Entity::from_raw(1),
            token: ImpactToken::new(Vec2::ZERO, index),
        }
    }

    #[test]
    fn test_queue_drains_in_fifo_order() {
        let mut pending = PendingImpacts::default();
        pending.push(impact(1));
        pending.push(impact(2));
        pending.push(impact(3));
        assert_eq!(pending.len(), 3);

        let order: Vec<usize> = pending.take().map(|i| i.token.target_index()).collect();
        assert_eq!(order, vec![1, 2, 3]);
        assert!(pending.is_empty());
    }

    #[test]
    fn test_take_on_empty_queue_yields_nothing() {
        let mut pending = PendingImpacts::default();
        assert_eq!(pending.take().count(), 0);
    }
}
