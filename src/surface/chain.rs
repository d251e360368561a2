//! Sample chain for a single water surface.
//!
//! Coordinates are screen-space: +Y points down, so the "top" of the bounds
//! is `bounds.min.y` and the rest line sits `rest_height` below it. A body
//! falling into the water moves toward larger Y, and the positional delta it
//! accumulates over one tick becomes a downward impulse on the nearest point.

use bevy::math::{Rect, Vec2};

use super::config::WaveSurfaceConfig;
use super::impact::ImpactToken;

/// The simulated height profile of one water body.
///
/// Holds the point positions and their vertical velocities, index-aligned.
/// Points 0 and N-1 are anchors; see the module docs for the boundary rules.
#[derive(Debug, Clone)]
pub struct SurfaceChain {
    points: Vec<Vec2>,
    velocities: Vec<f32>,
    bounds: Rect,
    rest_height: f32,
}

impl SurfaceChain {
    /// Creates a chain of `point_count` samples laid out across `bounds`.
    pub fn new(point_count: usize, bounds: Rect, rest_height: f32) -> Self {
        let mut chain = Self {
            points: vec![Vec2::ZERO; point_count],
            velocities: vec![0.0; point_count],
            bounds,
            rest_height,
        };
        chain.resize(bounds, rest_height);
        chain
    }

    /// Recomputes the point layout for new geometry.
    ///
    /// X coordinates are spaced evenly across the bounds width, every Y is
    /// reset to the rest line, and all velocities are zeroed, so no state
    /// from the previous geometry survives. Callable at any time.
    pub fn resize(&mut self, bounds: Rect, rest_height: f32) {
        self.bounds = bounds;
        self.rest_height = rest_height;

        let count = self.points.len();
        let spacing = if count > 1 {
            bounds.width() / (count - 1) as f32
        } else {
            0.0
        };
        let rest = bounds.min.y + rest_height;

        for (index, point) in self.points.iter_mut().enumerate() {
            *point = Vec2::new(bounds.min.x + spacing * index as f32, rest);
        }
        self.velocities.fill(0.0);
    }

    /// Re-allocates the chain to a new sample count and recomputes the
    /// layout. Same consistency guarantee as [`SurfaceChain::resize`].
    pub fn set_point_count(&mut self, point_count: usize) {
        self.points.resize(point_count, Vec2::ZERO);
        self.velocities.resize(point_count, 0.0);
        self.resize(self.bounds, self.rest_height);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    #[inline]
    pub fn rest_height(&self) -> f32 {
        self.rest_height
    }

    /// Y coordinate of the undisturbed surface.
    #[inline]
    pub fn rest_level(&self) -> f32 {
        self.bounds.min.y + self.rest_height
    }

    /// The sub-rectangle bodies must intersect to disturb the surface:
    /// from the rest line down to the bottom of the bounds.
    pub fn interaction_region(&self) -> Rect {
        let top = self.rest_level().min(self.bounds.max.y);
        Rect::from_corners(Vec2::new(self.bounds.min.x, top), self.bounds.max)
    }

    /// Ordered point positions, refreshed in place by [`SurfaceChain::step`].
    #[inline]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Vertical velocities, index-aligned with [`SurfaceChain::points`].
    #[inline]
    pub fn velocities(&self) -> &[f32] {
        &self.velocities
    }

    /// Directly displaces one sample to the given Y, for scripted
    /// disturbances. Does not touch velocities.
    pub fn set_height(&mut self, index: usize, height: f32) {
        if let Some(point) = self.points.get_mut(index) {
            point.y = height;
        }
    }

    /// Index of the sample closest to `position`. Ties resolve to the
    /// lowest index. Returns `None` for an empty chain.
    pub fn nearest_index(&self, position: Vec2) -> Option<usize> {
        let mut nearest: Option<(usize, f32)> = None;
        for (index, point) in self.points.iter().enumerate() {
            let distance = point.distance_squared(position);
            match nearest {
                Some((_, lowest)) if distance >= lowest => {}
                _ => nearest = Some((index, distance)),
            }
        }
        nearest.map(|(index, _)| index)
    }

    /// Adds `vertical_velocity * power` to the sample nearest `position`.
    ///
    /// Anchor points can be selected and accumulate velocity like any other
    /// sample; the step simply never integrates their positions.
    pub fn apply_impact(&mut self, position: Vec2, vertical_velocity: f32, power: f32) {
        if let Some(index) = self.nearest_index(position) {
            self.apply_impulse(index, vertical_velocity, power);
        }
    }

    /// Indexed form of [`SurfaceChain::apply_impact`]. Out-of-range indices
    /// (the chain was re-sized while an impact was in flight) are dropped.
    pub fn apply_impulse(&mut self, index: usize, vertical_velocity: f32, power: f32) {
        if let Some(velocity) = self.velocities.get_mut(index) {
            *velocity += vertical_velocity * power;
        }
    }

    /// First half of a deferred impact: captures where the body is now and
    /// which sample it will disturb. The caller holds the token for one
    /// tick, then either calls [`SurfaceChain::complete_impact`] with the
    /// body's new position or drops the token if the body is gone.
    pub fn begin_impact(&self, position: Vec2) -> Option<ImpactToken> {
        self.nearest_index(position)
            .map(|index| ImpactToken::new(position, index))
    }

    /// Second half of a deferred impact: the body's per-tick vertical
    /// displacement becomes the impulse.
    pub fn complete_impact(&mut self, token: ImpactToken, new_position: Vec2, power: f32) {
        let delta_y = new_position.y - token.start_position().y;
        self.apply_impulse(token.target_index(), delta_y, power);
    }

    /// Adds `power` to the three fixed disturbance samples: one near each
    /// edge and one in the middle. No-op for chains without interior points.
    pub fn apply_pulse(&mut self, power: f32) {
        let count = self.points.len();
        if count < 3 {
            return;
        }
        for index in [1, count / 2, count - 2] {
            self.velocities[index] += power;
        }
    }

    /// Advances the simulation by one tick.
    ///
    /// Interior points get a spring-damper velocity update followed by the
    /// position integration (semi-implicit Euler: the position step uses the
    /// velocity just computed). Then `spread_passes` full sweeps convert
    /// height differences into neighbor velocity impulses. Heights do not
    /// change during spreading, so every pass adds the same increment;
    /// the pass count scales how aggressively waves propagate.
    pub fn step(&mut self, delta: f32, config: &WaveSurfaceConfig) {
        let count = self.points.len();
        if count < 2 {
            return;
        }

        let rest = self.rest_level();
        for index in 1..count - 1 {
            let extension = self.points[index].y - rest;
            let loss = -config.dampening * self.velocities[index];
            self.velocities[index] += -config.stiffness * extension + loss;
            self.points[index].y += self.velocities[index] * delta;
        }

        for _ in 0..config.spread_passes {
            for index in 0..count {
                if index > 0 {
                    self.velocities[index - 1] +=
                        config.spread_factor * (self.points[index].y - self.points[index - 1].y);
                }
                if index + 1 < count {
                    self.velocities[index + 1] +=
                        config.spread_factor * (self.points[index].y - self.points[index + 1].y);
                }
            }
        }
    }
}
