//! Renderer-facing output of the simulation.
//!
//! The simulation itself draws nothing. After each step it publishes the
//! ordered point positions, and renderers consume them however they like:
//! read the [`SurfaceProfile`] component directly, or pack the points into
//! a [`SurfacePointsUniform`] for a shader-parameter upload.

use bevy::math::Vec2;

pub mod profile;
pub mod uniforms;

pub use profile::SurfaceProfile;
pub use uniforms::{SurfacePointsUniform, MAX_UNIFORM_POINTS};

/// External sink for per-tick surface snapshots.
pub trait SurfaceRenderer {
    /// Receives the ordered point positions after each simulation step.
    fn upload(&mut self, points: &[Vec2]);
}
