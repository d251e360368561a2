//! Per-entity point snapshots.

use bevy::math::Vec2;
use bevy::prelude::*;

use crate::surface::plugin::WaveSurface;

/// Read-only snapshot of a surface's point positions, refreshed once per
/// tick after the simulation step. Render systems read this instead of
/// reaching into the chain.
#[derive(Component, Debug, Clone, Default)]
pub struct SurfaceProfile {
    points: Vec<Vec2>,
}

impl SurfaceProfile {
    /// Ordered point positions from the most recent step.
    #[inline]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub(crate) fn copy_from(&mut self, points: &[Vec2]) {
        self.points.clear();
        self.points.extend_from_slice(points);
    }
}

/// Copies every chain's points into its profile.
pub fn publish_surface_profiles(mut surfaces: Query<(&WaveSurface, &mut SurfaceProfile)>) {
    for (surface, mut profile) in surfaces.iter_mut() {
        profile.copy_from(surface.chain.points());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_from_replaces_contents() {
        let mut profile = SurfaceProfile::default();
        profile.copy_from(&[Vec2::ZERO, Vec2::ONE]);
        assert_eq!(profile.len(), 2);

        profile.copy_from(&[Vec2::new(3.0, 4.0)]);
        assert_eq!(profile.points(), &[Vec2::new(3.0, 4.0)]);
    }
}
