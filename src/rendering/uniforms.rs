//! Shader-parameter layout for surface points.

use bevy::math::Vec2;

use bevy_log::warn;

use super::SurfaceRenderer;

/// Capacity of the point array in the surface shader's uniform block.
pub const MAX_UNIFORM_POINTS: usize = 64;

/// Fixed-capacity point block matching the surface shader's uniform
/// layout. Chains longer than [`MAX_UNIFORM_POINTS`] are truncated with a
/// warning; unused slots stay zeroed.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct SurfacePointsUniform {
    /// Point positions; only the first `point_count` entries are live.
    pub points: [Vec2; MAX_UNIFORM_POINTS],
    /// Number of live entries.
    pub point_count: u32,
    /// Padding for 16-byte uniform alignment.
    pub _padding: [u32; 3],
}

impl Default for SurfacePointsUniform {
    fn default() -> Self {
        Self {
            points: [Vec2::ZERO; MAX_UNIFORM_POINTS],
            point_count: 0,
            _padding: [0; 3],
        }
    }
}

impl SurfacePointsUniform {
    /// Packs a point snapshot into the uniform layout.
    pub fn from_points(points: &[Vec2]) -> Self {
        let mut uniform = Self::default();
        uniform.set_points(points);
        uniform
    }

    /// Replaces the live points, truncating at the array capacity.
    pub fn set_points(&mut self, points: &[Vec2]) {
        if points.len() > MAX_UNIFORM_POINTS {
            warn!(
                "surface has {} points, shader block holds {}; truncating",
                points.len(),
                MAX_UNIFORM_POINTS
            );
        }
        let live = points.len().min(MAX_UNIFORM_POINTS);

        self.points[..live].copy_from_slice(&points[..live]);
        self.points[live..].fill(Vec2::ZERO);
        self.point_count = live as u32;
    }

    /// The live entries.
    pub fn live_points(&self) -> &[Vec2] {
        &self.points[..self.point_count as usize]
    }
}

impl SurfaceRenderer for SurfacePointsUniform {
    fn upload(&mut self, points: &[Vec2]) {
        self.set_points(points);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points_copies_and_counts() {
        let points = [Vec2::new(0.0, 20.0), Vec2::new(50.0, 18.0), Vec2::new(100.0, 20.0)];
        let uniform = SurfacePointsUniform::from_points(&points);

        assert_eq!(uniform.point_count, 3);
        assert_eq!(uniform.live_points(), &points);
        assert_eq!(uniform.points[3], Vec2::ZERO);
    }

    #[test]
    fn test_truncates_at_capacity() {
        let points = vec![Vec2::ONE; MAX_UNIFORM_POINTS + 6];
        let uniform = SurfacePointsUniform::from_points(&points);

        assert_eq!(uniform.point_count as usize, MAX_UNIFORM_POINTS);
        assert!(uniform.live_points().iter().all(|p| *p == Vec2::ONE));
    }

    #[test]
    fn test_upload_replaces_previous_snapshot() {
        let mut uniform = SurfacePointsUniform::from_points(&[Vec2::ONE; 10]);
        uniform.upload(&[Vec2::new(2.0, 3.0); 4]);

        assert_eq!(uniform.point_count, 4);
        assert_eq!(uniform.points[4], Vec2::ZERO);
    }
}
