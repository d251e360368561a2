use bevy::prelude::*;

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SurfaceUpdateSet {
    Geometry,
    Impacts,
    Simulation,
    Rendering,
}
