//! Physics-engine integration for wave surfaces.

pub mod sensor;

pub use sensor::{OverlappingBodies, WaveSurfaceBundle};
