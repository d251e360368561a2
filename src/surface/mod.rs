//! Surface-wave simulation for a single water body.
//!
//! The simulation is a one-dimensional spring mesh: a fixed-size chain of
//! sample points spaced across the body's width, each carrying a vertical
//! velocity. Interior points are pulled toward the rest line by a Hooke
//! restoring term and lose energy to damping; spread passes then leak
//! height differences into neighbor velocities so disturbances travel.
//!
//! ## Boundary points
//! The first and last points are anchors: the integration step never moves
//! them. Their velocities still accumulate from impacts and spreading;
//! only position integration skips them. Renderers rely on the anchors
//! staying glued to the body's edges.
//!
//! ## Stability
//! There is no clamping anywhere in the update. Aggressive stiffness or
//! spread settings can and will diverge; that is a tuning concern, not an
//! error the simulation corrects.

pub mod chain;
pub mod config;
pub mod impact;
pub mod plugin;

pub use chain::SurfaceChain;
pub use config::{SurfacePreset, WaveSurfaceConfig};
pub use impact::{ImpactToken, PendingImpacts, SurfaceImpactEvent};
pub use plugin::{WaveSurface, WaveSurfacePlugin};
