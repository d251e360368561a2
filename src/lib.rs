//! Spring-mesh surface waves for 2D water bodies.
//!
//! A water body is modeled as a chain of sample points spread across the top
//! of its rectangle. Each interior point behaves like a damped spring pulled
//! toward the rest line, and spread passes leak height differences into
//! neighboring velocities so disturbances travel outward as waves. Bodies
//! falling through the surface region push the nearest point down in
//! proportion to how far they moved that tick.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 WaveSurfaceConfig (serde)                 │
//! │   stiffness / dampening / spreading / impact tuning       │
//! └───────────────────────────┬──────────────────────────────┘
//!                             │
//!             ┌───────────────┴───────────────┐
//!             ▼                               ▼
//!     ┌───────────────┐               ┌───────────────┐
//!     │  SurfaceChain │               │  Sensor glue  │
//!     │  (chain.rs)   │◄──impulses────│  (sensor.rs)  │
//!     │               │               │               │
//!     │ - springs     │               │ - overlap set │
//!     │ - spreading   │               │ - deferred    │
//!     │ - impacts     │               │   impacts     │
//!     └───────┬───────┘               └───────────────┘
//!             │ points
//!             ▼
//!     ┌───────────────┐
//!     │ SurfaceProfile│  → shader points upload
//!     └───────────────┘
//! ```
//!
//! The crate does not render anything and does not own the physics context:
//! hosts add `RapierPhysicsPlugin` themselves and read [`SurfaceProfile`]
//! (or a [`SurfaceRenderer`] sink) to draw the surface.

pub mod physics;
pub mod rendering;
pub mod sets;
pub mod surface;

pub use physics::sensor::WaveSurfaceBundle;
pub use rendering::{SurfaceProfile, SurfaceRenderer};
pub use sets::SurfaceUpdateSet;
pub use surface::chain::SurfaceChain;
pub use surface::config::{SurfacePreset, WaveSurfaceConfig};
pub use surface::impact::SurfaceImpactEvent;
pub use surface::plugin::{ContinuousPulseTimer, SurfaceBounds, WaveSurface, WaveSurfacePlugin};
