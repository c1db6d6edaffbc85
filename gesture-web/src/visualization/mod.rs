//! Visualization module - geometry for the active mode
//!
//! Re-exports only. All logic in submodules.

mod equation;
mod generator;
mod gravity;
mod mesh;
mod model;
mod pendulum;

pub use equation::equation_surface;
pub use generator::{Geometry, Visualizer};
pub use gravity::{gravity_well, GravityWell, MassMarker};
pub use mesh::{finite_or_zero, SurfaceMesh};
pub use model::{normalize, ModelBounds, ModelTransform};
pub use pendulum::{PendulumFrame, PendulumScene, RodPose};
