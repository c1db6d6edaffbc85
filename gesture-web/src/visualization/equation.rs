//! Equation surface - user expression sampled as a height field

use super::mesh::{finite_or_zero, SurfaceMesh};
use crate::config::SurfaceConfig;
use crate::expr::{Bindings, Evaluable};

/// Sample `expr` over the square domain with `k` bound.
///
/// A failing or non-finite sample becomes height 0; `None` (the equation did
/// not compile) yields a flat surface.
pub fn equation_surface(
    expr: Option<&dyn Evaluable>,
    k: f32,
    resolution: u32,
    config: &SurfaceConfig,
) -> SurfaceMesh {
    let k = k as f64;
    SurfaceMesh::height_field(config.equation_size, resolution, |x, y| {
        let z = expr
            .and_then(|e| e.eval(&Bindings { x: x as f64, y: y as f64, k }).ok())
            .unwrap_or(0.0);
        finite_or_zero(z as f32 * config.height_scale)
    })
}
