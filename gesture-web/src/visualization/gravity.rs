//! Gravity well - softened `-mass / r` potential as a wireframe sheet

use std::f32::consts::FRAC_PI_2;

use nalgebra::{Rotation3, Vector3};

use super::mesh::{finite_or_zero, SurfaceMesh};
use crate::config::SurfaceConfig;

/// Sphere marking the central mass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassMarker {
    pub radius: f32,
    pub position: [f32; 3],
}

#[derive(Debug, Clone, PartialEq)]
pub struct GravityWell {
    pub mass: f32,
    /// Already laid flat: depth runs along -Y
    pub mesh: SurfaceMesh,
    pub marker: MassMarker,
}

/// Build the well for parameter `k` (mass = `k * mass_scale`)
pub fn gravity_well(k: f32, config: &SurfaceConfig) -> GravityWell {
    let mass = k * config.mass_scale;
    let softening = config.softening;

    let mut mesh = SurfaceMesh::height_field(config.gravity_size, config.gravity_resolution, |x, y| {
        finite_or_zero(-mass / ((x * x + y * y).sqrt() + softening))
    });
    mesh.rotate(&Rotation3::from_axis_angle(&Vector3::x_axis(), -FRAC_PI_2));

    GravityWell {
        mass,
        mesh,
        marker: MassMarker {
            radius: mass * config.marker_radius_scale,
            position: [0.0, -mass * config.marker_depth_scale, 0.0],
        },
    }
}
