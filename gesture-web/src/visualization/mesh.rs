//! Square height-field grid with vertex normals

use nalgebra::{Rotation3, Vector3};

use crate::config::MAX_RESOLUTION;

/// `(resolution + 1)²` vertices over `[-size/2, size/2]²`, two triangles per cell.
/// Vertex `(i, j)` sits at `i * (resolution + 1) + j`; `x` follows `i`,
/// `y` follows `j`, height goes into `z`.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceMesh {
    pub resolution: u32,
    pub size: f32,
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl SurfaceMesh {
    /// Sample `height(x, y)` on the grid and build normals.
    /// `resolution` is clamped to `1..=MAX_RESOLUTION`.
    pub fn height_field<F>(size: f32, resolution: u32, mut height: F) -> Self
    where
        F: FnMut(f32, f32) -> f32,
    {
        let res = resolution.clamp(1, MAX_RESOLUTION);
        let n = res + 1;
        let mut positions = Vec::with_capacity(n as usize * n as usize);

        for i in 0..n {
            for j in 0..n {
                let x = (i as f32 / res as f32) * size - size / 2.0;
                let y = (j as f32 / res as f32) * size - size / 2.0;
                positions.push([x, y, height(x, y)]);
            }
        }

        let mut indices = Vec::with_capacity(res as usize * res as usize * 6);
        for i in 0..res {
            for j in 0..res {
                let a = i * n + j;
                let b = (i + 1) * n + j;
                let c = (i + 1) * n + j + 1;
                let d = i * n + j + 1;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        let mut mesh = Self {
            resolution: res,
            size,
            positions,
            normals: Vec::new(),
            indices,
        };
        mesh.recompute_normals();
        mesh
    }

    pub fn vertex_index(&self, i: u32, j: u32) -> usize {
        (i * (self.resolution + 1) + j) as usize
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Area-weighted vertex normals from the current positions
    pub fn recompute_normals(&mut self) {
        let mut acc = vec![Vector3::<f32>::zeros(); self.positions.len()];

        for tri in self.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let pa = Vector3::from(self.positions[a]);
            let pb = Vector3::from(self.positions[b]);
            let pc = Vector3::from(self.positions[c]);
            // cross product length is twice the triangle area
            let face = (pb - pa).cross(&(pc - pa));
            acc[a] += face;
            acc[b] += face;
            acc[c] += face;
        }

        self.normals = acc
            .into_iter()
            .map(|n| {
                n.try_normalize(f32::EPSILON)
                    .unwrap_or_else(Vector3::z)
                    .into()
            })
            .collect();
    }

    /// Rotate positions and normals in place
    pub fn rotate(&mut self, rotation: &Rotation3<f32>) {
        for p in self.positions.iter_mut() {
            *p = (rotation * Vector3::from(*p)).into();
        }
        for n in self.normals.iter_mut() {
            *n = (rotation * Vector3::from(*n)).into();
        }
    }
}

/// Replace NaN/inf with 0 before anything reaches the renderer
pub fn finite_or_zero(v: f32) -> f32 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: [f32; 3], b: [f32; 3]) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-5)
    }

    #[test]
    fn test_grid_layout() {
        let mesh = SurfaceMesh::height_field(4.0, 4, |_, _| 0.0);
        assert_eq!(mesh.vertex_count(), 25);
        assert_eq!(mesh.indices.len(), 4 * 4 * 6);
        assert_eq!(mesh.positions[0], [-2.0, -2.0, 0.0]);
        assert_eq!(mesh.positions[mesh.vertex_index(4, 0)], [2.0, -2.0, 0.0]);
        assert_eq!(mesh.positions[mesh.vertex_index(0, 4)], [-2.0, 2.0, 0.0]);
        assert_eq!(mesh.positions[mesh.vertex_index(2, 2)], [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_flat_normals_point_up() {
        let mesh = SurfaceMesh::height_field(2.0, 3, |_, _| 1.0);
        for n in &mesh.normals {
            assert!(close(*n, [0.0, 0.0, 1.0]), "got {:?}", n);
        }
    }

    #[test]
    fn test_sloped_normals() {
        let mesh = SurfaceMesh::height_field(2.0, 4, |x, _| x);
        let s = std::f32::consts::FRAC_1_SQRT_2;
        let n = mesh.normals[mesh.vertex_index(2, 2)];
        assert!(close(n, [-s, 0.0, s]), "got {:?}", n);
    }

    #[test]
    fn test_zero_resolution_is_one_cell() {
        let mesh = SurfaceMesh::height_field(1.0, 0, |_, _| 0.0);
        assert_eq!(mesh.resolution, 1);
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.indices.len(), 6);
    }

    #[test]
    fn test_oversized_resolution_is_clamped() {
        let mesh = SurfaceMesh::height_field(1.0, 70_000, |_, _| 0.0);
        assert_eq!(mesh.resolution, MAX_RESOLUTION);
        assert_eq!(mesh.vertex_count(), 513 * 513);
        assert_eq!(mesh.indices.len(), 512 * 512 * 6);
    }

    #[test]
    fn test_rotate_moves_height_to_y() {
        let mut mesh = SurfaceMesh::height_field(2.0, 2, |_, _| -1.0);
        let rot = Rotation3::from_axis_angle(&Vector3::x_axis(), -std::f32::consts::FRAC_PI_2);
        mesh.rotate(&rot);
        let center = mesh.positions[mesh.vertex_index(1, 1)];
        assert!(close(center, [0.0, -1.0, 0.0]), "got {:?}", center);
        let n = mesh.normals[mesh.vertex_index(1, 1)];
        assert!(close(n, [0.0, 1.0, 0.0]), "got {:?}", n);
    }

    #[test]
    fn test_finite_or_zero() {
        assert_eq!(finite_or_zero(1.5), 1.5);
        assert_eq!(finite_or_zero(f32::NAN), 0.0);
        assert_eq!(finite_or_zero(f32::NEG_INFINITY), 0.0);
    }
}
