//! Imported model normalization
//!
//! Loading is done by the host; here the loaded asset's bounding box is
//! turned into a transform that centers it and scales its largest side to
//! a fixed size, whatever units the source file used.

use nalgebra::{Point3, Vector3};

use crate::error::ModelError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelBounds {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

impl ModelBounds {
    pub fn new(min: [f32; 3], max: [f32; 3]) -> Self {
        Self {
            min: Point3::from(min),
            max: Point3::from(max),
        }
    }

    pub fn center(&self) -> Point3<f32> {
        nalgebra::center(&self.min, &self.max)
    }

    pub fn extent(&self) -> Vector3<f32> {
        self.max - self.min
    }
}

/// `world = local * scale + offset`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelTransform {
    pub offset: [f32; 3],
    pub scale: f32,
}

impl ModelTransform {
    pub fn apply(&self, point: [f32; 3]) -> [f32; 3] {
        let p = Vector3::from(point) * self.scale + Vector3::from(self.offset);
        p.into()
    }
}

pub fn normalize(bounds: &ModelBounds, target_size: f32) -> Result<ModelTransform, ModelError> {
    let extent = bounds.extent();
    if !extent.iter().all(|v| v.is_finite()) || !bounds.min.coords.iter().all(|v| v.is_finite()) {
        return Err(ModelError::NonFiniteBounds);
    }

    let largest = extent.max();
    if largest <= 0.0 {
        return Err(ModelError::DegenerateBounds);
    }

    let scale = target_size / largest;
    let offset = -bounds.center().coords * scale;
    Ok(ModelTransform {
        offset: offset.into(),
        scale,
    })
}
