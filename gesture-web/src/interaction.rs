//! Interaction state - accumulated rotation, zoom and scalar parameter
//!
//! A pure fold: each `GestureDelta` produces a new state value, nothing else.

use nalgebra::Vector3;

use crate::config::InteractionConfig;
use crate::gesture::GestureDelta;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionState {
    /// Cumulative rotation (radians); full turns accumulate, no wraparound
    pub rotation: Vector3<f32>,
    pub zoom: f32,
    /// Scalar parameter `k`, already smoothed upstream
    pub parameter_k: f32,
}

impl InteractionState {
    pub fn new(parameter_k: f32) -> Self {
        Self {
            rotation: Vector3::zeros(),
            zoom: 1.0,
            parameter_k,
        }
    }

    /// Fold one delta into the state. Absent fields are identity.
    pub fn apply(&self, delta: &GestureDelta, bounds: &InteractionConfig) -> Self {
        let mut next = *self;
        if let Some(rotation) = delta.rotation {
            next.rotation += rotation;
        }
        if let Some(zoom) = delta.zoom {
            next.zoom = (self.zoom + zoom).clamp(bounds.min_zoom, bounds.max_zoom);
        }
        if let Some(k) = delta.parameter {
            next.parameter_k = k;
        }
        next
    }

    /// Back to the canonical view; `parameter_k` is kept
    pub fn reset(&self) -> Self {
        Self {
            rotation: Vector3::zeros(),
            zoom: 1.0,
            parameter_k: self.parameter_k,
        }
    }
}

impl Default for InteractionState {
    fn default() -> Self {
        Self::new(InteractionConfig::default().initial_parameter)
    }
}
