//! Tunable constants, grouped per subsystem
//!
//! Every struct deserializes with `#[serde(default)]`, so the host can send
//! a partial JSON document and only override what it cares about.

use serde::{Deserialize, Serialize};

use crate::error::VizError;

// Upper limits accepted from host configuration
pub const MAX_RESOLUTION: u32 = 512;
pub const MAX_SUB_STEPS: u32 = 64;
pub const MAX_TRAIL_CAPACITY: usize = 20_000;
pub const MAX_SMOOTHING_WINDOW: usize = 120;

/// Gesture-to-signal mapping parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Camera feed is mirrored: the detector's "Left" label drives the right-hand role.
    pub mirrored: bool,
    /// Radians of rotation per normalized unit of palm travel
    pub rotation_sensitivity: f32,
    /// Palm movement below this (per axis) is ignored
    pub rotation_noise_floor: f32,
    /// Thumb-index distance below which the pinch is engaged
    pub pinch_threshold: f32,
    /// Pinch changes below this are ignored
    pub zoom_noise_floor: f32,
    pub zoom_gain: f32,
    /// Parameter value with the wrist at the bottom edge of the frame
    pub parameter_base: f32,
    /// Parameter range covered from bottom to top of the frame
    pub parameter_gain: f32,
    /// Number of samples averaged for the parameter signal
    pub smoothing_window: usize,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            mirrored: true,
            rotation_sensitivity: 4.5,
            rotation_noise_floor: 0.0005,
            pinch_threshold: 0.15,
            zoom_noise_floor: 0.001,
            zoom_gain: 4.0,
            parameter_base: 0.5,
            parameter_gain: 4.5,
            smoothing_window: 5,
        }
    }
}

/// Double pendulum physical constants and stepping policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: f64,
    pub length1: f64,
    pub length2: f64,
    pub mass1: f64,
    pub mass2: f64,
    /// Extra angle added to the first arm so the start is not symmetric
    pub initial_offset: f64,
    /// Frame time budget per unit of the rate parameter
    pub time_rate_scale: f64,
    pub sub_steps: u32,
    pub trail_capacity: usize,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 9.81,
            length1: 1.0,
            length2: 1.0,
            mass1: 1.0,
            mass2: 1.0,
            initial_offset: 0.1,
            time_rate_scale: 0.008,
            sub_steps: 4,
            trail_capacity: 5000,
        }
    }
}

/// Mesh generation constants for the surface modes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub equation_size: f32,
    pub height_scale: f32,
    pub gravity_size: f32,
    pub gravity_resolution: u32,
    pub mass_scale: f32,
    /// Keeps the well finite at the origin
    pub softening: f32,
    pub marker_radius_scale: f32,
    pub marker_depth_scale: f32,
    pub model_target_size: f32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            equation_size: 4.0,
            height_scale: 0.5,
            gravity_size: 6.0,
            gravity_resolution: 60,
            mass_scale: 0.5,
            softening: 0.3,
            marker_radius_scale: 0.2,
            marker_depth_scale: 0.5,
            model_target_size: 3.0,
        }
    }
}

/// Bounds and starting values for the interaction state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub initial_parameter: f32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            min_zoom: 0.1,
            max_zoom: 5.0,
            initial_parameter: 2.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub gesture: GestureConfig,
    pub physics: PhysicsConfig,
    pub surface: SurfaceConfig,
    pub interaction: InteractionConfig,
}

impl AppConfig {
    /// Decode and range-check. Anything out of range is rejected as a whole.
    pub fn from_json(json: &str) -> Result<Self, VizError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Every value must keep per-frame work bounded and free of panics
    pub fn validate(&self) -> Result<(), VizError> {
        let g = &self.gesture;
        non_negative("gesture.rotation_sensitivity", g.rotation_sensitivity as f64)?;
        non_negative("gesture.rotation_noise_floor", g.rotation_noise_floor as f64)?;
        positive("gesture.pinch_threshold", g.pinch_threshold as f64)?;
        non_negative("gesture.zoom_noise_floor", g.zoom_noise_floor as f64)?;
        finite("gesture.zoom_gain", g.zoom_gain as f64)?;
        finite("gesture.parameter_base", g.parameter_base as f64)?;
        finite("gesture.parameter_gain", g.parameter_gain as f64)?;
        within("gesture.smoothing_window", g.smoothing_window, 1, MAX_SMOOTHING_WINDOW)?;

        let p = &self.physics;
        finite("physics.gravity", p.gravity)?;
        positive("physics.length1", p.length1)?;
        positive("physics.length2", p.length2)?;
        positive("physics.mass1", p.mass1)?;
        positive("physics.mass2", p.mass2)?;
        finite("physics.initial_offset", p.initial_offset)?;
        non_negative("physics.time_rate_scale", p.time_rate_scale)?;
        within("physics.sub_steps", p.sub_steps, 1, MAX_SUB_STEPS)?;
        within("physics.trail_capacity", p.trail_capacity, 1, MAX_TRAIL_CAPACITY)?;

        let s = &self.surface;
        positive("surface.equation_size", s.equation_size as f64)?;
        finite("surface.height_scale", s.height_scale as f64)?;
        positive("surface.gravity_size", s.gravity_size as f64)?;
        within("surface.gravity_resolution", s.gravity_resolution, 1, MAX_RESOLUTION)?;
        finite("surface.mass_scale", s.mass_scale as f64)?;
        positive("surface.softening", s.softening as f64)?;
        finite("surface.marker_radius_scale", s.marker_radius_scale as f64)?;
        finite("surface.marker_depth_scale", s.marker_depth_scale as f64)?;
        positive("surface.model_target_size", s.model_target_size as f64)?;

        let i = &self.interaction;
        positive("interaction.min_zoom", i.min_zoom as f64)?;
        positive("interaction.max_zoom", i.max_zoom as f64)?;
        if i.min_zoom > i.max_zoom {
            return Err(range("interaction.min_zoom", "exceeds max_zoom"));
        }
        finite("interaction.initial_parameter", i.initial_parameter as f64)?;
        Ok(())
    }
}

fn range(field: &'static str, reason: &'static str) -> VizError {
    VizError::ConfigRange { field, reason }
}

fn finite(field: &'static str, value: f64) -> Result<(), VizError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(range(field, "must be finite"))
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), VizError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(range(field, "must be a positive number"))
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), VizError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(range(field, "must be zero or positive"))
    }
}

fn within<T: PartialOrd>(field: &'static str, value: T, min: T, max: T) -> Result<(), VizError> {
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(range(field, "is out of range"))
    }
}

// ============================================================================
// VISUALIZATION SELECTION
// ============================================================================

pub const DEFAULT_EQUATION: &str = "sin(x * k) * cos(y * k)";
pub const DEFAULT_RESOLUTION: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualizationMode {
    Equation,
    Pendulum,
    Gravity,
    Model,
}

impl VisualizationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equation => "equation",
            Self::Pendulum => "pendulum",
            Self::Gravity => "gravity",
            Self::Model => "model",
        }
    }

    /// What the right hand's height controls in this mode
    pub fn parameter_label(&self) -> &'static str {
        match self {
            Self::Pendulum => "physics speed",
            Self::Gravity => "mass / gravity",
            _ => "parameter k",
        }
    }
}

/// User-selected visualization; changed only by explicit selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizationConfig {
    pub mode: VisualizationMode,
    pub equation: String,
    pub resolution: u32,
    pub scale: f32,
    pub model_url: Option<String>,
}

impl Default for VisualizationConfig {
    fn default() -> Self {
        Self {
            mode: VisualizationMode::Equation,
            equation: DEFAULT_EQUATION.to_string(),
            resolution: DEFAULT_RESOLUTION,
            scale: 1.0,
            model_url: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preset {
    pub name: &'static str,
    pub equation: &'static str,
    pub mode: VisualizationMode,
}

pub const PRESETS: [Preset; 7] = [
    Preset { name: "Interference Waves", equation: "sin(x * k) * cos(y * k)", mode: VisualizationMode::Equation },
    Preset { name: "Monkey Saddle", equation: "x^2 - y^2", mode: VisualizationMode::Equation },
    Preset { name: "Water Ripple", equation: "cos(sqrt(x^2 + y^2) * k)", mode: VisualizationMode::Equation },
    Preset { name: "Harmonic Field", equation: "sin(x*k) + cos(y*k)", mode: VisualizationMode::Equation },
    Preset { name: "Dynamic Gaussian", equation: "k * exp(-(x^2 + y^2))", mode: VisualizationMode::Equation },
    Preset { name: "Double Pendulum", equation: "", mode: VisualizationMode::Pendulum },
    Preset { name: "Gravitational Curvature", equation: "", mode: VisualizationMode::Gravity },
];

impl VisualizationConfig {
    /// Equation presets replace the equation; the others only switch mode.
    pub fn apply_preset(&mut self, preset: &Preset) {
        self.mode = preset.mode;
        if preset.mode == VisualizationMode::Equation {
            self.equation = preset.equation.to_string();
        }
    }

    pub fn is_preset_active(&self, preset: &Preset) -> bool {
        self.mode == preset.mode
            && (preset.mode != VisualizationMode::Equation || self.equation == preset.equation)
    }
}
