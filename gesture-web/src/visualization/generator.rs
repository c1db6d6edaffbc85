//! Visualizer - mode state machine producing the current geometry
//!
//! Switching mode is destructive: the previous geometry is dropped before
//! the new mode builds anything, and pendulum physics restarts from its
//! initial offset every time pendulum mode is entered.

use log::{debug, info, warn};

use super::equation::equation_surface;
use super::gravity::{gravity_well, GravityWell};
use super::mesh::SurfaceMesh;
use super::model::{normalize, ModelBounds, ModelTransform};
use super::pendulum::{PendulumFrame, PendulumScene};
use crate::config::{AppConfig, SurfaceConfig, VisualizationConfig, VisualizationMode};
use crate::error::{LifecycleError, ModelError};
use crate::expr::{compile, CompiledExpr, Evaluable};
use crate::physics::TrailBuffer;

#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// Nothing to draw (model still loading, or torn down)
    Empty,
    Surface(SurfaceMesh),
    Gravity(GravityWell),
    Pendulum(PendulumFrame),
    Model(ModelTransform),
}

pub struct Visualizer {
    config: VisualizationConfig,
    surface: SurfaceConfig,
    compiled: Option<CompiledExpr>,
    pendulum: PendulumScene,
    geometry: Geometry,
    /// Parameter the current surface was generated for
    built_for: Option<f32>,
    /// Bounds behind the current `Geometry::Model`, keyed by URL
    loaded_model: Option<(String, ModelBounds)>,
    torn_down: bool,
}

impl Visualizer {
    pub fn new(app: &AppConfig) -> Self {
        let config = VisualizationConfig::default();
        let compiled = compile_logged(&config.equation);
        Self {
            config,
            surface: app.surface.clone(),
            compiled,
            pendulum: PendulumScene::new(&app.physics),
            geometry: Geometry::Empty,
            built_for: None,
            loaded_model: None,
            torn_down: false,
        }
    }

    pub fn config(&self) -> &VisualizationConfig {
        &self.config
    }

    pub fn mode(&self) -> VisualizationMode {
        self.config.mode
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn trail(&self) -> &TrailBuffer {
        self.pendulum.trail()
    }

    pub fn pendulum(&self) -> &PendulumScene {
        &self.pendulum
    }

    /// URL and bounds of the model currently on screen
    pub fn loaded_model(&self) -> Option<(&str, &ModelBounds)> {
        self.loaded_model.as_ref().map(|(url, bounds)| (url.as_str(), bounds))
    }

    /// Replace the visualization selection
    pub fn select(&mut self, next: VisualizationConfig) -> Result<(), LifecycleError> {
        if self.torn_down {
            return Err(LifecycleError::TornDown);
        }

        if next.equation != self.config.equation {
            self.compiled = compile_logged(&next.equation);
        }

        if self.config.mode == VisualizationMode::Pendulum {
            self.pendulum.leave();
        }
        self.geometry = Geometry::Empty;
        self.built_for = None;
        self.loaded_model = None;

        info!("visualization mode: {} -> {}", self.config.mode.as_str(), next.mode.as_str());
        self.config = next;

        if self.config.mode == VisualizationMode::Pendulum {
            self.pendulum.enter()?;
            self.geometry = Geometry::Pendulum(self.pendulum.frame());
        }
        Ok(())
    }

    /// Bring the geometry up to date for parameter `k`; runs once per render tick
    pub fn update(&mut self, k: f32) {
        if self.torn_down {
            return;
        }

        match self.config.mode {
            VisualizationMode::Equation => {
                if self.built_for != Some(k) {
                    let expr = self.compiled.as_ref().map(|e| e as &dyn Evaluable);
                    self.geometry = Geometry::Surface(equation_surface(
                        expr,
                        k,
                        self.config.resolution,
                        &self.surface,
                    ));
                    self.built_for = Some(k);
                }
            }
            VisualizationMode::Gravity => {
                if self.built_for != Some(k) {
                    self.geometry = Geometry::Gravity(gravity_well(k, &self.surface));
                    self.built_for = Some(k);
                }
            }
            VisualizationMode::Pendulum => {
                if self.pendulum.tick(k) {
                    self.geometry = Geometry::Pendulum(self.pendulum.frame());
                }
            }
            VisualizationMode::Model => {}
        }
    }

    /// Host finished loading `url`. A load for anything but the current
    /// model is stale and ignored; a bad asset leaves the geometry as is.
    pub fn model_loaded(&mut self, url: &str, bounds: &ModelBounds) -> Result<(), ModelError> {
        if self.torn_down {
            return Ok(());
        }
        if self.config.mode != VisualizationMode::Model {
            debug!("ignoring model load for '{}' outside model mode", url);
            return Ok(());
        }
        match self.config.model_url.as_deref() {
            Some(current) if current == url => {}
            Some(_) => {
                debug!("ignoring stale model load for '{}'", url);
                return Ok(());
            }
            None => return Err(ModelError::NoModel),
        }

        let transform = normalize(bounds, self.surface.model_target_size)?;
        self.geometry = Geometry::Model(transform);
        self.loaded_model = Some((url.to_string(), *bounds));
        Ok(())
    }

    pub fn model_load_failed(&mut self, url: &str, reason: &str) {
        warn!("model '{}' failed to load: {}", url, reason);
    }

    /// Terminal: stops physics and drops geometry; later calls are no-ops
    pub fn teardown(&mut self) {
        self.pendulum.teardown();
        self.geometry = Geometry::Empty;
        self.loaded_model = None;
        self.torn_down = true;
    }
}

fn compile_logged(equation: &str) -> Option<CompiledExpr> {
    match compile(equation) {
        Ok(expr) => Some(expr),
        Err(err) => {
            warn!("equation '{}' rejected: {}", equation, err);
            None
        }
    }
}
