//! Controller - owns every piece of session state
//!
//! Detector frames only enqueue deltas; the render tick is the single place
//! where interaction state, geometry and physics change. After `teardown`
//! every mutating call is a silent no-op.

use std::collections::VecDeque;

use log::{debug, error, info};

use crate::config::{AppConfig, VisualizationConfig, VisualizationMode, PRESETS};
use crate::error::{LifecycleError, VizError};
use crate::expr::compile;
use crate::gesture::{GestureDelta, GestureProcessor, HandObservation};
use crate::interaction::InteractionState;
use crate::visualization::{Geometry, ModelBounds, Visualizer};

pub struct Controller {
    config: AppConfig,
    processor: GestureProcessor,
    interaction: InteractionState,
    visualizer: Visualizer,
    queue: VecDeque<GestureDelta>,
    torn_down: bool,
}

impl Controller {
    pub fn new(config: AppConfig) -> Self {
        Self {
            processor: GestureProcessor::new(config.gesture.clone()),
            interaction: InteractionState::new(config.interaction.initial_parameter),
            visualizer: Visualizer::new(&config),
            queue: VecDeque::new(),
            torn_down: false,
            config,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn visualizer(&self) -> &Visualizer {
        &self.visualizer
    }

    pub fn selection(&self) -> &VisualizationConfig {
        self.visualizer.config()
    }

    pub fn mode(&self) -> VisualizationMode {
        self.visualizer.mode()
    }

    pub fn geometry(&self) -> &Geometry {
        self.visualizer.geometry()
    }

    /// Deltas waiting for the next render tick
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    // ========================================================================
    // INPUT
    // ========================================================================

    pub fn on_hand_frame(&mut self, observations: &[HandObservation]) {
        if self.torn_down {
            return;
        }
        let deltas = self.processor.process(observations);
        self.queue.extend(deltas);
    }

    pub fn detector_error(&self, message: &str) {
        if !self.torn_down {
            error!("hand detector: {}", message);
        }
    }

    /// Drain pending deltas in arrival order, then bring geometry and
    /// physics up to date.
    pub fn render_tick(&mut self) -> &Geometry {
        if !self.torn_down {
            while let Some(delta) = self.queue.pop_front() {
                self.interaction = self.interaction.apply(&delta, &self.config.interaction);
            }
            self.visualizer.update(self.interaction.parameter_k);
        }
        self.visualizer.geometry()
    }

    pub fn reset_view(&mut self) {
        if self.torn_down {
            return;
        }
        self.interaction = self.interaction.reset();
        debug!("view reset, k = {}", self.interaction.parameter_k);
    }

    // ========================================================================
    // SELECTION
    // ========================================================================

    /// Custom equation. The selection is applied even when the text does not
    /// compile (the surface goes flat); the compile error is still returned.
    pub fn set_equation(&mut self, equation: &str) -> Result<(), VizError> {
        let mut next = self.selection().clone();
        next.mode = VisualizationMode::Equation;
        next.equation = equation.to_string();
        self.select(next)?;
        compile(equation)?;
        Ok(())
    }

    pub fn select_preset(&mut self, index: usize) -> Result<(), VizError> {
        let preset = PRESETS.get(index).ok_or(VizError::UnknownPreset(index))?;
        let mut next = self.selection().clone();
        next.apply_preset(preset);
        self.select(next)?;
        info!("preset '{}' selected", preset.name);
        Ok(())
    }

    pub fn is_preset_active(&self, index: usize) -> bool {
        PRESETS
            .get(index)
            .map_or(false, |preset| self.selection().is_preset_active(preset))
    }

    pub fn import_model(&mut self, url: &str) -> Result<(), VizError> {
        let mut next = self.selection().clone();
        next.mode = VisualizationMode::Model;
        next.model_url = Some(url.to_string());
        self.select(next)
    }

    pub fn model_loaded(&mut self, url: &str, bounds: &ModelBounds) -> Result<(), VizError> {
        if self.torn_down {
            return Ok(());
        }
        self.visualizer.model_loaded(url, bounds)?;
        Ok(())
    }

    pub fn model_load_failed(&mut self, url: &str, reason: &str) {
        if !self.torn_down {
            self.visualizer.model_load_failed(url, reason);
        }
    }

    fn select(&mut self, next: VisualizationConfig) -> Result<(), VizError> {
        if self.torn_down {
            return Err(LifecycleError::TornDown.into());
        }
        self.visualizer.select(next)?;
        Ok(())
    }

    // ========================================================================
    // LIFECYCLE
    // ========================================================================

    /// Replace the tunables from a (possibly partial) JSON document.
    ///
    /// Gesture history is dropped and the current selection is rebuilt with
    /// the new constants; the accumulated view and a loaded model are kept.
    /// On a decode or range error the old configuration stays in force.
    pub fn configure(&mut self, json: &str) -> Result<(), VizError> {
        if self.torn_down {
            return Err(LifecycleError::TornDown.into());
        }
        let config = AppConfig::from_json(json)?;
        let selection = self.selection().clone();

        let mut visualizer = Visualizer::new(&config);
        visualizer.select(selection)?;
        if let Some((url, bounds)) = self.visualizer.loaded_model() {
            // the host does not reload an unchanged URL
            visualizer.model_loaded(url, bounds)?;
        }
        self.visualizer.teardown();
        self.visualizer = visualizer;
        self.processor = GestureProcessor::new(config.gesture.clone());
        self.queue.clear();
        self.config = config;
        info!("configuration replaced");
        Ok(())
    }

    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.visualizer.teardown();
        self.queue.clear();
        self.torn_down = true;
        info!("session torn down");
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

#[cfg(test)]
use crate::gesture::{HandLandmark, Handedness, INDEX_TIP, LANDMARK_COUNT, THUMB_TIP, WRIST};

/// Detector "Left" with a mirrored feed: drives zoom and the parameter
#[cfg(test)]
fn right_hand(pinch: f32, wrist_y: f32) -> HandObservation {
    let mut landmarks = [HandLandmark { x: 0.5, y: 0.5, z: 0.0 }; LANDMARK_COUNT];
    landmarks[THUMB_TIP] = HandLandmark { x: 0.5, y: 0.5, z: 0.0 };
    landmarks[INDEX_TIP] = HandLandmark { x: 0.5 + pinch, y: 0.5, z: 0.0 };
    landmarks[WRIST].y = wrist_y;
    HandObservation::new(Handedness::Left, landmarks)
}

#[cfg(test)]
fn left_hand(x: f32, y: f32) -> HandObservation {
    let landmarks = [HandLandmark { x, y, z: 0.0 }; LANDMARK_COUNT];
    HandObservation::new(Handedness::Right, landmarks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::PendulumState;

    #[test]
    fn test_deltas_wait_for_render_tick() {
        let mut ctl = Controller::default();
        ctl.on_hand_frame(&[left_hand(0.5, 0.5)]);
        ctl.on_hand_frame(&[left_hand(0.6, 0.5)]);
        assert_eq!(ctl.pending(), 1);
        assert_eq!(ctl.interaction().rotation.y, 0.0);

        ctl.render_tick();
        assert_eq!(ctl.pending(), 0);
        assert!((ctl.interaction().rotation.y - 0.45).abs() < 1e-4);
    }

    #[test]
    fn test_queue_applied_in_order() {
        let mut ctl = Controller::default();
        // parameter pushes replace each other, so the last one must win
        ctl.on_hand_frame(&[right_hand(0.5, 1.0)]);
        ctl.on_hand_frame(&[right_hand(0.5, 0.0)]);
        assert_eq!(ctl.pending(), 2);
        ctl.render_tick();
        // window holds 0.5 and 5.0
        assert!((ctl.interaction().parameter_k - 2.75).abs() < 1e-5);
    }

    #[test]
    fn test_zoom_through_pipeline() {
        let mut ctl = Controller::default();
        ctl.on_hand_frame(&[right_hand(0.10, 0.5)]);
        ctl.on_hand_frame(&[right_hand(0.05, 0.5)]);
        ctl.render_tick();
        assert!((ctl.interaction().zoom - 0.8).abs() < 1e-5);
    }

    #[test]
    fn test_render_tick_builds_geometry() {
        let mut ctl = Controller::default();
        match ctl.render_tick() {
            Geometry::Surface(mesh) => assert_eq!(mesh.resolution, 50),
            other => panic!("expected surface, got {:?}", other),
        }
    }

    #[test]
    fn test_reset_view_keeps_parameter() {
        let mut ctl = Controller::default();
        ctl.on_hand_frame(&[left_hand(0.5, 0.5), right_hand(0.5, 0.2)]);
        ctl.on_hand_frame(&[left_hand(0.7, 0.3), right_hand(0.5, 0.2)]);
        ctl.render_tick();
        let k = ctl.interaction().parameter_k;
        assert_ne!(ctl.interaction().rotation.x, 0.0);

        ctl.reset_view();
        assert_eq!(ctl.interaction().rotation.x, 0.0);
        assert_eq!(ctl.interaction().zoom, 1.0);
        assert_eq!(ctl.interaction().parameter_k, k);
    }

    #[test]
    fn test_select_preset() {
        let mut ctl = Controller::default();
        ctl.select_preset(6).unwrap();
        assert_eq!(ctl.mode(), VisualizationMode::Gravity);
        assert!(ctl.is_preset_active(6));
        assert!(!ctl.is_preset_active(0));
        assert!(matches!(ctl.select_preset(7), Err(VizError::UnknownPreset(7))));
        assert!(!ctl.is_preset_active(99));
    }

    #[test]
    fn test_bad_equation_still_selected() {
        let mut ctl = Controller::default();
        let err = ctl.set_equation("sin(").unwrap_err();
        assert!(matches!(err, VizError::Expr(_)));
        assert_eq!(ctl.selection().equation, "sin(");
        match ctl.render_tick() {
            Geometry::Surface(mesh) => assert!(mesh.positions.iter().all(|p| p[2] == 0.0)),
            other => panic!("expected surface, got {:?}", other),
        }
    }

    #[test]
    fn test_pendulum_rate_follows_parameter() {
        let mut ctl = Controller::default();
        ctl.select_preset(5).unwrap();
        ctl.render_tick();
        let state = *ctl.visualizer().pendulum().state();
        assert_ne!(state, PendulumState::initial(0.1));
        assert_eq!(ctl.visualizer().trail().len(), 1);
    }

    #[test]
    fn test_import_and_load_model() {
        let mut ctl = Controller::default();
        ctl.import_model("blob:m").unwrap();
        assert_eq!(ctl.mode(), VisualizationMode::Model);
        ctl.model_load_failed("blob:m", "network");
        assert_eq!(*ctl.render_tick(), Geometry::Empty);

        let bounds = ModelBounds::new([0.0; 3], [6.0, 3.0, 1.0]);
        ctl.model_loaded("blob:m", &bounds).unwrap();
        match ctl.geometry() {
            Geometry::Model(t) => assert_eq!(t.scale, 0.5),
            other => panic!("expected model, got {:?}", other),
        }
    }

    #[test]
    fn test_configure_keeps_selection_and_view() {
        let mut ctl = Controller::default();
        ctl.select_preset(6).unwrap();
        ctl.on_hand_frame(&[right_hand(0.5, 0.0)]);
        ctl.render_tick();
        let view = *ctl.interaction();

        ctl.configure(r#"{ "surface": { "mass_scale": 1.0 } }"#).unwrap();
        assert_eq!(ctl.mode(), VisualizationMode::Gravity);
        assert_eq!(*ctl.interaction(), view);
        assert_eq!(ctl.config().surface.mass_scale, 1.0);
        match ctl.render_tick() {
            Geometry::Gravity(well) => assert_eq!(well.mass, view.parameter_k),
            other => panic!("expected gravity well, got {:?}", other),
        }
    }

    #[test]
    fn test_configure_keeps_loaded_model() {
        let mut ctl = Controller::default();
        ctl.import_model("blob:m").unwrap();
        let bounds = ModelBounds::new([0.0; 3], [6.0, 3.0, 1.0]);
        ctl.model_loaded("blob:m", &bounds).unwrap();

        ctl.configure(r#"{ "gesture": { "mirrored": false } }"#).unwrap();
        match ctl.render_tick() {
            Geometry::Model(t) => assert_eq!(t.scale, 0.5),
            other => panic!("expected model, got {:?}", other),
        }

        ctl.configure(r#"{ "surface": { "model_target_size": 12.0 } }"#).unwrap();
        match ctl.geometry() {
            Geometry::Model(t) => assert_eq!(t.scale, 2.0),
            other => panic!("expected model, got {:?}", other),
        }
    }

    #[test]
    fn test_configure_rejects_out_of_range() {
        let mut ctl = Controller::default();
        ctl.select_preset(6).unwrap();
        let err = ctl
            .configure(r#"{ "surface": { "gravity_resolution": 70000 } }"#)
            .unwrap_err();
        assert!(matches!(err, VizError::ConfigRange { field: "surface.gravity_resolution", .. }));
        assert_eq!(*ctl.config(), AppConfig::default());
        match ctl.render_tick() {
            Geometry::Gravity(well) => assert_eq!(well.mesh.resolution, 60),
            other => panic!("expected gravity well, got {:?}", other),
        }

        assert!(ctl.configure(r#"{ "interaction": { "min_zoom": 6.0 } }"#).is_err());
        assert!(ctl.configure(r#"{ "physics": { "sub_steps": 4000000000 } }"#).is_err());
        assert_eq!(*ctl.config(), AppConfig::default());
    }

    #[test]
    fn test_configure_rejects_bad_json() {
        let mut ctl = Controller::default();
        assert!(matches!(ctl.configure("{"), Err(VizError::Config(_))));
        assert_eq!(*ctl.config(), AppConfig::default());
    }

    #[test]
    fn test_teardown_suppresses_everything() {
        let mut ctl = Controller::default();
        ctl.select_preset(5).unwrap();
        ctl.on_hand_frame(&[left_hand(0.5, 0.5)]);
        ctl.on_hand_frame(&[left_hand(0.6, 0.5)]);
        ctl.teardown();
        assert_eq!(ctl.pending(), 0);

        ctl.on_hand_frame(&[left_hand(0.7, 0.5)]);
        ctl.on_hand_frame(&[left_hand(0.8, 0.5)]);
        assert_eq!(ctl.pending(), 0);

        let view = *ctl.interaction();
        ctl.reset_view();
        assert_eq!(*ctl.render_tick(), Geometry::Empty);
        assert_eq!(*ctl.interaction(), view);
        assert!(ctl.visualizer().trail().is_empty());

        assert!(matches!(ctl.select_preset(0), Err(VizError::Lifecycle(LifecycleError::TornDown))));
        assert!(matches!(ctl.configure("{}"), Err(VizError::Lifecycle(_))));
        assert!(ctl.model_loaded("blob:x", &ModelBounds::new([0.0; 3], [1.0; 3])).is_ok());
    }
}
