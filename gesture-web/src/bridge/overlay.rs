//! Frame metrics and the status overlay text

use wasm_bindgen::prelude::*;
use std::cell::RefCell;

use super::session::read_controller;
use crate::config::VisualizationMode;
use crate::interaction::InteractionState;

/// Smoothed frame timing
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct FrameMetrics {
    fps: f32,
    frame_time_ms: f32,
}

impl FrameMetrics {
    /// Exponential moving average; samples outside 1..=200 ms are dropped
    /// (first frame, backgrounded tab).
    fn record(&mut self, fps: f32, frame_time_ms: f32) {
        if !(1.0..=200.0).contains(&frame_time_ms) || !fps.is_finite() {
            return;
        }
        if self.fps == 0.0 {
            self.fps = fps;
            self.frame_time_ms = frame_time_ms;
        } else {
            self.fps = self.fps * 0.9 + fps * 0.1;
            self.frame_time_ms = self.frame_time_ms * 0.9 + frame_time_ms * 0.1;
        }
    }
}

thread_local! {
    static METRICS: RefCell<FrameMetrics> = RefCell::new(FrameMetrics::default());
}

/// Set frame timing (called from JS each frame)
#[wasm_bindgen]
pub fn set_frame_metrics(fps: f32, frame_time_ms: f32) {
    METRICS.with(|m| m.borrow_mut().record(fps, frame_time_ms));
}

/// Overlay text for the HTML status panel
#[wasm_bindgen]
pub fn get_overlay_text() -> String {
    let metrics = METRICS.with(|m| *m.borrow());
    read_controller(|ctl| format_overlay(ctl.mode(), ctl.interaction(), &metrics))
}

fn format_overlay(mode: VisualizationMode, state: &InteractionState, metrics: &FrameMetrics) -> String {
    let rot = state.rotation;
    format!(
        "Mode: {} | FPS: {:.0} ({:.1}ms)\n\
         Right hand height: {} = {:.2}\n\
         Zoom: {:.2}x | Rotation: {:.2} {:.2} {:.2}",
        mode.as_str(),
        metrics.fps,
        metrics.frame_time_ms,
        mode.parameter_label(),
        state.parameter_k,
        state.zoom,
        rot.x,
        rot.y,
        rot.z,
    )
}
