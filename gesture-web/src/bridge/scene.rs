//! Scene entry points - selection, lifecycle and geometry getters
//!
//! Getters return flat buffers (`[x, y, z, x, y, z, ...]`) that JS copies
//! straight into its vertex buffers; an empty buffer means "not in this mode".

use wasm_bindgen::prelude::*;

use super::session::{read_controller, with_controller};
use crate::config::PRESETS;
use crate::controller::Controller;
use crate::logging;
use crate::visualization::{Geometry, ModelBounds, SurfaceMesh};

// ============================================================================
// FRAME + VIEW
// ============================================================================

/// Apply queued gestures and advance the scene; returns false when there is
/// nothing to draw.
#[wasm_bindgen]
pub fn render_tick() -> bool {
    with_controller(|ctl| !matches!(ctl.render_tick(), Geometry::Empty))
}

#[wasm_bindgen]
pub fn reset_view() {
    with_controller(Controller::reset_view);
}

/// `[rot_x, rot_y, rot_z, zoom, k]`
#[wasm_bindgen]
pub fn interaction_state() -> Vec<f32> {
    read_controller(|ctl| {
        let s = ctl.interaction();
        vec![s.rotation.x, s.rotation.y, s.rotation.z, s.zoom, s.parameter_k]
    })
}

#[wasm_bindgen]
pub fn mode_name() -> String {
    read_controller(|ctl| ctl.mode().as_str().to_string())
}

// ============================================================================
// SELECTION
// ============================================================================

#[wasm_bindgen]
pub fn set_equation(equation: &str) -> Result<(), JsValue> {
    with_controller(|ctl| ctl.set_equation(equation))?;
    Ok(())
}

#[wasm_bindgen]
pub fn select_preset(index: usize) -> Result<(), JsValue> {
    with_controller(|ctl| ctl.select_preset(index))?;
    Ok(())
}

#[wasm_bindgen]
pub fn preset_count() -> usize {
    PRESETS.len()
}

#[wasm_bindgen]
pub fn preset_name(index: usize) -> Option<String> {
    PRESETS.get(index).map(|p| p.name.to_string())
}

#[wasm_bindgen]
pub fn is_preset_active(index: usize) -> bool {
    read_controller(|ctl| ctl.is_preset_active(index))
}

#[wasm_bindgen]
pub fn import_model(url: &str) -> Result<(), JsValue> {
    with_controller(|ctl| ctl.import_model(url))?;
    Ok(())
}

/// Loader finished: report the asset's axis-aligned bounding box
#[wasm_bindgen]
pub fn model_loaded(
    url: &str,
    min_x: f32,
    min_y: f32,
    min_z: f32,
    max_x: f32,
    max_y: f32,
    max_z: f32,
) -> Result<(), JsValue> {
    let bounds = ModelBounds::new([min_x, min_y, min_z], [max_x, max_y, max_z]);
    with_controller(|ctl| ctl.model_loaded(url, &bounds))?;
    Ok(())
}

#[wasm_bindgen]
pub fn model_load_failed(url: &str, reason: &str) {
    with_controller(|ctl| ctl.model_load_failed(url, reason));
}

// ============================================================================
// LIFECYCLE
// ============================================================================

#[wasm_bindgen]
pub fn configure(json: &str) -> Result<(), JsValue> {
    with_controller(|ctl| ctl.configure(json))?;
    Ok(())
}

#[wasm_bindgen]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    logging::set_level(level)?;
    Ok(())
}

#[wasm_bindgen]
pub fn teardown() {
    with_controller(Controller::teardown);
}

// ============================================================================
// GEOMETRY
// ============================================================================

#[wasm_bindgen]
pub fn surface_positions() -> Vec<f32> {
    read_controller(|ctl| surface_of(ctl.geometry()).map_or_else(Vec::new, |m| flatten(&m.positions)))
}

#[wasm_bindgen]
pub fn surface_normals() -> Vec<f32> {
    read_controller(|ctl| surface_of(ctl.geometry()).map_or_else(Vec::new, |m| flatten(&m.normals)))
}

#[wasm_bindgen]
pub fn surface_indices() -> Vec<u32> {
    read_controller(|ctl| surface_of(ctl.geometry()).map_or_else(Vec::new, |m| m.indices.clone()))
}

/// `[bob1 xyz, bob2 xyz]`
#[wasm_bindgen]
pub fn pendulum_positions() -> Vec<f32> {
    read_controller(|ctl| match ctl.geometry() {
        Geometry::Pendulum(frame) => flatten(&frame.bob_positions()),
        _ => Vec::new(),
    })
}

/// `[center xyz, angle]` for each rod
#[wasm_bindgen]
pub fn pendulum_rods() -> Vec<f32> {
    read_controller(|ctl| match ctl.geometry() {
        Geometry::Pendulum(frame) => [frame.rod1, frame.rod2]
            .iter()
            .flat_map(|rod| [rod.center[0], rod.center[1], rod.center[2], rod.angle])
            .collect(),
        _ => Vec::new(),
    })
}

/// Live trail points, oldest first
#[wasm_bindgen]
pub fn trail_positions() -> Vec<f32> {
    read_controller(|ctl| {
        let points: Vec<[f32; 3]> = ctl.visualizer().trail().iter().copied().collect();
        flatten(&points)
    })
}

/// Trail padded to its full capacity, for a fixed-size line buffer
#[wasm_bindgen]
pub fn trail_buffer() -> Vec<f32> {
    read_controller(|ctl| flatten(&ctl.visualizer().trail().as_padded()))
}

/// `[radius, x, y, z]` of the central mass
#[wasm_bindgen]
pub fn gravity_marker() -> Vec<f32> {
    read_controller(|ctl| match ctl.geometry() {
        Geometry::Gravity(well) => {
            let [x, y, z] = well.marker.position;
            vec![well.marker.radius, x, y, z]
        }
        _ => Vec::new(),
    })
}

/// `[offset xyz, scale]` to place the loaded model
#[wasm_bindgen]
pub fn model_transform() -> Vec<f32> {
    read_controller(|ctl| match ctl.geometry() {
        Geometry::Model(t) => vec![t.offset[0], t.offset[1], t.offset[2], t.scale],
        _ => Vec::new(),
    })
}

fn surface_of(geometry: &Geometry) -> Option<&SurfaceMesh> {
    match geometry {
        Geometry::Surface(mesh) => Some(mesh),
        Geometry::Gravity(well) => Some(&well.mesh),
        _ => None,
    }
}

fn flatten(points: &[[f32; 3]]) -> Vec<f32> {
    bytemuck::cast_slice(points).to_vec()
}
