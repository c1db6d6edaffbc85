//! Bridge module - JS ↔ Rust communication
//!
//! All #[wasm_bindgen] entry points live here.
//! Re-exports only in mod.rs, logic in submodules.

mod hand_landmarks;
mod overlay;
mod scene;
mod session;

pub use hand_landmarks::{apply_hand_landmarks, detector_error};

pub use overlay::{get_overlay_text, set_frame_metrics};

pub use scene::{
    // frame + view
    render_tick,
    reset_view,
    interaction_state,
    mode_name,
    // selection
    set_equation,
    select_preset,
    preset_count,
    preset_name,
    is_preset_active,
    import_model,
    model_loaded,
    model_load_failed,
    // lifecycle
    configure,
    set_log_level,
    teardown,
    // geometry
    surface_positions,
    surface_normals,
    surface_indices,
    pendulum_positions,
    pendulum_rods,
    trail_positions,
    trail_buffer,
    gravity_marker,
    model_transform,
};
