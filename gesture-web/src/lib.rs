//! Gesture Web - hand-driven 3D math and physics visualizer
//!
//! Entry point for WASM module. Only contains:
//! - Module declarations
//! - wasm_bindgen entry points that delegate to submodules

pub mod config;
pub mod controller;
pub mod error;
pub mod expr;
pub mod gesture;
pub mod interaction;
pub mod logging;
pub mod physics;
pub mod visualization;

mod bridge;

use wasm_bindgen::prelude::*;

// Re-export wasm_bindgen functions for JS access
pub use bridge::*;

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Called automatically when WASM module loads
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
    logging::init();
    log::info!("gesture-web {} loaded", env!("CARGO_PKG_VERSION"));
}
