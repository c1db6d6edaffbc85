//! Hand landmark intake from the detector
//!
//! JS sends every detected hand in one flat buffer (21 landmarks × xyz per
//! hand, hands back to back) plus one handedness label per hand.

use wasm_bindgen::prelude::*;

use super::session::{read_controller, with_controller};
use crate::error::{LandmarkError, VizError};
use crate::gesture::{HandObservation, Handedness};

/// Detector callback: one frame of hands. An empty frame is valid and means
/// no hand is visible.
#[wasm_bindgen]
pub fn apply_hand_landmarks(flat_data: &[f32], labels: js_sys::Array) -> Result<(), JsValue> {
    let labels: Vec<String> = labels
        .iter()
        .map(|v| v.as_string().unwrap_or_default())
        .collect();
    accept_frame(flat_data, &labels)?;
    Ok(())
}

/// Frames arriving after teardown are dropped before parsing
pub(crate) fn accept_frame(flat_data: &[f32], labels: &[String]) -> Result<(), VizError> {
    if read_controller(|ctl| ctl.is_torn_down()) {
        return Ok(());
    }
    let hands = parse_hands(flat_data, labels)?;
    with_controller(|ctl| ctl.on_hand_frame(&hands));
    Ok(())
}

/// Host-side detector failure; logged, state untouched
#[wasm_bindgen]
pub fn detector_error(message: &str) {
    with_controller(|ctl| ctl.detector_error(message));
}

pub(crate) fn parse_hands(
    flat_data: &[f32],
    labels: &[String],
) -> Result<Vec<HandObservation>, LandmarkError> {
    labels
        .iter()
        .enumerate()
        .map(|(hand, label)| {
            let handedness = Handedness::from_label(label)?;
            HandObservation::from_flat(flat_data, hand, handedness)
        })
        .collect()
}
