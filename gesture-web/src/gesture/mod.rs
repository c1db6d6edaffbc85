//! Gesture module - hand observations in, control deltas out
//!
//! Re-exports only. All logic in submodules.

mod landmarks;
mod processor;
mod smoothing;

pub use landmarks::{
    HandLandmark, HandObservation, HandRole, Handedness,
    WRIST, THUMB_TIP, INDEX_MCP, INDEX_TIP, PINKY_MCP,
    LANDMARK_COUNT, FLOATS_PER_HAND, PALM_LANDMARKS,
};
pub use processor::{GestureDelta, GestureProcessor};
pub use smoothing::{SlidingMean, WINDOW_SIZE};
