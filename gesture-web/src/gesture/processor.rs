//! Gesture signal processor
//!
//! Turns per-frame hand observations into incremental control signals:
//! - left role: palm-center travel -> rotation delta
//! - right role: pinch distance change -> zoom delta (while pinched)
//! - right role: wrist height -> smoothed scalar parameter (every frame)
//!
//! Only the previous frame is remembered per role. When a role's hand is
//! missing from a frame its memory is cleared, so a reappearing hand never
//! produces a delta against a stale position.

use log::debug;
use nalgebra::Vector3;

use super::landmarks::{HandObservation, HandRole};
use super::smoothing::SlidingMean;
use crate::config::GestureConfig;

/// One emitted control signal; absent fields leave state untouched
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GestureDelta {
    /// Radians to add to the cumulative rotation
    pub rotation: Option<Vector3<f32>>,
    /// Amount to add to the zoom before clamping
    pub zoom: Option<f32>,
    /// Absolute, already smoothed value of the scalar parameter
    pub parameter: Option<f32>,
}

impl GestureDelta {
    pub fn rotation(x: f32, y: f32, z: f32) -> Self {
        Self {
            rotation: Some(Vector3::new(x, y, z)),
            ..Default::default()
        }
    }

    pub fn zoom(delta: f32) -> Self {
        Self {
            zoom: Some(delta),
            ..Default::default()
        }
    }

    pub fn parameter(value: f32) -> Self {
        Self {
            parameter: Some(value),
            ..Default::default()
        }
    }
}

pub struct GestureProcessor {
    config: GestureConfig,
    /// Palm center of the left-role hand in the previous frame
    prev_palm: Option<(f32, f32)>,
    /// Pinch distance of the right-role hand, only while pinched
    prev_pinch: Option<f32>,
    parameter: SlidingMean,
}

impl GestureProcessor {
    pub fn new(config: GestureConfig) -> Self {
        let parameter = SlidingMean::new(config.smoothing_window);
        Self {
            config,
            prev_palm: None,
            prev_pinch: None,
            parameter,
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Process one detector frame. Deltas are returned in emission order.
    pub fn process(&mut self, observations: &[HandObservation]) -> Vec<GestureDelta> {
        let mut deltas = Vec::new();
        let mut left_seen = false;
        let mut right_seen = false;

        for obs in observations {
            match HandRole::from_handedness(obs.handedness, self.config.mirrored) {
                HandRole::Left => {
                    left_seen = true;
                    deltas.extend(self.track_rotation(obs));
                }
                HandRole::Right => {
                    right_seen = true;
                    deltas.extend(self.track_pinch(obs));
                    deltas.push(self.track_parameter(obs));
                }
            }
        }

        if !left_seen {
            self.prev_palm = None;
        }
        if !right_seen {
            self.prev_pinch = None;
        }

        deltas
    }

    fn track_rotation(&mut self, obs: &HandObservation) -> Option<GestureDelta> {
        let palm = obs.palm_center();
        // stored unconditionally, even below the noise floor
        let prev = self.prev_palm.replace(palm)?;

        let dx = palm.0 - prev.0;
        let dy = palm.1 - prev.1;
        let floor = self.config.rotation_noise_floor;
        if dx.abs() > floor || dy.abs() > floor {
            let s = self.config.rotation_sensitivity;
            Some(GestureDelta::rotation(dy * s, dx * s, 0.0))
        } else {
            None
        }
    }

    fn track_pinch(&mut self, obs: &HandObservation) -> Option<GestureDelta> {
        let distance = obs.pinch_distance();
        if distance >= self.config.pinch_threshold {
            if self.prev_pinch.take().is_some() {
                debug!("pinch released at {:.3}", distance);
            }
            return None;
        }

        let prev = self.prev_pinch.replace(distance)?;
        let delta = distance - prev;
        if delta.abs() > self.config.zoom_noise_floor {
            Some(GestureDelta::zoom(delta * self.config.zoom_gain))
        } else {
            None
        }
    }

    fn track_parameter(&mut self, obs: &HandObservation) -> GestureDelta {
        // hand raised (small y) -> larger value
        let raw = self.config.parameter_base + (1.0 - obs.wrist().y) * self.config.parameter_gain;
        GestureDelta::parameter(self.parameter.push(raw))
    }

    /// Forget all per-hand history, including the parameter window
    pub fn reset(&mut self) {
        self.prev_palm = None;
        self.prev_pinch = None;
        self.parameter.clear();
    }
}

impl Default for GestureProcessor {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

// ── Test helpers ───────────────────────────────────────────

#[cfg(test)]
use super::landmarks::{
    HandLandmark, Handedness, INDEX_MCP, INDEX_TIP, LANDMARK_COUNT, PINKY_MCP, THUMB_TIP, WRIST,
};

/// Hand whose palm landmarks all sit at (x, y), pinch wide open
#[cfg(test)]
fn make_hand(handedness: Handedness, x: f32, y: f32) -> HandObservation {
    let mut landmarks = [HandLandmark { x, y, z: 0.0 }; LANDMARK_COUNT];
    landmarks[THUMB_TIP] = HandLandmark { x: 0.0, y: 0.0, z: 0.0 };
    landmarks[INDEX_TIP] = HandLandmark { x: 1.0, y: 0.0, z: 0.0 };
    HandObservation::new(handedness, landmarks)
}

/// Detector label that maps to the left role with the default mirrored feed
#[cfg(test)]
fn left_role(x: f32, y: f32) -> HandObservation {
    make_hand(Handedness::Right, x, y)
}

#[cfg(test)]
fn right_role_pinch(distance: f32, wrist_y: f32) -> HandObservation {
    let mut hand = make_hand(Handedness::Left, 0.5, 0.5);
    hand.landmarks[THUMB_TIP] = HandLandmark { x: 0.5, y: 0.5, z: 0.0 };
    hand.landmarks[INDEX_TIP] = HandLandmark { x: 0.5 + distance, y: 0.5, z: 0.0 };
    hand.landmarks[WRIST].y = wrist_y;
    hand
}

#[cfg(test)]
fn set_palm(hand: &mut HandObservation, x: f32, y: f32) {
    for i in [WRIST, INDEX_MCP, PINKY_MCP] {
        hand.landmarks[i] = HandLandmark { x, y, z: 0.0 };
    }
}

#[cfg(test)]
fn zooms(deltas: &[GestureDelta]) -> Vec<f32> {
    deltas.iter().filter_map(|d| d.zoom).collect()
}

// ── Tests ──────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_sets_baseline_only() {
        let mut processor = GestureProcessor::default();
        let deltas = processor.process(&[left_role(0.5, 0.5)]);
        assert!(deltas.is_empty());
    }

    #[test]
    fn test_rotation_delta() {
        let mut processor = GestureProcessor::default();
        processor.process(&[left_role(0.5, 0.5)]);
        let deltas = processor.process(&[left_role(0.51, 0.5)]);

        assert_eq!(deltas.len(), 1);
        let rotation = deltas[0].rotation.expect("expected a rotation delta");
        assert!(rotation.x.abs() < 1e-6);
        assert!((rotation.y - 0.045).abs() < 1e-5, "got {:?}", rotation);
        assert_eq!(rotation.z, 0.0);
    }

    #[test]
    fn test_rotation_maps_dy_to_x() {
        let mut processor = GestureProcessor::default();
        processor.process(&[left_role(0.5, 0.5)]);
        let deltas = processor.process(&[left_role(0.5, 0.52)]);
        let rotation = deltas[0].rotation.unwrap();
        assert!((rotation.x - 0.09).abs() < 1e-5);
        assert!(rotation.y.abs() < 1e-6);
    }

    #[test]
    fn test_below_noise_floor_still_tracks() {
        let mut processor = GestureProcessor::default();
        processor.process(&[left_role(0.5, 0.5)]);
        let deltas = processor.process(&[left_role(0.5001, 0.5)]);
        assert!(deltas.is_empty());

        // 0.00045 from the updated baseline, 0.00055 from the original one
        let deltas = processor.process(&[left_role(0.50055, 0.5)]);
        assert!(deltas.is_empty(), "got {:?}", deltas);

        // the same move against the original baseline clears the floor
        let mut fresh = GestureProcessor::default();
        fresh.process(&[left_role(0.5, 0.5)]);
        let deltas = fresh.process(&[left_role(0.50055, 0.5)]);
        assert_eq!(deltas.len(), 1);
    }

    #[test]
    fn test_absent_hand_clears_palm_memory() {
        let mut processor = GestureProcessor::default();
        processor.process(&[left_role(0.5, 0.5)]);
        processor.process(&[]);
        let deltas = processor.process(&[left_role(0.9, 0.9)]);
        assert!(deltas.is_empty(), "stale baseline produced {:?}", deltas);
    }

    #[test]
    fn test_pinch_sequence() {
        let mut processor = GestureProcessor::default();

        // above threshold: disengaged, no zoom
        let deltas = processor.process(&[right_role_pinch(0.2, 0.5)]);
        assert!(zooms(&deltas).is_empty());

        // below threshold, no prior: baseline only
        let deltas = processor.process(&[right_role_pinch(0.1, 0.5)]);
        assert!(zooms(&deltas).is_empty());

        let deltas = processor.process(&[right_role_pinch(0.08, 0.5)]);
        let z = zooms(&deltas);
        assert_eq!(z.len(), 1);
        assert!((z[0] + 0.08).abs() < 1e-5, "got {}", z[0]);
    }

    #[test]
    fn test_pinch_release_resets_baseline() {
        let mut processor = GestureProcessor::default();
        processor.process(&[right_role_pinch(0.05, 0.5)]);
        processor.process(&[right_role_pinch(0.3, 0.5)]);
        // re-entry starts fresh: no jump from 0.05 to 0.12
        let deltas = processor.process(&[right_role_pinch(0.12, 0.5)]);
        assert!(zooms(&deltas).is_empty());
    }

    #[test]
    fn test_small_pinch_change_ignored() {
        let mut processor = GestureProcessor::default();
        processor.process(&[right_role_pinch(0.1, 0.5)]);
        let deltas = processor.process(&[right_role_pinch(0.1005, 0.5)]);
        assert!(zooms(&deltas).is_empty());
    }

    #[test]
    fn test_absent_hand_clears_pinch_memory() {
        let mut processor = GestureProcessor::default();
        processor.process(&[right_role_pinch(0.1, 0.5)]);
        processor.process(&[left_role(0.5, 0.5)]);
        let deltas = processor.process(&[right_role_pinch(0.05, 0.5)]);
        assert!(zooms(&deltas).is_empty());
    }

    #[test]
    fn test_parameter_emitted_every_frame() {
        let mut processor = GestureProcessor::default();
        // wrist at the bottom edge: raw = 0.5
        let deltas = processor.process(&[right_role_pinch(0.5, 1.0)]);
        assert_eq!(deltas.len(), 1);
        assert!((deltas[0].parameter.unwrap() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_parameter_smoothing() {
        let mut processor = GestureProcessor::default();
        let wrist_for = |raw: f32| 1.0 - (raw - 0.5) / 4.5;

        let mut last = 0.0;
        for raw in [1.0, 2.0, 3.0, 4.0, 5.0] {
            let deltas = processor.process(&[right_role_pinch(0.5, wrist_for(raw))]);
            last = deltas.iter().find_map(|d| d.parameter).unwrap();
        }
        assert!((last - 3.0).abs() < 1e-4, "got {}", last);

        let deltas = processor.process(&[right_role_pinch(0.5, wrist_for(6.0))]);
        let sixth = deltas.iter().find_map(|d| d.parameter).unwrap();
        assert!((sixth - 4.0).abs() < 1e-4, "got {}", sixth);
    }

    #[test]
    fn test_emission_order_zoom_before_parameter() {
        let mut processor = GestureProcessor::default();
        processor.process(&[right_role_pinch(0.1, 0.5)]);
        let deltas = processor.process(&[right_role_pinch(0.05, 0.5)]);
        assert_eq!(deltas.len(), 2);
        assert!(deltas[0].zoom.is_some());
        assert!(deltas[1].parameter.is_some());
    }

    #[test]
    fn test_both_hands_in_one_frame() {
        let mut processor = GestureProcessor::default();
        processor.process(&[left_role(0.5, 0.5), right_role_pinch(0.1, 0.5)]);
        let deltas = processor.process(&[right_role_pinch(0.05, 0.5), left_role(0.6, 0.5)]);
        assert_eq!(deltas.len(), 3);
        assert!(deltas[0].zoom.is_some());
        assert!(deltas[1].parameter.is_some());
        assert!(deltas[2].rotation.is_some());
    }

    #[test]
    fn test_unmirrored_mapping() {
        let config = GestureConfig { mirrored: false, ..Default::default() };
        let mut processor = GestureProcessor::new(config);
        let mut hand = make_hand(Handedness::Left, 0.5, 0.5);
        processor.process(&[hand.clone()]);
        set_palm(&mut hand, 0.6, 0.5);
        let deltas = processor.process(&[hand]);
        assert!(deltas[0].rotation.is_some());
    }

    #[test]
    fn test_reset() {
        let mut processor = GestureProcessor::default();
        processor.process(&[left_role(0.5, 0.5)]);
        processor.reset();
        let deltas = processor.process(&[left_role(0.7, 0.5)]);
        assert!(deltas.is_empty());
    }
}
