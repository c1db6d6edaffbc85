//! Hand landmark layout and per-frame observations
//!
//! Landmarks arrive in normalized image coordinates (x, y in 0-1, y grows
//! downward), 21 per hand, in the detector's fixed anatomical order.

use crate::error::LandmarkError;

// ============================================================================
// HAND LANDMARK INDICES
// ============================================================================

pub const WRIST: usize = 0;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_TIP: usize = 8;
pub const PINKY_MCP: usize = 17;

pub const LANDMARK_COUNT: usize = 21;

/// Floats per hand in the flat buffer sent from JS (x, y, z per landmark)
pub const FLOATS_PER_HAND: usize = LANDMARK_COUNT * 3;

/// Landmarks averaged into the palm-center proxy
pub const PALM_LANDMARKS: [usize; 3] = [WRIST, INDEX_MCP, PINKY_MCP];

// ============================================================================
// DATA STRUCTURES
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HandLandmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Label reported by the detector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    pub fn from_label(label: &str) -> Result<Self, LandmarkError> {
        match label {
            "Left" | "left" => Ok(Self::Left),
            "Right" | "right" => Ok(Self::Right),
            other => Err(LandmarkError::UnknownHandedness(other.to_string())),
        }
    }
}

/// What a hand does in this system, independent of the detector label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandRole {
    /// Palm movement rotates the scene
    Left,
    /// Pinch zooms, wrist height drives the parameter
    Right,
}

impl HandRole {
    /// With a mirrored feed the detector's "Left" is the user's right hand.
    pub fn from_handedness(handedness: Handedness, mirrored: bool) -> Self {
        match (handedness, mirrored) {
            (Handedness::Left, true) | (Handedness::Right, false) => HandRole::Right,
            (Handedness::Right, true) | (Handedness::Left, false) => HandRole::Left,
        }
    }
}

/// One detected hand in one frame
#[derive(Debug, Clone, PartialEq)]
pub struct HandObservation {
    pub handedness: Handedness,
    pub landmarks: [HandLandmark; LANDMARK_COUNT],
}

impl HandObservation {
    pub fn new(handedness: Handedness, landmarks: [HandLandmark; LANDMARK_COUNT]) -> Self {
        Self { handedness, landmarks }
    }

    /// Parse hand `hand` out of a flat `[x, y, z, x, y, z, ...]` buffer
    pub fn from_flat(
        flat: &[f32],
        hand: usize,
        handedness: Handedness,
    ) -> Result<Self, LandmarkError> {
        let start = hand * FLOATS_PER_HAND;
        let end = start + FLOATS_PER_HAND;
        let chunk = flat.get(start..end).ok_or(LandmarkError::ShortBuffer {
            hand,
            expected: end,
            found: flat.len(),
        })?;

        let mut landmarks = [HandLandmark::default(); LANDMARK_COUNT];
        for (lm, xyz) in landmarks.iter_mut().zip(chunk.chunks_exact(3)) {
            *lm = HandLandmark { x: xyz[0], y: xyz[1], z: xyz[2] };
        }
        Ok(Self { handedness, landmarks })
    }

    /// Unweighted mean of wrist, index base and pinky base (x, y)
    pub fn palm_center(&self) -> (f32, f32) {
        let (sx, sy) = PALM_LANDMARKS.iter().fold((0.0, 0.0), |(sx, sy), &i| {
            (sx + self.landmarks[i].x, sy + self.landmarks[i].y)
        });
        let n = PALM_LANDMARKS.len() as f32;
        (sx / n, sy / n)
    }

    /// Thumb tip to index tip distance in the image plane
    pub fn pinch_distance(&self) -> f32 {
        let thumb = self.landmarks[THUMB_TIP];
        let index = self.landmarks[INDEX_TIP];
        let dx = thumb.x - index.x;
        let dy = thumb.y - index.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn wrist(&self) -> HandLandmark {
        self.landmarks[WRIST]
    }
}
