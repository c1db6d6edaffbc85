//! Pendulum state - full phase-space position of the double pendulum

use std::f64::consts::FRAC_PI_2;

/// Angles and angular velocities of both arms
///
/// Replaced wholesale by each integrator step, never patched field by field.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PendulumState {
    /// Angle of the first arm from the downward vertical (radians)
    pub a1: f64,
    /// Angle of the second arm from the downward vertical (radians)
    pub a2: f64,
    /// Angular velocity of the first arm (radians per time unit)
    pub w1: f64,
    /// Angular velocity of the second arm (radians per time unit)
    pub w2: f64,
}

impl PendulumState {
    /// Both arms horizontal, first one nudged by `offset` so the
    /// trajectory leaves the symmetric configuration right away.
    pub fn initial(offset: f64) -> Self {
        Self {
            a1: FRAC_PI_2 + offset,
            a2: FRAC_PI_2,
            w1: 0.0,
            w2: 0.0,
        }
    }

    /// `self + slope * h`, componentwise
    pub fn advanced(&self, slope: &PendulumState, h: f64) -> Self {
        Self {
            a1: self.a1 + slope.a1 * h,
            a2: self.a2 + slope.a2 * h,
            w1: self.w1 + slope.w1 * h,
            w2: self.w2 + slope.w2 * h,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.a1.is_finite() && self.a2.is_finite() && self.w1.is_finite() && self.w2.is_finite()
    }
}
