//! Double pendulum integrator
//!
//! Two massless rods with point masses, driven by the standard Lagrangian
//! equations of motion and advanced with classical fixed-step RK4.

use super::state::PendulumState;
use crate::config::PhysicsConfig;

/// Physical constants of the pendulum
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendulumParams {
    pub g: f64,
    pub l1: f64,
    pub l2: f64,
    pub m1: f64,
    pub m2: f64,
}

impl Default for PendulumParams {
    fn default() -> Self {
        Self::from(&PhysicsConfig::default())
    }
}

impl From<&PhysicsConfig> for PendulumParams {
    fn from(config: &PhysicsConfig) -> Self {
        Self {
            g: config.gravity,
            l1: config.length1,
            l2: config.length2,
            m1: config.mass1,
            m2: config.mass2,
        }
    }
}

/// Time derivative of the state: `(w1, w2, dw1/dt, dw2/dt)`
///
/// Not guarded against a vanishing denominator; non-finite values are
/// screened where positions are handed to rendering.
pub fn derivatives(state: &PendulumState, p: &PendulumParams) -> PendulumState {
    let PendulumState { a1, a2, w1, w2 } = *state;
    let PendulumParams { g, l1, l2, m1, m2 } = *p;

    let common = 2.0 * m1 + m2 - m2 * (2.0 * a1 - 2.0 * a2).cos();

    let num1 = -g * (2.0 * m1 + m2) * a1.sin();
    let num2 = -m2 * g * (a1 - 2.0 * a2).sin();
    let num3 = -2.0 * (a1 - a2).sin() * m2;
    let num4 = w2 * w2 * l2 + w1 * w1 * l1 * (a1 - a2).cos();
    let dw1 = (num1 + num2 + num3 * num4) / (l1 * common);

    let num1 = 2.0 * (a1 - a2).sin();
    let num2 = w1 * w1 * l1 * (m1 + m2);
    let num3 = g * (m1 + m2) * a1.cos();
    let num4 = w2 * w2 * l2 * m2 * (a1 - a2).cos();
    let dw2 = (num1 * (num2 + num3 + num4)) / (l2 * common);

    PendulumState {
        a1: w1,
        a2: w2,
        w1: dw1,
        w2: dw2,
    }
}

/// One classical RK4 step of size `dt`
///
/// Stage order and the 1-2-2-1 weighting are fixed; changing either
/// changes the chaotic trajectory.
pub fn step(state: &PendulumState, dt: f64, p: &PendulumParams) -> PendulumState {
    let k1 = derivatives(state, p);
    let k2 = derivatives(&state.advanced(&k1, dt / 2.0), p);
    let k3 = derivatives(&state.advanced(&k2, dt / 2.0), p);
    let k4 = derivatives(&state.advanced(&k3, dt), p);

    let h = dt / 6.0;
    PendulumState {
        a1: state.a1 + h * (k1.a1 + 2.0 * k2.a1 + 2.0 * k3.a1 + k4.a1),
        a2: state.a2 + h * (k1.a2 + 2.0 * k2.a2 + 2.0 * k3.a2 + k4.a2),
        w1: state.w1 + h * (k1.w1 + 2.0 * k2.w1 + 2.0 * k3.w1 + k4.w1),
        w2: state.w2 + h * (k1.w2 + 2.0 * k2.w2 + 2.0 * k3.w2 + k4.w2),
    }
}

/// Split a frame's time budget into `sub_steps` equal RK4 steps.
///
/// `sub_steps * dt == frame_dt`; a zero count is treated as one step.
pub fn advance_frame(
    state: &PendulumState,
    frame_dt: f64,
    sub_steps: u32,
    p: &PendulumParams,
) -> PendulumState {
    let n = sub_steps.max(1);
    let dt = frame_dt / n as f64;
    (0..n).fold(*state, |s, _| step(&s, dt, p))
}

/// Total mechanical energy (kinetic + potential, pivot at zero height)
pub fn total_energy(state: &PendulumState, p: &PendulumParams) -> f64 {
    let PendulumState { a1, a2, w1, w2 } = *state;
    let PendulumParams { g, l1, l2, m1, m2 } = *p;

    let kinetic = 0.5 * (m1 + m2) * l1 * l1 * w1 * w1
        + 0.5 * m2 * l2 * l2 * w2 * w2
        + m2 * l1 * l2 * w1 * w2 * (a1 - a2).cos();
    let potential = -(m1 + m2) * g * l1 * a1.cos() - m2 * g * l2 * a2.cos();

    kinetic + potential
}

/// Cartesian positions of both bobs, pivot at the origin
pub fn bob_positions(state: &PendulumState, p: &PendulumParams) -> ((f64, f64), (f64, f64)) {
    let x1 = p.l1 * state.a1.sin();
    let y1 = -p.l1 * state.a1.cos();
    let x2 = x1 + p.l2 * state.a2.sin();
    let y2 = y1 - p.l2 * state.a2.cos();
    ((x1, y1), (x2, y2))
}
