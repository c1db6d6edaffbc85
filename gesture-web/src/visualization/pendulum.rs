//! Pendulum scene - physics state, trail and ticker for pendulum mode

use std::f32::consts::FRAC_PI_2;

use log::debug;

use super::mesh::finite_or_zero;
use crate::config::PhysicsConfig;
use crate::error::LifecycleError;
use crate::physics::{
    advance_frame, bob_positions, PendulumParams, PendulumState, PhysicsTicker, TickToken,
    TrailBuffer,
};

/// Placement of one rod: midpoint and rotation about Z
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RodPose {
    pub center: [f32; 3],
    pub angle: f32,
}

/// Render-ready positions for one physics tick, all finite
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PendulumFrame {
    pub bob1: [f32; 3],
    pub bob2: [f32; 3],
    pub rod1: RodPose,
    pub rod2: RodPose,
}

impl PendulumFrame {
    fn from_state(state: &PendulumState, params: &PendulumParams) -> Self {
        let ((x1, y1), (x2, y2)) = bob_positions(state, params);
        let (x1, y1) = (finite_or_zero(x1 as f32), finite_or_zero(y1 as f32));
        let (x2, y2) = (finite_or_zero(x2 as f32), finite_or_zero(y2 as f32));

        Self {
            bob1: [x1, y1, 0.0],
            bob2: [x2, y2, 0.0],
            rod1: RodPose {
                center: [x1 / 2.0, y1 / 2.0, 0.0],
                angle: y1.atan2(x1) + FRAC_PI_2,
            },
            rod2: RodPose {
                center: [x1 + (x2 - x1) / 2.0, y1 + (y2 - y1) / 2.0, 0.0],
                angle: (y2 - y1).atan2(x2 - x1) + FRAC_PI_2,
            },
        }
    }

    /// Flat `[bob1, bob2]` positions for the bridge
    pub fn bob_positions(&self) -> [[f32; 3]; 2] {
        [self.bob1, self.bob2]
    }
}

pub struct PendulumScene {
    config: PhysicsConfig,
    params: PendulumParams,
    state: PendulumState,
    trail: TrailBuffer,
    ticker: PhysicsTicker,
    token: Option<TickToken>,
}

impl PendulumScene {
    pub fn new(config: &PhysicsConfig) -> Self {
        Self {
            config: config.clone(),
            params: PendulumParams::from(config),
            state: PendulumState::initial(config.initial_offset),
            trail: TrailBuffer::with_capacity(config.trail_capacity),
            ticker: PhysicsTicker::new(),
            token: None,
        }
    }

    /// (Re-)enter pendulum mode: fresh initial state, empty trail, new run
    pub fn enter(&mut self) -> Result<(), LifecycleError> {
        self.state = PendulumState::initial(self.config.initial_offset);
        self.trail = TrailBuffer::with_capacity(self.config.trail_capacity);
        self.token = Some(self.ticker.start()?);
        debug!("pendulum reset to initial offset {}", self.config.initial_offset);
        Ok(())
    }

    pub fn leave(&mut self) {
        self.ticker.stop();
        self.token = None;
        self.trail.clear();
    }

    pub fn teardown(&mut self) {
        self.ticker.teardown();
        self.token = None;
    }

    pub fn is_running(&self) -> bool {
        self.token.map_or(false, |t| self.ticker.is_live(t))
    }

    /// One physics tick at time-rate `rate`. Returns `false` when the run is
    /// no longer live, in which case nothing is touched.
    pub fn tick(&mut self, rate: f32) -> bool {
        if !self.is_running() {
            return false;
        }

        let frame_dt = rate as f64 * self.config.time_rate_scale;
        self.state = advance_frame(&self.state, frame_dt, self.config.sub_steps, &self.params);

        let ((_, _), (x2, y2)) = bob_positions(&self.state, &self.params);
        let (x2, y2) = (x2 as f32, y2 as f32);
        if x2.is_finite() && y2.is_finite() {
            self.trail.push([x2, y2, 0.0]);
        }
        true
    }

    pub fn frame(&self) -> PendulumFrame {
        PendulumFrame::from_state(&self.state, &self.params)
    }

    pub fn state(&self) -> &PendulumState {
        &self.state
    }

    pub fn trail(&self) -> &TrailBuffer {
        &self.trail
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> PendulumScene {
        PendulumScene::new(&PhysicsConfig::default())
    }

    #[test]
    fn test_not_running_until_entered() {
        let mut scene = scene();
        assert!(!scene.tick(2.0));
        assert_eq!(*scene.state(), PendulumState::initial(0.1));
        assert!(scene.trail().is_empty());
    }

    #[test]
    fn test_tick_advances_and_records_trail() {
        let mut scene = scene();
        scene.enter().unwrap();
        for _ in 0..10 {
            assert!(scene.tick(2.0));
        }
        assert_ne!(*scene.state(), PendulumState::initial(0.1));
        assert_eq!(scene.trail().len(), 10);
        let last = *scene.trail().last().unwrap();
        assert_eq!(last, scene.frame().bob2);
    }

    #[test]
    fn test_reenter_resets() {
        let mut scene = scene();
        scene.enter().unwrap();
        for _ in 0..50 {
            scene.tick(3.0);
        }
        scene.leave();
        assert!(!scene.tick(3.0));
        scene.enter().unwrap();
        assert_eq!(*scene.state(), PendulumState::initial(0.1));
        assert!(scene.trail().is_empty());
    }

    #[test]
    fn test_teardown_stops_ticks() {
        let mut scene = scene();
        scene.enter().unwrap();
        scene.teardown();
        let before = *scene.state();
        assert!(!scene.tick(2.0));
        assert_eq!(*scene.state(), before);
        assert_eq!(scene.enter(), Err(LifecycleError::TornDown));
    }

    #[test]
    fn test_trail_capacity_respected() {
        let config = PhysicsConfig { trail_capacity: 8, ..Default::default() };
        let mut scene = PendulumScene::new(&config);
        scene.enter().unwrap();
        for _ in 0..20 {
            scene.tick(1.0);
        }
        assert_eq!(scene.trail().len(), 8);
    }

    #[test]
    fn test_frame_geometry() {
        let scene = scene();
        let frame = scene.frame();
        // initial: first arm just past horizontal, second horizontal
        assert!((frame.bob2[0] - frame.bob1[0] - 1.0).abs() < 1e-6);
        assert!((frame.bob2[1] - frame.bob1[1]).abs() < 1e-6);
        assert!((frame.rod1.center[0] - frame.bob1[0] / 2.0).abs() < 1e-6);
        assert!((frame.rod2.angle - FRAC_PI_2).abs() < 1e-6);
    }
}
