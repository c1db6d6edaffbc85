//! Physics ticker - lifecycle of the pendulum stepping loop
//!
//! The loop only advances while the ticker is running under the token it
//! handed out. Stopping (mode change) or tearing down invalidates every
//! outstanding token, so a stale loop can never touch a discarded trail.

use log::debug;

use crate::error::LifecycleError;

/// Proof that a caller started the current run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickToken(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickerState {
    Idle,
    Running(u64),
    /// Terminal; nothing can restart it
    TornDown,
}

pub struct PhysicsTicker {
    state: TickerState,
    generation: u64,
}

impl PhysicsTicker {
    pub fn new() -> Self {
        Self {
            state: TickerState::Idle,
            generation: 0,
        }
    }

    /// Begin a new run, invalidating any previous token
    pub fn start(&mut self) -> Result<TickToken, LifecycleError> {
        if self.state == TickerState::TornDown {
            return Err(LifecycleError::TornDown);
        }
        self.generation += 1;
        self.state = TickerState::Running(self.generation);
        debug!("physics ticker started (generation {})", self.generation);
        Ok(TickToken(self.generation))
    }

    pub fn stop(&mut self) {
        if let TickerState::Running(generation) = self.state {
            debug!("physics ticker stopped (generation {})", generation);
            self.state = TickerState::Idle;
        }
    }

    pub fn teardown(&mut self) {
        self.state = TickerState::TornDown;
    }

    /// Checked before every tick and before scheduling the next one
    pub fn is_live(&self, token: TickToken) -> bool {
        self.state == TickerState::Running(token.0)
    }

    pub fn state(&self) -> TickerState {
        self.state
    }
}

impl Default for PhysicsTicker {
    fn default() -> Self {
        Self::new()
    }
}
