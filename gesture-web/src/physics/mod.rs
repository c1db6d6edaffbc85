//! Physics module - double pendulum integration and its frame ticker
//!
//! Re-exports only. All logic in submodules.

mod pendulum;
mod state;
mod ticker;
mod trail;

pub use pendulum::{advance_frame, bob_positions, derivatives, step, total_energy, PendulumParams};
pub use state::PendulumState;
pub use ticker::{PhysicsTicker, TickToken, TickerState};
pub use trail::{TrailBuffer, TRAIL_CAPACITY};
