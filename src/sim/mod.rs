//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by ball ID, pegs in field order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod pegs;
pub mod runner;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, ball_peg_collision, ball_wall_collision, slot_index};
pub use pegs::{Peg, PegLayout, generate_pegs};
pub use runner::Simulation;
pub use state::{Ball, BallPhase, GameEvent, GameState, PendingPayout, RunStats, Slot};
pub use tick::{TickInput, step_ball, tick};
