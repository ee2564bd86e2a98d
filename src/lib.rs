//! Plinko - balls drop through a peg field and settle into paying slots
//!
//! Core modules:
//! - `sim`: Deterministic simulation (pegs, physics, scoring, economy)
//! - `renderer`: Drawing surface abstraction and frame drawing
//! - `hud`: Balance text, slot highlights and spawn button state
//! - `settings`: Board configuration and validation

pub mod hud;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use hud::{HudSink, HudSync};
pub use settings::{Settings, SettingsError};
pub use sim::{GameState, Simulation};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one display frame at 60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Maximum frames per `advance` call to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest wall-clock delta accepted by `advance` (seconds)
    pub const MAX_FRAME_DELTA: f32 = 0.1;

    /// Board dimensions
    pub const BOARD_WIDTH: f32 = 600.0;
    pub const BOARD_HEIGHT: f32 = 600.0;
    /// Distance above the bottom edge where balls settle
    pub const FLOOR_MARGIN: f32 = 50.0;

    /// Peg lattice
    pub const PEG_ROWS: u32 = 7;
    pub const PEGS_PER_ROW: u32 = 8;
    pub const PEG_SPACING_Y: f32 = 60.0;
    pub const PEG_OFFSET_Y: f32 = 80.0;
    pub const PEG_RADIUS: f32 = 8.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    /// Downward acceleration (pixels/frame²)
    pub const GRAVITY: f32 = 0.3;
    /// Speed kept after a peg bounce
    pub const PEG_FRICTION: f32 = 0.99;
    /// Horizontal velocity factor on wall contact (sign flip + damping)
    pub const WALL_BOUNCE: f32 = -0.4;
    /// Horizontal spread of spawn positions around the board center
    pub const SPAWN_SPREAD_X: f32 = 60.0;
    /// Spawn height above the ball's own radius
    pub const SPAWN_OFFSET_Y: f32 = 5.0;
    /// Range of the initial horizontal velocity (pixels/frame)
    pub const SPAWN_SPREAD_VX: f32 = 2.0;

    /// Economy defaults
    pub const STARTING_MONEY: u64 = 250;
    pub const BALL_COST: u64 = 25;
    /// Slot highlight duration before the payout is credited
    pub const PAYOUT_DELAY_MS: u32 = 800;

    /// Default slot multipliers, left to right
    pub const SLOT_MULTIPLIERS: [f64; 9] = [10.0, 5.0, 3.0, 2.0, 0.5, 2.0, 3.0, 5.0, 10.0];
    /// Largest multiplier settings may ask for
    pub const MAX_MULTIPLIER: f64 = 1_000.0;

    /// Undrained events kept before the oldest are dropped
    pub const MAX_QUEUED_EVENTS: usize = 1024;
}

/// Format the balance the way the money display shows it
pub fn format_money(balance: u64) -> String {
    format!("Money: ${}", balance)
}

/// Convert a duration in milliseconds to whole simulation frames (rounded)
#[inline]
pub fn ms_to_ticks(ms: u32) -> u64 {
    (ms as f64 / (consts::FRAME_DT as f64 * 1000.0)).round() as u64
}
