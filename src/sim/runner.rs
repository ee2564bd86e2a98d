//! Frame driver
//!
//! `Simulation` owns the board and turns wall-clock deltas into whole fixed
//! frames, so the host's refresh rate never changes the physics.

use super::state::{GameEvent, GameState};
use super::tick::{TickInput, tick};
use crate::consts::*;
use crate::settings::{Settings, SettingsError};

/// Board plus the fixed-timestep accumulator that drives it
#[derive(Debug, Clone)]
pub struct Simulation {
    state: GameState,
    accumulator: f32,
    input: TickInput,
}

impl Simulation {
    /// Validate settings and build a fresh board
    pub fn new(settings: Settings) -> Result<Self, SettingsError> {
        settings.validate()?;
        log::info!(
            "New board: {} slots, {} per ball, starting money {}",
            settings.slot_count(),
            settings.ball_cost,
            settings.starting_money
        );
        Ok(Self::from_state(GameState::new(settings)))
    }

    pub fn from_state(state: GameState) -> Self {
        Self {
            state,
            accumulator: 0.0,
            input: TickInput::default(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Run as many whole frames as `dt` seconds cover. Returns the frame count.
    pub fn advance(&mut self, dt: f32) -> u32 {
        let dt = dt.clamp(0.0, MAX_FRAME_DELTA);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= FRAME_DT && substeps < MAX_SUBSTEPS {
            self.step();
            self.accumulator -= FRAME_DT;
            substeps += 1;
        }
        substeps
    }

    /// Run exactly one frame, consuming any queued input
    pub fn step(&mut self) {
        let input = std::mem::take(&mut self.input);
        tick(&mut self.state, &input);
    }

    /// Spawn button pressed: apply the spawn gate right away
    pub fn request_spawn(&mut self) -> bool {
        self.state.try_spawn().is_some()
    }

    /// Queue a spawn for the start of the next frame
    pub fn queue_spawn(&mut self) {
        self.input.spawn = true;
    }

    pub fn can_spawn(&self) -> bool {
        self.state.can_spawn()
    }

    pub fn balance(&self) -> u64 {
        self.state.balance
    }

    pub fn ball_count(&self) -> usize {
        self.state.balls.len()
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_settings() {
        let settings = Settings::default().with_multipliers(Vec::new());
        assert!(matches!(
            Simulation::new(settings),
            Err(SettingsError::NoSlots)
        ));
    }

    #[test]
    fn test_advance_whole_frames() {
        let mut sim = Simulation::new(Settings::default()).unwrap();
        assert_eq!(sim.advance(FRAME_DT), 1);
        assert_eq!(sim.state().time_ticks, 1);

        // Half a frame does nothing until the other half arrives
        assert_eq!(sim.advance(FRAME_DT * 0.5), 0);
        assert_eq!(sim.advance(FRAME_DT * 0.6), 1);
        assert_eq!(sim.state().time_ticks, 2);
    }

    #[test]
    fn test_advance_caps_substeps() {
        let mut sim = Simulation::new(Settings::default()).unwrap();
        // A long stall is clamped to MAX_FRAME_DELTA
        let frames = sim.advance(5.0);
        assert!(frames <= MAX_SUBSTEPS);
        assert!((5..=6).contains(&frames));
        assert_eq!(sim.state().time_ticks, frames as u64);
    }

    #[test]
    fn test_negative_delta_ignored() {
        let mut sim = Simulation::new(Settings::default()).unwrap();
        assert_eq!(sim.advance(-1.0), 0);
        assert_eq!(sim.state().time_ticks, 0);
    }

    #[test]
    fn test_request_and_queue_spawn() {
        let mut sim = Simulation::new(Settings::default()).unwrap();
        assert!(sim.request_spawn());
        assert_eq!(sim.balance(), 225);
        assert_eq!(sim.ball_count(), 1);

        sim.queue_spawn();
        assert_eq!(sim.ball_count(), 1);
        sim.step();
        assert_eq!(sim.ball_count(), 2);
        assert_eq!(sim.balance(), 200);

        // Queued input is one-shot
        sim.step();
        assert_eq!(sim.ball_count(), 2);
    }
}
