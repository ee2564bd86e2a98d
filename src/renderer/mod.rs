//! Board rendering
//!
//! Draws the peg field and the balls onto a `Surface`. Rendering only reads
//! the game state; the browser build backs the surface with a Canvas 2D
//! context.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

use glam::Vec2;

use crate::sim::GameState;

/// Peg fill / outline
pub const PEG_FILL: &str = "#fff";
pub const PEG_STROKE: &str = "#888";
/// Ball fill / outline
pub const BALL_FILL: &str = "#ff4136";
pub const BALL_STROKE: &str = "#fff";

/// Minimal 2D drawing target (colors are CSS color strings)
pub trait Surface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;
    /// Clear the whole surface
    fn clear(&mut self);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: &str);
}

/// Clear the surface and redraw every peg, then every ball
pub fn draw_frame(state: &GameState, surface: &mut impl Surface) {
    surface.clear();

    let peg_radius = state.settings.peg_radius;
    for peg in &state.pegs {
        surface.fill_circle(peg.pos, peg_radius, PEG_FILL);
        surface.stroke_circle(peg.pos, peg_radius, PEG_STROKE);
    }

    for ball in &state.balls {
        surface.fill_circle(ball.pos, ball.radius, BALL_FILL);
        surface.stroke_circle(ball.pos, ball.radius, BALL_STROKE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Clear,
        Fill(Vec2, f32, String),
        Stroke(Vec2, f32, String),
    }

    #[derive(Default)]
    struct RecordingSurface {
        ops: Vec<Op>,
    }

    impl Surface for RecordingSurface {
        fn width(&self) -> f32 {
            600.0
        }
        fn height(&self) -> f32 {
            600.0
        }
        fn clear(&mut self) {
            self.ops.push(Op::Clear);
        }
        fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str) {
            self.ops.push(Op::Fill(center, radius, color.to_string()));
        }
        fn stroke_circle(&mut self, center: Vec2, radius: f32, color: &str) {
            self.ops.push(Op::Stroke(center, radius, color.to_string()));
        }
    }

    #[test]
    fn test_draw_order() {
        let mut state = GameState::new(Settings::default());
        state.try_spawn();
        state.try_spawn();

        let mut surface = RecordingSurface::default();
        draw_frame(&state, &mut surface);

        let pegs = state.pegs.len();
        assert_eq!(surface.ops.len(), 1 + 2 * pegs + 2 * 2);
        assert_eq!(surface.ops[0], Op::Clear);
        assert_eq!(
            surface.ops[1],
            Op::Fill(state.pegs[0].pos, state.settings.peg_radius, PEG_FILL.into())
        );
        assert_eq!(
            surface.ops[2],
            Op::Stroke(state.pegs[0].pos, state.settings.peg_radius, PEG_STROKE.into())
        );
        let first_ball = 1 + 2 * pegs;
        assert_eq!(
            surface.ops[first_ball],
            Op::Fill(state.balls[0].pos, state.balls[0].radius, BALL_FILL.into())
        );
    }

    #[test]
    fn test_draw_does_not_touch_state() {
        let mut state = GameState::new(Settings::default());
        state.try_spawn();
        let before = state.balls[0].clone();

        let mut surface = RecordingSurface::default();
        draw_frame(&state, &mut surface);
        draw_frame(&state, &mut surface);

        assert_eq!(state.balls[0].pos, before.pos);
        assert_eq!(state.balls[0].vel, before.vel);
        assert_eq!(surface.ops.iter().filter(|op| **op == Op::Clear).count(), 2);
    }
}
