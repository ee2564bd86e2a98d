//! Fixed timestep simulation tick
//!
//! One tick is one display frame: integrate falling balls, bounce them off
//! walls and pegs, settle the ones that reach the floor, then credit every
//! payout whose delay has run out.

use super::collision::{
    ball_floor_contact, ball_peg_collision, ball_wall_collision, peg_bounce_velocity, slot_index,
};
use super::pegs::Peg;
use super::state::{Ball, BallPhase, GameEvent, GameState, PendingPayout};
use crate::settings::Settings;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Drop a ball (spawn button)
    pub spawn: bool,
}

/// Advance the board by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.time_ticks += 1;

    if input.spawn {
        state.try_spawn();
    }

    // Settling balls are frozen; only falling ones move
    let mut settled = Vec::new();
    for ball in state.balls.iter_mut() {
        if ball.is_settled() {
            continue;
        }
        if step_ball(ball, &state.pegs, &state.settings) {
            let slot = slot_index(
                ball.pos.x,
                state.settings.slot_width(),
                state.settings.slot_count(),
            );
            let payout_tick = state.time_ticks + state.settings.payout_delay_ticks();
            ball.phase = BallPhase::Settling { slot, payout_tick };
            settled.push(PendingPayout {
                ball_id: ball.id,
                slot,
                due_tick: payout_tick,
            });
        }
    }

    for payout in settled {
        log::debug!(
            "Ball {} settled in slot {} (payout at tick {})",
            payout.ball_id,
            payout.slot,
            payout.due_tick
        );
        state.highlighted = Some(payout.slot);
        state.record_event(GameEvent::BallSettled {
            ball_id: payout.ball_id,
            slot: payout.slot,
        });
        state.pending.push_back(payout);
    }

    credit_due_payouts(state);

    // Ensure deterministic ordering
    state.normalize_order();
}

/// Move one falling ball through a frame of physics.
///
/// Returns true when the ball's lower edge crossed the floor line this frame.
pub fn step_ball(ball: &mut Ball, pegs: &[Peg], settings: &Settings) -> bool {
    // Gravity and movement
    ball.vel.y += settings.gravity;
    ball.pos += ball.vel;

    // Side walls: clamp back inside and kill most horizontal energy
    let wall = ball_wall_collision(ball.pos, ball.radius, settings.width);
    if wall.hit {
        ball.pos.x = if wall.normal.x > 0.0 {
            ball.radius
        } else {
            settings.width - ball.radius
        };
        ball.vel.x *= settings.wall_bounce;
    }

    // Pegs, in field order; a later overlap overrides an earlier one
    for peg in pegs {
        let hit = ball_peg_collision(ball.pos, ball.radius, peg.pos, settings.peg_radius);
        if hit.hit {
            ball.vel = peg_bounce_velocity(ball.vel, hit.normal, settings.friction);
            ball.pos += hit.normal * hit.penetration;
        }
    }

    ball_floor_contact(ball.pos, ball.radius, settings.floor_y())
}

/// Credit every pending payout that is due, oldest first
fn credit_due_payouts(state: &mut GameState) {
    while let Some(payout) = state.pending.front().copied() {
        if payout.due_tick > state.time_ticks {
            break;
        }
        state.pending.pop_front();

        let amount = state.payout_for(payout.slot);
        state.balance = state.balance.saturating_add(amount);
        state.stats.balls_paid += 1;
        state.stats.total_won = state.stats.total_won.saturating_add(amount);

        if state.highlighted == Some(payout.slot) {
            state.highlighted = None;
        }

        let before = state.balls.len();
        state.balls.retain(|b| b.id != payout.ball_id);
        if state.balls.len() == before {
            log::warn!("Payout for ball {} found no ball to remove", payout.ball_id);
        }

        state.record_event(GameEvent::PayoutCredited {
            ball_id: payout.ball_id,
            slot: payout.slot,
            amount,
            balance: state.balance,
        });
        log::debug!(
            "Ball {} paid {} from slot {}, balance {}",
            payout.ball_id,
            amount,
            payout.slot,
            state.balance
        );
    }
}
