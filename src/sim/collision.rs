//! Collision detection and response for balls, pegs, walls and the floor
//!
//! Peg bounces are deliberately simple: the ball keeps its speed (minus
//! friction) but leaves along the peg-to-ball direction. The incoming
//! direction is discarded, so this is not a true reflection.

use glam::Vec2;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Unit normal pointing from the obstacle toward the ball
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Push-out direction when the ball center sits exactly on the peg center
pub const COINCIDENT_NORMAL: Vec2 = Vec2::NEG_Y;

/// Check overlap between a ball and a peg (both circles)
pub fn ball_peg_collision(
    ball_pos: Vec2,
    ball_radius: f32,
    peg_pos: Vec2,
    peg_radius: f32,
) -> CollisionResult {
    let delta = ball_pos - peg_pos;
    let dist = delta.length();
    let min_dist = peg_radius + ball_radius;

    if dist >= min_dist {
        return CollisionResult::miss();
    }

    // Screen coordinates: -Y is up
    let normal = if dist > 0.0 {
        delta / dist
    } else {
        COINCIDENT_NORMAL
    };

    CollisionResult {
        hit: true,
        normal,
        penetration: min_dist - dist,
    }
}

/// New velocity after a peg bounce: same speed scaled by friction, pointing
/// along the collision normal
#[inline]
pub fn peg_bounce_velocity(velocity: Vec2, normal: Vec2, friction: f32) -> Vec2 {
    normal * (velocity.length() * friction)
}

/// Check the ball against the left and right board edges
///
/// Only one wall can be hit per check; the left wall wins ties on boards
/// narrower than the ball.
pub fn ball_wall_collision(ball_pos: Vec2, ball_radius: f32, width: f32) -> CollisionResult {
    if ball_pos.x - ball_radius < 0.0 {
        CollisionResult {
            hit: true,
            normal: Vec2::X,
            penetration: ball_radius - ball_pos.x,
        }
    } else if ball_pos.x + ball_radius > width {
        CollisionResult {
            hit: true,
            normal: Vec2::NEG_X,
            penetration: ball_pos.x + ball_radius - width,
        }
    } else {
        CollisionResult::miss()
    }
}

/// Check if the ball's lower edge has crossed the floor line
#[inline]
pub fn ball_floor_contact(ball_pos: Vec2, ball_radius: f32, floor_y: f32) -> bool {
    ball_pos.y + ball_radius > floor_y
}

/// Slot a settled ball at `x` belongs to, clamped into `[0, slot_count)`
pub fn slot_index(x: f32, slot_width: f32, slot_count: usize) -> usize {
    let last = slot_count.saturating_sub(1);
    let raw = (x / slot_width).floor();
    if raw.is_nan() || raw <= 0.0 {
        0
    } else {
        (raw as usize).min(last)
    }
}
