//! Game state and core simulation types
//!
//! Everything the board needs between frames lives in `GameState`: pegs,
//! the ball set, the balance, the pending payout queue and the highlight.

use std::collections::VecDeque;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::pegs::{Peg, PegLayout, generate_pegs};
use crate::consts::*;
use crate::settings::Settings;

/// Ball lifecycle: falling through the pegs, then waiting for its payout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallPhase {
    /// Subject to physics
    Falling,
    /// Hit the floor; frozen until the payout fires and the ball is removed
    Settling { slot: usize, payout_tick: u64 },
}

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub phase: BallPhase,
}

impl Ball {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            id,
            pos,
            vel,
            radius,
            phase: BallPhase::Falling,
        }
    }

    #[inline]
    pub fn is_settled(&self) -> bool {
        !matches!(self.phase, BallPhase::Falling)
    }
}

/// A scoring bin along the floor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub index: usize,
    pub x_start: f32,
    pub x_end: f32,
    pub multiplier: f64,
}

/// A payout waiting for its highlight delay to run out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingPayout {
    pub ball_id: u32,
    pub slot: usize,
    pub due_tick: u64,
}

/// Running totals for the session (informational only)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub balls_dropped: u32,
    pub balls_paid: u32,
    pub total_wagered: u64,
    pub total_won: u64,
}

/// Things that happened during a tick, for the host to react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    BallSpawned { ball_id: u32, balance: u64 },
    SpawnRejected { balance: u64, cost: u64 },
    BallSettled { ball_id: u32, slot: usize },
    PayoutCredited {
        ball_id: u32,
        slot: usize,
        amount: u64,
        balance: u64,
    },
}

/// Complete board state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Settings the board was built from (validated)
    pub settings: Settings,
    /// Fixed peg field, row-major
    pub pegs: Vec<Peg>,
    /// Scoring slots, left to right
    pub slots: Vec<Slot>,
    /// Active balls (sorted by id)
    pub balls: Vec<Ball>,
    /// Payouts ordered by due tick
    pub pending: VecDeque<PendingPayout>,
    /// Current money
    pub balance: u64,
    /// Slot currently flagged as active, if any
    pub highlighted: Option<usize>,
    /// Simulation tick counter (virtual clock)
    pub time_ticks: u64,
    pub stats: RunStats,
    /// Events since the last drain, oldest first. Hosts should drain every
    /// frame; past `MAX_QUEUED_EVENTS` the oldest are dropped.
    pub events: Vec<GameEvent>,
    rng: Pcg32,
    /// Next ball ID
    next_id: u32,
}

impl GameState {
    /// Build a fresh board. `settings` must already be validated.
    pub fn new(settings: Settings) -> Self {
        let pegs = generate_pegs(&PegLayout::from_settings(&settings));
        let slot_width = settings.slot_width();
        let slots = settings
            .slot_multipliers
            .iter()
            .enumerate()
            .map(|(index, &multiplier)| Slot {
                index,
                x_start: slot_width * index as f32,
                x_end: slot_width * (index + 1) as f32,
                multiplier,
            })
            .collect();

        log::debug!(
            "Board {}x{}: {} pegs, {} slots",
            settings.width,
            settings.height,
            pegs.len(),
            settings.slot_count()
        );

        Self {
            balance: settings.starting_money,
            rng: Pcg32::seed_from_u64(settings.seed),
            settings,
            pegs,
            slots,
            balls: Vec::new(),
            pending: VecDeque::new(),
            highlighted: None,
            time_ticks: 0,
            stats: RunStats::default(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new ball ID
    fn next_ball_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Whether the balance covers one more ball
    #[inline]
    pub fn can_spawn(&self) -> bool {
        self.balance >= self.settings.ball_cost
    }

    /// Drop a ball near the top center with a little random jitter.
    /// Returns the new ball's id, or `None` if the balance is too low.
    pub fn try_spawn(&mut self) -> Option<u32> {
        if !self.can_spawn() {
            return self.reject_spawn();
        }
        let jitter_x: f32 = self.rng.random();
        let jitter_vx: f32 = self.rng.random();
        let pos = Vec2::new(
            self.settings.width / 2.0 + (jitter_x - 0.5) * SPAWN_SPREAD_X,
            self.settings.ball_radius + SPAWN_OFFSET_Y,
        );
        let vel = Vec2::new((jitter_vx - 0.5) * SPAWN_SPREAD_VX, 0.0);
        self.spawn_ball_at(pos, vel)
    }

    /// Spawn gate with an explicit starting position and velocity
    pub fn spawn_ball_at(&mut self, pos: Vec2, vel: Vec2) -> Option<u32> {
        if !self.can_spawn() {
            return self.reject_spawn();
        }
        let cost = self.settings.ball_cost;
        let id = self.next_ball_id();
        self.balls
            .push(Ball::new(id, pos, vel, self.settings.ball_radius));
        self.balance -= cost;
        self.stats.balls_dropped += 1;
        self.stats.total_wagered = self.stats.total_wagered.saturating_add(cost);
        self.record_event(GameEvent::BallSpawned {
            ball_id: id,
            balance: self.balance,
        });
        log::debug!("Ball {} spawned at ({:.1}, {:.1}), balance {}", id, pos.x, pos.y, self.balance);
        Some(id)
    }

    fn reject_spawn(&mut self) -> Option<u32> {
        self.record_event(GameEvent::SpawnRejected {
            balance: self.balance,
            cost: self.settings.ball_cost,
        });
        log::debug!("Spawn rejected: balance {} < cost {}", self.balance, self.settings.ball_cost);
        None
    }

    /// Payout for a ball landing in `slot`: round(cost * multiplier)
    pub fn payout_for(&self, slot: usize) -> u64 {
        let multiplier = self.slots.get(slot).map(|s| s.multiplier).unwrap_or(0.0);
        (self.settings.ball_cost as f64 * multiplier).round() as u64
    }

    pub fn is_slot_active(&self, slot: usize) -> bool {
        self.highlighted == Some(slot)
    }

    pub fn ball(&self, id: u32) -> Option<&Ball> {
        self.balls.iter().find(|b| b.id == id)
    }

    /// Balls still subject to physics
    pub fn falling_count(&self) -> usize {
        self.balls.iter().filter(|b| !b.is_settled()).count()
    }

    /// Queue an event for the host, dropping the oldest once the queue is full
    pub(crate) fn record_event(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_QUEUED_EVENTS {
            let excess = self.events.len() + 1 - MAX_QUEUED_EVENTS;
            self.events.drain(..excess);
        }
        self.events.push(event);
    }

    /// Take the events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Ensure balls are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.balls.sort_by_key(|b| b.id);
    }
}
