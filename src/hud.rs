//! HUD sync
//!
//! Pushes the balance text, slot highlights and spawn button state out to
//! whatever displays them. Only changed values are written, so the DOM is
//! touched a handful of times per payout rather than every frame.

use crate::format_money;
use crate::sim::GameState;

/// Write-only display targets the board reports to
pub trait HudSink {
    /// Money display, already formatted ("Money: $250")
    fn set_balance_text(&mut self, text: &str);
    /// Per-slot active flag
    fn set_slot_active(&mut self, index: usize, active: bool);
    /// Spawn button enabled/disabled
    fn set_spawn_enabled(&mut self, enabled: bool);
}

/// Last values written to the sink
#[derive(Debug, Clone, Default)]
pub struct HudSync {
    balance: Option<u64>,
    spawn_enabled: Option<bool>,
    slots: Vec<Option<bool>>,
}

impl HudSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the sink up to date with `state`
    pub fn sync(&mut self, state: &GameState, sink: &mut impl HudSink) {
        if self.balance != Some(state.balance) {
            sink.set_balance_text(&format_money(state.balance));
            self.balance = Some(state.balance);
        }

        let can_spawn = state.can_spawn();
        if self.spawn_enabled != Some(can_spawn) {
            sink.set_spawn_enabled(can_spawn);
            self.spawn_enabled = Some(can_spawn);
        }

        self.slots.resize(state.slots.len(), None);
        for (index, last) in self.slots.iter_mut().enumerate() {
            let active = state.is_slot_active(index);
            if *last != Some(active) {
                sink.set_slot_active(index, active);
                *last = Some(active);
            }
        }
    }
}
