//! Board settings
//!
//! Everything the simulation reads once at startup: board size, peg lattice,
//! ball physics, economy and slot multipliers. Loaded from JSON (missing
//! fields fall back to the defaults) and validated before use.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::ms_to_ticks;

/// Rejected settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("board must have positive width and height (got {width}x{height})")]
    BoardSize { width: f32, height: f32 },

    #[error("peg lattice needs at least one row and one column")]
    EmptyPegField,

    #[error("{name} must be positive (got {value})")]
    NotPositive { name: &'static str, value: f32 },

    #[error("{name} must be a finite number (got {value})")]
    NotFinite { name: &'static str, value: f32 },

    #[error("a ball of radius {ball_radius} does not fit on a board {width} wide")]
    BallDoesNotFit { width: f32, ball_radius: f32 },

    #[error("outer pegs sit {clearance} from a wall, need at least {required}")]
    PegsTooCloseToWall { clearance: f32, required: f32 },

    #[error("ball cost must be greater than zero")]
    ZeroBallCost,

    #[error("at least one score slot is required")]
    NoSlots,

    #[error("slot {index} has invalid multiplier {value}")]
    BadMultiplier { index: usize, value: f64 },
}

/// Board settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Board ===
    pub width: f32,
    pub height: f32,
    /// Distance above the bottom edge where balls settle
    pub floor_margin: f32,

    // === Pegs ===
    pub peg_rows: u32,
    pub pegs_per_row: u32,
    pub peg_spacing_y: f32,
    pub peg_offset_y: f32,
    pub peg_radius: f32,

    // === Ball physics ===
    pub ball_radius: f32,
    pub gravity: f32,
    pub friction: f32,
    pub wall_bounce: f32,

    // === Economy ===
    pub starting_money: u64,
    pub ball_cost: u64,
    pub payout_delay_ms: u32,
    /// Payout multiplier per slot, left to right
    pub slot_multipliers: Vec<f64>,

    /// RNG seed for spawn jitter
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            floor_margin: FLOOR_MARGIN,

            peg_rows: PEG_ROWS,
            pegs_per_row: PEGS_PER_ROW,
            peg_spacing_y: PEG_SPACING_Y,
            peg_offset_y: PEG_OFFSET_Y,
            peg_radius: PEG_RADIUS,

            ball_radius: BALL_RADIUS,
            gravity: GRAVITY,
            friction: PEG_FRICTION,
            wall_bounce: WALL_BOUNCE,

            starting_money: STARTING_MONEY,
            ball_cost: BALL_COST,
            payout_delay_ms: PAYOUT_DELAY_MS,
            slot_multipliers: SLOT_MULTIPLIERS.to_vec(),

            seed: 0,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Same settings on a board of a different size
    pub fn with_board_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Replace the slot multipliers (slot count follows the list length)
    pub fn with_multipliers(mut self, multipliers: Vec<f64>) -> Self {
        self.slot_multipliers = multipliers;
        self
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.width > 0.0 && self.height > 0.0)
            || !self.width.is_finite()
            || !self.height.is_finite()
        {
            return Err(SettingsError::BoardSize {
                width: self.width,
                height: self.height,
            });
        }
        for (name, value) in [
            ("floor_margin", self.floor_margin),
            ("peg_offset_y", self.peg_offset_y),
            ("gravity", self.gravity),
            ("friction", self.friction),
            ("wall_bounce", self.wall_bounce),
        ] {
            if !value.is_finite() {
                return Err(SettingsError::NotFinite { name, value });
            }
        }
        if self.peg_rows == 0 || self.pegs_per_row == 0 {
            return Err(SettingsError::EmptyPegField);
        }
        for (name, value) in [
            ("peg_radius", self.peg_radius),
            ("ball_radius", self.ball_radius),
            ("peg_spacing_y", self.peg_spacing_y),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(SettingsError::NotPositive { name, value });
            }
        }
        if self.width < 2.0 * self.ball_radius {
            return Err(SettingsError::BallDoesNotFit {
                width: self.width,
                ball_radius: self.ball_radius,
            });
        }
        // A peg push-out must never shove a ball through a wall
        let required = self.peg_radius + 2.0 * self.ball_radius;
        let clearance = self.outer_peg_clearance();
        if clearance < required {
            return Err(SettingsError::PegsTooCloseToWall { clearance, required });
        }
        if self.ball_cost == 0 {
            return Err(SettingsError::ZeroBallCost);
        }
        if self.slot_multipliers.is_empty() {
            return Err(SettingsError::NoSlots);
        }
        if let Some((index, &value)) = self
            .slot_multipliers
            .iter()
            .enumerate()
            .find(|(_, m)| !m.is_finite() || **m < 0.0 || **m > MAX_MULTIPLIER)
        {
            return Err(SettingsError::BadMultiplier { index, value });
        }
        Ok(())
    }

    /// Distance from the nearest wall to the outermost peg center
    fn outer_peg_clearance(&self) -> f32 {
        let spacing_x = self.peg_spacing_x();
        let leftmost = spacing_x;
        let mut rightmost = spacing_x * self.pegs_per_row as f32;
        if self.peg_rows > 1 {
            rightmost += spacing_x / 2.0;
        }
        leftmost.min(self.width - rightmost)
    }

    /// Horizontal peg spacing: pegs_per_row pegs spread over the board width
    pub fn peg_spacing_x(&self) -> f32 {
        self.width / (self.pegs_per_row + 1) as f32
    }

    pub fn slot_count(&self) -> usize {
        self.slot_multipliers.len()
    }

    pub fn slot_width(&self) -> f32 {
        self.width / self.slot_count().max(1) as f32
    }

    /// Height a ball's lower edge must pass to settle
    pub fn floor_y(&self) -> f32 {
        self.height - self.floor_margin
    }

    pub fn payout_delay_ticks(&self) -> u64 {
        ms_to_ticks(self.payout_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.slot_count(), 9);
        assert_eq!(settings.payout_delay_ticks(), 48);
        assert!((settings.peg_spacing_x() - 600.0 / 9.0).abs() < 1e-4);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "starting_money": 100, "seed": 7 }"#).unwrap();
        assert_eq!(settings.starting_money, 100);
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.ball_cost, BALL_COST);
        assert_eq!(settings.slot_multipliers, SLOT_MULTIPLIERS.to_vec());
    }

    #[test]
    fn test_malformed_json() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Json(_)));
    }

    #[test]
    fn test_rejects_empty_slots() {
        let err = Settings::from_json(r#"{ "slot_multipliers": [] }"#).unwrap_err();
        assert!(matches!(err, SettingsError::NoSlots));
    }

    #[test]
    fn test_rejects_negative_multiplier() {
        let settings = Settings::default().with_multipliers(vec![1.0, -2.0, 1.0]);
        match settings.validate() {
            Err(SettingsError::BadMultiplier { index, value }) => {
                assert_eq!(index, 1);
                assert_eq!(value, -2.0);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_bad_board() {
        let settings = Settings::default().with_board_size(0.0, 600.0);
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::BoardSize { .. })
        ));

        let settings = Settings {
            ball_radius: 0.0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::NotPositive { name: "ball_radius", .. })
        ));

        let settings = Settings {
            peg_rows: 0,
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(SettingsError::EmptyPegField)));

        let settings = Settings {
            ball_cost: 0,
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(SettingsError::ZeroBallCost)));
    }

    #[test]
    fn test_rejects_huge_multiplier() {
        let settings = Settings::default().with_multipliers(vec![1e30; 9]);
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::BadMultiplier { index: 0, .. })
        ));

        let settings = Settings::default().with_multipliers(vec![1.0, MAX_MULTIPLIER]);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_rejects_board_narrower_than_ball() {
        let settings = Settings::default().with_board_size(15.0, 600.0);
        match settings.validate() {
            Err(SettingsError::BallDoesNotFit { width, ball_radius }) => {
                assert_eq!(width, 15.0);
                assert_eq!(ball_radius, 10.0);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_pegs_hugging_walls() {
        // Offset rows put the last peg 33.3px from the right wall
        let settings = Settings {
            peg_radius: 40.0,
            ..Settings::default()
        };
        match settings.validate() {
            Err(SettingsError::PegsTooCloseToWall { clearance, required }) => {
                assert!((clearance - 600.0 / 18.0).abs() < 1e-3);
                assert_eq!(required, 60.0);
            }
            other => panic!("unexpected result: {:?}", other),
        }

        // A single row has no offset, so the same pegs fit
        let settings = Settings {
            peg_radius: 40.0,
            peg_rows: 1,
            pegs_per_row: 2,
            ..Settings::default()
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_finite_physics() {
        let settings = Settings {
            gravity: f32::NAN,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::NotFinite { name: "gravity", .. })
        ));

        let settings = Settings {
            floor_margin: f32::INFINITY,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::NotFinite { name: "floor_margin", .. })
        ));

        let settings = Settings::default().with_board_size(f32::INFINITY, 600.0);
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::BoardSize { .. })
        ));
    }
}
