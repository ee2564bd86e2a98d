//! Peg field generation
//!
//! Pegs sit on a triangular lattice: every odd row is shifted right by half
//! the column spacing so balls can't fall straight through.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// A fixed circular obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Peg {
    pub pos: Vec2,
}

/// Lattice parameters for the peg field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PegLayout {
    pub rows: u32,
    pub per_row: u32,
    pub spacing_x: f32,
    pub spacing_y: f32,
    pub offset_y: f32,
}

impl PegLayout {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            rows: settings.peg_rows,
            per_row: settings.pegs_per_row,
            spacing_x: settings.peg_spacing_x(),
            spacing_y: settings.peg_spacing_y,
            offset_y: settings.peg_offset_y,
        }
    }
}

/// Generate `rows * per_row` pegs in row-major order
pub fn generate_pegs(layout: &PegLayout) -> Vec<Peg> {
    let mut pegs = Vec::with_capacity((layout.rows * layout.per_row) as usize);
    for row in 0..layout.rows {
        let offset = if row % 2 == 1 {
            layout.spacing_x / 2.0
        } else {
            0.0
        };
        let y = layout.offset_y + layout.spacing_y * row as f32;
        for col in 0..layout.per_row {
            let x = layout.spacing_x * (col + 1) as f32 + offset;
            pegs.push(Peg {
                pos: Vec2::new(x, y),
            });
        }
    }
    pegs
}
