//! Static positional weight tables.
//!
//! Corners are worth the most, cells next to corners are penalised. Each table
//! is stored row-major and matches exactly one board size.

use crate::error::{GameError, Result};
use crate::position::Position;

#[rustfmt::skip]
pub const WEIGHTS_4X4: [i32; 16] = [
    100, -25, -25, 100,
    -25, -25, -25, -25,
    -25, -25, -25, -25,
    100, -25, -25, 100,
];

#[rustfmt::skip]
pub const WEIGHTS_6X6: [i32; 36] = [
    100, -25, 10, 10, -25, 100,
    -25, -25,  2,  2, -25, -25,
     10,   2,  5,  5,   2,  10,
     10,   2,  5,  5,   2,  10,
    -25, -25,  2,  2, -25, -25,
    100, -25, 10, 10, -25, 100,
];

#[rustfmt::skip]
pub const WEIGHTS_8X8: [i32; 64] = [
    100, -25, 10, 5, 5, 10, -25, 100,
    -25, -25,  2, 2, 2,  2, -25, -25,
     10,   2,  5, 1, 1,  5,   2,  10,
      5,   2,  1, 2, 2,  1,   2,   5,
      5,   2,  1, 2, 2,  1,   2,   5,
     10,   2,  5, 1, 1,  5,   2,  10,
    -25, -25,  2, 2, 2,  2, -25, -25,
    100, -25, 10, 5, 5, 10, -25, 100,
];

/// Weight table for a `size`x`size` board.
pub fn table_for(size: usize) -> Result<&'static [i32]> {
    match size {
        4 => Ok(&WEIGHTS_4X4),
        6 => Ok(&WEIGHTS_6X6),
        8 => Ok(&WEIGHTS_8X8),
        _ => Err(GameError::Configuration { size }),
    }
}

/// Sum of `sign(owner) * weight` over all cells; Black counts +1, White -1.
pub fn weighted_score(pos: &Position, table: &[i32]) -> i32 {
    let grid = pos.grid();
    grid.coords()
        .zip(table)
        .map(|(coord, &w)| grid.get(coord).map_or(0, |p| p.sign() * w))
        .sum()
}
