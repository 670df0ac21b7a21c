//! Constants for board dimensions and search parameters.
//!
//! # Board Size Configuration
//!
//! The default board size is controlled by Cargo features:
//! - `board4x4` (default): 4x4 board
//! - `board6x6`: 6x6 board
//! - `board8x8`: 8x8 board
//!
//! To compile for a specific board size:
//! ```sh
//! cargo build                                             # 4x4 (default)
//! cargo build --no-default-features --features board8x8   # 8x8
//! ```
//!
//! Other sizes can still be built at runtime with `Position::with_size`.

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board size (NxN).
#[cfg(feature = "board4x4")]
pub const N: usize = 4;

#[cfg(feature = "board6x6")]
pub const N: usize = 6;

#[cfg(feature = "board8x8")]
pub const N: usize = 8;

#[cfg(any(
    all(feature = "board4x4", feature = "board6x6"),
    all(feature = "board4x4", feature = "board8x8"),
    all(feature = "board6x6", feature = "board8x8"),
))]
compile_error!("Enable only one of 'board4x4', 'board6x6' or 'board8x8'");

#[cfg(not(any(feature = "board4x4", feature = "board6x6", feature = "board8x8")))]
compile_error!("Must enable exactly one board size feature: 'board4x4', 'board6x6' or 'board8x8'");

/// Smallest board that fits the four starting discs with room to move.
pub const MIN_BOARD_SIZE: usize = 4;

/// Line directions as (row delta, column delta).
/// Order: up-left, up, up-right, left, right, down-left, down, down-right
pub const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

// =============================================================================
// Search Parameters
// =============================================================================

/// Random playouts per decision for the flat Monte Carlo agent.
pub const NAIVE_PLAYOUTS: usize = 100;

/// Tree iterations per decision for the UCT agent.
pub const UCT_ITERATIONS: usize = 100;

/// UCB1 exploration constant.
pub const UCT_EXPLORATION: f64 = std::f64::consts::SQRT_2;
