//! Error types shared by the board and the agents.

use std::fmt;

use thiserror::Error;

use crate::board::{Coord, Player};

/// Why a move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalMoveReason {
    /// The game already ended
    GameOver,
    /// The acting player is not the one to move
    NotYourTurn,
    /// The cell captures nothing for the acting player (or is occupied/off-board)
    NotLegal,
}

impl fmt::Display for IllegalMoveReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IllegalMoveReason::GameOver => write!(f, "game is over"),
            IllegalMoveReason::NotYourTurn => write!(f, "not this player's turn"),
            IllegalMoveReason::NotLegal => write!(f, "cell captures nothing"),
        }
    }
}

/// Errors raised by the game core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Illegal move for {player} at {coord:?}: {reason}")]
    IllegalMove {
        player: Player,
        coord: Coord,
        reason: IllegalMoveReason,
    },

    #[error("No positional weight table for a {size}x{size} board")]
    Configuration { size: usize },

    #[error("No legal moves available for {player}")]
    NoLegalMoves { player: Player },

    #[error("Invalid board size: {size}")]
    InvalidBoardSize { size: usize },

    #[error("Invalid board: {0}")]
    InvalidBoard(String),
}

/// Convenience Result type for game operations.
pub type Result<T> = std::result::Result<T, GameError>;
