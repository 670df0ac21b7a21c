//! Game construction and the play loop.

use tracing::info;

use crate::agent::Agent;
use crate::board::{Coord, Player};
use crate::error::Result;
use crate::position::{Position, Status};

/// Outcome of a finished game.
#[derive(Clone, Debug)]
pub struct GameRecord {
    /// Terminal status
    pub status: Status,
    /// Moves in the order they were played
    pub moves: Vec<(Player, Coord)>,
    /// Final disc counts (black, white)
    pub scores: (usize, usize),
}

/// Canonical starting position on the default board.
pub fn new_game() -> Position {
    Position::new()
}

/// Play a full game from the canonical start.
pub fn run_game(black: &mut dyn Agent, white: &mut dyn Agent) -> Result<GameRecord> {
    run_game_from(new_game(), black, white)
}

/// Play `pos` to the end, asking whichever agent owns the turn for each move.
///
/// Every committed move fills one empty cell, so the loop always terminates.
/// Any agent error aborts the game and is returned to the caller.
pub fn run_game_from(
    mut pos: Position,
    black: &mut dyn Agent,
    white: &mut dyn Agent,
) -> Result<GameRecord> {
    let mut moves = Vec::new();
    while pos.is_active() {
        let player = pos.turn();
        let agent: &mut dyn Agent = match player {
            Player::Black => &mut *black,
            Player::White => &mut *white,
        };
        let mv = agent.decide(&mut pos)?;
        moves.push((player, mv));
    }

    let record = GameRecord {
        status: pos.status(),
        moves,
        scores: (pos.score(Player::Black), pos.score(Player::White)),
    };
    info!(
        status = %record.status,
        black = record.scores.0,
        white = record.scores.1,
        moves = record.moves.len(),
        "game finished"
    );
    Ok(record)
}
