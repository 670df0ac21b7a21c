//! Depth-limited minimax search with alpha-beta pruning.
//!
//! Leaves are scored by disc differential from the searching player's point of
//! view. The search recurses on real positions, so a player who has to skip is
//! handled by the position's own turn rule: the same side simply moves again.

use tracing::trace;

use crate::agent::{Agent, candidate_moves};
use crate::board::{Coord, Player};
use crate::error::{GameError, Result};
use crate::position::Position;

/// Best move found at a node (if any) and its value.
pub type Scored = (Option<Coord>, i32);

/// Minimax agent. Searches `size / 2` plies unless a depth is fixed.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlphaBetaAgent {
    depth: Option<usize>,
}

impl AlphaBetaAgent {
    pub fn new() -> Self {
        Self { depth: None }
    }

    pub fn with_depth(depth: usize) -> Self {
        Self { depth: Some(depth) }
    }

    /// Search depth used on `pos`, never less than one ply.
    pub fn depth_for(&self, pos: &Position) -> usize {
        self.depth.unwrap_or(pos.size() / 2).max(1)
    }

    /// Run the search from `pos` for the player to move.
    pub fn search(&self, pos: &Position) -> Result<Scored> {
        candidate_moves(pos)?;
        alpha_beta(pos, self.depth_for(pos), pos.turn(), (None, i32::MIN), (None, i32::MAX))
    }
}

/// Disc differential from `perspective`.
pub fn evaluate(pos: &Position, perspective: Player) -> i32 {
    let diff = pos.score(Player::Black) as i32 - pos.score(Player::White) as i32;
    diff * perspective.sign()
}

/// Alpha-beta search.
///
/// `max_best` carries the maximiser's best so far (alpha) and `min_best` the
/// minimiser's (beta). Candidates are tried in row-major order and only a
/// strictly better value replaces the current best, so the first of several
/// equal moves wins.
pub fn alpha_beta(
    pos: &Position,
    depth: usize,
    perspective: Player,
    mut max_best: Scored,
    mut min_best: Scored,
) -> Result<Scored> {
    if depth == 0 || !pos.is_active() {
        return Ok((None, evaluate(pos, perspective)));
    }

    let player = pos.turn();
    let maximizing = player == perspective;
    for &mv in pos.legal_moves(player).keys() {
        let mut dup = pos.duplicate();
        dup.apply_move(player, mv)?;
        let (_, value) = alpha_beta(&dup, depth - 1, perspective, max_best, min_best)?;
        if maximizing {
            if value > max_best.1 {
                max_best = (Some(mv), value);
            }
        } else if value < min_best.1 {
            min_best = (Some(mv), value);
        }
        if max_best.1 >= min_best.1 {
            trace!(depth, ?mv, alpha = max_best.1, beta = min_best.1, "cutoff");
            break;
        }
    }

    Ok(if maximizing { max_best } else { min_best })
}

impl Agent for AlphaBetaAgent {
    fn name(&self) -> &str {
        "alpha-beta"
    }

    fn select_move(&mut self, pos: &Position) -> Result<Coord> {
        let (mv, value) = self.search(pos)?;
        trace!(?mv, value, depth = self.depth_for(pos), "alpha-beta result");
        // The root always improves on alpha = i32::MIN with its first child
        mv.ok_or(GameError::NoLegalMoves { player: pos.turn() })
    }
}
