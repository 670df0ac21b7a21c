//! One-ply agents: random, greedy by capture count, greedy by position weights.
//!
//! Ties always go to the first candidate in row-major order.

use fastrand::Rng;
use tracing::trace;

use crate::agent::{Agent, candidate_moves};
use crate::board::Coord;
use crate::error::{GameError, Result};
use crate::playout::random_move;
use crate::position::Position;
use crate::weights::{table_for, weighted_score};

/// Plays a uniformly random legal move.
pub struct RandomAgent {
    rng: Rng,
}

impl RandomAgent {
    pub fn new() -> Self {
        Self { rng: Rng::new() }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Rng::with_seed(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        "random"
    }

    fn select_move(&mut self, pos: &Position) -> Result<Coord> {
        random_move(pos, &mut self.rng)
    }
}

/// Plays the move that captures the most discs right now.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyAgent;

impl Agent for GreedyAgent {
    fn name(&self) -> &str {
        "greedy"
    }

    fn select_move(&mut self, pos: &Position) -> Result<Coord> {
        let mut best: Option<(Coord, usize)> = None;
        for (&mv, captured) in candidate_moves(pos)? {
            if best.is_none_or(|(_, n)| captured.len() > n) {
                best = Some((mv, captured.len()));
            }
        }
        let (mv, n) = best.ok_or(GameError::NoLegalMoves { player: pos.turn() })?;
        trace!(?mv, captures = n, "greedy choice");
        Ok(mv)
    }
}

/// Plays the move whose resulting position has the highest weighted score.
///
/// The score is the signed sum over the weight table with Black counting
/// positive, so it is the same number whichever side is moving.
pub struct WeightedGreedyAgent {
    size: usize,
    table: &'static [i32],
}

impl WeightedGreedyAgent {
    /// Fails with `GameError::Configuration` if `size` has no weight table.
    pub fn new(size: usize) -> Result<Self> {
        Ok(Self {
            size,
            table: table_for(size)?,
        })
    }
}

impl Agent for WeightedGreedyAgent {
    fn name(&self) -> &str {
        "weighted"
    }

    fn select_move(&mut self, pos: &Position) -> Result<Coord> {
        if pos.size() != self.size {
            return Err(GameError::Configuration { size: pos.size() });
        }
        let player = pos.turn();
        let mut best: Option<(Coord, i32)> = None;
        for &mv in candidate_moves(pos)?.keys() {
            let mut dup = pos.duplicate();
            dup.apply_move(player, mv)?;
            let score = weighted_score(&dup, self.table);
            if best.is_none_or(|(_, s)| score > s) {
                best = Some((mv, score));
            }
        }
        let (mv, score) = best.ok_or(GameError::NoLegalMoves { player })?;
        trace!(?mv, score, "weighted choice");
        Ok(mv)
    }
}
