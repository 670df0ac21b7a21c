//! Monte Carlo playouts (random game simulation).
//!
//! A playout plays uniformly random legal moves for both sides until the game
//! ends. Both Monte Carlo agents use these helpers on duplicated positions.

use fastrand::Rng;

use crate::board::{Coord, Player};
use crate::error::{GameError, Result};
use crate::position::{Position, Status};

/// Pick a uniformly random legal move for the player to move.
pub fn random_move(pos: &Position, rng: &mut Rng) -> Result<Coord> {
    let moves = pos.legal_moves(pos.turn());
    if !pos.is_active() || moves.is_empty() {
        return Err(GameError::NoLegalMoves { player: pos.turn() });
    }
    let i = rng.usize(..moves.len());
    moves
        .keys()
        .nth(i)
        .copied()
        .ok_or(GameError::NoLegalMoves { player: pos.turn() })
}

/// Play random moves on `pos` until the game ends.
///
/// Returns the first move played (if any) and the terminal status.
pub fn mcplayout(pos: &mut Position, rng: &mut Rng) -> Result<(Option<Coord>, Status)> {
    let mut first_move = None;
    while pos.is_active() {
        let mv = random_move(pos, rng)?;
        pos.play(mv)?;
        first_move.get_or_insert(mv);
    }
    Ok((first_move, pos.status()))
}

/// Play a random game from a copy of `pos` and score it for `perspective`.
///
/// Returns +1 if `perspective` wins, -1 if it loses and 0 for a draw.
pub fn rollout_value(pos: &Position, perspective: Player, rng: &mut Rng) -> Result<i32> {
    let mut sim = pos.duplicate();
    let (_, status) = mcplayout(&mut sim, rng)?;
    Ok(status.value_for(perspective))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_move_is_legal() {
        let pos = Position::with_size(4).unwrap();
        let mut rng = Rng::with_seed(7);
        for _ in 0..50 {
            let mv = random_move(&pos, &mut rng).unwrap();
            assert!(pos.legal_moves(Player::Black).contains_key(&mv));
        }
    }

    #[test]
    fn test_random_move_covers_all_moves() {
        let pos = Position::with_size(4).unwrap();
        let mut rng = Rng::with_seed(11);
        let mut seen = std::collections::BTreeSet::new();
        for _ in 0..200 {
            seen.insert(random_move(&pos, &mut rng).unwrap());
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_random_move_on_finished_game() {
        let pos = Position::from_rows(&["XXXX", "XXXX", "OOOO", "OOOO"], Player::Black).unwrap();
        assert!(matches!(
            random_move(&pos, &mut Rng::with_seed(1)),
            Err(GameError::NoLegalMoves { .. })
        ));
    }

    #[test]
    fn test_playout_reaches_terminal() {
        let mut rng = Rng::with_seed(3);
        for _ in 0..20 {
            let mut pos = Position::with_size(4).unwrap();
            let (first, status) = mcplayout(&mut pos, &mut rng).unwrap();
            assert!(status.is_terminal());
            assert!(first.is_some());
            assert_eq!(pos.status(), status);
        }
    }

    #[test]
    fn test_playout_from_terminal_position() {
        let mut pos = Position::from_rows(&["XXXX", "XXXX", "XXXX", "XXXO"], Player::Black).unwrap();
        let (first, status) = mcplayout(&mut pos, &mut Rng::with_seed(5)).unwrap();
        assert_eq!(first, None);
        assert_eq!(status, Status::BlackWon);
    }

    #[test]
    fn test_rollout_value_leaves_position_untouched() {
        let pos = Position::with_size(4).unwrap();
        let value = rollout_value(&pos, Player::Black, &mut Rng::with_seed(9)).unwrap();
        assert!((-1..=1).contains(&value));
        assert_eq!(pos.score(Player::Black), 2);
        assert!(pos.is_active());
    }

    #[test]
    fn test_seeded_playouts_repeat() {
        let run = |seed| {
            let mut pos = Position::with_size(4).unwrap();
            mcplayout(&mut pos, &mut Rng::with_seed(seed)).unwrap()
        };
        assert_eq!(run(42), run(42));
    }
}
