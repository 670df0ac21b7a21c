//! Integration tests for reversi-rust
//!
//! Hand-built positions use `Position::from_rows` with `X` for Black, `O` for
//! White and `.` for empty cells.

use reversi_rust::agent::{Agent, AgentKind, AgentOptions, build_agent};
use reversi_rust::board::{Coord, Player};
use reversi_rust::error::{GameError, IllegalMoveReason};
use reversi_rust::game::{new_game, run_game, run_game_from};
use reversi_rust::greedy::{GreedyAgent, RandomAgent, WeightedGreedyAgent};
use reversi_rust::mcts::{NaiveMctsAgent, UctMctsAgent};
use reversi_rust::minimax::{AlphaBetaAgent, evaluate};
use reversi_rust::position::{Position, Status};

// =============================================================================
// Helper functions
// =============================================================================

fn setpos(rows: &[&str], turn: Player) -> Position {
    Position::from_rows(rows, turn).unwrap_or_else(|e| panic!("bad test position: {e}"))
}

/// Black to move: (3,3) wins however play continues, (0,0) and (1,0) lose.
fn decisive_position() -> Position {
    setpos(&[".OOX", ".OOO", "OOOX", "XOO."], Player::Black)
}

/// Exact minimax value without pruning.
fn minimax_value(pos: &Position, depth: usize, perspective: Player) -> i32 {
    if depth == 0 || !pos.is_active() {
        return evaluate(pos, perspective);
    }
    let player = pos.turn();
    let values: Vec<i32> = pos
        .moves()
        .into_iter()
        .map(|mv| {
            let mut dup = pos.duplicate();
            dup.play(mv).unwrap();
            minimax_value(&dup, depth - 1, perspective)
        })
        .collect();
    if player == perspective {
        *values.iter().max().unwrap()
    } else {
        *values.iter().min().unwrap()
    }
}

// =============================================================================
// Board state
// =============================================================================

#[test]
fn test_opening_moves() {
    let pos = Position::with_size(4).unwrap();
    let moves = pos.legal_moves(Player::Black);
    let keys: Vec<Coord> = moves.keys().copied().collect();
    assert_eq!(keys, vec![(0, 1), (1, 0), (2, 3), (3, 2)]);
    for captured in moves.values() {
        assert_eq!(captured.len(), 1);
    }
    assert_eq!(pos.legal_moves(Player::White).len(), 4);
}

#[test]
fn test_capture_single_flanked_disc() {
    let mut pos = setpos(&["XO..", "....", "....", "...O"], Player::Black);
    let captured = pos.grid().captured_cells((0, 2), Player::Black);
    assert_eq!(captured, vec![(0, 1)]);
    assert_eq!(pos.legal_moves(Player::Black)[&(0, 2)], vec![(0, 1)]);

    pos.apply_move(Player::Black, (0, 2)).unwrap();
    assert_eq!(pos.grid().get((0, 1)), Some(Player::Black));
    assert_eq!(pos.grid().get((3, 3)), Some(Player::White));
    assert_eq!(pos.score(Player::Black), 3);
    assert_eq!(pos.score(Player::White), 1);
}

#[test]
fn test_turn_skip_rule() {
    // Black has no move, so White is to move
    let mut pos = setpos(&["OOX.", "OOOO", "OOOO", "..XO"], Player::White);
    assert!(pos.legal_moves(Player::Black).is_empty());
    assert!(!pos.legal_moves(Player::White).is_empty());
    assert_eq!(pos.turn(), Player::White);

    // Black still cannot move afterwards, so White keeps the turn
    pos.apply_move(Player::White, (0, 3)).unwrap();
    assert!(pos.is_active());
    assert!(pos.legal_moves(Player::Black).is_empty());
    assert_eq!(pos.turn(), Player::White);

    let err = pos.apply_move(Player::Black, (3, 1)).unwrap_err();
    assert!(matches!(
        err,
        GameError::IllegalMove {
            reason: IllegalMoveReason::NotYourTurn,
            ..
        }
    ));

    pos.apply_move(Player::White, (3, 1)).unwrap();
    assert_eq!(pos.status(), Status::WhiteWon);
    assert_eq!(pos.score(Player::White), 15);
}

#[test]
fn test_turn_returns_when_black_can_move() {
    let mut pos = Position::with_size(4).unwrap();
    pos.play((0, 1)).unwrap();
    assert_eq!(pos.turn(), Player::White);
    let white_move = pos.moves()[0];
    pos.play(white_move).unwrap();
    assert!(!pos.legal_moves(Player::Black).is_empty());
    assert_eq!(pos.turn(), Player::Black);
}

#[test]
fn test_duplicate_isolation() {
    let pos = Position::with_size(4).unwrap();
    let grid_before = pos.grid().clone();
    let mut dup = pos.duplicate();
    while dup.is_active() {
        let mv = dup.moves()[0];
        dup.play(mv).unwrap();
    }
    assert_eq!(pos.grid(), &grid_before);
    assert_eq!(pos.turn(), Player::Black);
    assert_eq!(pos.status(), Status::Active);
    assert_eq!(pos.legal_moves(Player::Black).len(), 4);
}

#[test]
fn test_status_matches_legal_moves() {
    let mut pos = Position::with_size(4).unwrap();
    while pos.is_active() {
        let any_moves = !pos.legal_moves(Player::Black).is_empty()
            || !pos.legal_moves(Player::White).is_empty();
        assert!(any_moves);
        let mv = *pos.moves().last().unwrap();
        pos.play(mv).unwrap();
    }
    assert!(pos.legal_moves(Player::Black).is_empty());
    assert!(pos.legal_moves(Player::White).is_empty());
}

// =============================================================================
// Agents
// =============================================================================

#[test]
fn test_alpha_beta_depth_one_maximizes_margin() {
    let pos = setpos(&["....", "O...", "OO..", "X.OX"], Player::Black);
    let mut agent = AlphaBetaAgent::with_depth(1);
    let mv = agent.select_move(&pos).unwrap();

    let best = pos
        .moves()
        .into_iter()
        .max_by_key(|&m| {
            let mut dup = pos.duplicate();
            dup.play(m).unwrap();
            evaluate(&dup, Player::Black)
        })
        .unwrap();
    assert_eq!(mv, best);
    assert_eq!(mv, (0, 0));
}

#[test]
fn test_alpha_beta_matches_minimax() {
    let positions = [
        Position::with_size(4).unwrap(),
        setpos(&["....", "O...", "OO..", "X.OX"], Player::Black),
        setpos(&["OXX.", "XO.X", "O.XX", ".OXO"], Player::Black),
        decisive_position(),
    ];
    for pos in &positions {
        for depth in 1..=4 {
            let (mv, value) = AlphaBetaAgent::with_depth(depth).search(pos).unwrap();
            assert_eq!(value, minimax_value(pos, depth, pos.turn()), "depth {depth}");
            assert!(pos.legal_moves(pos.turn()).contains_key(&mv.unwrap()));
        }
    }
}

#[test]
fn test_alpha_beta_finds_forced_win() {
    let mut agent = AlphaBetaAgent::with_depth(4);
    assert_eq!(agent.select_move(&decisive_position()).unwrap(), (3, 3));
}

#[test]
fn test_uct_convergence() {
    const TRIALS: u64 = 20;
    let pos = decisive_position();
    let hits = (0..TRIALS)
        .filter(|&seed| {
            let mut agent = UctMctsAgent::with_seed(500, seed);
            agent.select_move(&pos).unwrap() == (3, 3)
        })
        .count();
    assert!(hits as f64 / TRIALS as f64 >= 0.9, "only {hits}/{TRIALS} trials found the win");
}

#[test]
fn test_naive_mcts_finds_win() {
    let pos = decisive_position();
    for seed in 0..5 {
        let mut agent = NaiveMctsAgent::with_seed(100, seed);
        assert_eq!(agent.select_move(&pos).unwrap(), (3, 3));
    }
}

#[test]
fn test_weighted_agent_plays_full_game() {
    let mut black = WeightedGreedyAgent::new(6).unwrap();
    let mut white = RandomAgent::with_seed(8);
    let record = run_game_from(Position::with_size(6).unwrap(), &mut black, &mut white).unwrap();
    assert!(record.status.is_terminal());
}

#[test]
fn test_decide_commits_exactly_one_move() {
    let opts = AgentOptions {
        size: 4,
        seed: Some(21),
        playouts: 30,
        iterations: 30,
    };
    for kind in AgentKind::ALL {
        let mut agent = build_agent(kind, &opts).unwrap();
        let mut pos = Position::with_size(4).unwrap();
        let before = pos.score(Player::Black) + pos.score(Player::White);
        agent.decide(&mut pos).unwrap();
        assert_eq!(pos.score(Player::Black) + pos.score(Player::White), before + 1);
        assert_eq!(pos.turn(), Player::White, "{kind}");
    }
}

// =============================================================================
// Full games
// =============================================================================

#[test]
fn test_random_vs_random_terminates() {
    for seed in 0..50 {
        let mut black = RandomAgent::with_seed(seed);
        let mut white = RandomAgent::with_seed(seed + 1);
        let record = run_game(&mut black, &mut white).unwrap();
        assert!(matches!(
            record.status,
            Status::Draw | Status::BlackWon | Status::WhiteWon
        ));
    }
}

#[test]
fn test_every_pairing_finishes() {
    let opts = AgentOptions {
        size: 4,
        seed: Some(3),
        playouts: 20,
        iterations: 20,
    };
    for black in AgentKind::ALL {
        for white in AgentKind::ALL {
            let mut b = build_agent(black, &opts).unwrap();
            let mut w = build_agent(white, &opts).unwrap();
            let pos = Position::with_size(4).unwrap();
            let record = run_game_from(pos, b.as_mut(), w.as_mut()).unwrap();
            assert!(record.status.is_terminal(), "{black} vs {white}");
            let (bs, ws) = record.scores;
            match record.status {
                Status::BlackWon => assert!(bs > ws),
                Status::WhiteWon => assert!(ws > bs),
                Status::Draw => assert_eq!(bs, ws),
                Status::Active => unreachable!(),
            }
        }
    }
}

#[test]
fn test_uct_beats_random_most_of_the_time() {
    let mut wins = 0;
    for seed in 0..10 {
        let mut uct = UctMctsAgent::with_seed(200, seed);
        let mut random = RandomAgent::with_seed(seed + 100);
        let record =
            run_game_from(Position::with_size(4).unwrap(), &mut uct, &mut random).unwrap();
        if record.status == Status::BlackWon {
            wins += 1;
        }
    }
    assert!(wins >= 5, "UCT won only {wins}/10 games as Black");
}

#[test]
fn test_new_game_uses_default_size() {
    let pos = new_game();
    assert_eq!(pos.size(), reversi_rust::constants::N);
    assert_eq!(pos.status(), Status::Active);
    assert_eq!(GreedyAgent.name(), "greedy");
}
