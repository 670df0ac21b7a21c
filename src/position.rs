//! Reversi position: grid, side to move, scores, legal moves and game status.
//!
//! A `Position` only moves forward through [`Position::apply_move`]. Search
//! code explores hypothetical futures on clones, never on the live game.
//!
//! Derived state (scores, legal-move sets, status) is recomputed in full after
//! every committed move, so it always agrees with the grid.

use std::collections::BTreeMap;
use std::fmt;

use crate::board::{Coord, Grid, Player};
use crate::constants::{MIN_BOARD_SIZE, N};
use crate::error::{GameError, IllegalMoveReason, Result};

/// Legal moves for one player: playable cell -> cells it would capture.
///
/// Keys iterate in row-major order, which is the enumeration order every
/// agent uses for tie-breaking.
pub type LegalMoves = BTreeMap<Coord, Vec<Coord>>;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Active,
    Draw,
    BlackWon,
    WhiteWon,
}

impl Status {
    pub fn is_terminal(self) -> bool {
        self != Status::Active
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            Status::BlackWon => Some(Player::Black),
            Status::WhiteWon => Some(Player::White),
            Status::Active | Status::Draw => None,
        }
    }

    /// Game result from `perspective`: +1 win, -1 loss, 0 draw or unfinished.
    pub fn value_for(self, perspective: Player) -> i32 {
        match self.winner() {
            Some(p) if p == perspective => 1,
            Some(_) => -1,
            None => 0,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Active => write!(f, "in progress"),
            Status::Draw => write!(f, "draw"),
            Status::BlackWon => write!(f, "Black wins"),
            Status::WhiteWon => write!(f, "White wins"),
        }
    }
}

/// A Reversi position (board state).
#[derive(Clone, Debug)]
pub struct Position {
    grid: Grid,
    turn: Player,
    status: Status,
    black_score: usize,
    white_score: usize,
    black_moves: LegalMoves,
    white_moves: LegalMoves,
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl Position {
    /// Canonical starting position on the default `N`x`N` board.
    pub fn new() -> Self {
        Self::starting(N)
    }

    /// Canonical starting position on a `size`x`size` board.
    pub fn with_size(size: usize) -> Result<Self> {
        if size < MIN_BOARD_SIZE {
            return Err(GameError::InvalidBoardSize { size });
        }
        Ok(Self::starting(size))
    }

    fn starting(size: usize) -> Self {
        let mut grid = Grid::new(size);
        let mid = size / 2;
        grid.set((mid, mid - 1), Some(Player::Black));
        grid.set((mid - 1, mid), Some(Player::Black));
        grid.set((mid - 1, mid - 1), Some(Player::White));
        grid.set((mid, mid), Some(Player::White));
        Self::from_grid(grid, Player::Black)
    }

    /// Build a position from text rows: `X` black, `O` white, `.` empty.
    ///
    /// If `turn` has no legal move while the game is still active, the turn
    /// passes to the opponent.
    pub fn from_rows(rows: &[&str], turn: Player) -> Result<Self> {
        let size = rows.len();
        if size < MIN_BOARD_SIZE {
            return Err(GameError::InvalidBoardSize { size });
        }
        let mut grid = Grid::new(size);
        for (row, line) in rows.iter().enumerate() {
            let cells: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if cells.len() != size {
                return Err(GameError::InvalidBoard(format!(
                    "row {row} has {} cells, expected {size}",
                    cells.len()
                )));
            }
            for (col, ch) in cells.into_iter().enumerate() {
                let cell = match ch {
                    'X' | 'x' => Some(Player::Black),
                    'O' | 'o' => Some(Player::White),
                    '.' => None,
                    other => {
                        return Err(GameError::InvalidBoard(format!(
                            "unexpected '{other}' at ({row}, {col})"
                        )));
                    }
                };
                grid.set((row, col), cell);
            }
        }
        Ok(Self::from_grid(grid, turn))
    }

    fn from_grid(grid: Grid, turn: Player) -> Self {
        let mut pos = Position {
            grid,
            turn,
            status: Status::Active,
            black_score: 0,
            white_score: 0,
            black_moves: LegalMoves::new(),
            white_moves: LegalMoves::new(),
        };
        pos.update_state();
        if pos.status == Status::Active && pos.legal_moves(turn).is_empty() {
            pos.turn = turn.opponent();
        }
        pos
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn size(&self) -> usize {
        self.grid.size()
    }

    /// Player to move. Meaningless once the game is over.
    pub fn turn(&self) -> Player {
        self.turn
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == Status::Active
    }

    pub fn winner(&self) -> Option<Player> {
        self.status.winner()
    }

    pub fn score(&self, player: Player) -> usize {
        match player {
            Player::Black => self.black_score,
            Player::White => self.white_score,
        }
    }

    /// Cached legal moves for `player`, recomputed after every committed move.
    pub fn legal_moves(&self, player: Player) -> &LegalMoves {
        match player {
            Player::Black => &self.black_moves,
            Player::White => &self.white_moves,
        }
    }

    /// Legal moves for the player to move, in row-major order.
    pub fn moves(&self) -> Vec<Coord> {
        self.legal_moves(self.turn).keys().copied().collect()
    }

    /// Full independent copy for exploring hypothetical moves.
    pub fn duplicate(&self) -> Self {
        self.clone()
    }

    /// Place a disc for `player` at `coord` and flip the captured discs.
    ///
    /// Afterwards the turn passes to the opponent only if the opponent has a
    /// legal move; otherwise the mover keeps the turn.
    pub fn apply_move(&mut self, player: Player, coord: Coord) -> Result<()> {
        let illegal = |reason| GameError::IllegalMove {
            player,
            coord,
            reason,
        };
        if self.status != Status::Active {
            return Err(illegal(IllegalMoveReason::GameOver));
        }
        if player != self.turn {
            return Err(illegal(IllegalMoveReason::NotYourTurn));
        }
        let captured = self
            .legal_moves(player)
            .get(&coord)
            .cloned()
            .ok_or_else(|| illegal(IllegalMoveReason::NotLegal))?;

        self.grid.set(coord, Some(player));
        for c in captured {
            self.grid.set(c, Some(player));
        }

        self.update_state();
        if self.status == Status::Active && !self.legal_moves(player.opponent()).is_empty() {
            self.turn = player.opponent();
        }
        Ok(())
    }

    /// Apply a move for the player whose turn it is.
    pub fn play(&mut self, coord: Coord) -> Result<()> {
        self.apply_move(self.turn, coord)
    }

    /// Recompute scores, legal-move sets and status from the grid.
    fn update_state(&mut self) {
        self.black_score = self.grid.count(Player::Black);
        self.white_score = self.grid.count(Player::White);

        self.black_moves.clear();
        self.white_moves.clear();
        for coord in self.grid.empty_coords() {
            for player in [Player::Black, Player::White] {
                let captured = self.grid.captured_cells(coord, player);
                if !captured.is_empty() {
                    match player {
                        Player::Black => self.black_moves.insert(coord, captured),
                        Player::White => self.white_moves.insert(coord, captured),
                    };
                }
            }
        }

        self.status = if !self.black_moves.is_empty() || !self.white_moves.is_empty() {
            Status::Active
        } else if self.black_score == self.white_score {
            Status::Draw
        } else if self.black_score > self.white_score {
            Status::BlackWon
        } else {
            Status::WhiteWon
        };
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.grid)?;
        write!(
            f,
            "Black {} - White {}",
            self.black_score, self.white_score
        )?;
        if self.is_active() {
            write!(f, " ({} to move)", self.turn)
        } else {
            write!(f, " ({})", self.status)
        }
    }
}
