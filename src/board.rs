//! Disc colors, cell grid and the line scanner that decides captures.

use std::fmt;

use crate::constants::DIRECTIONS;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Player {
    Black,
    White,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    /// +1 for Black, -1 for White.
    pub fn sign(self) -> i32 {
        match self {
            Player::Black => 1,
            Player::White => -1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Black => write!(f, "Black"),
            Player::White => write!(f, "White"),
        }
    }
}

/// A cell is either empty or holds one player's disc.
pub type Cell = Option<Player>;

/// (row, column), zero-based from the top-left corner.
pub type Coord = (usize, usize);

/// Square matrix of cells, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn idx(&self, (row, col): Coord) -> usize {
        row * self.size + col
    }

    pub fn in_bounds(&self, (row, col): Coord) -> bool {
        row < self.size && col < self.size
    }

    /// Cell contents, `None` for empty or out-of-bounds cells.
    pub fn get(&self, coord: Coord) -> Cell {
        if !self.in_bounds(coord) {
            return None;
        }
        self.cells[self.idx(coord)]
    }

    pub fn set(&mut self, coord: Coord, cell: Cell) {
        let i = self.idx(coord);
        self.cells[i] = cell;
    }

    /// Number of discs owned by `player`.
    pub fn count(&self, player: Player) -> usize {
        self.cells.iter().filter(|&&c| c == Some(player)).count()
    }

    /// All coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.size).flat_map(move |row| (0..self.size).map(move |col| (row, col)))
    }

    /// Empty coordinates in row-major order.
    pub fn empty_coords(&self) -> impl Iterator<Item = Coord> + '_ {
        self.coords().filter(|&c| self.get(c).is_none())
    }

    fn step(&self, (row, col): Coord, (dr, dc): (isize, isize)) -> Option<Coord> {
        let r = row.checked_add_signed(dr)?;
        let c = col.checked_add_signed(dc)?;
        self.in_bounds((r, c)).then_some((r, c))
    }

    /// Opponent discs captured in one direction from `pos`.
    fn captures_in_direction(&self, pos: Coord, player: Player, dir: (isize, isize)) -> Vec<Coord> {
        let mut line = Vec::new();
        let mut cur = self.step(pos, dir);
        while let Some(c) = cur {
            match self.get(c) {
                None => return Vec::new(),
                Some(p) if p == player => return line,
                Some(_) => line.push(c),
            }
            cur = self.step(c, dir);
        }
        // Ran off the board without closing the line
        Vec::new()
    }

    /// Cells that `player` would capture by placing a disc at `pos`.
    ///
    /// Directions are scanned in [`DIRECTIONS`] order and cells within a
    /// direction run from nearest to farthest. An empty result means `pos`
    /// is not a legal move for `player`.
    pub fn captured_cells(&self, pos: Coord, player: Player) -> Vec<Coord> {
        DIRECTIONS
            .iter()
            .flat_map(|&dir| self.captures_in_direction(pos, player, dir))
            .collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                let ch = match self.get((row, col)) {
                    Some(Player::Black) => 'X',
                    Some(Player::White) => 'O',
                    None => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
