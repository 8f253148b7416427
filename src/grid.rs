//! Coordinates and fixed cell masks of the 10×10 board.

use crate::bitboard::BitBoard;
use crate::config::GRID_SIZE;

/// Bitboard sized for the game board.
pub type BB = BitBoard<u128, GRID_SIZE>;

/// A board cell as `(row, col)`, both in `0..GRID_SIZE`.
pub type Coord = (usize, usize);

const ORTHOGONAL: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const SURROUNDING: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Which half of the board (by column) a cell or ship sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    /// Columns `0..5`.
    Left,
    /// Columns `5..10`.
    Right,
}

impl Side {
    pub fn contains(self, col: usize) -> bool {
        match self {
            Side::Left => col < GRID_SIZE / 2,
            Side::Right => col >= GRID_SIZE / 2 && col < GRID_SIZE,
        }
    }
}

/// Offset `coord` by `(dr, dc)`, discarding results that leave the board.
#[inline]
pub fn offset(coord: Coord, dr: isize, dc: isize) -> Option<Coord> {
    let r = coord.0.checked_add_signed(dr)?;
    let c = coord.1.checked_add_signed(dc)?;
    in_bounds(r, c).then_some((r, c))
}

#[inline]
pub fn in_bounds(row: usize, col: usize) -> bool {
    row < GRID_SIZE && col < GRID_SIZE
}

/// The up to four orthogonal neighbours of `coord`.
pub fn neighbors4(coord: Coord) -> impl Iterator<Item = Coord> {
    ORTHOGONAL
        .into_iter()
        .filter_map(move |(dr, dc)| offset(coord, dr, dc))
}

/// The up to eight surrounding cells of `coord`.
pub fn neighbors8(coord: Coord) -> impl Iterator<Item = Coord> {
    SURROUNDING
        .into_iter()
        .filter_map(move |(dr, dc)| offset(coord, dr, dc))
}

/// All cells in row-major order.
pub fn all_cells() -> impl Iterator<Item = Coord> {
    (0..GRID_SIZE).flat_map(|r| (0..GRID_SIZE).map(move |c| (r, c)))
}

#[inline]
pub fn is_border(coord: Coord) -> bool {
    coord.0 == 0 || coord.1 == 0 || coord.0 == GRID_SIZE - 1 || coord.1 == GRID_SIZE - 1
}

/// `true` if `coord` lies on either main diagonal.
#[inline]
pub fn is_diagonal(coord: Coord) -> bool {
    coord.0 == coord.1 || coord.0 + coord.1 == GRID_SIZE - 1
}

/// The outer ring: rows 0 and 9, columns 0 and 9.
pub fn border_mask() -> BB {
    BB::from_fn(|r, c| is_border((r, c)))
}

pub fn diagonal_mask() -> BB {
    BB::from_fn(|r, c| is_diagonal((r, c)))
}

pub fn half_mask(side: Side) -> BB {
    BB::from_fn(|_, c| side.contains(c))
}
