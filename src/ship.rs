//! Ship geometry on the board.

use crate::common::BoardError;
use crate::config::GRID_SIZE;
use crate::grid::{Coord, BB};

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub const BOTH: [Orientation; 2] = [Orientation::Horizontal, Orientation::Vertical];

    /// Row/column step taken by each successive segment.
    #[inline]
    pub fn step(self) -> (usize, usize) {
        match self {
            Orientation::Horizontal => (0, 1),
            Orientation::Vertical => (1, 0),
        }
    }
}

/// A ship occupying `length` contiguous cells from `anchor` along
/// `orientation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Ship {
    id: usize,
    length: usize,
    anchor: Coord,
    orientation: Orientation,
}

impl Ship {
    /// Place a ship at `anchor` with `orientation`, checking it stays on the
    /// board.
    pub fn new(
        id: usize,
        length: usize,
        anchor: Coord,
        orientation: Orientation,
    ) -> Result<Self, BoardError> {
        if length == 0 || length > GRID_SIZE {
            return Err(BoardError::InvalidLength(length));
        }
        let (row, col) = anchor;
        let (dr, dc) = orientation.step();
        if row + dr * (length - 1) >= GRID_SIZE || col + dc * (length - 1) >= GRID_SIZE {
            return Err(BoardError::ShipOutOfBounds);
        }
        Ok(Ship {
            id,
            length,
            anchor,
            orientation,
        })
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn anchor(&self) -> Coord {
        self.anchor
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Cells covered by the ship, starting at the anchor.
    pub fn cells(&self) -> impl Iterator<Item = Coord> {
        let (row, col) = self.anchor;
        let (dr, dc) = self.orientation.step();
        (0..self.length).map(move |k| (row + dr * k, col + dc * k))
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.cells().any(|c| c == coord)
    }

    /// Occupancy mask of the ship on the board.
    pub fn mask(&self) -> BB {
        BB::from_fn(|r, c| self.contains((r, c)))
    }
}
