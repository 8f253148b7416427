//! What the attacker knows about the enemy board.

use alloc::vec::Vec;

use crate::config::{FLEET, FLEET_SIZE, GRID_SIZE};
use crate::grid::{self, Coord, Side, BB};

/// Knowledge about a single enemy cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Unknown,
    /// Fired at and missed, or proven empty by a neighbouring wreck.
    Miss,
    /// Hit on a ship that has not been confirmed sunk.
    Hit,
    /// Part of a sunk ship.
    Sunk,
}

/// Hull of a ship confirmed sunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SunkShip {
    pub length: usize,
    pub mask: BB,
}

impl SunkShip {
    /// Every cell of the hull sits on the outer ring.
    pub fn on_border(&self) -> bool {
        self.mask.is_subset_of(&grid::border_mask())
    }

    /// The column half holding the whole hull, if it fits in one.
    pub fn side(&self) -> Option<Side> {
        [Side::Left, Side::Right]
            .into_iter()
            .find(|&side| self.mask.is_subset_of(&grid::half_mask(side)))
    }
}

/// Per-match belief grid plus the multiset of ship lengths still afloat.
///
/// `remaining` keeps one slot per fleet ship; a slot drops to zero once a
/// ship of that length is sunk, so the array stays fixed-size.
#[derive(Debug, Clone)]
pub struct BeliefGrid {
    cells: [[CellState; GRID_SIZE]; GRID_SIZE],
    remaining: [usize; FLEET_SIZE],
    sunk: Vec<SunkShip>,
}

impl Default for BeliefGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl BeliefGrid {
    pub fn new() -> Self {
        Self {
            cells: [[CellState::Unknown; GRID_SIZE]; GRID_SIZE],
            remaining: FLEET,
            sunk: Vec::new(),
        }
    }

    /// State of `coord`; off-board cells read as `Miss`.
    pub fn cell(&self, coord: Coord) -> CellState {
        let (r, c) = coord;
        if grid::in_bounds(r, c) {
            self.cells[r][c]
        } else {
            CellState::Miss
        }
    }

    pub fn is_unknown(&self, coord: Coord) -> bool {
        self.cell(coord) == CellState::Unknown
    }

    /// Lengths of enemy ships that have not yet been sunk. Entries are zero
    /// for ships already sunk.
    pub fn remaining(&self) -> &[usize; FLEET_SIZE] {
        &self.remaining
    }

    pub fn ships_remaining(&self) -> usize {
        self.remaining.iter().filter(|&&len| len > 0).count()
    }

    pub fn max_remaining(&self) -> usize {
        self.remaining.iter().copied().max().unwrap_or(0)
    }

    /// Hulls sunk so far, oldest first.
    pub fn sunk(&self) -> &[SunkShip] {
        &self.sunk
    }

    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().flatten().filter(|&&s| s == state).count()
    }

    /// Cells currently in `state`.
    pub fn mask_of(&self, state: CellState) -> BB {
        BB::from_fn(|r, c| self.cells[r][c] == state)
    }

    pub fn mark_miss(&mut self, coord: Coord) {
        self.write(coord, CellState::Miss);
    }

    pub fn mark_hit(&mut self, coord: Coord) {
        self.write(coord, CellState::Hit);
    }

    /// Record the final hit on a ship at `coord`.
    ///
    /// The hull is rebuilt from the run of `Hit` cells through `coord`,
    /// trimmed to a length still afloat. The hull becomes `Sunk`, every
    /// unknown cell around it becomes `Miss`, and its length leaves the
    /// remaining multiset.
    pub fn mark_sunk(&mut self, coord: Coord) -> SunkShip {
        self.mark_hit(coord);

        let horizontal = self.run(coord, (0, 1));
        let vertical = self.run(coord, (1, 0));
        let (start, span, step) = if vertical.1 > horizontal.1 {
            (vertical.0, vertical.1, (1, 0))
        } else {
            (horizontal.0, horizontal.1, (0, 1))
        };

        let length = self.resolve_length(span);
        // Index of `coord` inside the run, then the first window of
        // `length` cells that still covers it.
        let pos = if step.0 == 1 {
            coord.0 - start.0
        } else {
            coord.1 - start.1
        };
        let first = pos.saturating_sub(length - 1).min(span - length);
        let chain = (first..first + length).map(|k| (start.0 + step.0 * k, start.1 + step.1 * k));

        let mut mask = BB::new();
        for (r, c) in chain {
            if mask.set(r, c).is_ok() {
                self.cells[r][c] = CellState::Sunk;
            }
        }
        for (r, c) in (mask.spread() & !mask).iter_set_bits() {
            if self.cells[r][c] == CellState::Unknown {
                self.cells[r][c] = CellState::Miss;
            }
        }

        if let Some(slot) = self.remaining.iter_mut().find(|len| **len == length) {
            *slot = 0;
        }
        let ship = SunkShip { length, mask };
        self.sunk.push(ship);
        ship
    }

    /// Start and length of the contiguous `Hit` run through `coord` along
    /// `step`.
    fn run(&self, coord: Coord, step: (usize, usize)) -> (Coord, usize) {
        let mut start = coord;
        while let Some(prev) = grid::offset(start, -(step.0 as isize), -(step.1 as isize)) {
            if self.cell(prev) != CellState::Hit {
                break;
            }
            start = prev;
        }
        let mut len = 1;
        let mut cur = coord;
        while let Some(next) = grid::offset(cur, step.0 as isize, step.1 as isize) {
            if self.cell(next) != CellState::Hit {
                break;
            }
            cur = next;
            len += 1;
        }
        let before = if step.0 == 1 {
            coord.0 - start.0
        } else {
            coord.1 - start.1
        };
        (start, len + before)
    }

    /// Pick the sunk ship's length from a run of `span` hits: the run itself
    /// when such a ship is afloat, otherwise the longest afloat ship that
    /// fits inside the run.
    fn resolve_length(&self, span: usize) -> usize {
        if self.remaining.contains(&span) {
            return span;
        }
        let fitting = self
            .remaining
            .iter()
            .copied()
            .filter(|&len| len > 0 && len <= span)
            .max();
        match fitting {
            Some(len) => {
                log::warn!("hit run of {} has no matching ship, treating as {}", span, len);
                len
            }
            None => {
                log::warn!("hit run of {} sunk with no fitting ship afloat", span);
                span
            }
        }
    }

    fn write(&mut self, coord: Coord, state: CellState) {
        let (r, c) = coord;
        if grid::in_bounds(r, c) {
            self.cells[r][c] = state;
        }
    }
}
