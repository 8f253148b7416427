//! Placement-density heatmap over the enemy board.
//!
//! For every ship length still afloat, every horizontal and vertical span
//! that avoids known misses and sunk hulls is counted, and each cell of a
//! feasible span gains the ship's length in weight. Cells covered by many
//! long feasible ships are the most likely to hide a ship segment.

use alloc::vec::Vec;
use core::ops::Index;
use rand::seq::IndexedRandom;
use rand::Rng;

use super::belief::{BeliefGrid, CellState};
use crate::config::GRID_SIZE;
use crate::grid::{Coord, BB};
use crate::ship::Orientation;

static OFF_BOARD: u32 = 0;

/// Integer weight per cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Heatmap {
    weights: [[u32; GRID_SIZE]; GRID_SIZE],
}

impl Heatmap {
    /// Compute the density for the current belief grid.
    pub fn compute(belief: &BeliefGrid) -> Self {
        let mut weights = [[0u32; GRID_SIZE]; GRID_SIZE];

        for &len in belief.remaining().iter() {
            if len == 0 {
                continue;
            }
            // A single cell reads the same both ways; count it once.
            let count = if len == 1 { 1 } else { 2 };
            for &orient in &Orientation::BOTH[..count] {
                let (dr, dc) = orient.step();
                let max_row = GRID_SIZE - dr * (len - 1);
                let max_col = GRID_SIZE - dc * (len - 1);
                for r in 0..max_row {
                    for c in 0..max_col {
                        let feasible = (0..len).all(|k| {
                            !matches!(
                                belief.cell((r + dr * k, c + dc * k)),
                                CellState::Miss | CellState::Sunk
                            )
                        });
                        if !feasible {
                            continue;
                        }
                        for k in 0..len {
                            weights[r + dr * k][c + dc * k] += len as u32;
                        }
                    }
                }
            }
        }

        Heatmap { weights }
    }

    /// Weight of `coord`; off-board cells weigh nothing.
    pub fn weight(&self, coord: Coord) -> u32 {
        self.weights
            .get(coord.0)
            .and_then(|row| row.get(coord.1))
            .copied()
            .unwrap_or(0)
    }

    /// Add `bonus` to every cell in `cells`.
    pub fn boost(&mut self, cells: &BB, bonus: u32) {
        for (r, c) in cells.iter_set_bits() {
            self.weights[r][c] = self.weights[r][c].saturating_add(bonus);
        }
    }

    /// Highest weight among `candidates`.
    pub fn max_over(&self, candidates: &BB) -> Option<u32> {
        candidates.iter_set_bits().map(|c| self.weight(c)).max()
    }

    /// Uniform pick among the candidates tied for the highest weight.
    /// Returns `None` when no candidate carries positive weight.
    pub fn pick<R: Rng + ?Sized>(&self, candidates: &BB, rng: &mut R) -> Option<Coord> {
        let best = self.max_over(candidates).filter(|&w| w > 0)?;
        let tied: Vec<Coord> = candidates
            .iter_set_bits()
            .filter(|&c| self.weight(c) == best)
            .collect();
        tied.choose(rng).copied()
    }

    pub fn rows(&self) -> &[[u32; GRID_SIZE]; GRID_SIZE] {
        &self.weights
    }
}

impl Index<Coord> for Heatmap {
    type Output = u32;

    fn index(&self, coord: Coord) -> &u32 {
        self.weights
            .get(coord.0)
            .and_then(|row| row.get(coord.1))
            .unwrap_or(&OFF_BOARD)
    }
}
