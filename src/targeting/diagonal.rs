use alloc::vec::Vec;

use super::heatmap::Heatmap;
use super::{EngineState, LiveCellProvider, Tactic};
use crate::config::{TargetingConfig, GRID_SIZE};
use crate::grid::Coord;

/// Both main diagonals, walked from the centre outwards.
pub fn diagonal_order() -> Vec<Coord> {
    let mid = GRID_SIZE / 2;
    let mut order = Vec::with_capacity(GRID_SIZE * 2);
    for d in 0..mid {
        for i in [mid - 1 - d, mid + d] {
            order.push((i, i));
            if i != GRID_SIZE - 1 - i {
                order.push((i, GRID_SIZE - 1 - i));
            }
        }
    }
    order
}

/// Sweeps the two diagonals before switching to the density heatmap.
///
/// The sweep is abandoned for good once the miss streak reaches
/// `diagonal_streak_factor` times the longest ship still afloat, so the
/// patience shrinks as the big ships go down.
#[derive(Debug, Clone)]
pub struct DiagonalTactic {
    config: TargetingConfig,
    order: Vec<Coord>,
    cursor: usize,
    heatmap_mode: bool,
}

impl DiagonalTactic {
    pub fn new(config: TargetingConfig) -> Self {
        Self {
            config,
            order: diagonal_order(),
            cursor: 0,
            heatmap_mode: false,
        }
    }

    /// `true` once the diagonal sweep has been abandoned.
    pub fn in_heatmap_mode(&self) -> bool {
        self.heatmap_mode
    }

    fn patience(&self, state: &EngineState) -> usize {
        self.config.diagonal_streak_factor * state.belief().max_remaining().max(1)
    }

    fn next_diagonal(&mut self, state: &EngineState) -> Option<Coord> {
        let open = state.open_cells();
        while let Some(&(r, c)) = self.order.get(self.cursor) {
            if open.contains(r, c) {
                return Some((r, c));
            }
            self.cursor += 1;
        }
        None
    }
}

impl Tactic for DiagonalTactic {
    fn name(&self) -> &'static str {
        "diagonal"
    }

    fn compute_next_shot(
        &mut self,
        state: &mut EngineState,
        _live: &mut dyn LiveCellProvider,
    ) -> Option<Coord> {
        if let Some(target) = state.next_hunt_target() {
            return Some(target);
        }

        if !self.heatmap_mode {
            if state.miss_streak() >= self.patience(state) {
                log::debug!(
                    "diagonal sweep abandoned after {} misses",
                    state.miss_streak()
                );
                self.heatmap_mode = true;
            } else if let Some(cell) = self.next_diagonal(state) {
                return Some(cell);
            } else {
                log::debug!("diagonal sweep finished");
                self.heatmap_mode = true;
            }
        }

        let open = state.open_cells();
        Heatmap::compute(state.belief()).pick(&open, state.rng())
    }
}
