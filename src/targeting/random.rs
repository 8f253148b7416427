use alloc::vec::Vec;
use rand::seq::IndexedRandom;

use super::{EngineState, LiveCellProvider, Tactic};
use crate::grid::Coord;

/// Random shots over unknown cells, switching to hunt mode after a hit.
/// Buffer cells around sunk ships are never picked.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomTactic;

impl RandomTactic {
    pub fn new() -> Self {
        Self
    }
}

impl Tactic for RandomTactic {
    fn name(&self) -> &'static str {
        "random"
    }

    fn compute_next_shot(
        &mut self,
        state: &mut EngineState,
        _live: &mut dyn LiveCellProvider,
    ) -> Option<Coord> {
        if let Some(target) = state.next_hunt_target() {
            return Some(target);
        }
        let open: Vec<Coord> = state.open_cells().iter_set_bits().collect();
        open.choose(state.rng()).copied()
    }
}
