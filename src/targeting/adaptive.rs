//! Heatmap targeting with opponent-pattern inference.
//!
//! Shot priority, highest first:
//! 1. the hunt queue;
//! 2. the rubber band: after a long miss streak, a live enemy cell from the
//!    host's [`LiveCellProvider`], if it offers any;
//! 3. an inferred bias: once enough ships are sunk, an opponent who hugs the
//!    border or keeps to one half gets that region searched first, until the
//!    bias has cost a run of misses;
//! 4. the density heatmap, with a flat border bonus during long dry spells.

use alloc::vec::Vec;
use rand::seq::IndexedRandom;

use super::belief::SunkShip;
use super::heatmap::Heatmap;
use super::{record_outcome, EngineState, LiveCellProvider, Outcome, Recorded, Tactic};
use crate::config::TargetingConfig;
use crate::grid::{self, Coord, Side, BB};

/// Region the adaptive tactic currently favours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Bias {
    #[default]
    None,
    /// Outer ring only.
    Edge,
    /// One column half only.
    Half(Side),
}

#[derive(Debug, Clone)]
pub struct AdaptiveTactic {
    config: TargetingConfig,
    bias: Bias,
    bias_misses: usize,
}

impl AdaptiveTactic {
    pub fn new(config: TargetingConfig) -> Self {
        Self {
            config,
            bias: Bias::None,
            bias_misses: 0,
        }
    }

    pub fn bias(&self) -> Bias {
        self.bias
    }

    pub fn config(&self) -> &TargetingConfig {
        &self.config
    }

    /// Work out which region the opponent favours from the hulls sunk so far.
    fn infer(&self, sunk: &[SunkShip]) -> Bias {
        if !self.config.pattern_inference || sunk.len() < self.config.edge_min_sunk.max(1) {
            return Bias::None;
        }
        let on_border = sunk.iter().filter(|ship| ship.on_border()).count();
        if on_border * 100 >= self.config.edge_ratio_percent * sunk.len() {
            return Bias::Edge;
        }
        let side = sunk[0].side();
        match side {
            Some(side) if sunk.iter().all(|ship| ship.side() == Some(side)) => Bias::Half(side),
            _ => Bias::None,
        }
    }

    fn bias_region(&self) -> Option<BB> {
        match self.bias {
            Bias::None => None,
            Bias::Edge => Some(grid::border_mask()),
            Bias::Half(side) => Some(grid::half_mask(side)),
        }
    }

    fn miss_limit(&self) -> usize {
        match self.bias {
            Bias::None => 0,
            Bias::Edge => self.config.edge_miss_limit,
            Bias::Half(_) => self.config.half_miss_limit,
        }
    }

    fn rubber_band(
        &self,
        state: &mut EngineState,
        live: &mut dyn LiveCellProvider,
    ) -> Option<Coord> {
        if !self.config.rubber_band || state.miss_streak() < self.config.rubber_band_streak {
            return None;
        }
        let cells: Vec<Coord> = live
            .live_cells()
            .into_iter()
            .filter(|&(r, c)| grid::in_bounds(r, c) && !state.is_tried((r, c)))
            .collect();
        let pick = cells.choose(state.rng()).copied();
        match pick {
            Some(cell) => log::debug!(
                "rubber band after {} misses picks {:?}",
                state.miss_streak(),
                cell
            ),
            None => log::debug!("rubber band found no live cells"),
        }
        pick
    }
}

/// Highest-weight cell among `candidates`, or any candidate when none
/// carries weight.
fn best_or_any(heat: &Heatmap, candidates: &BB, state: &mut EngineState) -> Option<Coord> {
    heat.pick(candidates, state.rng()).or_else(|| {
        let cells: Vec<Coord> = candidates.iter_set_bits().collect();
        cells.choose(state.rng()).copied()
    })
}

impl Tactic for AdaptiveTactic {
    fn name(&self) -> &'static str {
        "adaptive"
    }

    /// The bias pool holds only open cells of the favoured region. Untried
    /// region cells already proven empty by a wreck are skipped, and the
    /// tactic leaves the region once no open cell is left in it.
    fn compute_next_shot(
        &mut self,
        state: &mut EngineState,
        live: &mut dyn LiveCellProvider,
    ) -> Option<Coord> {
        if let Some(target) = state.next_hunt_target() {
            return Some(target);
        }
        if let Some(cell) = self.rubber_band(state, live) {
            return Some(cell);
        }

        let open = state.open_cells();
        let mut heat = Heatmap::compute(state.belief());
        if state.miss_streak() > self.config.border_bonus_streak {
            heat.boost(&(grid::border_mask() & open), self.config.border_bonus);
        }

        if let Some(region) = self.bias_region() {
            let pool = region & open;
            if !pool.is_empty() {
                return best_or_any(&heat, &pool, state);
            }
        }

        best_or_any(&heat, &open, state)
    }

    fn on_shot_result(&mut self, state: &mut EngineState, coord: Coord, outcome: Outcome) {
        match record_outcome(&*self, state, coord, outcome) {
            Recorded::Miss => {
                if self.bias != Bias::None {
                    self.bias_misses += 1;
                    if self.bias_misses >= self.miss_limit() {
                        log::debug!("{:?} bias dropped after {} misses", self.bias, self.bias_misses);
                        self.bias = Bias::None;
                        self.bias_misses = 0;
                    }
                }
            }
            Recorded::Hit => self.bias_misses = 0,
            Recorded::Sunk(_) => {
                self.bias_misses = 0;
                let bias = self.infer(state.belief().sunk());
                if bias != self.bias {
                    log::debug!("opponent pattern now {:?}", bias);
                }
                self.bias = bias;
            }
        }
    }
}
