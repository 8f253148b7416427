//! Targeting engine: picks the next cell to fire at from hit/miss/sunk
//! feedback.
//!
//! [`TargetingEngine`] is the shared state machine. It owns the tried set,
//! the belief grid and the hunt queue, and delegates the actual choice of
//! cell to a [`Tactic`]. Whatever the tactic proposes, the engine never
//! fires at the same cell twice and only fails once the whole board has
//! been tried.

mod adaptive;
mod belief;
mod diagonal;
mod heatmap;
mod hunt;
mod random;

pub use adaptive::{AdaptiveTactic, Bias};
pub use belief::{BeliefGrid, CellState, SunkShip};
pub use diagonal::{diagonal_order, DiagonalTactic};
pub use heatmap::Heatmap;
pub use hunt::{follow_up_cells, HuntState};
pub use random::RandomTactic;

use alloc::vec::Vec;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::common::TargetingError;
use crate::config::{TargetingConfig, MAX_SHOT_RETRIES};
use crate::grid::{self, Coord, BB};

/// Source of enemy ship cells that have not been hit yet, for tactics that
/// are allowed to peek. Implementations return a snapshot and must not
/// block; an empty list means nothing is available.
pub trait LiveCellProvider {
    fn live_cells(&mut self) -> Vec<Coord>;
}

/// Provider for hosts that expose nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLiveCells;

impl LiveCellProvider for NoLiveCells {
    fn live_cells(&mut self) -> Vec<Coord> {
        Vec::new()
    }
}

impl<F> LiveCellProvider for F
where
    F: FnMut() -> Vec<Coord>,
{
    fn live_cells(&mut self) -> Vec<Coord> {
        self()
    }
}

/// Result of one shot as reported by the defending side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Miss,
    Hit,
    Sunk,
}

impl Outcome {
    pub fn from_flags(hit: bool, sunk: bool) -> Self {
        match (hit, sunk) {
            (true, true) => Outcome::Sunk,
            (true, false) => Outcome::Hit,
            (false, sunk) => {
                if sunk {
                    log::warn!("sunk reported without a hit, treating as a miss");
                }
                Outcome::Miss
            }
        }
    }
}

/// What the belief grid learned from one outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recorded {
    Miss,
    Hit,
    Sunk(SunkShip),
}

/// State shared by every tactic for the duration of one match.
#[derive(Debug, Clone)]
pub struct EngineState {
    tried: BB,
    belief: BeliefGrid,
    hunt: HuntState,
    rng: SmallRng,
    miss_streak: usize,
    shots: usize,
}

impl EngineState {
    fn new(rng: SmallRng) -> Self {
        Self {
            tried: BB::new(),
            belief: BeliefGrid::new(),
            hunt: HuntState::new(),
            rng,
            miss_streak: 0,
            shots: 0,
        }
    }

    pub fn tried(&self) -> &BB {
        &self.tried
    }

    pub fn is_tried(&self, coord: Coord) -> bool {
        self.tried.contains(coord.0, coord.1)
    }

    pub fn belief(&self) -> &BeliefGrid {
        &self.belief
    }

    pub fn hunt(&self) -> &HuntState {
        &self.hunt
    }

    pub fn rng(&mut self) -> &mut SmallRng {
        &mut self.rng
    }

    /// Consecutive misses since the last hit.
    pub fn miss_streak(&self) -> usize {
        self.miss_streak
    }

    pub fn shots(&self) -> usize {
        self.shots
    }

    /// Cells not fired at and not known to be empty.
    pub fn open_cells(&self) -> BB {
        !self.tried & self.belief.mask_of(CellState::Unknown)
    }

    /// Next valid hunt target, ending the pursuit if none is left.
    pub fn next_hunt_target(&mut self) -> Option<Coord> {
        self.hunt.next_target(&self.tried, &self.belief)
    }

    /// First untried cell in row-major order, preferring unknown cells.
    fn first_untried(&self) -> Option<Coord> {
        self.open_cells()
            .iter_set_bits()
            .next()
            .or_else(|| (!self.tried).iter_set_bits().next())
    }
}

/// A shot-selection strategy plugged into [`TargetingEngine`].
pub trait Tactic {
    fn name(&self) -> &'static str;

    /// Propose the next cell. The engine re-asks if the proposal is off the
    /// board or already tried; `None` hands the choice back to the engine.
    fn compute_next_shot(
        &mut self,
        state: &mut EngineState,
        live: &mut dyn LiveCellProvider,
    ) -> Option<Coord>;

    /// Follow-up cells for the current pursuit.
    fn follow_up(&self, state: &EngineState) -> Vec<Coord> {
        follow_up_cells(state.hunt.hits(), &state.tried, &state.belief)
    }

    /// Update tactic-local state after a shot. The default records the
    /// outcome in the belief grid and hunt queue.
    fn on_shot_result(&mut self, state: &mut EngineState, coord: Coord, outcome: Outcome) {
        record_outcome(&*self, state, coord, outcome);
    }
}

/// Record an outcome in the shared state: belief grid, miss streak, and
/// hunt queue. Tactics overriding [`Tactic::on_shot_result`] call this
/// first.
pub fn record_outcome<T: Tactic + ?Sized>(
    tactic: &T,
    state: &mut EngineState,
    coord: Coord,
    outcome: Outcome,
) -> Recorded {
    let recorded = match outcome {
        Outcome::Miss => {
            state.belief.mark_miss(coord);
            state.miss_streak += 1;
            Recorded::Miss
        }
        Outcome::Hit => {
            state.belief.mark_hit(coord);
            state.miss_streak = 0;
            state.hunt.push_hit(coord);
            let cells = tactic.follow_up(state);
            state.hunt.replace_queue(cells);
            Recorded::Hit
        }
        Outcome::Sunk => {
            state.miss_streak = 0;
            let ship = state.belief.mark_sunk(coord);
            state.hunt.reset();
            log::debug!(
                "{} sunk a ship of length {}, {} left",
                tactic.name(),
                ship.length,
                state.belief.ships_remaining()
            );
            Recorded::Sunk(ship)
        }
    };
    state.hunt.prune(&state.tried, &state.belief);
    recorded
}

/// Which tactic a [`Strategy`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize, clap::ValueEnum))]
#[cfg_attr(feature = "std", serde(rename_all = "kebab-case"))]
pub enum TacticKind {
    Random,
    Diagonal,
    Adaptive,
}

impl TacticKind {
    pub const ALL: [TacticKind; 3] = [TacticKind::Random, TacticKind::Diagonal, TacticKind::Adaptive];
}

/// The built-in tactics behind one type.
#[derive(Debug, Clone)]
pub enum Strategy {
    Random(RandomTactic),
    Diagonal(DiagonalTactic),
    Adaptive(AdaptiveTactic),
}

impl Strategy {
    pub fn new(kind: TacticKind, config: TargetingConfig) -> Self {
        match kind {
            TacticKind::Random => Strategy::Random(RandomTactic::new()),
            TacticKind::Diagonal => Strategy::Diagonal(DiagonalTactic::new(config)),
            TacticKind::Adaptive => Strategy::Adaptive(AdaptiveTactic::new(config)),
        }
    }

    pub fn kind(&self) -> TacticKind {
        match self {
            Strategy::Random(_) => TacticKind::Random,
            Strategy::Diagonal(_) => TacticKind::Diagonal,
            Strategy::Adaptive(_) => TacticKind::Adaptive,
        }
    }
}

impl Tactic for Strategy {
    fn name(&self) -> &'static str {
        match self {
            Strategy::Random(t) => t.name(),
            Strategy::Diagonal(t) => t.name(),
            Strategy::Adaptive(t) => t.name(),
        }
    }

    fn compute_next_shot(
        &mut self,
        state: &mut EngineState,
        live: &mut dyn LiveCellProvider,
    ) -> Option<Coord> {
        match self {
            Strategy::Random(t) => t.compute_next_shot(state, live),
            Strategy::Diagonal(t) => t.compute_next_shot(state, live),
            Strategy::Adaptive(t) => t.compute_next_shot(state, live),
        }
    }

    fn follow_up(&self, state: &EngineState) -> Vec<Coord> {
        match self {
            Strategy::Random(t) => t.follow_up(state),
            Strategy::Diagonal(t) => t.follow_up(state),
            Strategy::Adaptive(t) => t.follow_up(state),
        }
    }

    fn on_shot_result(&mut self, state: &mut EngineState, coord: Coord, outcome: Outcome) {
        match self {
            Strategy::Random(t) => t.on_shot_result(state, coord, outcome),
            Strategy::Diagonal(t) => t.on_shot_result(state, coord, outcome),
            Strategy::Adaptive(t) => t.on_shot_result(state, coord, outcome),
        }
    }
}

/// Per-match targeting state machine.
///
/// Idle until a hit opens a pursuit, hunting while the hunt queue has
/// entries, and back to idle once the ship is reported sunk or the queue
/// runs dry.
#[derive(Debug, Clone)]
pub struct TargetingEngine<T: Tactic = Strategy> {
    tactic: T,
    state: EngineState,
    pending: Option<Coord>,
}

impl TargetingEngine<Strategy> {
    /// Engine running one of the built-in tactics, reproducible from `seed`.
    pub fn with_kind(kind: TacticKind, config: TargetingConfig, seed: u64) -> Self {
        Self::seeded(Strategy::new(kind, config), seed)
    }
}

impl<T: Tactic> TargetingEngine<T> {
    pub fn new(tactic: T, rng: SmallRng) -> Self {
        Self {
            tactic,
            state: EngineState::new(rng),
            pending: None,
        }
    }

    pub fn seeded(tactic: T, seed: u64) -> Self {
        Self::new(tactic, SmallRng::seed_from_u64(seed))
    }

    pub fn name(&self) -> &'static str {
        self.tactic.name()
    }

    pub fn tactic(&self) -> &T {
        &self.tactic
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn belief(&self) -> &BeliefGrid {
        &self.state.belief
    }

    pub fn hunt(&self) -> &HuntState {
        &self.state.hunt
    }

    pub fn is_hunting(&self) -> bool {
        self.state.hunt.is_hunting()
    }

    /// Shot proposed by `next_shot` and still awaiting its result.
    pub fn pending(&self) -> Option<Coord> {
        self.pending
    }

    /// Pick the next cell with no live-cell source available.
    pub fn next_shot(&mut self) -> Result<Coord, TargetingError> {
        self.next_shot_with(&mut NoLiveCells)
    }

    /// Pick the next cell, letting the tactic pull from `live` if it wants.
    ///
    /// Asking again before the result is reported returns the same cell.
    pub fn next_shot_with(
        &mut self,
        live: &mut dyn LiveCellProvider,
    ) -> Result<Coord, TargetingError> {
        if let Some(coord) = self.pending {
            return Ok(coord);
        }

        for _ in 0..MAX_SHOT_RETRIES {
            match self.tactic.compute_next_shot(&mut self.state, live) {
                Some((r, c)) if grid::in_bounds(r, c) && !self.state.tried.contains(r, c) => {
                    self.pending = Some((r, c));
                    return Ok((r, c));
                }
                Some(coord) => {
                    log::debug!("{} proposed unusable cell {:?}", self.tactic.name(), coord);
                }
                None => break,
            }
        }

        let coord = self.state.first_untried().ok_or(TargetingError::BoardExhausted)?;
        log::debug!("{} falling back to first untried cell {:?}", self.tactic.name(), coord);
        self.pending = Some(coord);
        Ok(coord)
    }

    /// Report the result of the shot last returned by `next_shot`.
    pub fn shot_result(&mut self, hit: bool, sunk: bool) -> Result<(), TargetingError> {
        let coord = self.pending.take().ok_or(TargetingError::NoPendingShot)?;
        self.resolve(coord, Outcome::from_flags(hit, sunk));
        Ok(())
    }

    /// Record the result of a shot the host chose itself.
    pub fn observe(&mut self, coord: Coord, hit: bool, sunk: bool) -> Result<(), TargetingError> {
        let (r, c) = coord;
        if !grid::in_bounds(r, c) {
            return Err(TargetingError::OutOfBounds(coord));
        }
        if self.state.tried.contains(r, c) {
            return Err(TargetingError::AlreadyTried(coord));
        }
        self.resolve(coord, Outcome::from_flags(hit, sunk));
        // A pending proposal the new outcome has settled is withdrawn.
        if let Some(p) = self.pending {
            if self.state.is_tried(p) || !self.state.belief.is_unknown(p) {
                self.pending = None;
            }
        }
        Ok(())
    }

    fn resolve(&mut self, coord: Coord, outcome: Outcome) {
        // In-bounds is checked by every caller.
        let _ = self.state.tried.set(coord.0, coord.1);
        self.state.shots += 1;
        self.state.hunt.forget(coord);
        log::debug!(
            "{} shot {} at {:?}: {:?}",
            self.tactic.name(),
            self.state.shots,
            coord,
            outcome
        );
        self.tactic.on_shot_result(&mut self.state, coord, outcome);
    }
}
