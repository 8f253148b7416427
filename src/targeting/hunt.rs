//! Hunt mode: follow-up shots around a ship that has been hit but not sunk.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use super::belief::BeliefGrid;
use crate::grid::{self, Coord, BB};

/// Pending follow-up cells and the live hits of the ship being pursued.
#[derive(Debug, Clone, Default)]
pub struct HuntState {
    queue: VecDeque<Coord>,
    hits: Vec<Coord>,
}

impl HuntState {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` while a ship is being pursued.
    pub fn is_hunting(&self) -> bool {
        !self.queue.is_empty()
    }

    pub fn queue(&self) -> &VecDeque<Coord> {
        &self.queue
    }

    pub fn hits(&self) -> &[Coord] {
        &self.hits
    }

    pub fn push_hit(&mut self, coord: Coord) {
        if !self.hits.contains(&coord) {
            self.hits.push(coord);
        }
    }

    pub fn replace_queue<I: IntoIterator<Item = Coord>>(&mut self, cells: I) {
        self.queue.clear();
        for cell in cells {
            if !self.queue.contains(&cell) {
                self.queue.push_back(cell);
            }
        }
    }

    /// Drop `coord` from the queue once it has been fired at.
    pub fn forget(&mut self, coord: Coord) {
        self.queue.retain(|&c| c != coord);
    }

    /// Drop queued cells that have since become known.
    pub fn prune(&mut self, tried: &BB, belief: &BeliefGrid) {
        self.queue
            .retain(|&(r, c)| !tried.contains(r, c) && belief.is_unknown((r, c)));
    }

    /// Next still-valid queued cell. An exhausted queue ends the pursuit.
    pub fn next_target(&mut self, tried: &BB, belief: &BeliefGrid) -> Option<Coord> {
        while let Some(&(r, c)) = self.queue.front() {
            if !tried.contains(r, c) && belief.is_unknown((r, c)) {
                return Some((r, c));
            }
            self.queue.pop_front();
        }
        if !self.hits.is_empty() {
            log::debug!("hunt queue exhausted with {} live hit(s)", self.hits.len());
            self.hits.clear();
        }
        None
    }

    pub fn reset(&mut self) {
        self.queue.clear();
        self.hits.clear();
    }
}

/// Default follow-up cells for a pursuit.
///
/// One hit yields its orthogonal neighbours. Two or more hits on one row or
/// column yield the two cells just beyond the ends of that line. Hits that
/// do not line up fall back to the neighbours of the latest hit. Only
/// on-board, untried, unknown cells are returned.
pub fn follow_up_cells(hits: &[Coord], tried: &BB, belief: &BeliefGrid) -> Vec<Coord> {
    let open = |&(r, c): &Coord| !tried.contains(r, c) && belief.is_unknown((r, c));

    let Some(&last) = hits.last() else {
        return Vec::new();
    };
    if hits.len() == 1 {
        return grid::neighbors4(last).filter(open).collect();
    }

    let same_row = hits.iter().all(|&(r, _)| r == last.0);
    let same_col = hits.iter().all(|&(_, c)| c == last.1);
    let ends = if same_row {
        let lo = hits.iter().map(|&(_, c)| c).min().unwrap_or(last.1);
        let hi = hits.iter().map(|&(_, c)| c).max().unwrap_or(last.1);
        [grid::offset((last.0, lo), 0, -1), grid::offset((last.0, hi), 0, 1)]
    } else if same_col {
        let lo = hits.iter().map(|&(r, _)| r).min().unwrap_or(last.0);
        let hi = hits.iter().map(|&(r, _)| r).max().unwrap_or(last.0);
        [grid::offset((lo, last.1), -1, 0), grid::offset((hi, last.1), 1, 0)]
    } else {
        log::warn!("hunt hits {:?} are not in line, probing around {:?}", hits, last);
        return grid::neighbors4(last).filter(open).collect();
    };

    ends.into_iter().flatten().filter(open).collect()
}
