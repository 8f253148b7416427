//! Fleet placement generator.
//!
//! Layouts are built greedily: the fleet is shuffled into a queue, the
//! policy supplies an anchor scan order, and at every anchor the head of
//! the queue is tried in both orientations. Ships that do not fit go to the
//! back of the queue. An attempt that leaves ships unplaced is thrown away
//! and the whole layout is rebuilt, up to a fixed attempt ceiling.

mod policy;

pub use policy::{PlacementPolicy, ScanPass};

use alloc::collections::VecDeque;
use alloc::vec::Vec;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::common::PlacementError;
use crate::config::{GRID_SIZE, MAX_PLACEMENT_ATTEMPTS};
use crate::grid::{Coord, BB};
use crate::ship::{Orientation, Ship};

/// Produces non-overlapping, non-touching fleet layouts in the style of a
/// [`PlacementPolicy`].
pub struct FleetGenerator {
    policy: PlacementPolicy,
    rng: SmallRng,
    max_attempts: usize,
}

impl FleetGenerator {
    pub fn new(policy: PlacementPolicy, rng: SmallRng) -> Self {
        Self {
            policy,
            rng,
            max_attempts: MAX_PLACEMENT_ATTEMPTS,
        }
    }

    /// Generator whose layouts are reproducible from `seed`.
    pub fn seeded(policy: PlacementPolicy, seed: u64) -> Self {
        Self::new(policy, SmallRng::seed_from_u64(seed))
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn policy(&self) -> PlacementPolicy {
        self.policy
    }

    /// Place exactly the ships in `manifest`. Ship ids are manifest indices.
    pub fn generate_placement(&mut self, manifest: &[usize]) -> Result<Vec<Ship>, PlacementError> {
        if manifest.is_empty() {
            return Err(PlacementError::EmptyManifest);
        }
        if let Some(&len) = manifest.iter().find(|&&len| len == 0 || len > GRID_SIZE) {
            return Err(PlacementError::InvalidLength(len));
        }

        for attempt in 1..=self.max_attempts {
            if let Some(ships) = self.attempt(manifest) {
                log::debug!(
                    "{} layout placed {} ships after {} attempt(s)",
                    self.policy.name(),
                    ships.len(),
                    attempt
                );
                return Ok(ships);
            }
        }

        log::warn!(
            "{} layout failed after {} attempts",
            self.policy.name(),
            self.max_attempts
        );
        Err(PlacementError::AttemptsExhausted {
            attempts: self.max_attempts,
        })
    }

    /// Like [`generate_placement`](Self::generate_placement), but falls back
    /// to an unconstrained layout when the policy cannot be satisfied.
    pub fn generate_relaxed(&mut self, manifest: &[usize]) -> Result<Vec<Ship>, PlacementError> {
        match self.generate_placement(manifest) {
            Err(PlacementError::AttemptsExhausted { .. })
                if self.policy != PlacementPolicy::Random =>
            {
                let policy = core::mem::replace(&mut self.policy, PlacementPolicy::Random);
                let result = self.generate_placement(manifest);
                self.policy = policy;
                result
            }
            other => other,
        }
    }

    fn attempt(&mut self, manifest: &[usize]) -> Option<Vec<Ship>> {
        let mut order: Vec<(usize, usize)> = manifest.iter().copied().enumerate().collect();
        order.shuffle(&mut self.rng);
        let mut queue: VecDeque<(usize, usize)> = order.into();

        let mut ships = Vec::with_capacity(manifest.len());
        let mut occupied = BB::new();
        let mut blocked = BB::new();

        for pass in self.policy.scan_passes(&mut self.rng) {
            for &cell in &pass.cells {
                if queue.is_empty() {
                    break;
                }
                if blocked.contains(cell.0, cell.1) {
                    continue;
                }
                for _ in 0..queue.len() {
                    let Some((id, len)) = queue.pop_front() else {
                        break;
                    };
                    if let Some(ship) = self.fit(id, len, cell, &blocked, &pass.allowed) {
                        occupied |= ship.mask();
                        blocked = occupied.spread();
                        ships.push(ship);
                        break;
                    }
                    queue.push_back((id, len));
                }
            }
        }

        queue.is_empty().then_some(ships)
    }

    /// Try both orientations, in random order, for a ship anchored at `cell`.
    fn fit(&mut self, id: usize, len: usize, cell: Coord, blocked: &BB, allowed: &BB) -> Option<Ship> {
        let mut orientations = Orientation::BOTH;
        orientations.shuffle(&mut self.rng);
        orientations.into_iter().find_map(|orientation| {
            let ship = Ship::new(id, len, cell, orientation).ok()?;
            is_legal(&ship, blocked, allowed).then_some(ship)
        })
    }
}

/// A ship fits when none of its cells is occupied or touches an occupied
/// cell (`blocked` is the occupancy spread by one cell) and all of them lie
/// inside `allowed`.
pub fn is_legal(ship: &Ship, blocked: &BB, allowed: &BB) -> bool {
    let mask = ship.mask();
    !mask.intersects(blocked) && mask.is_subset_of(allowed)
}
