//! Defending board: resolves shots against a fleet layout.
//!
//! This is the board-resolution collaborator the targeting engine talks to
//! through plain hit/sunk flags. The engine itself never looks inside it.

use alloc::vec::Vec;
use core::fmt;

use crate::common::{BoardError, ShotOutcome};
use crate::grid::{self, Coord, BB};
use crate::ship::Ship;
use crate::targeting::LiveCellProvider;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PlacedShip {
    ship: Ship,
    mask: BB,
    hits: BB,
}

impl PlacedShip {
    fn is_sunk(&self) -> bool {
        self.hits == self.mask
    }
}

/// Fleet layout plus the shots fired at it.
pub struct Board {
    ships: Vec<PlacedShip>,
    ship_map: BB,
    hits: BB,
    misses: BB,
}

/// Check that `ships` form a legal layout of exactly `manifest`: in bounds,
/// no shared cells, and at least one empty cell between any two ships.
pub fn validate_layout(ships: &[Ship], manifest: &[usize]) -> Result<(), BoardError> {
    let mut lengths: Vec<usize> = ships.iter().map(Ship::length).collect();
    let mut expected: Vec<usize> = manifest.to_vec();
    lengths.sort_unstable();
    expected.sort_unstable();
    if lengths != expected {
        return Err(BoardError::ManifestMismatch);
    }
    check_spacing(ships)
}

fn check_spacing(ships: &[Ship]) -> Result<(), BoardError> {
    for (i, a) in ships.iter().enumerate() {
        // Ship::new guarantees bounds, but callers can hand us anything.
        for (r, c) in a.cells() {
            if !grid::in_bounds(r, c) {
                return Err(BoardError::ShipOutOfBounds);
            }
        }
        let mask = a.mask();
        let zone = mask.spread();
        for b in &ships[i + 1..] {
            let other = b.mask();
            if mask.intersects(&other) {
                return Err(BoardError::ShipOverlaps {
                    first: a.id(),
                    second: b.id(),
                });
            }
            if zone.intersects(&other) {
                return Err(BoardError::ShipsAdjacent {
                    first: a.id(),
                    second: b.id(),
                });
            }
        }
    }
    Ok(())
}

impl Board {
    /// Board holding `ships`, which must not overlap or touch.
    pub fn new(ships: Vec<Ship>) -> Result<Self, BoardError> {
        check_spacing(&ships)?;
        let ships: Vec<PlacedShip> = ships
            .into_iter()
            .map(|ship| PlacedShip {
                ship,
                mask: ship.mask(),
                hits: BB::new(),
            })
            .collect();
        let ship_map = ships.iter().fold(BB::new(), |acc, ps| acc | ps.mask);
        Ok(Board {
            ships,
            ship_map,
            hits: BB::new(),
            misses: BB::new(),
        })
    }

    pub fn ships(&self) -> impl Iterator<Item = &Ship> {
        self.ships.iter().map(|ps| &ps.ship)
    }

    /// Board occupancy mask of all ships.
    pub fn ship_map(&self) -> BB {
        self.ship_map
    }

    pub fn hits(&self) -> BB {
        self.hits
    }

    pub fn misses(&self) -> BB {
        self.misses
    }

    /// Returns `true` when all ships are sunk.
    pub fn all_sunk(&self) -> bool {
        self.ships.iter().all(PlacedShip::is_sunk)
    }

    pub fn ships_afloat(&self) -> usize {
        self.ships.iter().filter(|ps| !ps.is_sunk()).count()
    }

    /// Ship cells that have not been hit yet.
    pub fn live_cells(&self) -> Vec<Coord> {
        (self.ship_map & !self.hits).iter_set_bits().collect()
    }

    /// Process a shot at `coord`, marking hits/misses and reporting result.
    pub fn guess(&mut self, coord: Coord) -> Result<ShotOutcome, BoardError> {
        let (row, col) = coord;
        if !grid::in_bounds(row, col) {
            return Err(BoardError::InvalidCoordinate(coord));
        }
        if self.hits.get(row, col)? || self.misses.get(row, col)? {
            return Err(BoardError::AlreadyGuessed);
        }
        if !self.ship_map.get(row, col)? {
            self.misses.set(row, col)?;
            return Ok(ShotOutcome::Miss);
        }

        self.hits.set(row, col)?;
        let Some(placed) = self.ships.iter_mut().find(|ps| ps.mask.contains(row, col)) else {
            return Err(BoardError::InvalidCoordinate(coord));
        };
        placed.hits.set(row, col)?;
        if !placed.is_sunk() {
            return Ok(ShotOutcome::Hit);
        }

        let ship = placed.ship;
        let buffer: Vec<Coord> = (placed.mask.spread() & !placed.mask)
            .iter_set_bits()
            .collect();
        log::debug!(
            "ship {} (length {}) sunk at ({}, {})",
            ship.id(),
            ship.length(),
            row,
            col
        );
        Ok(ShotOutcome::Sunk {
            ship_id: ship.id(),
            length: ship.length(),
            buffer,
        })
    }
}

impl LiveCellProvider for Board {
    fn live_cells(&mut self) -> Vec<Coord> {
        Board::live_cells(self)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{\n  ship_map: {:?},\n  hits: {:?},\n  misses: {:?},\n  ships: {:?}\n}}",
            self.ship_map, self.hits, self.misses, self.ships
        )
    }
}
