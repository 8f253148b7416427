//! Scan policies: the order in which the generator visits anchor cells and
//! which cells a ship may cover during each pass.

use alloc::vec::Vec;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::grid::{self, Coord, Side, BB};

/// Spatial style of a generated layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize, clap::ValueEnum))]
#[cfg_attr(feature = "std", serde(rename_all = "kebab-case"))]
pub enum PlacementPolicy {
    /// Every cell in random order, no extra constraints.
    #[default]
    Random,
    /// Border ring first, interior afterwards.
    Coastal,
    /// Never put a ship cell on either main diagonal.
    DiagonalAvoidance,
    /// Pack the fleet into one column half, spilling over only when needed.
    HalfField,
}

/// One sweep over the board: anchor cells in visiting order plus the cells
/// a ship placed during this sweep is allowed to cover.
#[derive(Debug, Clone)]
pub struct ScanPass {
    pub cells: Vec<Coord>,
    pub allowed: BB,
}

impl PlacementPolicy {
    pub const ALL: [PlacementPolicy; 4] = [
        PlacementPolicy::Random,
        PlacementPolicy::Coastal,
        PlacementPolicy::DiagonalAvoidance,
        PlacementPolicy::HalfField,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PlacementPolicy::Random => "random",
            PlacementPolicy::Coastal => "coastal",
            PlacementPolicy::DiagonalAvoidance => "diagonal-avoidance",
            PlacementPolicy::HalfField => "half-field",
        }
    }

    /// Build the passes for one placement attempt. Cell order inside each
    /// group is shuffled so every attempt explores a different layout.
    pub fn scan_passes<R: Rng + ?Sized>(self, rng: &mut R) -> Vec<ScanPass> {
        match self {
            PlacementPolicy::Random => {
                let mut cells: Vec<Coord> = grid::all_cells().collect();
                cells.shuffle(rng);
                alloc::vec![ScanPass {
                    cells,
                    allowed: BB::full(),
                }]
            }
            PlacementPolicy::Coastal => {
                let (mut ring, mut interior): (Vec<Coord>, Vec<Coord>) =
                    grid::all_cells().partition(|&c| grid::is_border(c));
                ring.shuffle(rng);
                interior.shuffle(rng);
                ring.extend(interior);
                alloc::vec![ScanPass {
                    cells: ring,
                    allowed: BB::full(),
                }]
            }
            PlacementPolicy::DiagonalAvoidance => {
                let mut cells: Vec<Coord> =
                    grid::all_cells().filter(|&c| !grid::is_diagonal(c)).collect();
                cells.shuffle(rng);
                alloc::vec![ScanPass {
                    cells,
                    allowed: !grid::diagonal_mask(),
                }]
            }
            PlacementPolicy::HalfField => {
                let side = if rng.random() { Side::Left } else { Side::Right };
                let mut half: Vec<Coord> =
                    grid::all_cells().filter(|&(_, c)| side.contains(c)).collect();
                half.shuffle(rng);
                let mut whole: Vec<Coord> = grid::all_cells().collect();
                whole.shuffle(rng);
                alloc::vec![
                    ScanPass {
                        cells: half,
                        allowed: grid::half_mask(side),
                    },
                    ScanPass {
                        cells: whole,
                        allowed: BB::full(),
                    },
                ]
            }
        }
    }

    /// Flattened anchor order for one attempt.
    pub fn scan_cells<R: Rng + ?Sized>(self, rng: &mut R) -> Vec<Coord> {
        self.scan_passes(rng)
            .into_iter()
            .flat_map(|pass| pass.cells)
            .collect()
    }
}
