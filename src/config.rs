pub const BOARD_SIZE: u8 = 10;
pub const GRID_SIZE: usize = BOARD_SIZE as usize;

/// Ship lengths making up one fleet.
pub const FLEET_SIZE: usize = 10;
pub const FLEET: [usize; FLEET_SIZE] = [4, 3, 3, 2, 2, 2, 1, 1, 1, 1];

/// Total number of ship segments used in the standard fleet.
pub const TOTAL_SHIP_CELLS: usize = 4 + 3 * 2 + 2 * 3 + 4;

/// Greedy placement attempts before the generator gives up.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 1000;

/// Tactic proposals the targeting engine will reject before scanning for
/// the first untried cell itself.
pub const MAX_SHOT_RETRIES: usize = 100;

/// Display name for a ship of the given length.
pub fn ship_class(length: usize) -> &'static str {
    match length {
        4 => "Battleship",
        3 => "Cruiser",
        2 => "Destroyer",
        1 => "Patrol boat",
        _ => "Unknown",
    }
}

/// Tunables for the adaptive and diagonal tactics.
///
/// The pattern inference and rubber-band behaviours are difficulty knobs
/// rather than core targeting; both can be switched off independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(default))]
pub struct TargetingConfig {
    /// Infer edge or half-board preferences from the ships sunk so far.
    pub pattern_inference: bool,
    /// Sample a known live enemy cell after a long miss streak.
    pub rubber_band: bool,
    /// Consecutive misses before the rubber band kicks in.
    pub rubber_band_streak: usize,
    /// Sunk ships needed before any pattern is inferred.
    pub edge_min_sunk: usize,
    /// Share of sunk ships (percent) on the border ring that triggers edge bias.
    pub edge_ratio_percent: usize,
    /// Consecutive misses tolerated in edge-biased mode.
    pub edge_miss_limit: usize,
    /// Consecutive misses tolerated in half-biased mode.
    pub half_miss_limit: usize,
    /// Miss streak above which border cells earn `border_bonus`.
    pub border_bonus_streak: usize,
    pub border_bonus: u32,
    /// The diagonal phase ends once the miss streak reaches this factor
    /// times the largest remaining ship length.
    pub diagonal_streak_factor: usize,
}

impl Default for TargetingConfig {
    fn default() -> Self {
        Self {
            pattern_inference: true,
            rubber_band: false,
            rubber_band_streak: 10,
            edge_min_sunk: 2,
            edge_ratio_percent: 80,
            edge_miss_limit: 6,
            half_miss_limit: 8,
            border_bonus_streak: 6,
            border_bonus: 4,
            diagonal_streak_factor: 2,
        }
    }
}
