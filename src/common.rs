//! Common types shared by the placement and targeting halves: shot outcomes
//! and error enums.

use alloc::vec::Vec;
use core::fmt;

use crate::bitboard::BitBoardError;
use crate::grid::Coord;

/// What the defending board reported for one shot.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotOutcome {
    /// Shot missed all ships.
    Miss,
    /// Shot hit a ship that is still afloat.
    Hit,
    /// Shot sank a ship. `buffer` lists the cells around its hull.
    Sunk {
        ship_id: usize,
        length: usize,
        buffer: Vec<Coord>,
    },
}

impl ShotOutcome {
    pub fn is_hit(&self) -> bool {
        !matches!(self, ShotOutcome::Miss)
    }

    pub fn is_sunk(&self) -> bool {
        matches!(self, ShotOutcome::Sunk { .. })
    }
}

/// Errors returned by board and ship operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Underlying bitboard error (e.g., invalid size or index).
    BitBoardError(BitBoardError),
    /// Ship length is zero or longer than the board.
    InvalidLength(usize),
    /// Ship runs off the board.
    ShipOutOfBounds,
    /// Two ships share a cell.
    ShipOverlaps { first: usize, second: usize },
    /// Two ships touch orthogonally or diagonally.
    ShipsAdjacent { first: usize, second: usize },
    /// Ship lengths do not match the fleet manifest.
    ManifestMismatch,
    /// Guess was already made at this position.
    AlreadyGuessed,
    /// Coordinate is off the board.
    InvalidCoordinate(Coord),
}

impl From<BitBoardError> for BoardError {
    fn from(err: BitBoardError) -> Self {
        BoardError::BitBoardError(err)
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::BitBoardError(e) => write!(f, "BitBoard error: {}", e),
            BoardError::InvalidLength(len) => write!(f, "Invalid ship length {}", len),
            BoardError::ShipOutOfBounds => write!(f, "Ship placement is out of bounds"),
            BoardError::ShipOverlaps { first, second } => {
                write!(f, "Ships {} and {} overlap", first, second)
            }
            BoardError::ShipsAdjacent { first, second } => {
                write!(f, "Ships {} and {} touch each other", first, second)
            }
            BoardError::ManifestMismatch => write!(f, "Ship lengths do not match the fleet"),
            BoardError::AlreadyGuessed => write!(f, "Guess was already made at this position"),
            BoardError::InvalidCoordinate((r, c)) => {
                write!(f, "Coordinate ({}, {}) is off the board", r, c)
            }
        }
    }
}

/// Failure of the fleet placement generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    /// No ships were requested.
    EmptyManifest,
    /// A requested ship cannot fit on the board at all.
    InvalidLength(usize),
    /// Every attempt up to the ceiling left part of the fleet unplaced.
    AttemptsExhausted { attempts: usize },
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::EmptyManifest => write!(f, "Fleet manifest is empty"),
            PlacementError::InvalidLength(len) => write!(f, "Ship length {} cannot fit", len),
            PlacementError::AttemptsExhausted { attempts } => {
                write!(f, "No valid layout found after {} attempts", attempts)
            }
        }
    }
}

/// Errors raised by the targeting engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetingError {
    /// Every cell has been fired at; the match should have ended already.
    BoardExhausted,
    /// A result was reported without a shot having been proposed.
    NoPendingShot,
    /// The coordinate was already fired at this match.
    AlreadyTried(Coord),
    /// The coordinate is off the board.
    OutOfBounds(Coord),
}

impl fmt::Display for TargetingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetingError::BoardExhausted => write!(f, "Every cell has already been tried"),
            TargetingError::NoPendingShot => write!(f, "No shot is awaiting a result"),
            TargetingError::AlreadyTried((r, c)) => {
                write!(f, "Cell ({}, {}) was already tried", r, c)
            }
            TargetingError::OutOfBounds((r, c)) => {
                write!(f, "Cell ({}, {}) is off the board", r, c)
            }
        }
    }
}
