//! One side of a match: a targeting engine firing at a defending board.

use core::fmt;

use crate::board::Board;
use crate::common::{BoardError, ShotOutcome, TargetingError};
use crate::grid::Coord;
use crate::targeting::{NoLiveCells, Strategy, Tactic, TargetingEngine};

/// Current status of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GameStatus {
    InProgress,
    /// Every defending ship is sunk.
    Won,
}

/// Errors ending a match early.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    Board(BoardError),
    Targeting(TargetingError),
    /// The match is already over.
    Finished,
}

impl From<BoardError> for MatchError {
    fn from(err: BoardError) -> Self {
        MatchError::Board(err)
    }
}

impl From<TargetingError> for MatchError {
    fn from(err: TargetingError) -> Self {
        MatchError::Targeting(err)
    }
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchError::Board(e) => write!(f, "board rejected shot: {}", e),
            MatchError::Targeting(e) => write!(f, "targeting failed: {}", e),
            MatchError::Finished => write!(f, "match is already finished"),
        }
    }
}

/// One resolved shot.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Turn {
    pub coord: Coord,
    pub outcome: ShotOutcome,
}

/// Summary of a finished match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct MatchReport {
    pub tactic: &'static str,
    pub shots: usize,
    pub hits: usize,
    pub ships_sunk: usize,
}

/// Drives a targeting engine against a board until the fleet is sunk.
pub struct Match<T: Tactic = Strategy> {
    defender: Board,
    engine: TargetingEngine<T>,
    live_cells: bool,
    hits: usize,
    ships_sunk: usize,
}

impl<T: Tactic> Match<T> {
    pub fn new(defender: Board, engine: TargetingEngine<T>) -> Self {
        Self {
            defender,
            engine,
            live_cells: false,
            hits: 0,
            ships_sunk: 0,
        }
    }

    /// Let the engine peek at the defender's live cells (rubber band).
    pub fn with_live_cells(mut self, enabled: bool) -> Self {
        self.live_cells = enabled;
        self
    }

    pub fn defender(&self) -> &Board {
        &self.defender
    }

    pub fn engine(&self) -> &TargetingEngine<T> {
        &self.engine
    }

    pub fn status(&self) -> GameStatus {
        if self.defender.all_sunk() {
            GameStatus::Won
        } else {
            GameStatus::InProgress
        }
    }

    /// Ask the engine for a shot, resolve it and report the result back.
    pub fn play_turn(&mut self) -> Result<Turn, MatchError> {
        if self.status() == GameStatus::Won {
            return Err(MatchError::Finished);
        }
        let coord = if self.live_cells {
            self.engine.next_shot_with(&mut self.defender)?
        } else {
            self.engine.next_shot_with(&mut NoLiveCells)?
        };
        let outcome = self.defender.guess(coord)?;
        self.engine.shot_result(outcome.is_hit(), outcome.is_sunk())?;
        if outcome.is_hit() {
            self.hits += 1;
        }
        if outcome.is_sunk() {
            self.ships_sunk += 1;
        }
        Ok(Turn { coord, outcome })
    }

    /// Play until the defending fleet is gone.
    pub fn run(mut self) -> Result<MatchReport, MatchError> {
        while self.status() == GameStatus::InProgress {
            self.play_turn()?;
        }
        let report = self.report();
        log::debug!(
            "{} sank the fleet in {} shots ({} hits)",
            report.tactic,
            report.shots,
            report.hits
        );
        Ok(report)
    }

    pub fn report(&self) -> MatchReport {
        MatchReport {
            tactic: self.engine.name(),
            shots: self.engine.state().shots(),
            hits: self.hits,
            ships_sunk: self.ships_sunk,
        }
    }
}
