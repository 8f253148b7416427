#![cfg_attr(not(feature = "std"), no_std)]

//! Decision-making core for Battleship: fleet placement and targeting.
//!
//! * [`FleetGenerator`] builds a legal layout for a fleet manifest in the
//!   style of a [`PlacementPolicy`].
//! * [`TargetingEngine`] chooses the next shot from hit/miss/sunk feedback,
//!   driven by one of the tactics behind [`Strategy`].
//!
//! The two halves share only coordinates and ship geometry. [`Board`] and
//! [`Match`] provide the shot-resolution side for simulations and tests.

extern crate alloc;

mod bitboard;
mod board;
mod common;
mod config;
mod game;
pub mod grid;
#[cfg(feature = "std")]
mod logging;
pub mod placement;
pub mod prelude;
mod ship;
mod stats;
pub mod targeting;
#[cfg(feature = "std")]
pub mod ui;

pub use bitboard::{BitBoard, BitBoardError, SetBits};
pub use board::*;
pub use common::*;
pub use config::*;
pub use game::*;
pub use grid::{Coord, Side, BB};
#[cfg(feature = "std")]
pub use logging::init_logging;
pub use placement::{FleetGenerator, PlacementPolicy};
pub use ship::*;
pub use stats::Summary;
pub use targeting::{
    BeliefGrid, CellState, Heatmap, LiveCellProvider, NoLiveCells, Strategy, Tactic,
    TacticKind, TargetingEngine,
};
