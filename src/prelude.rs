//! Commonly used types and utilities for ease of import.

pub use crate::{
    Board, Coord, FleetGenerator, Match, PlacementPolicy, ShotOutcome, Strategy, Tactic,
    TacticKind, TargetingConfig, TargetingEngine, FLEET,
};
