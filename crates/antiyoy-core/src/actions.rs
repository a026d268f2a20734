//! Moves that players and AIs can propose.
//!
//! Moves are plain values. Nothing in this crate checks them against game
//! rules; that belongs to whatever drives the turns.

use crate::hex::Coord;
use crate::unit::UnitType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// All possible moves a player can propose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Move {
    /// Walk a unit from one tile to another
    MoveUnit { from: Coord, to: Coord },
    /// Buy a unit or building and put it on a tile
    PlaceUnit { at: Coord, unit_type: UnitType },
    /// End your turn
    EndTurn,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::MoveUnit { from, to } => write!(f, "move {} -> {}", from, to),
            Move::PlaceUnit { at, unit_type } => write!(f, "place {} at {}", unit_type.name(), at),
            Move::EndTurn => f.write_str("end turn"),
        }
    }
}
