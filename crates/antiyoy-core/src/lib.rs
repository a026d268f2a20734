//! Antiyoy - hex-grid level model for a turn-based strategy game
//!
//! This crate provides:
//! - Staggered offset hex coordinates and neighbor geometry
//! - Unit and tile types with their single-character file codes
//! - The level grid, with a water sentinel for out-of-bounds lookups
//! - Loading and saving the plain-text level format
//! - The AI player interface
//!
//! # Modules
//!
//! - [`hex`]: Coordinates and directions
//! - [`unit`]: Units and their codes
//! - [`level`]: Tiles, the level grid and the file format
//! - [`actions`]: Moves proposed by players
//! - [`ai`]: AI players

pub mod actions;
pub mod ai;
pub mod hex;
pub mod level;
pub mod unit;

// Re-export commonly used types
pub use actions::Move;
pub use ai::{build_roster, Ai, AiKind, AntiyoyAi, PlayerId, UnknownAi};
pub use hex::{Coord, Direction};
pub use level::{Level, LevelError, LevelJson, Owner, Tile, TileJson, UNOWNED, WATER};
pub use unit::{Unit, UnitType};
