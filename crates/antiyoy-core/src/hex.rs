//! Hex coordinate system using staggered offset coordinates (x, y).
//!
//! Levels are stored as a rectangular grid of columns and rows. Odd columns
//! sit half a tile lower than even columns, so the diagonal neighbors of a
//! tile depend on the parity of its column:
//!
//! ```text
//!  even x            odd x
//!  NW (x-1, y-1)     NW (x-1, y)
//!  NE (x+1, y-1)     NE (x+1, y)
//!  SW (x-1, y)       SW (x-1, y+1)
//!  SE (x+1, y)       SE (x+1, y+1)
//! ```
//!
//! North and south never change the column. Nothing in this module knows
//! about grid bounds; coordinates outside a level are valid values and the
//! level answers them with a water sentinel.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The six directions of movement on the hex grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    NorthEast,
    SouthEast,
    South,
    SouthWest,
    NorthWest,
}

impl Direction {
    /// All directions in clockwise order starting from North
    pub const ALL: [Direction; 6] = [
        Direction::North,
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::NorthWest,
    ];

    /// The direction pointing the other way
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::NorthEast => Direction::SouthWest,
            Direction::SouthEast => Direction::NorthWest,
            Direction::South => Direction::North,
            Direction::SouthWest => Direction::NorthEast,
            Direction::NorthWest => Direction::SouthEast,
        }
    }

    /// Short compass label ("N", "NE", ...)
    pub fn label(&self) -> &'static str {
        match self {
            Direction::North => "N",
            Direction::NorthEast => "NE",
            Direction::SouthEast => "SE",
            Direction::South => "S",
            Direction::SouthWest => "SW",
            Direction::NorthWest => "NW",
        }
    }
}

/// Offset coordinate of a tile: `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Coord {
    /// Column (increases going east)
    pub x: i32,
    /// Row (increases going south)
    pub y: i32,
}

impl Coord {
    /// Create a new coordinate
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Whether this tile sits in an odd (lowered) column
    pub const fn is_odd_column(&self) -> bool {
        self.x.rem_euclid(2) == 1
    }

    /// Get the neighbor in a specific direction.
    ///
    /// The result may lie outside any particular level.
    pub fn neighbor(&self, direction: Direction) -> Coord {
        let Coord { x, y } = *self;
        let odd = self.is_odd_column();

        match direction {
            Direction::North => Coord::new(x, y - 1),
            Direction::South => Coord::new(x, y + 1),
            Direction::NorthEast if odd => Coord::new(x + 1, y),
            Direction::NorthEast => Coord::new(x + 1, y - 1),
            Direction::SouthEast if odd => Coord::new(x + 1, y + 1),
            Direction::SouthEast => Coord::new(x + 1, y),
            Direction::SouthWest if odd => Coord::new(x - 1, y + 1),
            Direction::SouthWest => Coord::new(x - 1, y),
            Direction::NorthWest if odd => Coord::new(x - 1, y),
            Direction::NorthWest => Coord::new(x - 1, y - 1),
        }
    }

    /// The six neighboring coordinates in `Direction::ALL` order
    pub fn neighbors(&self) -> [Coord; 6] {
        Direction::ALL.map(|dir| self.neighbor(dir))
    }

    /// Top-left sprite origin for a cell of the given size.
    ///
    /// Odd columns are pushed down by half a cell. The classic viewer used
    /// 25x32 pixel cells.
    pub fn to_pixel(&self, cell_width: i32, cell_height: i32) -> (i32, i32) {
        let stagger = if self.is_odd_column() { cell_height / 2 } else { 0 };
        (self.x * cell_width, self.y * cell_height + stagger)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Coord::new(x, y)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
