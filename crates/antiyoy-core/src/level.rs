//! Level representation: tiles, the rectangular grid and the level file format.
//!
//! A level file looks like this:
//!
//! ```text
//! 4
//! 2
//! 1@  -^
//!   ..  2P
//! ..  ..
//!   ..  ..
//! ```
//!
//! The first two lines hold the width and height. Every grid row then takes
//! two text lines because odd columns are drawn half a tile lower: tiles in
//! even columns live in the first line of the pair, tiles in odd columns in
//! the second. Column `x` always occupies characters `2x..2x+2` of its line
//! and the slots of the other parity are padding.
//!
//! Each tile is two characters: the owner (`.` water, `-` unowned, `1`-`9`
//! player id) followed by a unit code (see [`crate::unit`]). Water is always
//! written as `..`.

use crate::hex::{Coord, Direction};
use crate::unit::Unit;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Tile owner: negative for water, 0 for unowned land, otherwise a 1-based player id
pub type Owner = i32;

/// Owner value of water tiles
pub const WATER: Owner = -1;

/// Owner value of unowned land
pub const UNOWNED: Owner = 0;

/// Highest player id the level file format can express
pub const MAX_FILE_PLAYER: Owner = 9;

/// Errors produced while decoding or encoding levels
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("Invalid unit code '{0}'")]
    InvalidUnitCode(String),

    #[error("Invalid owner code '{0}'")]
    InvalidOwnerCode(String),

    #[error("Invalid tile code '{0}'")]
    InvalidTileCode(String),

    #[error("Malformed level file at line {line}: {message}")]
    FileFormatError { line: usize, message: String },

    #[error("Owner {0} cannot be written to a level file")]
    OwnerOutOfRange(Owner),

    #[error("Coordinate {0} is outside the level")]
    OutOfBounds(Coord),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A single cell of the level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub owner: Owner,
    pub unit: Unit,
}

impl Default for Tile {
    fn default() -> Self {
        Tile::unowned(Unit::NONE)
    }
}

impl Tile {
    /// Water tile; also returned for every out-of-bounds lookup
    pub const WATER: Tile = Tile {
        owner: WATER,
        unit: Unit::NONE,
    };

    /// Create a water tile
    pub const fn water() -> Self {
        Tile::WATER
    }

    /// Create an unowned land tile
    pub const fn unowned(unit: Unit) -> Self {
        Self {
            owner: UNOWNED,
            unit,
        }
    }

    /// Create a land tile owned by `player`
    pub const fn owned(player: Owner, unit: Unit) -> Self {
        Self {
            owner: player,
            unit,
        }
    }

    pub fn is_water(&self) -> bool {
        self.owner < 0
    }

    pub fn is_land(&self) -> bool {
        !self.is_water()
    }

    /// The controlling player, if any
    pub fn player(&self) -> Option<Owner> {
        (self.owner > 0).then_some(self.owner)
    }

    /// Decode a tile from its two-character file code
    pub fn decode(code: &str) -> Result<Self, LevelError> {
        if code == ".." {
            return Ok(Tile::WATER);
        }

        let mut chars = code.chars();
        let (Some(owner), Some(unit), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(LevelError::InvalidTileCode(code.to_string()));
        };

        let owner = match owner {
            '-' => UNOWNED,
            '1'..='9' => owner as Owner - '0' as Owner,
            other => return Err(LevelError::InvalidOwnerCode(other.to_string())),
        };

        Ok(Tile::owned(owner, Unit::from_char(unit)?))
    }

    /// Encode this tile as its two-character file code.
    ///
    /// Water always encodes as `..`, dropping any stored unit. Player ids
    /// above 9 have no file representation.
    pub fn encode(&self) -> Result<String, LevelError> {
        if self.owner > MAX_FILE_PLAYER {
            return Err(LevelError::OwnerOutOfRange(self.owner));
        }
        Ok(self.to_string())
    }
}

impl FromStr for Tile {
    type Err = LevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tile::decode(s)
    }
}

/// Writes the file code; owners the format cannot express show as `?`
impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.owner {
            o if o < 0 => f.write_str(".."),
            UNOWNED => write!(f, "-{}", self.unit),
            1..=MAX_FILE_PLAYER => write!(f, "{}{}", self.owner, self.unit),
            _ => write!(f, "?{}", self.unit),
        }
    }
}

/// A rectangular hex level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    width: usize,
    height: usize,
    /// Row-major, indexed by `y * width + x`
    tiles: Vec<Tile>,
}

impl Level {
    /// Create a level filled with unowned, empty land.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "level dimensions must be positive");
        Self {
            width,
            height,
            tiles: vec![Tile::default(); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Read and parse a level file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let text = std::fs::read_to_string(path)?;
        Level::parse(&text)
    }

    /// Write this level to a file in canonical layout
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), LevelError> {
        std::fs::write(path, self.to_text()?)?;
        Ok(())
    }

    /// Parse the level file format
    pub fn parse(text: &str) -> Result<Self, LevelError> {
        let mut lines = text.lines();
        let width = parse_dimension(lines.next(), 1, "width")?;
        let height = parse_dimension(lines.next(), 2, "height")?;

        // Slots are counted in characters, not bytes
        let rows: Vec<Vec<char>> = lines.map(|line| line.chars().collect()).collect();
        let needed = height.checked_mul(2).ok_or_else(|| LevelError::FileFormatError {
            line: 2,
            message: format!("height {} is too large", height),
        })?;
        if rows.len() < needed {
            return Err(LevelError::FileFormatError {
                line: rows.len() + 3,
                message: format!("expected {} row lines, found {}", needed, rows.len()),
            });
        }

        let mut tiles = Vec::new();
        for y in 0..height {
            for x in 0..width {
                let row_index = 2 * y + x % 2;
                let start = 2 * x;
                let code: String = rows[row_index]
                    .get(start..start + 2)
                    .ok_or_else(|| LevelError::FileFormatError {
                        line: row_index + 3,
                        message: format!("no tile code for column {} of row {}", x, y),
                    })?
                    .iter()
                    .collect();
                tiles.push(Tile::decode(&code)?);
            }
        }

        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    /// Serialize to the level file format, header included.
    ///
    /// Fails if a tile has an owner the format cannot express.
    pub fn to_text(&self) -> Result<String, LevelError> {
        for tile in &self.tiles {
            tile.encode()?;
        }
        Ok(format!("{}\n{}\n{}\n", self.width, self.height, self.grid_text()))
    }

    /// The row lines of the file format without the header.
    ///
    /// Every row becomes two lines; lines are separated by `\n` with no
    /// trailing newline.
    pub fn grid_text(&self) -> String {
        let mut lines = Vec::with_capacity(self.height * 2);
        for y in 0..self.height {
            for parity in 0..2 {
                let line: String = (0..self.width)
                    .map(|x| {
                        if x % 2 == parity {
                            self.tiles[self.index_unchecked(x, y)].to_string()
                        } else {
                            "  ".to_string()
                        }
                    })
                    .collect();
                lines.push(line);
            }
        }
        lines.join("\n")
    }

    fn index_unchecked(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        if self.in_bounds(coord) {
            Some(self.index_unchecked(coord.x as usize, coord.y as usize))
        } else {
            None
        }
    }

    /// Check if a coordinate lies inside the level
    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && (coord.x as usize) < self.width
            && (coord.y as usize) < self.height
    }

    /// Get the tile at a coordinate.
    ///
    /// Anything outside the level is water with no unit.
    pub fn tile(&self, coord: Coord) -> Tile {
        self.get(coord).copied().unwrap_or(Tile::WATER)
    }

    /// Get a tile reference, `None` outside the level
    pub fn get(&self, coord: Coord) -> Option<&Tile> {
        self.index(coord).map(|i| &self.tiles[i])
    }

    /// Get a mutable tile reference, `None` outside the level
    pub fn get_mut(&mut self, coord: Coord) -> Option<&mut Tile> {
        let i = self.index(coord)?;
        Some(&mut self.tiles[i])
    }

    /// Replace a tile.
    ///
    /// Water tiles are stored without a unit, and units are stored in the
    /// form the file format can express (see [`Unit::canonical`]).
    pub fn set_tile(&mut self, coord: Coord, tile: Tile) -> Result<(), LevelError> {
        let slot = self.get_mut(coord).ok_or(LevelError::OutOfBounds(coord))?;
        *slot = if tile.is_land() {
            Tile::owned(tile.owner, tile.unit.canonical())
        } else {
            Tile::WATER
        };
        Ok(())
    }

    /// Neighbor coordinate of `coord`; may be outside any level
    pub fn neighbor(coord: Coord, direction: Direction) -> Coord {
        coord.neighbor(direction)
    }

    /// The tile next to `coord` in `direction`
    pub fn neighbor_tile(&self, coord: Coord, direction: Direction) -> Tile {
        self.tile(coord.neighbor(direction))
    }

    /// All six neighbors with their tiles, in `Direction::ALL` order
    pub fn neighbors(&self, coord: Coord) -> [(Coord, Tile); 6] {
        coord.neighbors().map(|n| (n, self.tile(n)))
    }

    /// Iterate tiles in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &Tile)> + '_ {
        self.tiles.iter().enumerate().map(move |(i, tile)| {
            let x = (i % self.width) as i32;
            let y = (i / self.width) as i32;
            (Coord::new(x, y), tile)
        })
    }

    /// Number of tiles per owner value
    pub fn owner_counts(&self) -> BTreeMap<Owner, usize> {
        let mut counts = BTreeMap::new();
        for tile in &self.tiles {
            *counts.entry(tile.owner).or_insert(0) += 1;
        }
        counts
    }

    /// Player ids that own at least one tile, ascending
    pub fn player_ids(&self) -> Vec<Owner> {
        self.owner_counts()
            .into_keys()
            .filter(|owner| *owner > 0)
            .collect()
    }

    /// Convert to a flat representation for renderers and JSON output
    pub fn to_json_friendly(&self) -> LevelJson {
        LevelJson {
            width: self.width,
            height: self.height,
            tiles: self
                .iter()
                .map(|(coord, tile)| TileJson {
                    x: coord.x,
                    y: coord.y,
                    owner: tile.owner,
                    unit: tile.unit.unit_type,
                    can_move: tile.unit.can_move,
                })
                .collect(),
        }
    }
}

impl FromStr for Level {
    type Err = LevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::parse(s)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.grid_text())
    }
}

fn parse_dimension(line: Option<&str>, line_no: usize, name: &str) -> Result<usize, LevelError> {
    let raw = line.ok_or_else(|| LevelError::FileFormatError {
        line: line_no,
        message: format!("missing {}", name),
    })?;
    match raw.trim().parse::<usize>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(LevelError::FileFormatError {
            line: line_no,
            message: format!("{} must be a positive integer, got '{}'", name, raw.trim()),
        }),
    }
}

/// Flat level representation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelJson {
    pub width: usize,
    pub height: usize,
    pub tiles: Vec<TileJson>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileJson {
    pub x: i32,
    pub y: i32,
    pub owner: Owner,
    pub unit: crate::unit::UnitType,
    pub can_move: bool,
}

impl LevelJson {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::UnitType;

    const SAMPLE: &str = "4\n2\n1@  -^  \n  ..  2P\n..  ..  \n  ..  ..\n";

    #[test]
    fn test_decode_owned_knight() {
        let tile: Tile = "3K".parse().unwrap();
        assert_eq!(tile, Tile::owned(3, Unit::new(UnitType::Knight)));
    }

    #[test]
    fn test_decode_water_ignores_second_char() {
        assert_eq!(Tile::decode("..").unwrap(), Tile::WATER);
        assert_eq!(Tile::decode("..").unwrap().unit.unit_type, UnitType::None);
    }

    #[test]
    fn test_decode_unowned() {
        let tile = Tile::decode("-~").unwrap();
        assert_eq!(tile.owner, UNOWNED);
        assert_eq!(tile.unit.unit_type, UnitType::Palm);
    }

    #[test]
    fn test_decode_bad_owner() {
        assert!(matches!(Tile::decode("0P"), Err(LevelError::InvalidOwnerCode(_))));
        assert!(matches!(Tile::decode("xP"), Err(LevelError::InvalidOwnerCode(_))));
        assert!(matches!(Tile::decode(".P"), Err(LevelError::InvalidOwnerCode(_))));
    }

    #[test]
    fn test_decode_bad_unit_propagates() {
        assert!(matches!(Tile::decode("1x"), Err(LevelError::InvalidUnitCode(_))));
    }

    #[test]
    fn test_decode_wrong_length() {
        assert!(matches!(Tile::decode("1"), Err(LevelError::InvalidTileCode(_))));
        assert!(matches!(Tile::decode("1PP"), Err(LevelError::InvalidTileCode(_))));
    }

    #[test]
    fn test_water_with_unit_encodes_as_water() {
        let tile = Tile::owned(WATER, Unit::new(UnitType::Baron));
        assert_eq!(tile.encode().unwrap(), "..");
        assert_eq!(Tile::decode(&tile.encode().unwrap()).unwrap(), Tile::WATER);
    }

    #[test]
    fn test_encode_rejects_two_digit_owner() {
        let tile = Tile::owned(12, Unit::NONE);
        assert!(matches!(tile.encode(), Err(LevelError::OwnerOutOfRange(12))));
        assert_eq!(tile.to_string(), "?-");
    }

    #[test]
    fn test_new_level_is_unowned_land() {
        let level = Level::new(3, 2);
        assert!(level.iter().all(|(_, t)| *t == Tile::default()));
        assert_eq!(level.iter().count(), 6);
        assert!(!level.tile(Coord::new(2, 1)).is_water());
    }

    #[test]
    fn test_parse_sample() {
        let level = Level::parse(SAMPLE).unwrap();
        assert_eq!((level.width(), level.height()), (4, 2));
        assert_eq!(level.tile(Coord::new(0, 0)), Tile::owned(1, Unit::new(UnitType::Capital)));
        assert!(level.tile(Coord::new(1, 0)).is_water());
        assert_eq!(level.tile(Coord::new(2, 0)), Tile::unowned(Unit::new(UnitType::Pine)));
        assert_eq!(level.tile(Coord::new(3, 0)), Tile::owned(2, Unit::new(UnitType::Peasant)));
        assert!(level.iter().filter(|(c, _)| c.y == 1).all(|(_, t)| t.is_water()));
    }

    #[test]
    fn test_to_text_matches_canonical_input() {
        let level = Level::parse(SAMPLE).unwrap();
        assert_eq!(level.to_text().unwrap(), SAMPLE);
    }

    #[test]
    fn test_grid_text_has_no_header_or_trailing_newline() {
        let level = Level::parse(SAMPLE).unwrap();
        assert_eq!(level.grid_text(), "1@  -^  \n  ..  2P\n..  ..  \n  ..  ..");
        assert_eq!(level.to_string(), level.grid_text());
    }

    #[test]
    fn test_padding_is_not_parsed() {
        // Off-parity slots hold junk that would not decode
        let text = "2\n1\n1Pzz\nzz-#\n";
        let level = Level::parse(text).unwrap();
        assert_eq!(level.tile(Coord::new(0, 0)).owner, 1);
        assert_eq!(level.tile(Coord::new(1, 0)).unit.unit_type, UnitType::Farm);
    }

    #[test]
    fn test_non_ascii_padding_is_not_parsed() {
        let level = Level::parse("2\n1\n1P\né -#\n").unwrap();
        assert_eq!(level.tile(Coord::new(0, 0)), Tile::owned(1, Unit::new(UnitType::Peasant)));
        assert_eq!(level.tile(Coord::new(1, 0)), Tile::unowned(Unit::new(UnitType::Farm)));

        let level = Level::parse("3\n1\n1@é…-^\n  1K\n").unwrap();
        assert_eq!(level.tile(Coord::new(2, 0)), Tile::unowned(Unit::new(UnitType::Pine)));
    }

    #[test]
    fn test_non_ascii_tile_code_is_a_code_error() {
        assert!(matches!(
            Level::parse("1\n1\n1é\n\n"),
            Err(LevelError::InvalidUnitCode(code)) if code == "é"
        ));
        assert!(matches!(
            Level::parse("1\n1\né-\n\n"),
            Err(LevelError::InvalidOwnerCode(code)) if code == "é"
        ));
    }

    #[test]
    fn test_parse_accepts_crlf() {
        let text = "2\r\n1\r\n1P\r\n  -#\r\n";
        let level = Level::parse(text).unwrap();
        assert_eq!(level.tile(Coord::new(1, 0)).unit.unit_type, UnitType::Farm);
    }

    #[test]
    fn test_parse_bad_header() {
        for text in ["", "x\n2\n", "0\n2\n", "2\n-1\n", "2\n"] {
            assert!(
                matches!(Level::parse(text), Err(LevelError::FileFormatError { .. })),
                "{text:?}"
            );
        }
    }

    #[test]
    fn test_parse_missing_rows() {
        let err = Level::parse("2\n2\n....\n....\n").unwrap_err();
        assert!(matches!(err, LevelError::FileFormatError { line: 5, .. }));
    }

    #[test]
    fn test_parse_short_row() {
        let err = Level::parse("2\n1\n..\n  \n").unwrap_err();
        assert!(matches!(err, LevelError::FileFormatError { line: 4, .. }));
    }

    #[test]
    fn test_parse_bad_tile_aborts_load() {
        assert!(matches!(
            Level::parse("1\n1\n1x\n\n"),
            Err(LevelError::InvalidUnitCode(_))
        ));
    }

    #[test]
    fn test_out_of_bounds_is_water() {
        let mut level = Level::new(2, 2);
        level
            .set_tile(Coord::new(0, 0), Tile::owned(1, Unit::new(UnitType::Capital)))
            .unwrap();
        for coord in [Coord::new(-1, 0), Coord::new(2, 0), Coord::new(0, -1), Coord::new(0, 2)] {
            assert_eq!(level.tile(coord), Tile::WATER);
            assert!(level.get(coord).is_none());
        }
    }

    #[test]
    fn test_set_tile_out_of_bounds() {
        let mut level = Level::new(2, 2);
        assert!(matches!(
            level.set_tile(Coord::new(5, 5), Tile::default()),
            Err(LevelError::OutOfBounds(_))
        ));
    }

    #[test]
    fn test_set_water_drops_unit() {
        let mut level = Level::new(1, 1);
        level
            .set_tile(Coord::new(0, 0), Tile::owned(-3, Unit::new(UnitType::Knight)))
            .unwrap();
        assert_eq!(level.tile(Coord::new(0, 0)), Tile::WATER);
        assert!(!level.tile(Coord::new(0, 0)).is_land());
    }

    #[test]
    fn test_set_tile_stores_structures_as_movable() {
        let mut level = Level::new(2, 1);
        level
            .set_tile(Coord::new(0, 0), Tile::owned(1, Unit::immovable(UnitType::Tower)))
            .unwrap();
        level
            .set_tile(Coord::new(1, 0), Tile::owned(1, Unit::immovable(UnitType::Spearman)))
            .unwrap();
        assert!(level.tile(Coord::new(0, 0)).unit.can_move);
        assert!(!level.tile(Coord::new(1, 0)).unit.can_move);

        let reloaded = Level::parse(&level.to_text().unwrap()).unwrap();
        assert_eq!(reloaded, level);
    }

    #[test]
    fn test_neighbor_tiles() {
        let level = Level::parse(SAMPLE).unwrap();
        let origin = Coord::new(2, 0);
        assert_eq!(
            level.neighbor_tile(origin, Direction::SouthEast),
            Tile::owned(2, Unit::new(UnitType::Peasant))
        );
        // North of row 0 is off the level
        assert_eq!(level.neighbor_tile(origin, Direction::North), Tile::WATER);
        assert_eq!(Level::neighbor(origin, Direction::NorthWest), Coord::new(1, -1));
        let around = level.neighbors(origin);
        assert_eq!(around[2], (Coord::new(3, 0), level.tile(Coord::new(3, 0))));
    }

    #[test]
    fn test_owner_counts_and_players() {
        let level = Level::parse(SAMPLE).unwrap();
        let counts = level.owner_counts();
        assert_eq!(counts[&WATER], 5);
        assert_eq!(counts[&UNOWNED], 1);
        assert_eq!(level.player_ids(), vec![1, 2]);
    }

    #[test]
    fn test_to_text_rejects_unwritable_owner() {
        let mut level = Level::new(1, 1);
        level.set_tile(Coord::new(0, 0), Tile::owned(10, Unit::NONE)).unwrap();
        assert!(matches!(level.to_text(), Err(LevelError::OwnerOutOfRange(10))));
    }

    #[test]
    fn test_json_friendly() {
        let level = Level::parse(SAMPLE).unwrap();
        let json = level.to_json_friendly();
        assert_eq!(json.tiles.len(), 8);
        assert_eq!(json.tiles[3].x, 3);
        assert_eq!(json.tiles[3].unit, UnitType::Peasant);
        let text = json.to_json().unwrap();
        assert!(text.contains("\"Capital\""));
    }
}
