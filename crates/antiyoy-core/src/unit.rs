//! Units: the pieces, buildings and trees that can stand on a land tile.
//!
//! Each unit has a single-character code used by the level file format:
//!
//! | code    | unit                          |
//! |---------|-------------------------------|
//! | `-`     | none                          |
//! | `P`/`p` | peasant (movable/immovable)   |
//! | `S`/`s` | spearman (movable/immovable)  |
//! | `K`/`k` | knight (movable/immovable)    |
//! | `B`/`b` | baron (movable/immovable)     |
//! | `@`     | capital                       |
//! | `#`     | farm                          |
//! | `\|`    | tower                         |
//! | `$`     | magic tower                   |
//! | `^`     | pine tree                     |
//! | `~`     | palm tree                     |
//! | `t`     | grave                         |

use crate::level::LevelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of unit occupying a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum UnitType {
    #[default]
    None,

    Peasant,
    Spearman,
    Knight,
    Baron,

    Capital,
    Farm,
    Tower,
    MagicTower,

    Pine,
    Palm,
    Grave,
}

impl UnitType {
    /// All unit types
    pub const ALL: [UnitType; 12] = [
        UnitType::None,
        UnitType::Peasant,
        UnitType::Spearman,
        UnitType::Knight,
        UnitType::Baron,
        UnitType::Capital,
        UnitType::Farm,
        UnitType::Tower,
        UnitType::MagicTower,
        UnitType::Pine,
        UnitType::Palm,
        UnitType::Grave,
    ];

    /// Soldiers; the only units whose movability is tracked
    pub fn is_combatant(&self) -> bool {
        matches!(
            self,
            UnitType::Peasant | UnitType::Spearman | UnitType::Knight | UnitType::Baron
        )
    }

    /// Buildings a player can own
    pub fn is_structure(&self) -> bool {
        matches!(
            self,
            UnitType::Capital | UnitType::Farm | UnitType::Tower | UnitType::MagicTower
        )
    }

    /// Trees that grow over land
    pub fn is_tree(&self) -> bool {
        matches!(self, UnitType::Pine | UnitType::Palm)
    }

    /// Human readable name
    pub fn name(&self) -> &'static str {
        match self {
            UnitType::None => "none",
            UnitType::Peasant => "peasant",
            UnitType::Spearman => "spearman",
            UnitType::Knight => "knight",
            UnitType::Baron => "baron",
            UnitType::Capital => "capital",
            UnitType::Farm => "farm",
            UnitType::Tower => "tower",
            UnitType::MagicTower => "magic tower",
            UnitType::Pine => "pine tree",
            UnitType::Palm => "palm tree",
            UnitType::Grave => "grave",
        }
    }
}

/// A unit together with its movability for the current turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Unit {
    pub unit_type: UnitType,
    /// Only meaningful for combatants
    pub can_move: bool,
}

impl Default for Unit {
    fn default() -> Self {
        Unit::NONE
    }
}

impl Unit {
    /// An empty slot
    pub const NONE: Unit = Unit::new(UnitType::None);

    /// Create a movable unit
    pub const fn new(unit_type: UnitType) -> Self {
        Self {
            unit_type,
            can_move: true,
        }
    }

    /// Create a unit that has already acted this turn
    pub const fn immovable(unit_type: UnitType) -> Self {
        Self {
            unit_type,
            can_move: false,
        }
    }

    /// True if there is no unit here
    pub fn is_none(&self) -> bool {
        self.unit_type == UnitType::None
    }

    /// The same unit with `can_move` reset for non-combatants, which is how
    /// it reads back from a level file
    pub fn canonical(self) -> Self {
        if self.unit_type.is_combatant() {
            self
        } else {
            Unit::new(self.unit_type)
        }
    }

    /// Decode a unit from its file code
    pub fn from_char(code: char) -> Result<Self, LevelError> {
        let unit = match code {
            '-' => Unit::NONE,
            'P' => Unit::new(UnitType::Peasant),
            'p' => Unit::immovable(UnitType::Peasant),
            'S' => Unit::new(UnitType::Spearman),
            's' => Unit::immovable(UnitType::Spearman),
            'K' => Unit::new(UnitType::Knight),
            'k' => Unit::immovable(UnitType::Knight),
            'B' => Unit::new(UnitType::Baron),
            'b' => Unit::immovable(UnitType::Baron),
            '@' => Unit::new(UnitType::Capital),
            '#' => Unit::new(UnitType::Farm),
            '|' => Unit::new(UnitType::Tower),
            '$' => Unit::new(UnitType::MagicTower),
            '^' => Unit::new(UnitType::Pine),
            '~' => Unit::new(UnitType::Palm),
            't' => Unit::new(UnitType::Grave),
            other => return Err(LevelError::InvalidUnitCode(other.to_string())),
        };
        Ok(unit)
    }

    /// Encode this unit as its file code.
    ///
    /// Non-combatants ignore `can_move`.
    pub fn to_char(&self) -> char {
        let (movable, immovable) = match self.unit_type {
            UnitType::None => ('-', '-'),
            UnitType::Peasant => ('P', 'p'),
            UnitType::Spearman => ('S', 's'),
            UnitType::Knight => ('K', 'k'),
            UnitType::Baron => ('B', 'b'),
            UnitType::Capital => ('@', '@'),
            UnitType::Farm => ('#', '#'),
            UnitType::Tower => ('|', '|'),
            UnitType::MagicTower => ('$', '$'),
            UnitType::Pine => ('^', '^'),
            UnitType::Palm => ('~', '~'),
            UnitType::Grave => ('t', 't'),
        };
        if self.can_move {
            movable
        } else {
            immovable
        }
    }
}

impl FromStr for Unit {
    type Err = LevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(code), None) => Unit::from_char(code),
            _ => Err(LevelError::InvalidUnitCode(s.to_string())),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}
