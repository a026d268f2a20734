//! AI players.
//!
//! An AI is told its player id when it is created and is then asked for
//! moves with a read-only view of the level. Callers that need to keep
//! mutating the level while an AI thinks should hand it a clone.

use crate::actions::Move;
use crate::level::{Level, Owner};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Player identifier (1-based, matches tile owners)
pub type PlayerId = Owner;

/// Something that can decide on moves for one player
pub trait Ai {
    /// The player this AI controls
    fn player_id(&self) -> PlayerId;

    /// Display name
    fn name(&self) -> &str;

    /// The moves this AI wants to take on the given level
    fn moves(&mut self, level: &Level) -> Vec<Move>;
}

/// The default AI. It does not play yet and never proposes a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AntiyoyAi {
    pub player_id: PlayerId,
}

impl AntiyoyAi {
    pub fn new(player_id: PlayerId) -> Self {
        Self { player_id }
    }
}

impl Ai for AntiyoyAi {
    fn player_id(&self) -> PlayerId {
        self.player_id
    }

    fn name(&self) -> &str {
        "Antiyoy AI"
    }

    fn moves(&mut self, _level: &Level) -> Vec<Move> {
        Vec::new()
    }
}

/// Known AI implementations, selectable by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiKind {
    Antiyoy,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown AI '{}' (available: {})", .0, available_names())]
pub struct UnknownAi(pub String);

fn available_names() -> String {
    AiKind::ALL
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl AiKind {
    pub const ALL: [AiKind; 1] = [AiKind::Antiyoy];

    /// Build an AI of this kind for `player_id`
    pub fn build(self, player_id: PlayerId) -> Box<dyn Ai> {
        match self {
            AiKind::Antiyoy => Box::new(AntiyoyAi::new(player_id)),
        }
    }
}

impl FromStr for AiKind {
    type Err = UnknownAi;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "antiyoy" | "antiyoyai" | "antiyoy_ai" => Ok(AiKind::Antiyoy),
            _ => Err(UnknownAi(s.to_string())),
        }
    }
}

impl fmt::Display for AiKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AiKind::Antiyoy => f.write_str("antiyoy"),
        }
    }
}

/// Build one AI per name, assigning player ids 1, 2, ... in order
pub fn build_roster<S: AsRef<str>>(names: &[S]) -> Result<Vec<Box<dyn Ai>>, UnknownAi> {
    names
        .iter()
        .zip(1..)
        .map(|(name, id)| Ok(name.as_ref().parse::<AiKind>()?.build(id)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_antiyoy_ai_creation() {
        let ai = AntiyoyAi::new(2);
        assert_eq!(ai.player_id(), 2);
        assert_eq!(ai.name(), "Antiyoy AI");
    }

    #[test]
    fn test_antiyoy_ai_proposes_nothing() {
        let level = Level::new(4, 4);
        let mut ai = AntiyoyAi::new(1);
        assert!(ai.moves(&level).is_empty());
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("AntiyoyAI".parse::<AiKind>().unwrap(), AiKind::Antiyoy);
        assert_eq!("antiyoy".parse::<AiKind>().unwrap(), AiKind::Antiyoy);
        assert_eq!(
            "minimax".parse::<AiKind>(),
            Err(UnknownAi("minimax".to_string()))
        );
    }

    #[test]
    fn test_roster_assigns_ids_in_order() {
        let roster = build_roster(&["antiyoy", "AntiyoyAI", "antiyoy"]).unwrap();
        let ids: Vec<_> = roster.iter().map(|ai| ai.player_id()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_roster_rejects_unknown() {
        let err = build_roster(&["antiyoy", "nope"]).err().unwrap();
        assert_eq!(err.to_string(), "Unknown AI 'nope' (available: antiyoy)");
    }

    #[test]
    fn test_every_kind_parses_from_its_name() {
        for kind in AiKind::ALL {
            assert_eq!(kind.to_string().parse::<AiKind>().unwrap(), kind);
        }
    }
}
