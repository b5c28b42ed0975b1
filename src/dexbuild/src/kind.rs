//! Entity kinds of the dataset

use serde::{Deserialize, Serialize};

/// One collection of the dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Creature,
    Move,
    Ability,
    Item,
    Nature,
    Learnset,
}

impl EntityKind {
    pub const ALL: [EntityKind; 6] = [
        Self::Creature,
        Self::Move,
        Self::Ability,
        Self::Item,
        Self::Nature,
        Self::Learnset,
    ];

    /// Directory holding this collection under the versioned dataset root
    pub fn source_dir(&self) -> &'static str {
        match self {
            Self::Creature => "Pokedex",
            Self::Move => "Moves",
            Self::Ability => "Abilities",
            Self::Item => "Items",
            Self::Nature => "Natures",
            Self::Learnset => "Learnsets",
        }
    }

    /// Pack file for the Foundry target, if the kind is exported there
    pub fn pack_file(&self) -> Option<&'static str> {
        match self {
            Self::Creature => Some("pokedex.db"),
            Self::Move => Some("moves.db"),
            Self::Ability => Some("abilities.db"),
            Self::Item => Some("items.db"),
            Self::Nature | Self::Learnset => None,
        }
    }

    /// Created-time stamp the Foundry system expects for each document type
    pub fn created_time(&self) -> i64 {
        match self {
            Self::Creature => 1670952558737,
            Self::Move => 1670525752873,
            _ => 1670695293664,
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Creature => write!(f, "creature"),
            Self::Move => write!(f, "move"),
            Self::Ability => write!(f, "ability"),
            Self::Item => write!(f, "item"),
            Self::Nature => write!(f, "nature"),
            Self::Learnset => write!(f, "learnset"),
        }
    }
}

impl std::str::FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "creature" | "creatures" | "pokedex" | "pokemon" => Ok(Self::Creature),
            "move" | "moves" => Ok(Self::Move),
            "ability" | "abilities" => Ok(Self::Ability),
            "item" | "items" => Ok(Self::Item),
            "nature" | "natures" => Ok(Self::Nature),
            "learnset" | "learnsets" => Ok(Self::Learnset),
            other => Err(format!("unknown entity kind '{}'", other)),
        }
    }
}
