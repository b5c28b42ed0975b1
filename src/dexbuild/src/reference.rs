//! Reference data for the Pokerole dataset
//!
//! Fixed enumerations the Foundry system understands: attribute and skill
//! names for dice pools, move targets, ailment names, acquisition ranks, and
//! the move attribute flags carried on every move record.

use serde_json::Value;

// ============================================================================
// Dice pools
// ============================================================================

/// Attributes a move may roll for accuracy or damage
pub const ATTRIBUTES: &[&str] = &[
    "strength",
    "dexterity",
    "vitality",
    "special",
    "insight",
    "tough",
    "cool",
    "beauty",
    "cute",
    "clever",
    "will",
];

/// Skills a move may roll for accuracy
pub const SKILLS: &[&str] = &[
    "brawl",
    "channel",
    "clash",
    "evasion",
    "alert",
    "athletic",
    "nature",
    "stealth",
    "allure",
    "etiquette",
    "intimidate",
    "perform",
    "crafts",
    "lore",
    "medicine",
    "science",
    "empathy",
    "throw",
];

/// Skills present on a freshly imported creature sheet
pub const CREATURE_SKILLS: &[&str] = &[
    "brawl",
    "channel",
    "clash",
    "evasion",
    "alert",
    "athletic",
    "nature",
    "stealth",
    "allure",
    "etiquette",
    "intimidate",
    "perform",
];

/// Social attributes present on a creature sheet
pub const SOCIAL_ATTRIBUTES: &[&str] = &["tough", "cool", "beauty", "cute", "clever"];

pub fn is_attribute(name: &str) -> bool {
    ATTRIBUTES.contains(&name)
}

pub fn is_skill(name: &str) -> bool {
    SKILLS.contains(&name)
}

// ============================================================================
// Targets
// ============================================================================

/// Valid move targets, in their display casing
pub const TARGETS: &[&str] = &[
    "Foe",
    "Random Foe",
    "All Foes",
    "User",
    "One Ally",
    "User and Allies",
    "Area",
    "Battlefield",
    "Battlefield (Foes)",
    "Battlefield and Area",
    "All Allies",
];

pub fn is_target(name: &str) -> bool {
    TARGETS.contains(&name)
}

// ============================================================================
// Ailments
// ============================================================================

/// Dataset ailment name and the Foundry condition it maps to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ailment {
    pub dataset: &'static str,
    pub foundry: &'static str,
}

pub const AILMENTS: &[Ailment] = &[
    Ailment { dataset: "Fainted", foundry: "fainted" },
    Ailment { dataset: "Paralyze", foundry: "paralysis" },
    Ailment { dataset: "Freeze", foundry: "frozen" },
    Ailment { dataset: "Poison", foundry: "poison" },
    Ailment { dataset: "BadlyPoison", foundry: "badlyPoisoned" },
    Ailment { dataset: "Sleep", foundry: "sleep" },
    Ailment { dataset: "Burn", foundry: "burn1" },
    Ailment { dataset: "Burn1", foundry: "burn1" },
    Ailment { dataset: "Burn2", foundry: "burn2" },
    Ailment { dataset: "Burn3", foundry: "burn3" },
    Ailment { dataset: "Flinch", foundry: "flinch" },
    Ailment { dataset: "Confuse", foundry: "confused" },
    Ailment { dataset: "Disable", foundry: "disabled" },
    Ailment { dataset: "Infaturate", foundry: "infatuated" },
];

/// Foundry condition name for a dataset ailment
pub fn foundry_ailment(dataset: &str) -> Option<&'static str> {
    AILMENTS
        .iter()
        .find(|a| a.dataset == dataset)
        .map(|a| a.foundry)
}

// ============================================================================
// Ranks
// ============================================================================

/// Acquisition ranks, lowest first
pub const RANKS: &[&str] = &[
    "Starter", "Beginner", "Amateur", "Ace", "Pro", "Master", "Champion",
];

/// The rank default maneuvers are learned at
pub const LOWEST_RANK: &str = "Starter";

/// Position of a rank on the ladder (case-insensitive)
pub fn rank_order(rank: &str) -> Option<usize> {
    RANKS.iter().position(|r| r.eq_ignore_ascii_case(rank))
}

// ============================================================================
// Moves
// ============================================================================

/// Generic maneuvers every creature can use
pub const DEFAULT_MANEUVERS: &[&str] = &[
    "Struggle",
    "Grapple",
    "Help Another",
    "Cover an Ally",
    "Run Away",
];

/// Moves too generic to export as records
pub const IGNORED_MOVES: &[&str] = &["any-move"];

pub fn is_ignored_move(id: &str) -> bool {
    IGNORED_MOVES.contains(&id)
}

/// A move attribute flag and its value when the dataset omits it
#[derive(Debug, Clone, PartialEq)]
pub struct MoveAttribute {
    pub dataset: &'static str,
    pub foundry: &'static str,
    pub numeric: bool,
}

impl MoveAttribute {
    pub fn default_value(&self) -> Value {
        if self.numeric {
            Value::from(0)
        } else {
            Value::Bool(false)
        }
    }
}

const fn flag(dataset: &'static str, foundry: &'static str) -> MoveAttribute {
    MoveAttribute { dataset, foundry, numeric: false }
}

const fn number(dataset: &'static str, foundry: &'static str) -> MoveAttribute {
    MoveAttribute { dataset, foundry, numeric: true }
}

pub const MOVE_ATTRIBUTES: &[MoveAttribute] = &[
    number("AccuracyReduction", "accuracyReduction"),
    number("Priority", "priority"),
    flag("HighCritical", "highCritical"),
    flag("Lethal", "lethal"),
    flag("PhysicalRanged", "physicalRanged"),
    flag("Charge", "charge"),
    flag("MustRecharge", "mustRecharge"),
    flag("FistBased", "fistBased"),
    flag("SoundBased", "soundBased"),
    flag("ShieldMove", "shieldMove"),
    flag("NeverFail", "neverFail"),
    flag("SwitcherMove", "switcherMove"),
    flag("Recoil", "recoil"),
    flag("Rampage", "rampage"),
    flag("DoubleAction", "doubleAction"),
    flag("AlwaysCrit", "alwaysCrit"),
    flag("DestroyShield", "destroyShield"),
    flag("SuccessiveActions", "successiveActions"),
    flag("UserFaints", "userFaints"),
    flag("ResetTerrain", "resetTerrain"),
    flag("ResistedWithDefense", "resistedWithDefense"),
    flag("IgnoreDefenses", "ignoreDefenses"),
];
