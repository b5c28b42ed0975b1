//! Cross-reference resolution
//!
//! A creature names its moves and abilities; the resolver looks each one up
//! in the loaded collections and returns copies attached to the creature.
//! References that cannot be found are reported, never fatal.

use std::fmt;

use tracing::{debug, warn};

use crate::error::Result;
use crate::index::{CollectionIndex, IndexedRecord};
use crate::kind::EntityKind;
use crate::overrides::OverrideTable;
use crate::record::{Creature, LearnedMove, Learnset, Move};
use crate::reference::is_ignored_move;
use crate::transform::learnset::with_maneuvers;

/// Slot an ability fills on a creature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbilitySlot {
    Regular,
    Hidden,
    Event,
}

impl AbilitySlot {
    /// Suffix appended to the ability name on the creature sheet
    pub fn name_suffix(&self) -> &'static str {
        match self {
            Self::Regular => "",
            Self::Hidden => " [Hidden Ability]",
            Self::Event => " [Event]",
        }
    }
}

/// A reference that named no record of its collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingReference {
    pub parent_kind: EntityKind,
    pub parent: String,
    pub kind: EntityKind,
    pub name: String,
}

impl MissingReference {
    fn new(parent: &Creature, kind: EntityKind, name: &str) -> Self {
        let missing = Self {
            parent_kind: EntityKind::Creature,
            parent: parent.name.clone(),
            kind,
            name: name.to_string(),
        };
        warn!("{}", missing);
        missing
    }
}

impl fmt::Display for MissingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} '{}' referenced by {} '{}' not found",
            self.kind, self.name, self.parent_kind, self.parent
        )
    }
}

/// A move copied onto a creature with the rank it is learned at
#[derive(Debug, Clone)]
pub struct ResolvedMove {
    pub rank: String,
    pub source: IndexedRecord,
}

#[derive(Debug, Clone)]
pub struct ResolvedAbility {
    pub slot: AbilitySlot,
    pub source: IndexedRecord,
}

/// A creature with its references resolved
#[derive(Debug, Clone)]
pub struct CompositeCreature {
    pub creature: Creature,
    pub moves: Vec<ResolvedMove>,
    pub abilities: Vec<ResolvedAbility>,
    pub missing: Vec<MissingReference>,
}

/// Learned-move list of a creature
///
/// Uses the creature's own `Moves` when present, else the learnset record
/// named after it. Default maneuvers are not included.
pub fn learned_moves(
    creature: &Creature,
    learnsets: Option<&CollectionIndex>,
    missing: &mut Vec<MissingReference>,
) -> Result<Vec<LearnedMove>> {
    if let Some(moves) = &creature.moves {
        return Ok(moves.clone());
    }

    match learnsets.and_then(|index| index.lookup(&creature.name)) {
        Some(found) => {
            debug!("Using learnset {} for {}", found.path.display(), creature.name);
            Ok(found.typed::<Learnset>()?.moves)
        }
        None => {
            missing.push(MissingReference::new(
                creature,
                EntityKind::Learnset,
                &creature.name,
            ));
            Ok(Vec::new())
        }
    }
}

/// Parse a move record and apply its override, if any
pub fn typed_move(source: &IndexedRecord, overrides: &OverrideTable) -> Result<Move> {
    let mut mv: Move = source.typed()?;
    if overrides.apply(&mut mv) {
        debug!("Applied override to move {}", mv.id);
    }
    Ok(mv)
}

pub struct Resolver<'a> {
    moves: &'a CollectionIndex,
    abilities: &'a CollectionIndex,
    learnsets: Option<&'a CollectionIndex>,
    maneuvers: &'a [String],
}

impl<'a> Resolver<'a> {
    pub fn new(
        moves: &'a CollectionIndex,
        abilities: &'a CollectionIndex,
        learnsets: Option<&'a CollectionIndex>,
        maneuvers: &'a [String],
    ) -> Self {
        Self {
            moves,
            abilities,
            learnsets,
            maneuvers,
        }
    }

    /// Resolve every move and ability reference of a creature
    ///
    /// Moves keep their learned order, followed by the default maneuvers at
    /// the lowest rank. Abilities come in slot order: regular, hidden, event.
    pub fn resolve(&self, creature: Creature) -> Result<CompositeCreature> {
        let mut missing = Vec::new();
        let learned = learned_moves(&creature, self.learnsets, &mut missing)?;

        let mut moves = Vec::new();
        for entry in with_maneuvers(&learned, self.maneuvers) {
            match self.moves.lookup(&entry.name) {
                Some(found) if is_ignored_move(found.id()) => {
                    debug!("Ignoring move {} on {}", entry.name, creature.name);
                }
                Some(found) => moves.push(ResolvedMove {
                    rank: entry.learned,
                    source: found.clone(),
                }),
                None => missing.push(MissingReference::new(&creature, EntityKind::Move, &entry.name)),
            }
        }

        let slots = creature
            .abilities()
            .map(|name| (AbilitySlot::Regular, name))
            .chain(creature.hidden_ability.as_deref().map(|n| (AbilitySlot::Hidden, n)))
            .chain(creature.event_abilities.as_deref().map(|n| (AbilitySlot::Event, n)));

        let mut abilities = Vec::new();
        for (slot, name) in slots {
            match self.abilities.lookup(name) {
                Some(found) => abilities.push(ResolvedAbility {
                    slot,
                    source: found.clone(),
                }),
                None => missing.push(MissingReference::new(&creature, EntityKind::Ability, name)),
            }
        }

        debug!(
            "Resolved {}: {} moves, {} abilities, {} missing",
            creature.name,
            moves.len(),
            abilities.len(),
            missing.len()
        );

        Ok(CompositeCreature {
            creature,
            moves,
            abilities,
            missing,
        })
    }
}
