//! Secondary effect groups
//!
//! Ailments are scanned first, then stat changes. Every chance-gated entry
//! becomes its own group; unconditional entries of one kind share a single
//! group, placed where the first of them was found.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::record::{AddedEffects, Ailment, StatChange};
use crate::reference::foundry_ailment;

/// Trigger condition of an effect group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Condition {
    None,
    ChanceDice { amount: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Effect {
    Ailment {
        ailment: String,
        affects: String,
    },
    StatChange {
        stat: String,
        amount: i64,
        affects: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectGroup {
    pub condition: Condition,
    pub effects: Vec<Effect>,
}

/// Collects groups while tracking the shared unconditional group of one kind
struct GroupBuilder {
    groups: Vec<EffectGroup>,
    unconditional: Option<usize>,
}

impl GroupBuilder {
    fn add(&mut self, chance_dice: Option<u32>, effects: Vec<Effect>) {
        if effects.is_empty() {
            return;
        }
        match chance_dice.filter(|&n| n > 0) {
            Some(amount) => self.groups.push(EffectGroup {
                condition: Condition::ChanceDice { amount },
                effects,
            }),
            None => match self.unconditional {
                Some(i) => self.groups[i].effects.extend(effects),
                None => {
                    self.unconditional = Some(self.groups.len());
                    self.groups.push(EffectGroup {
                        condition: Condition::None,
                        effects,
                    });
                }
            },
        }
    }

    /// Start a new effect kind; unconditional entries no longer merge backwards
    fn next_kind(&mut self) {
        self.unconditional = None;
    }
}

/// Build the effect groups of a move
pub fn effect_groups(added: &AddedEffects) -> Vec<EffectGroup> {
    let mut builder = GroupBuilder {
        groups: Vec::new(),
        unconditional: None,
    };

    for ailment in &added.ailments {
        builder.add(ailment.chance_dice, ailment_effect(ailment).into_iter().collect());
    }

    builder.next_kind();
    for change in &added.stat_changes {
        builder.add(change.chance_dice, stat_effects(change));
    }

    builder.groups
}

fn ailment_effect(ailment: &Ailment) -> Option<Effect> {
    let Some(name) = foundry_ailment(&ailment.ailment_type) else {
        debug!("Skipping unsupported ailment '{}'", ailment.ailment_type);
        return None;
    };
    Some(Effect::Ailment {
        ailment: name.to_string(),
        affects: ailment.affects.to_lowercase(),
    })
}

fn stat_effects(change: &StatChange) -> Vec<Effect> {
    change
        .stats
        .iter()
        .map(|stat| Effect::StatChange {
            stat: stat_name(stat),
            amount: change.stages,
            affects: change.affects.to_lowercase(),
        })
        .collect()
}

/// Foundry name of a dataset stat: camel-cased, with accuracy renamed
pub fn stat_name(stat: &str) -> String {
    let mut chars = stat.chars();
    let camel = match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    };
    if camel == "accuracy" {
        "accuracyMod".to_string()
    } else {
        camel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn added(value: serde_json::Value) -> AddedEffects {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_two_gated_ailments_then_unconditional_stat() {
        let effects = added(json!({
            "Ailments": [
                { "Type": "Burn", "Affects": "Targets", "ChanceDice": 2 },
                { "Type": "Paralyze", "Affects": "Targets", "ChanceDice": 3 }
            ],
            "StatChanges": [
                { "Stats": ["Defense"], "Stages": -1, "Affects": "Targets" }
            ]
        }));

        let groups = effect_groups(&effects);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].condition, Condition::ChanceDice { amount: 2 });
        assert_eq!(groups[1].condition, Condition::ChanceDice { amount: 3 });
        assert_eq!(groups[2].condition, Condition::None);
        assert_eq!(
            groups[2].effects,
            vec![Effect::StatChange {
                stat: "defense".to_string(),
                amount: -1,
                affects: "targets".to_string(),
            }]
        );
    }

    #[test]
    fn test_unconditional_entries_merge_per_kind() {
        let effects = added(json!({
            "Ailments": [
                { "Type": "Confuse", "Affects": "User" },
                { "Type": "Flinch", "Affects": "Targets", "ChanceDice": 1 },
                { "Type": "Sleep", "Affects": "User", "ChanceDice": 0 }
            ],
            "StatChanges": [
                { "Stats": ["Strength", "Accuracy"], "Stages": 1, "Affects": "User" },
                { "Stats": ["Special"], "Stages": 2, "Affects": "User" }
            ]
        }));

        let groups = effect_groups(&effects);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].condition, Condition::None);
        assert_eq!(groups[0].effects.len(), 2);
        assert_eq!(groups[1].condition, Condition::ChanceDice { amount: 1 });
        assert_eq!(groups[2].effects.len(), 3);
        assert!(matches!(
            &groups[2].effects[1],
            Effect::StatChange { stat, .. } if stat == "accuracyMod"
        ));
    }

    #[test]
    fn test_unknown_ailment_skipped() {
        let effects = added(json!({
            "Ailments": [{ "Type": "Petrify", "Affects": "Targets", "ChanceDice": 2 }]
        }));
        assert!(effect_groups(&effects).is_empty());
    }

    #[test]
    fn test_serialized_shape() {
        let effects = added(json!({
            "Ailments": [{ "Type": "BadlyPoison", "Affects": "Targets", "ChanceDice": 2 }]
        }));
        let value = serde_json::to_value(effect_groups(&effects)).unwrap();
        assert_eq!(
            value,
            json!([{
                "condition": { "type": "chanceDice", "amount": 2 },
                "effects": [{ "type": "ailment", "ailment": "badlyPoisoned", "affects": "targets" }]
            }])
        );
    }

    #[test]
    fn test_stat_name() {
        assert_eq!(stat_name("SpecialDefense"), "specialDefense");
        assert_eq!(stat_name("Accuracy"), "accuracyMod");
        assert_eq!(stat_name(""), "");
    }
}
