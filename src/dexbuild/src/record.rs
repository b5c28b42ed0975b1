//! Source records
//!
//! [`EntityRecord`] is the loosely-typed form every file is loaded into. The
//! typed records below are schema-checked views of it; each keeps unknown
//! fields in an `extra` bucket so dataset additions survive a round trip.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::kind::EntityKind;

/// Field holding the canonical identifier of every record
pub const ID_FIELD: &str = "_id";

/// Field holding the human-readable name of every record
pub const NAME_FIELD: &str = "Name";

/// One source row, keyed by field name
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityRecord(Map<String, Value>);

impl EntityRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Canonical identifier used for cross-file linkage
    pub fn id(&self) -> Option<&str> {
        self.0.get(ID_FIELD).and_then(Value::as_str)
    }

    /// Name used for generated file and key naming
    pub fn name(&self) -> Option<&str> {
        self.0.get(NAME_FIELD).and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }

    /// Deserialize into one of the typed records
    pub fn to_typed<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_value(Value::Object(self.0.clone()))
    }
}

impl From<Map<String, Value>> for EntityRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Check that a record matches the typed schema of its kind
pub fn check_schema(kind: EntityKind, record: &EntityRecord) -> serde_json::Result<()> {
    match kind {
        EntityKind::Creature => record.to_typed::<Creature>().map(drop),
        EntityKind::Move => record.to_typed::<Move>().map(drop),
        EntityKind::Ability => record.to_typed::<Ability>().map(drop),
        EntityKind::Item => record.to_typed::<Item>().map(drop),
        EntityKind::Nature => record.to_typed::<Nature>().map(drop),
        EntityKind::Learnset => record.to_typed::<Learnset>().map(drop),
    }
}

/// A reference to a move together with the rank it is learned at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LearnedMove {
    pub learned: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Height {
    #[serde(default)]
    pub feet: f64,
    #[serde(default)]
    pub meters: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Weight {
    #[serde(default)]
    pub pounds: f64,
    #[serde(default)]
    pub kilograms: f64,
}

/// A creature (Pokedex entry)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Creature {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub number: Value,
    #[serde(rename = "DexID", default)]
    pub dex_id: Value,
    pub type1: String,
    #[serde(default)]
    pub type2: String,
    #[serde(rename = "BaseHP", deserialize_with = "de::int")]
    pub base_hp: i64,
    #[serde(deserialize_with = "de::int")]
    pub strength: i64,
    #[serde(deserialize_with = "de::int")]
    pub max_strength: i64,
    #[serde(deserialize_with = "de::int")]
    pub dexterity: i64,
    #[serde(deserialize_with = "de::int")]
    pub max_dexterity: i64,
    #[serde(deserialize_with = "de::int")]
    pub vitality: i64,
    #[serde(deserialize_with = "de::int")]
    pub max_vitality: i64,
    #[serde(deserialize_with = "de::int")]
    pub special: i64,
    #[serde(deserialize_with = "de::int")]
    pub max_special: i64,
    #[serde(deserialize_with = "de::int")]
    pub insight: i64,
    #[serde(deserialize_with = "de::int")]
    pub max_insight: i64,
    #[serde(default, deserialize_with = "de::non_empty")]
    pub ability1: Option<String>,
    #[serde(default, deserialize_with = "de::non_empty")]
    pub ability2: Option<String>,
    #[serde(default, deserialize_with = "de::non_empty")]
    pub hidden_ability: Option<String>,
    #[serde(default, deserialize_with = "de::non_empty")]
    pub event_abilities: Option<String>,
    #[serde(default)]
    pub recommended_rank: String,
    #[serde(default)]
    pub good_starter: bool,
    #[serde(default)]
    pub legendary: bool,
    #[serde(default)]
    pub dex_category: String,
    #[serde(default)]
    pub dex_description: String,
    #[serde(default)]
    pub height: Height,
    #[serde(default)]
    pub weight: Weight,
    #[serde(default)]
    pub image: String,
    /// Learned moves; absent when the creature relies on a separate learnset
    #[serde(default)]
    pub moves: Option<Vec<LearnedMove>>,
    #[serde(default)]
    pub evolutions: Vec<Map<String, Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Creature {
    /// Health pool: Vitality + BaseHP. Never read from a stored aggregate.
    pub fn health(&self) -> i64 {
        self.vitality + self.base_hp
    }

    /// Willpower pool
    pub fn will(&self) -> i64 {
        self.insight + 2
    }

    /// Regular abilities in slot order
    pub fn abilities(&self) -> impl Iterator<Item = &str> {
        [&self.ability1, &self.ability2]
            .into_iter()
            .filter_map(|a| a.as_deref())
    }
}

/// A move
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Move {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "Type")]
    pub move_type: String,
    #[serde(alias = "DmgType")]
    pub category: String,
    pub target: String,
    #[serde(default)]
    pub power: Value,
    #[serde(default)]
    pub accuracy1: String,
    #[serde(default)]
    pub accuracy2: String,
    #[serde(default)]
    pub damage1: String,
    #[serde(default)]
    pub damage2: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub effect: String,
    #[serde(default, deserialize_with = "de::object")]
    pub attributes: Map<String, Value>,
    #[serde(default, deserialize_with = "de::default_on_null")]
    pub added_effects: AddedEffects,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Secondary effects of a move
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AddedEffects {
    #[serde(default)]
    pub ailments: Vec<Ailment>,
    #[serde(default)]
    pub stat_changes: Vec<StatChange>,
    #[serde(default, deserialize_with = "de::object")]
    pub heal: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Ailment {
    #[serde(rename = "Type")]
    pub ailment_type: String,
    #[serde(default)]
    pub affects: String,
    #[serde(default)]
    pub chance_dice: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StatChange {
    #[serde(default)]
    pub stats: Vec<String>,
    #[serde(default)]
    pub stages: i64,
    #[serde(default)]
    pub affects: String,
    #[serde(default)]
    pub chance_dice: Option<u32>,
}

/// An ability
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Ability {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub effect: String,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Item {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub trainer_price: Value,
    #[serde(default)]
    pub source: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Item {
    /// Trainer price when it is a whole number
    pub fn numeric_price(&self) -> Option<i64> {
        match &self.trainer_price {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// A nature
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Nature {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub confidence: Value,
    #[serde(default)]
    pub keywords: Value,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A stand-alone learnset for one creature
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Learnset {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub moves: Vec<LearnedMove>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Lenient field deserializers for hand-authored data
mod de {
    use super::*;

    /// Integer that may be stored as a number or a numeric string
    pub fn int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .ok_or_else(|| serde::de::Error::custom(format!("invalid integer {}", n))),
            Value::String(s) => s
                .trim()
                .parse()
                .map_err(|_| serde::de::Error::custom(format!("invalid integer '{}'", s))),
            other => Err(serde::de::Error::custom(format!(
                "expected integer, got {}",
                other
            ))),
        }
    }

    /// Empty strings and nulls both mean "absent"
    pub fn non_empty<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value.filter(|s| !s.trim().is_empty()))
    }

    /// Object that may be written as `null`
    pub fn object<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Map<String, Value>, D::Error> {
        Ok(Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
    }

    pub fn default_on_null<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + Default,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_accessors() {
        let record = creature("bulbasaur", "Bulbasaur");
        assert_eq!(record.id(), Some("bulbasaur"));
        assert_eq!(record.name(), Some("Bulbasaur"));
        assert!(record.contains("BaseHP"));
    }

    #[test]
    fn test_creature_typed() {
        let creature: Creature = creature("bulbasaur", "Bulbasaur").to_typed().unwrap();
        assert_eq!(creature.health(), 5);
        assert_eq!(creature.will(), 4);
        assert_eq!(creature.ability2, None);
        assert_eq!(creature.hidden_ability.as_deref(), Some("Chlorophyll"));
        assert_eq!(creature.abilities().collect::<Vec<_>>(), vec!["Overgrow"]);
        assert_eq!(creature.moves.as_ref().map(Vec::len), Some(3));
    }

    #[test]
    fn test_numeric_strings_accepted() {
        let mut record = creature("bulbasaur", "Bulbasaur");
        record.insert("BaseHP", "4");
        let creature: Creature = record.to_typed().unwrap();
        assert_eq!(creature.base_hp, 4);
    }

    #[test]
    fn test_unknown_fields_kept() {
        let mut record = simple_move("tackle", "Tackle");
        record.insert("Contest", json!({ "Appeal": 4 }));
        let mv: Move = record.to_typed().unwrap();
        assert_eq!(mv.extra.get("Contest"), Some(&json!({ "Appeal": 4 })));
    }

    #[test]
    fn test_legacy_category_alias() {
        let mut record = simple_move("tackle", "Tackle");
        let category = record.remove("Category").unwrap();
        record.insert("DmgType", category);
        let mv: Move = record.to_typed().unwrap();
        assert_eq!(mv.category, "Physical");
    }

    #[test]
    fn test_item_price() {
        let item: Item = record(json!({"_id": "potion", "Name": "Potion", "TrainerPrice": "300"}))
            .to_typed()
            .unwrap();
        assert_eq!(item.numeric_price(), Some(300));

        let item: Item = record(json!({"_id": "x", "Name": "X", "TrainerPrice": "Rare"}))
            .to_typed()
            .unwrap();
        assert_eq!(item.numeric_price(), None);
    }

    #[test]
    fn test_check_schema_rejects_missing_fields() {
        let record = record(json!({"_id": "tackle", "Name": "Tackle"}));
        assert!(check_schema(EntityKind::Move, &record).is_err());
        assert!(check_schema(EntityKind::Ability, &record).is_ok());
    }
}
