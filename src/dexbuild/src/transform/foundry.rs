//! Foundry pack records
//!
//! Builds the JSON documents the Pokerole Foundry system imports. Enumerated
//! fields are lower-cased, dice pools are validated against the reference
//! tables and every record gets a content-derived `_id`.

use serde_json::{json, Map, Value};

use crate::config::ExportConfig;
use crate::error::{Error, Result};
use crate::id::content_id;
use crate::kind::EntityKind;
use crate::record::{Ability, Creature, Item, Move};
use crate::reference::{
    is_attribute, is_skill, is_target, CREATURE_SKILLS, MOVE_ATTRIBUTES, SOCIAL_ATTRIBUTES,
};
use crate::resolve::AbilitySlot;
use crate::transform::effects::effect_groups;

const TYPELESS: &str = "typeless";
const NO_TYPE: &str = "none";

/// Accuracy and damage pools of a move, split on `/`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DicePools {
    pub acc_attr: (String, String),
    pub acc_skill: (String, String),
    pub dmg_mod: (String, String),
}

impl DicePools {
    /// Split and validate the dice fields of a move
    pub fn from_move(mv: &Move) -> Result<Self> {
        let pools = Self {
            acc_attr: split_pool(&mv.accuracy1),
            acc_skill: split_pool(&mv.accuracy2),
            dmg_mod: split_pool(&mv.damage1),
        };

        let checks: [(&'static str, &str, fn(&str) -> bool); 6] = [
            ("accAttr1", pools.acc_attr.0.as_str(), is_attribute),
            ("accAttr1var", pools.acc_attr.1.as_str(), is_attribute),
            ("accSkill1", pools.acc_skill.0.as_str(), is_skill),
            ("accSkill1var", pools.acc_skill.1.as_str(), is_skill),
            ("dmgMod1", pools.dmg_mod.0.as_str(), is_attribute),
            ("dmgMod1var", pools.dmg_mod.1.as_str(), is_attribute),
        ];
        for (field, value, valid) in checks {
            if !value.is_empty() && !valid(value) {
                return Err(invalid_move(mv, field, value));
            }
        }

        Ok(pools)
    }
}

fn split_pool(field: &str) -> (String, String) {
    let lower = field.trim().to_lowercase();
    match lower.split_once('/') {
        Some((main, variant)) => (main.trim().to_string(), variant.trim().to_string()),
        None => (lower, String::new()),
    }
}

fn invalid_move(mv: &Move, field: &'static str, value: &str) -> Error {
    Error::Validation {
        kind: EntityKind::Move,
        entity: mv.name.clone(),
        field,
        value: value.to_string(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn pool(value: i64, max: i64) -> Value {
    json!({ "value": value, "min": 0, "max": max })
}

/// Turns typed records into Foundry pack records
pub struct FoundryTransformer<'a> {
    config: &'a ExportConfig,
}

impl<'a> FoundryTransformer<'a> {
    pub fn new(config: &'a ExportConfig) -> Self {
        Self { config }
    }

    pub fn id(&self, source_id: &str) -> String {
        content_id(&self.config.foundry.hash_key, source_id)
    }

    fn stats(&self, kind: EntityKind) -> Value {
        let foundry = &self.config.foundry;
        json!({
            "systemId": "pokerole",
            "systemVersion": foundry.system_version,
            "coreVersion": foundry.core_version,
            "createdTime": kind.created_time(),
            "modifiedTime": foundry.modified_time,
            "lastModifiedBy": "Generator",
        })
    }

    /// Foundry type of a move, with the typeless mapping applied
    pub fn move_type(&self, mv: &Move) -> String {
        let lower = mv.move_type.to_lowercase();
        if lower == TYPELESS {
            self.config.foundry.typeless.to_lowercase()
        } else {
            lower
        }
    }

    /// Build a move record; `rank` is set when the move belongs to a creature
    pub fn move_record(&self, mv: &Move, rank: Option<&str>) -> Result<Value> {
        if !is_target(&mv.target) {
            return Err(invalid_move(mv, "target", &mv.target));
        }
        let pools = DicePools::from_move(mv)?;
        let heal = self.heal(mv)?;

        let move_type = self.move_type(mv);
        let img = if move_type == NO_TYPE {
            "systems/pokerole/images/types/normal.svg".to_string()
        } else {
            format!("systems/pokerole/images/types/{}.svg", move_type)
        };
        let effect = if mv.effect.trim() == "-" { "" } else { mv.effect.as_str() };

        let mut attributes = Map::new();
        for attr in MOVE_ATTRIBUTES {
            let value = mv
                .attributes
                .get(attr.dataset)
                .filter(|v| is_truthy(v))
                .cloned()
                .unwrap_or_else(|| attr.default_value());
            attributes.insert(attr.foundry.to_string(), value);
        }
        attributes.insert("maneuver".to_string(), Value::Bool(move_type == NO_TYPE));

        let mut system = json!({
            "description": mv.description,
            "type": move_type,
            "category": mv.category.to_lowercase(),
            "target": mv.target,
            "power": mv.power,
            "accAttr1": pools.acc_attr.0,
            "accAttr1var": pools.acc_attr.1,
            "accSkill1": pools.acc_skill.0,
            "accSkill1var": pools.acc_skill.1,
            "dmgMod1": pools.dmg_mod.0,
            "dmgMod1var": pools.dmg_mod.1,
            "effect": effect,
            "effectGroups": effect_groups(&mv.added_effects),
            "source": self.config.display_version(),
            "attributes": attributes,
            "heal": heal,
        });
        if let (Some(rank), Some(obj)) = (rank, system.as_object_mut()) {
            obj.insert("rank".to_string(), Value::from(rank.to_lowercase()));
        }

        Ok(json!({
            "_id": self.id(&mv.id),
            "name": mv.name,
            "type": "move",
            "img": img,
            "system": system,
            "effects": [],
            "flags": {},
            "folder": null,
            "sort": 100001,
            "_stats": self.stats(EntityKind::Move),
        }))
    }

    fn heal(&self, mv: &Move) -> Result<Value> {
        let heal = &mv.added_effects.heal;
        if heal.is_empty() {
            return Ok(json!({ "type": "none" }));
        }

        let field = |key: &str| heal.get(key).and_then(Value::as_str).filter(|s| !s.is_empty());
        let (Some(heal_type), Some(target)) = (field("Type"), field("Target")) else {
            return Err(invalid_move(mv, "heal", &Value::Object(heal.clone()).to_string()));
        };

        let mut converted = Map::new();
        converted.insert("type".to_string(), Value::from(heal_type.to_lowercase()));
        converted.insert("target".to_string(), Value::from(target.to_lowercase()));
        let cost = heal
            .get("WillPointCost")
            .filter(|v| is_truthy(v))
            .cloned()
            .unwrap_or_else(|| Value::from(0));
        converted.insert("willPointCost".to_string(), cost);
        if let Some(percentage) = heal.get("Percentage").filter(|v| is_truthy(v)) {
            converted.insert("amount".to_string(), percentage.clone());
        }
        Ok(Value::Object(converted))
    }

    pub fn ability_record(&self, ability: &Ability, slot: AbilitySlot) -> Value {
        json!({
            "_id": self.id(&ability.id),
            "name": format!("{}{}", ability.name, slot.name_suffix()),
            "type": "ability",
            "img": "icons/svg/book.svg",
            "system": {
                "description": format!("<p>{}</p><p>{}</p>", ability.effect, ability.description),
            },
            "effects": [],
            "source": self.config.display_version(),
            "flags": {},
            "_stats": self.stats(EntityKind::Ability),
        })
    }

    pub fn item_record(&self, item: &Item) -> Value {
        let sprite = self
            .config
            .images_dir()
            .join("ItemSprites")
            .join(format!("{}.png", item.id));
        let img = if sprite.is_file() {
            format!("systems/pokerole/images/items/{}.png", item.id)
        } else {
            "icons/svg/item-bag.svg".to_string()
        };

        json!({
            "_id": self.id(&item.id),
            "name": item.name,
            "type": "item",
            "img": img,
            "system": {
                "description": format!("<p>{}</p>", item.description),
                "price": item.numeric_price(),
            },
            "effects": [],
            "source": item.source,
            "flags": {},
            "_stats": self.stats(EntityKind::Item),
        })
    }

    /// Build a creature actor; `items` are its move and ability records
    pub fn creature_record(&self, creature: &Creature, items: Vec<Value>) -> Value {
        let foundry = &self.config.foundry;
        let sheet_img = format!(
            "systems/pokerole/images/pokemon/{}/{}",
            foundry.sheet_image.folder(),
            creature.image
        );
        let token_img = format!(
            "systems/pokerole/images/pokemon/{}/{}",
            foundry.token_image.folder(),
            creature.image
        );

        let social: Map<String, Value> = SOCIAL_ATTRIBUTES
            .iter()
            .map(|name| (name.to_string(), pool(1, 5)))
            .collect();
        let skills: Map<String, Value> = CREATURE_SKILLS
            .iter()
            .map(|name| (name.to_string(), pool(0, 5)))
            .collect();

        json!({
            "_id": self.id(&creature.id),
            "name": creature.name,
            "type": "pokemon",
            "img": sheet_img,
            "system": {
                "hp": pool(creature.health(), creature.health()),
                "will": pool(creature.will(), creature.will()),
                "baseHp": creature.base_hp,
                "rank": "none",
                "recommendedRank": creature.recommended_rank.to_lowercase(),
                "personality": "hardy",
                "confidence": 0,
                "attributes": {
                    "strength": pool(creature.strength, creature.max_strength),
                    "dexterity": pool(creature.dexterity, creature.max_dexterity),
                    "vitality": pool(creature.vitality, creature.max_vitality),
                    "special": pool(creature.special, creature.max_special),
                    "insight": pool(creature.insight, creature.max_insight),
                },
                "social": social,
                "skills": skills,
                "biography": "",
                "battles": 0,
                "victories": 0,
                "pokedexId": creature.number,
                "species": creature.name,
                "pokedexCategory": creature.dex_category,
                "pokedexDescription": creature.dex_description,
                "type1": creature.type1.to_lowercase(),
                "type2": creature.type2.to_lowercase(),
                "height": creature.height.meters,
                "weight": creature.weight.kilograms,
                "extra": {
                    "happiness": pool(2, 5),
                    "loyalty": pool(2, 5),
                },
                "source": self.config.display_version(),
            },
            "prototypeToken": prototype_token(&creature.name, &token_img),
            "items": items,
            "effects": [],
            "flags": {},
            "_stats": self.stats(EntityKind::Creature),
        })
    }
}

fn prototype_token(name: &str, texture: &str) -> Value {
    json!({
        "name": name,
        "displayName": 0,
        "actorLink": false,
        "texture": {
            "src": texture,
            "scaleX": 1,
            "scaleY": 1,
            "offsetX": 0,
            "offsetY": 0,
            "rotation": 0,
            "tint": null,
        },
        "width": 1,
        "height": 1,
        "lockRotation": false,
        "rotation": 0,
        "alpha": 1,
        "disposition": -1,
        "displayBars": 0,
        "bar1": { "attribute": "hp" },
        "bar2": { "attribute": "will" },
        "light": {
            "alpha": 0.5,
            "angle": 360,
            "bright": 0,
            "color": null,
            "coloration": 1,
            "dim": 0,
            "attenuation": 0.5,
            "luminosity": 0.5,
            "saturation": 0,
            "contrast": 0,
            "shadows": 0,
            "animation": { "type": null, "speed": 5, "intensity": 5, "reverse": false },
            "darkness": { "min": 0, "max": 1 },
        },
        "sight": {
            "enabled": false,
            "range": null,
            "angle": 360,
            "visionMode": "basic",
            "color": null,
            "attenuation": 0.1,
            "brightness": 0,
            "saturation": 0,
            "contrast": 0,
        },
        "detectionModes": [],
        "flags": {},
        "randomImg": false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::fixtures::{ability, creature, record, simple_move};
    use tempfile::TempDir;

    fn typed_move(value: serde_json::Value) -> Move {
        let mut base = simple_move("tackle", "Tackle");
        if let Value::Object(fields) = value {
            for (k, v) in fields {
                base.insert(k, v);
            }
        }
        base.to_typed().unwrap()
    }

    #[test]
    fn test_move_record_fields() {
        let config = ExportConfig::default();
        let transformer = FoundryTransformer::new(&config);
        let mv = typed_move(json!({ "Attributes": { "Priority": 1, "FistBased": true } }));

        let record = transformer.move_record(&mv, None).unwrap();
        assert_eq!(record["_id"], Value::from(content_id("pokerole", "tackle")));
        assert_eq!(record["img"], "systems/pokerole/images/types/normal.svg");
        let system = &record["system"];
        assert_eq!(system["type"], "normal");
        assert_eq!(system["category"], "physical");
        assert_eq!(system["accAttr1"], "dexterity");
        assert_eq!(system["accAttr1var"], "");
        assert_eq!(system["accSkill1"], "brawl");
        assert_eq!(system["dmgMod1"], "strength");
        assert_eq!(system["effect"], "");
        assert_eq!(system["source"], "Core v3.0");
        assert_eq!(system["heal"], json!({ "type": "none" }));
        assert_eq!(system["attributes"]["priority"], 1);
        assert_eq!(system["attributes"]["fistBased"], true);
        assert_eq!(system["attributes"]["lethal"], false);
        assert_eq!(system["attributes"]["accuracyReduction"], 0);
        assert_eq!(system["attributes"]["maneuver"], false);
        assert_eq!(system["attributes"].as_object().unwrap().len(), 23);
        assert!(system.get("rank").is_none());
        assert_eq!(record["_stats"]["createdTime"], 1670525752873i64);
        assert_eq!(record["_stats"]["modifiedTime"], config.foundry.modified_time);
    }

    #[test]
    fn test_move_rank_and_split_pools() {
        let config = ExportConfig::default();
        let transformer = FoundryTransformer::new(&config);
        let mv = typed_move(json!({ "Accuracy1": "Strength/Special", "Damage1": "Special/Strength" }));

        let record = transformer.move_record(&mv, Some("Beginner")).unwrap();
        assert_eq!(record["system"]["accAttr1"], "strength");
        assert_eq!(record["system"]["accAttr1var"], "special");
        assert_eq!(record["system"]["dmgMod1var"], "strength");
        assert_eq!(record["system"]["rank"], "beginner");
    }

    #[test]
    fn test_invalid_pools_rejected() {
        let config = ExportConfig::default();
        let transformer = FoundryTransformer::new(&config);

        let mv = typed_move(json!({ "Accuracy1": "Luck" }));
        let err = transformer.move_record(&mv, None).unwrap_err();
        assert!(matches!(err, Error::Validation { field: "accAttr1", .. }));
        assert!(err.is_entity_local());

        let mv = typed_move(json!({ "Accuracy2": "Strength" }));
        assert!(matches!(
            transformer.move_record(&mv, None),
            Err(Error::Validation { field: "accSkill1", .. })
        ));

        let mv = typed_move(json!({ "Damage1": "Strength/Brawl" }));
        assert!(matches!(
            transformer.move_record(&mv, None),
            Err(Error::Validation { field: "dmgMod1var", .. })
        ));

        let mv = typed_move(json!({ "Target": "Everyone" }));
        assert!(matches!(
            transformer.move_record(&mv, None),
            Err(Error::Validation { field: "target", .. })
        ));
    }

    #[test]
    fn test_typeless_mapping() {
        let mut config = ExportConfig::default();
        let mv = typed_move(json!({ "Type": "Typeless" }));

        let record = FoundryTransformer::new(&config).move_record(&mv, None).unwrap();
        assert_eq!(record["system"]["type"], "none");
        assert_eq!(record["system"]["attributes"]["maneuver"], true);
        assert_eq!(record["img"], "systems/pokerole/images/types/normal.svg");

        config.foundry.typeless = "normal".to_string();
        let record = FoundryTransformer::new(&config).move_record(&mv, None).unwrap();
        assert_eq!(record["system"]["type"], "normal");
        assert_eq!(record["system"]["attributes"]["maneuver"], false);
    }

    #[test]
    fn test_heal_conversion() {
        let config = ExportConfig::default();
        let transformer = FoundryTransformer::new(&config);

        let mv = typed_move(json!({
            "AddedEffects": { "Heal": { "Type": "Basic", "Target": "User", "Percentage": 50 } }
        }));
        let record = transformer.move_record(&mv, None).unwrap();
        assert_eq!(
            record["system"]["heal"],
            json!({ "type": "basic", "target": "user", "willPointCost": 0, "amount": 50 })
        );

        let mv = typed_move(json!({ "AddedEffects": { "Heal": { "Percentage": 50 } } }));
        assert!(matches!(
            transformer.move_record(&mv, None),
            Err(Error::Validation { field: "heal", .. })
        ));
    }

    #[test]
    fn test_ability_record() {
        let config = ExportConfig::default();
        let transformer = FoundryTransformer::new(&config);
        let overgrow: Ability = ability("overgrow", "Overgrow").to_typed().unwrap();

        let record = transformer.ability_record(&overgrow, AbilitySlot::Hidden);
        assert_eq!(record["name"], "Overgrow [Hidden Ability]");
        assert_eq!(record["img"], "icons/svg/book.svg");
        assert_eq!(
            record["system"]["description"],
            "<p>Boosts Grass moves when in a pinch.</p><p>Powers up Grass-type moves.</p>"
        );
    }

    #[test]
    fn test_item_record_image_and_price() {
        let dir = TempDir::new().unwrap();
        let sprites = dir.path().join("images").join("ItemSprites");
        std::fs::create_dir_all(&sprites).unwrap();
        std::fs::write(sprites.join("potion.png"), b"png").unwrap();
        let config = ExportConfig {
            root: dir.path().to_path_buf(),
            ..Default::default()
        };
        let transformer = FoundryTransformer::new(&config);

        let potion: Item = record(json!({
            "_id": "potion", "Name": "Potion", "Description": "Heals.",
            "TrainerPrice": "300", "Source": "Core"
        }))
        .to_typed()
        .unwrap();
        let out = transformer.item_record(&potion);
        assert_eq!(out["img"], "systems/pokerole/images/items/potion.png");
        assert_eq!(out["system"]["price"], 300);
        assert_eq!(out["system"]["description"], "<p>Heals.</p>");
        assert_eq!(out["source"], "Core");

        let relic: Item = record(json!({
            "_id": "relic", "Name": "Relic", "TrainerPrice": "Priceless"
        }))
        .to_typed()
        .unwrap();
        let out = transformer.item_record(&relic);
        assert_eq!(out["img"], "icons/svg/item-bag.svg");
        assert_eq!(out["system"]["price"], Value::Null);
    }

    #[test]
    fn test_creature_record() {
        let mut config = ExportConfig::default();
        config.foundry.token_image = crate::images::ImageStyle::Home;
        let transformer = FoundryTransformer::new(&config);
        let bulbasaur: Creature = creature("bulbasaur", "Bulbasaur").to_typed().unwrap();

        let record = transformer.creature_record(&bulbasaur, vec![json!({ "name": "Tackle" })]);
        assert_eq!(record["type"], "pokemon");
        assert_eq!(record["img"], "systems/pokerole/images/pokemon/book/1.png");
        assert_eq!(
            record["prototypeToken"]["texture"]["src"],
            "systems/pokerole/images/pokemon/home/1.png"
        );
        let system = &record["system"];
        assert_eq!(system["hp"], json!({ "value": 5, "min": 0, "max": 5 }));
        assert_eq!(system["will"], json!({ "value": 4, "min": 0, "max": 4 }));
        assert_eq!(system["attributes"]["strength"], json!({ "value": 2, "min": 0, "max": 4 }));
        assert_eq!(system["social"]["cute"], json!({ "value": 1, "min": 0, "max": 5 }));
        assert_eq!(system["skills"].as_object().unwrap().len(), 12);
        assert_eq!(system["recommendedRank"], "starter");
        assert_eq!(system["type2"], "poison");
        assert_eq!(system["height"], 0.7);
        assert_eq!(system["pokedexId"], 1);
        assert_eq!(record["items"].as_array().unwrap().len(), 1);
        assert_eq!(record["_stats"]["createdTime"], 1670952558737i64);
    }
}
