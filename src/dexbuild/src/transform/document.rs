//! Vault document transforms
//!
//! Each entity becomes a front matter map (the record itself, minus fields
//! the body renders inline) plus the placeholder values of its body template.
//! Enumerations keep their dataset casing here.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::config::ExportConfig;
use crate::error::{Error, Result};
use crate::images::{document_image_name, ImageSet};
use crate::kind::EntityKind;
use crate::record::{Creature, EntityRecord, LearnedMove, Learnset, ID_FIELD};
use crate::transform::learnset::rows;

/// Fields of a creature rendered in the body instead of the front matter
const CREATURE_INLINE_FIELDS: &[&str] = &[
    "DexID",
    "BaseHP",
    "RecommendedRank",
    "GoodStarter",
    ID_FIELD,
    "Name",
];

/// Creature stats coerced to integers in the front matter
const CREATURE_INTEGER_FIELDS: &[&str] = &[
    "BaseHP",
    "Strength",
    "MaxStrength",
    "Dexterity",
    "MaxDexterity",
    "Vitality",
    "MaxVitality",
    "Special",
    "MaxSpecial",
    "Insight",
    "MaxInsight",
];

/// Sprite front matter fields of a creature and the set they point into
const CREATURE_SPRITES: &[(&str, ImageSet)] = &[
    ("BookSprite", ImageSet::BookSprites),
    ("HomeSprite", ImageSet::HomeSprites),
    ("BoxSprite", ImageSet::BoxSprites),
    ("ShuffleToken", ImageSet::ShuffleTokens),
];

/// Template placeholder values
pub type TemplateVars = BTreeMap<&'static str, String>;

/// A transformed entity ready for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub kind: EntityKind,
    /// File name inside the kind's directory
    pub file_name: String,
    pub front_matter: Map<String, Value>,
    pub vars: TemplateVars,
}

fn display(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn malformed(kind: EntityKind, record: &EntityRecord, err: serde_json::Error) -> Error {
    Error::MalformedRecord {
        path: format!("{}/{}", kind.source_dir(), record.name().unwrap_or_default()).into(),
        reason: err.to_string(),
    }
}

pub struct DocumentTransformer<'a> {
    config: &'a ExportConfig,
}

impl<'a> DocumentTransformer<'a> {
    pub fn new(config: &'a ExportConfig) -> Self {
        Self { config }
    }

    fn prefix(&self) -> &str {
        &self.config.srd.prefix
    }

    /// Directory of one kind inside the SRD folder, e.g. `SRD-Moves`
    pub fn kind_dir(&self, kind: EntityKind) -> String {
        format!("{}-{}", self.prefix(), kind.source_dir())
    }

    /// `[[SRD-Name|Name]]`
    pub fn link(&self, name: &str) -> String {
        format!("[[{}-{}|{}]]", self.prefix(), name, name)
    }

    /// Vault-absolute link to a move document
    pub fn move_link(&self, name: &str) -> String {
        format!(
            "[[{}/{}/{}-{}|{}]]",
            self.config.vault_folder(),
            self.kind_dir(EntityKind::Move),
            self.prefix(),
            name,
            name
        )
    }

    /// Learnset table rows with move links
    pub fn learnset_rows(&self, moves: &[LearnedMove]) -> Value {
        let rows = rows(moves, self.config.srd.learnset_layout, |name| {
            self.move_link(name)
        });
        Value::Array(
            rows.into_iter()
                .map(|row| Value::Array(row.into_iter().map(Value::from).collect()))
                .collect(),
        )
    }

    /// Transform any non-creature entity
    pub fn entity(&self, kind: EntityKind, record: &EntityRecord) -> Result<Document> {
        let name = record.name().unwrap_or_default().to_string();
        let mut front_matter = record.fields().clone();
        front_matter.remove(ID_FIELD);

        let mut vars = TemplateVars::new();
        vars.insert("name", name.clone());
        if kind == EntityKind::Item {
            let image = match record.get_str(ImageSet::ItemSprites.document_suffix()) {
                Some(sprite) if !sprite.is_empty() => format!("![[{}|right]]\n", sprite),
                _ => String::new(),
            };
            vars.insert("image", image);
        }

        Ok(Document {
            kind,
            file_name: format!("{}-{}.md", self.prefix(), name),
            front_matter,
            vars,
        })
    }

    /// Transform a stand-alone learnset record
    pub fn learnset(&self, record: &EntityRecord) -> Result<Document> {
        let learnset: Learnset = record
            .to_typed()
            .map_err(|e| malformed(EntityKind::Learnset, record, e))?;

        let mut front_matter = record.fields().clone();
        front_matter.remove(ID_FIELD);
        front_matter.insert("Species".to_string(), Value::from(self.link(&learnset.name)));
        front_matter.insert("Moves".to_string(), self.learnset_rows(&learnset.moves));

        let mut vars = TemplateVars::new();
        vars.insert("name", learnset.name.clone());

        Ok(Document {
            kind: EntityKind::Learnset,
            file_name: format!("{}-{}-Learnset.md", self.prefix(), learnset.name),
            front_matter,
            vars,
        })
    }

    /// Transform a creature; `learned` already holds the default maneuvers
    pub fn creature(&self, record: &EntityRecord, learned: &[LearnedMove]) -> Result<Document> {
        let creature: Creature = record
            .to_typed()
            .map_err(|e| malformed(EntityKind::Creature, record, e))?;
        let mut entry = record.fields().clone();

        let mut vars = TemplateVars::new();
        for (field, set) in CREATURE_SPRITES {
            let sprite = document_image_name(self.prefix(), &creature.image, set.document_suffix());
            vars.insert(sprite_var(field), sprite.clone());
            entry.insert(field.to_string(), Value::from(sprite));
        }

        let yes_no = |flag: bool| if flag { "Yes" } else { "No" };
        entry.insert("Legendary".to_string(), Value::from(yes_no(creature.legendary)));
        entry.insert("Moves".to_string(), self.learnset_rows(learned));

        let integers = [
            creature.base_hp,
            creature.strength,
            creature.max_strength,
            creature.dexterity,
            creature.max_dexterity,
            creature.vitality,
            creature.max_vitality,
            creature.special,
            creature.max_special,
            creature.insight,
            creature.max_insight,
        ];
        for (field, value) in CREATURE_INTEGER_FIELDS.iter().zip(integers) {
            entry.insert(field.to_string(), Value::from(value));
        }

        let (feet, inches) = split_feet(creature.height.feet);
        let typeline = if creature.type2.is_empty() {
            creature.type1.clone()
        } else {
            format!("{} / {}", creature.type1, creature.type2)
        };

        vars.insert("name", creature.name.clone());
        vars.insert("dexcategory", creature.dex_category.clone());
        vars.insert("dexdescription", creature.dex_description.clone());
        vars.insert("dexid", display(record.get("DexID")));
        vars.insert("typeline", typeline);
        vars.insert("abilities", self.abilities_line(&creature));
        vars.insert("basehp", creature.base_hp.to_string());
        vars.insert("feet", feet);
        vars.insert("inches", inches);
        vars.insert("meters", creature.height.meters.to_string());
        vars.insert("pounds", creature.weight.pounds.to_string());
        vars.insert("kilograms", creature.weight.kilograms.to_string());
        vars.insert("goodstarter", yes_no(creature.good_starter).to_string());
        vars.insert("recommendedrank", creature.recommended_rank.clone());
        vars.insert("evostring", evolution_table(&creature.evolutions, self.prefix()));
        vars.insert(
            "self_in_vault",
            format!(
                "{}/{}/{}-{}.md",
                self.config.vault_folder(),
                self.kind_dir(EntityKind::Creature),
                self.prefix(),
                creature.name
            ),
        );

        for field in CREATURE_INLINE_FIELDS {
            entry.remove(*field);
        }

        Ok(Document {
            kind: EntityKind::Creature,
            file_name: format!("{}-{}.md", self.prefix(), creature.name),
            front_matter: entry,
            vars,
        })
    }

    /// `[[SRD-A|A]] / [[SRD-B|B]] ([[SRD-H|H]]) <[[SRD-E|E]]>`
    fn abilities_line(&self, creature: &Creature) -> String {
        let mut line = creature
            .abilities()
            .map(|a| self.link(a))
            .collect::<Vec<_>>()
            .join(" / ");
        if let Some(hidden) = &creature.hidden_ability {
            line.push_str(&format!(" ({})", self.link(hidden)));
        }
        if let Some(event) = &creature.event_abilities {
            line.push_str(&format!(" <{}>", self.link(event)));
        }
        line
    }
}

fn sprite_var(field: &str) -> &'static str {
    match field {
        "BookSprite" => "booksprite",
        "HomeSprite" => "homesprite",
        "BoxSprite" => "boxsprite",
        _ => "shuffletoken",
    }
}

/// Split a decimal feet value into its feet and inches digits
fn split_feet(feet: f64) -> (String, String) {
    let text = feet.to_string();
    match text.split_once('.') {
        Some((whole, fraction)) => (whole.to_string(), fraction.to_string()),
        None => (text, "0".to_string()),
    }
}

/// Markdown table of a creature's evolutions, or empty when it has none
fn evolution_table(evolutions: &[Map<String, Value>], prefix: &str) -> String {
    if evolutions.is_empty() {
        return String::new();
    }

    let rows: Vec<Map<String, Value>> = evolutions
        .iter()
        .map(|evolution| {
            let mut row = evolution.clone();
            for direction in ["To", "From"] {
                if let Some(target) = row.remove(direction).filter(|v| !v.is_null()) {
                    row.insert(
                        "Pokemon".to_string(),
                        Value::from(format!("[[{}-{}]]", prefix, display(Some(&target)))),
                    );
                    row.insert("Evolves".to_string(), Value::from(direction));
                }
            }
            row
        })
        .collect();

    let mut columns: Vec<String> = vec!["Evolves".into(), "Pokemon".into(), "Kind".into()];
    for row in &rows {
        for key in row.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }

    let mut table = String::from("\n");
    table.push_str(&format!("| {} |\n", columns.join(" | ")));
    table.push_str(&format!(
        "|{}|\n",
        columns.iter().map(|_| ":---").collect::<Vec<_>>().join("|")
    ));
    for row in &rows {
        let cells: Vec<String> = columns.iter().map(|c| display(row.get(c))).collect();
        table.push_str(&format!("| {} |\n", cells.join(" | ")));
    }
    table
}
