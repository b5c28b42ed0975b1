//! Vault document rendering
//!
//! ```text
//! ---
//! <front matter as YAML, keys sorted>
//! ---
//!
//! #<tag>/<Kind>
//!
//! <body>
//! ```

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::render::template::{body_template, render};
use crate::transform::document::Document;

const FENCE: &str = "---\n";

/// Render a transformed document to its file contents
pub fn render_document(doc: &Document, tag: &str) -> Result<String> {
    let yaml = serde_yaml::to_string(&doc.front_matter)?;
    let body = render(body_template(doc.kind), &doc.vars)?;
    Ok(format!(
        "{}{}{}\n#{}/{}\n\n{}",
        FENCE,
        yaml,
        FENCE,
        tag,
        doc.kind.source_dir(),
        body
    ))
}

/// Parse the front matter block back out of a rendered document
pub fn parse_front_matter(contents: &str) -> Result<Map<String, Value>> {
    let missing = || Error::Template("document has no front matter block".to_string());

    let rest = contents.strip_prefix(FENCE).ok_or_else(missing)?;
    let end = rest.find("\n---\n").ok_or_else(missing)?;
    let yaml = &rest[..=end];
    Ok(serde_yaml::from_str(yaml)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExportConfig;
    use crate::kind::EntityKind;
    use crate::record::fixtures::{ability, creature, record, simple_move};
    use crate::record::EntityRecord;
    use crate::transform::document::DocumentTransformer;
    use crate::transform::learnset::with_maneuvers;
    use serde_json::json;

    fn assert_round_trip(doc: &Document) {
        let text = render_document(doc, "PokeroleSRD").unwrap();
        let parsed = parse_front_matter(&text).unwrap();
        assert_eq!(parsed, doc.front_matter, "{} front matter", doc.file_name);
    }

    #[test]
    fn test_layout() {
        let config = ExportConfig::default();
        let doc = DocumentTransformer::new(&config)
            .entity(EntityKind::Ability, &ability("overgrow", "Overgrow"))
            .unwrap();
        let text = render_document(&doc, "PokeroleSRD").unwrap();

        assert!(text.starts_with("---\n"));
        assert!(text.contains("\n---\n\n#PokeroleSRD/Abilities\n\n## Overgrow\n"));
        // Keys come out sorted
        let description = text.find("Description:").unwrap();
        let effect = text.find("Effect:").unwrap();
        let name = text.find("Name:").unwrap();
        assert!(description < effect && effect < name);
    }

    #[test]
    fn test_round_trip_every_kind() {
        let config = ExportConfig::default();
        let transformer = DocumentTransformer::new(&config);

        let entities: Vec<(EntityKind, EntityRecord)> = vec![
            (EntityKind::Move, simple_move("tackle", "Tackle")),
            (EntityKind::Ability, ability("overgrow", "Overgrow")),
            (
                EntityKind::Item,
                record(json!({
                    "_id": "potion", "Name": "Potion", "Description": "Heals: 20 HP.",
                    "TrainerPrice": "300", "PMDPrice": null, "Source": "Core",
                    "ItemSprite": "SRD-potion-ItemSprite.png"
                })),
            ),
            (
                EntityKind::Nature,
                record(json!({
                    "_id": "hardy", "Name": "Hardy", "Nature": "Hardy", "Confidence": 9,
                    "Keywords": "Determined, Hard Working", "Description": "#1 at trying."
                })),
            ),
        ];
        for (kind, entity) in &entities {
            assert_round_trip(&transformer.entity(*kind, entity).unwrap());
        }

        let learnset = record(json!({
            "_id": "bulbasaur", "Name": "Bulbasaur",
            "Moves": [{"Learned": "Starter", "Name": "Tackle"}, {"Learned": "Ace", "Name": "Solar Beam"}]
        }));
        assert_round_trip(&transformer.learnset(&learnset).unwrap());

        let moves = with_maneuvers(&[], &config.foundry.maneuvers);
        let doc = transformer
            .creature(&creature("bulbasaur", "Bulbasaur"), &moves)
            .unwrap();
        assert_round_trip(&doc);
    }

    #[test]
    fn test_missing_front_matter() {
        assert!(parse_front_matter("# Just a note\n").is_err());
        assert!(parse_front_matter("---\nName: x\n").is_err());
    }
}
