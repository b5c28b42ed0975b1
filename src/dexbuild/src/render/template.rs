//! Body templates
//!
//! Templates use `{field}` placeholders. `{{` and `}}` stand for literal
//! braces. A placeholder with no value is an error rather than an empty
//! string so template typos surface immediately.

use crate::error::{Error, Result};
use crate::kind::EntityKind;
use crate::transform::document::TemplateVars;

const CREATURE: &str = include_str!("../../templates/creature.md");
const MOVE: &str = include_str!("../../templates/move.md");
const ABILITY: &str = include_str!("../../templates/ability.md");
const ITEM: &str = include_str!("../../templates/item.md");
const NATURE: &str = include_str!("../../templates/nature.md");
const LEARNSET: &str = include_str!("../../templates/learnset.md");

/// Embedded body template of a kind
pub fn body_template(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Creature => CREATURE,
        EntityKind::Move => MOVE,
        EntityKind::Ability => ABILITY,
        EntityKind::Item => ITEM,
        EntityKind::Nature => NATURE,
        EntityKind::Learnset => LEARNSET,
    }
}

/// Substitute `vars` into `template`
pub fn render(template: &str, vars: &TemplateVars) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(ch) => name.push(ch),
                        None => {
                            return Err(Error::Template(format!(
                                "unclosed placeholder '{{{}'",
                                name
                            )))
                        }
                    }
                }
                let value = vars.get(name.as_str()).ok_or_else(|| {
                    Error::Template(format!("unknown placeholder '{{{}}}'", name))
                })?;
                out.push_str(value);
            }
            '}' => return Err(Error::Template("unmatched '}'".to_string())),
            _ => out.push(c),
        }
    }

    Ok(out)
}
