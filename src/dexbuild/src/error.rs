//! Error types for the export pipeline

use std::path::PathBuf;

use crate::kind::EntityKind;

/// Errors raised while exporting a collection
///
/// Missing cross-references are not errors: they are reported through
/// [`crate::resolve::MissingReference`] and the batch carries on.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Path {} not found", .0.display())]
    NotFound(PathBuf),

    #[error("Malformed record in {}: {reason}", path.display())]
    MalformedRecord { path: PathBuf, reason: String },

    #[error("Invalid {field} '{value}' in {kind} '{entity}'")]
    Validation {
        kind: EntityKind,
        entity: String,
        field: &'static str,
        value: String,
    },

    #[error("Duplicate {kind} identifier '{id}' ({} and {})", first.display(), second.display())]
    DuplicateIdentifier {
        kind: EntityKind,
        id: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Template error: {0}")]
    Template(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// True for errors that only invalidate a single entity of a batch
    pub fn is_entity_local(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
