//! Per-move overrides
//!
//! A few moves roll dice pools the generic fields cannot express. Their
//! fixes live in a declarative table keyed by move `_id`, loaded once per
//! run and applied before validation.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::record::Move;

const EMBEDDED_OVERRIDES: &str = include_str!("../data/move_overrides.json");

/// Field patch for one move
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct MovePatch {
    /// Clear both accuracy dice fields
    pub clear_accuracy: bool,
    /// Clear the damage attribute field
    pub clear_damage: bool,
    pub append_effect: Option<String>,
    pub append_description: Option<String>,
    /// Replacement target
    pub target: Option<String>,
}

impl MovePatch {
    pub fn apply(&self, mv: &mut Move) {
        if self.clear_accuracy {
            mv.accuracy1.clear();
            mv.accuracy2.clear();
        }
        if self.clear_damage {
            mv.damage1.clear();
        }
        if let Some(extra) = &self.append_effect {
            if mv.effect.trim() == "-" {
                mv.effect.clear();
            }
            mv.effect.push_str(extra);
        }
        if let Some(extra) = &self.append_description {
            mv.description.push_str(extra);
        }
        if let Some(target) = &self.target {
            mv.target = target.clone();
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverrideTable {
    patches: BTreeMap<String, MovePatch>,
}

impl OverrideTable {
    /// The table shipped with the crate
    pub fn embedded() -> Result<Self> {
        Self::parse(Path::new("move_overrides.json"), EMBEDDED_OVERRIDES)
    }

    /// Load a replacement table from disk
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::NotFound(path.to_path_buf()));
        }
        let contents = fs::read_to_string(path)?;
        Self::parse(path, &contents)
    }

    /// Load `path` when given, else the embedded table
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::embedded(),
        }
    }

    fn parse(path: &Path, contents: &str) -> Result<Self> {
        serde_json::from_str(contents).map_err(|e| Error::MalformedRecord {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    pub fn get(&self, id: &str) -> Option<&MovePatch> {
        self.patches.get(id)
    }

    pub fn len(&self) -> usize {
        self.patches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    /// Patch `mv` if the table has an entry for it; returns whether it did
    pub fn apply(&self, mv: &mut Move) -> bool {
        match self.patches.get(&mv.id) {
            Some(patch) => {
                patch.apply(mv);
                true
            }
            None => false,
        }
    }
}
