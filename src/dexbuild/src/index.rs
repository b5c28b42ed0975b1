//! In-memory collection index
//!
//! Every collection a run touches is loaded once into a [`CollectionIndex`].
//! Cross-reference lookups then become map hits instead of directory scans,
//! and a missing reference is a plain lookup miss.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{Error, Result};
use crate::kind::EntityKind;
use crate::loader::load_record;
use crate::record::EntityRecord;
use crate::source::{file_stem, walk_entities, ALL_ENTITIES};

/// A loaded record and the file it came from
#[derive(Debug, Clone)]
pub struct IndexedRecord {
    pub path: PathBuf,
    pub record: EntityRecord,
}

impl IndexedRecord {
    pub fn id(&self) -> &str {
        self.record.id().unwrap_or_default()
    }

    pub fn name(&self) -> &str {
        self.record.name().unwrap_or_default()
    }

    /// Deserialize into the typed record of its kind
    pub fn typed<T: DeserializeOwned>(&self) -> Result<T> {
        self.record.to_typed().map_err(|e| Error::MalformedRecord {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct CollectionIndex {
    kind: EntityKind,
    entries: Vec<IndexedRecord>,
    by_id: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
}

impl CollectionIndex {
    /// Load every entity file of a collection directory
    pub fn build(dir: &Path, kind: EntityKind) -> Result<Self> {
        Self::build_matching(dir, kind, ALL_ENTITIES)
    }

    /// Load the entity files of a collection directory matching `pattern`
    pub fn build_matching(dir: &Path, kind: EntityKind, pattern: &str) -> Result<Self> {
        let mut records = Vec::new();
        walk_entities(dir, pattern, |path| {
            debug!("Loading {} from {}", kind, path.display());
            records.push((path.to_path_buf(), load_record(path)?));
            Ok(())
        })?;

        Self::from_records(kind, records)
    }

    /// Index already-loaded records, rejecting duplicate identifiers
    pub fn from_records(
        kind: EntityKind,
        records: impl IntoIterator<Item = (PathBuf, EntityRecord)>,
    ) -> Result<Self> {
        let mut index = Self {
            kind,
            entries: Vec::new(),
            by_id: HashMap::new(),
            by_name: HashMap::new(),
        };

        for (path, record) in records {
            let id = record.id().unwrap_or_default().to_string();
            if let Some(&existing) = index.by_id.get(&id) {
                return Err(Error::DuplicateIdentifier {
                    kind,
                    id,
                    first: index.entries[existing].path.clone(),
                    second: path,
                });
            }

            let position = index.entries.len();
            index.by_id.insert(id, position);
            if let Some(stem) = file_stem(&path) {
                index.by_name.entry(stem.to_string()).or_insert(position);
            }
            if let Some(name) = record.name() {
                index.by_name.entry(name.to_string()).or_insert(position);
            }
            index.entries.push(IndexedRecord { path, record });
        }

        Ok(index)
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records in source-file order
    pub fn iter(&self) -> impl Iterator<Item = &IndexedRecord> {
        self.entries.iter()
    }

    /// Look up a record by canonical identifier
    pub fn get(&self, id: &str) -> Option<&IndexedRecord> {
        self.by_id.get(id).map(|&i| &self.entries[i])
    }

    /// Look up a record the way references name it: file stem or `Name`
    pub fn lookup(&self, name: &str) -> Option<&IndexedRecord> {
        self.by_name
            .get(name)
            .or_else(|| self.by_id.get(name))
            .map(|&i| &self.entries[i])
    }
}
