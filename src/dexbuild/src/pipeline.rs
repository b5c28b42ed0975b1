//! Export pipeline
//!
//! One run exports one collection to one target:
//!
//! 1. Check that every collection the run reads exists
//! 2. Load those collections into [`CollectionIndex`]es
//! 3. Resolve references, transform and write each entity in file order
//!
//! A missing input directory or a malformed file stops the run while loading,
//! before any output is opened. Validation failures only drop the entity they
//! belong to.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::PathBuf;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::ExportConfig;
use crate::error::{Error, Result};
use crate::index::CollectionIndex;
use crate::kind::EntityKind;
use crate::overrides::OverrideTable;
use crate::record::{check_schema, Ability, Creature, Item};
use crate::reference::is_ignored_move;
use crate::render::{render_document, PackWriter};
use crate::resolve::{learned_moves, typed_move, AbilitySlot, MissingReference, Resolver};
use crate::source::{require_dir, ALL_ENTITIES};
use crate::transform::learnset::with_maneuvers;
use crate::transform::{Document, DocumentTransformer, FoundryTransformer};

/// Output target of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// Foundry system packs
    Foundry,
    /// SRD vault documents
    Documents,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Foundry => write!(f, "foundry"),
            Self::Documents => write!(f, "srd"),
        }
    }
}

/// An entity left out of the output, and why
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntity {
    pub kind: EntityKind,
    pub name: String,
    pub reason: String,
}

/// Outcome of one export run
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub kind: EntityKind,
    pub target: Target,
    /// Entities written
    pub written: usize,
    pub skipped: Vec<SkippedEntity>,
    pub missing: Vec<MissingReference>,
    /// Directory the run wrote into
    pub output_dir: Option<PathBuf>,
    /// Files produced by the run
    pub artifacts: Vec<PathBuf>,
    /// The run was limited to part of its collection by a file pattern
    pub filtered: bool,
}

impl ExportReport {
    fn new(kind: EntityKind, target: Target) -> Self {
        Self {
            kind,
            target,
            written: 0,
            skipped: Vec::new(),
            missing: Vec::new(),
            output_dir: None,
            artifacts: Vec::new(),
            filtered: false,
        }
    }

    /// Record an entity-local error, or hand back any other error
    fn skip(&mut self, kind: EntityKind, name: &str, err: Error) -> Result<()> {
        if !err.is_entity_local() {
            return Err(err);
        }
        warn!("Skipping {} '{}': {}", kind, name, err);
        self.skipped.push(SkippedEntity {
            kind,
            name: name.to_string(),
            reason: err.to_string(),
        });
        Ok(())
    }
}

/// Collections loaded for one run
pub struct Dataset {
    indexes: BTreeMap<EntityKind, CollectionIndex>,
}

impl Dataset {
    /// Load `required` and, when present on disk, `optional` collections
    ///
    /// Every required directory is checked before anything is read.
    /// `pattern` filters the entity files of `primary` only, and every
    /// `primary` record must match the typed schema of its kind.
    pub fn load(
        config: &ExportConfig,
        primary: EntityKind,
        pattern: &str,
        required: &[EntityKind],
        optional: &[EntityKind],
    ) -> Result<Self> {
        for kind in required {
            require_dir(&config.source_dir(*kind))?;
        }

        let present = optional
            .iter()
            .filter(|kind| config.source_dir(**kind).is_dir());

        let mut indexes = BTreeMap::new();
        for &kind in required.iter().chain(present) {
            let filter = if kind == primary { pattern } else { ALL_ENTITIES };
            let index = CollectionIndex::build_matching(&config.source_dir(kind), kind, filter)?;
            if kind == primary {
                for entry in index.iter() {
                    check_schema(kind, &entry.record).map_err(|e| Error::MalformedRecord {
                        path: entry.path.clone(),
                        reason: e.to_string(),
                    })?;
                }
            }
            debug!("Loaded {} {} records", index.len(), kind);
            indexes.insert(kind, index);
        }

        Ok(Self { indexes })
    }

    pub fn get(&self, kind: EntityKind) -> Option<&CollectionIndex> {
        self.indexes.get(&kind)
    }

    fn collection(&self, config: &ExportConfig, kind: EntityKind) -> Result<&CollectionIndex> {
        self.get(kind)
            .ok_or_else(|| Error::NotFound(config.source_dir(kind)))
    }
}

/// Runs exports for one configuration
pub struct Exporter<'a> {
    config: &'a ExportConfig,
    pattern: String,
}

impl<'a> Exporter<'a> {
    pub fn new(config: &'a ExportConfig) -> Self {
        Self {
            config,
            pattern: ALL_ENTITIES.to_string(),
        }
    }

    /// Restrict the exported entity files to those matching a glob
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    fn report(&self, kind: EntityKind, target: Target) -> ExportReport {
        let mut report = ExportReport::new(kind, target);
        report.filtered = self.pattern != ALL_ENTITIES;
        report
    }

    pub fn export(&self, kind: EntityKind, target: Target) -> Result<ExportReport> {
        match target {
            Target::Foundry => self.foundry(kind),
            Target::Documents => self.documents(kind),
        }
    }

    /// Rewrite the Foundry pack of `kind`
    ///
    /// The pack is only opened once every record has been built, so a failed
    /// run leaves the previous pack in place.
    pub fn foundry(&self, kind: EntityKind) -> Result<ExportReport> {
        let mut report = self.report(kind, Target::Foundry);
        let Some(file) = kind.pack_file() else {
            warn!("No Foundry pack for {} records", kind);
            return Ok(report);
        };

        let (required, optional): (&[EntityKind], &[EntityKind]) = match kind {
            EntityKind::Creature => (
                &[EntityKind::Creature, EntityKind::Move, EntityKind::Ability],
                &[EntityKind::Learnset],
            ),
            _ => (std::slice::from_ref(&kind), &[]),
        };
        let dataset = Dataset::load(self.config, kind, &self.pattern, required, optional)?;
        let overrides = OverrideTable::load(self.config.foundry.overrides.as_deref())?;
        let transformer = FoundryTransformer::new(self.config);

        let entities = dataset.collection(self.config, kind)?;

        let mut records = Vec::with_capacity(entities.len());
        for entry in entities.iter() {
            let record = match kind {
                EntityKind::Move => {
                    if is_ignored_move(entry.id()) {
                        info!("Skipping ignored move {}", entry.id());
                        continue;
                    }
                    let mv = typed_move(entry, &overrides)?;
                    transformer.move_record(&mv, None)
                }
                EntityKind::Ability => {
                    let ability: Ability = entry.typed()?;
                    Ok(transformer.ability_record(&ability, AbilitySlot::Regular))
                }
                EntityKind::Item => {
                    let item: Item = entry.typed()?;
                    Ok(transformer.item_record(&item))
                }
                _ => self.creature_record(&dataset, entry.typed()?, &overrides, &mut report),
            };

            match record {
                Ok(record) => records.push(record),
                Err(err) => report.skip(kind, entry.name(), err)?,
            }
        }

        let mut pack = PackWriter::create(&self.config.pack_dir(), file)?;
        for record in &records {
            pack.append(record)?;
        }
        report.written = pack.written();
        let path = pack.finish()?;
        report.output_dir = Some(self.config.pack_dir());
        info!("Wrote {} {} records to {}", report.written, kind, path.display());
        report.artifacts.push(path);
        Ok(report)
    }

    fn creature_record(
        &self,
        dataset: &Dataset,
        creature: Creature,
        overrides: &OverrideTable,
        report: &mut ExportReport,
    ) -> Result<Value> {
        let resolver = Resolver::new(
            dataset.collection(self.config, EntityKind::Move)?,
            dataset.collection(self.config, EntityKind::Ability)?,
            dataset.get(EntityKind::Learnset),
            &self.config.foundry.maneuvers,
        );
        let composite = resolver.resolve(creature)?;
        let transformer = FoundryTransformer::new(self.config);

        let mut items = Vec::new();
        for resolved in &composite.moves {
            let mv = typed_move(&resolved.source, overrides)?;
            match transformer.move_record(&mv, Some(&resolved.rank)) {
                Ok(record) => items.push(record),
                Err(err) => report.skip(
                    EntityKind::Move,
                    &format!("{} ({})", mv.name, composite.creature.name),
                    err,
                )?,
            }
        }
        for resolved in &composite.abilities {
            let ability: Ability = resolved.source.typed()?;
            items.push(transformer.ability_record(&ability, resolved.slot));
        }

        report.missing.extend(composite.missing.iter().cloned());
        Ok(transformer.creature_record(&composite.creature, items))
    }

    /// Rewrite the SRD documents of `kind`
    pub fn documents(&self, kind: EntityKind) -> Result<ExportReport> {
        let mut report = self.report(kind, Target::Documents);

        let optional: &[EntityKind] = match kind {
            EntityKind::Creature => &[EntityKind::Learnset],
            _ => &[],
        };
        let dataset = Dataset::load(
            self.config,
            kind,
            &self.pattern,
            std::slice::from_ref(&kind),
            optional,
        )?;
        let transformer = DocumentTransformer::new(self.config);
        let dir = self.config.document_dir().join(transformer.kind_dir(kind));
        fs::create_dir_all(&dir)?;

        for entry in dataset.collection(self.config, kind)?.iter() {
            let document = match kind {
                EntityKind::Creature => {
                    let creature: Creature = entry.typed()?;
                    let learned = learned_moves(
                        &creature,
                        dataset.get(EntityKind::Learnset),
                        &mut report.missing,
                    )?;
                    let learned = with_maneuvers(&learned, &self.config.foundry.maneuvers);
                    transformer.creature(&entry.record, &learned)
                }
                EntityKind::Learnset => transformer.learnset(&entry.record),
                _ => transformer.entity(kind, &entry.record),
            };

            match document {
                Ok(document) => {
                    report.artifacts.push(self.write_document(&dir, &document)?);
                    report.written += 1;
                }
                Err(err) => report.skip(kind, entry.name(), err)?,
            }
        }

        info!("Wrote {} {} documents to {}", report.written, kind, dir.display());
        report.output_dir = Some(dir);
        Ok(report)
    }

    fn write_document(&self, dir: &std::path::Path, document: &Document) -> Result<PathBuf> {
        let contents = render_document(document, &self.config.srd.tag)?;
        let path = dir.join(&document.file_name);
        debug!("Writing {}", path.display());
        fs::write(&path, contents)?;
        Ok(path)
    }
}
