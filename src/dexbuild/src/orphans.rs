//! Stale output detection
//!
//! Documents are regenerated wholesale, so a file left in an output directory
//! that a run did not rewrite belongs to an entity that no longer exists (or
//! was renamed). Runs limited by a file pattern only rewrite part of their
//! directory, so their directories are never scanned.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::Result;
use crate::pipeline::ExportReport;
use crate::source::walk_entities;

const ANY_FILE: &str = "*.*";

/// Stale files, grouped by output directory
pub type Orphans = BTreeMap<PathBuf, Vec<PathBuf>>;

/// Files in the output directories of `reports` that no report wrote
///
/// Directories written by a filtered run are skipped.
pub fn find_orphans(reports: &[ExportReport]) -> Result<Orphans> {
    let written: HashSet<&Path> = reports
        .iter()
        .flat_map(|r| r.artifacts.iter().map(PathBuf::as_path))
        .collect();
    let partial: HashSet<&Path> = reports
        .iter()
        .filter(|r| r.filtered)
        .filter_map(|r| r.output_dir.as_deref())
        .collect();

    let mut orphans = Orphans::new();
    for dir in reports.iter().filter_map(|r| r.output_dir.as_deref()) {
        if orphans.contains_key(dir) || !dir.is_dir() {
            continue;
        }
        if partial.contains(dir) {
            warn!(
                "Not scanning {} for orphans: the run was limited by a file pattern",
                dir.display()
            );
            orphans.insert(dir.to_path_buf(), Vec::new());
            continue;
        }
        let mut stale = Vec::new();
        walk_entities(dir, ANY_FILE, |path| {
            if !written.contains(path) {
                stale.push(path.to_path_buf());
            }
            Ok(())
        })?;
        if !stale.is_empty() {
            info!("{} orphan files in {}", stale.len(), dir.display());
        }
        orphans.insert(dir.to_path_buf(), stale);
    }

    Ok(orphans)
}

/// Delete the orphans `confirm` accepts; returns how many were removed
pub fn clear_orphans<F>(orphans: &Orphans, mut confirm: F) -> Result<usize>
where
    F: FnMut(&Path) -> bool,
{
    let mut removed = 0;
    for file in orphans.values().flatten() {
        if !confirm(file.as_path()) {
            info!("Keeping {}", file.display());
            continue;
        }
        warn!("Deleting {}", file.display());
        fs::remove_file(file)?;
        removed += 1;
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExportConfig;
    use crate::kind::EntityKind;
    use crate::pipeline::Exporter;
    use crate::record::fixtures::ability;
    use tempfile::TempDir;

    fn setup() -> (TempDir, ExportConfig) {
        let dir = TempDir::new().unwrap();
        let config = ExportConfig {
            root: dir.path().to_path_buf(),
            ..Default::default()
        };
        let source = config.source_dir(EntityKind::Ability);
        fs::create_dir_all(&source).unwrap();
        for (id, name) in [("overgrow", "Overgrow"), ("blaze", "Blaze")] {
            let body = serde_json::to_string(ability(id, name).fields()).unwrap();
            fs::write(source.join(format!("{}.json", name)), body).unwrap();
        }
        (dir, config)
    }

    #[test]
    fn test_renamed_entity_leaves_orphan() {
        let (_dir, config) = setup();
        let exporter = Exporter::new(&config);
        exporter.documents(EntityKind::Ability).unwrap();

        let source = config.source_dir(EntityKind::Ability);
        fs::remove_file(source.join("Blaze.json")).unwrap();
        let report = exporter.documents(EntityKind::Ability).unwrap();

        let orphans = find_orphans(&[report]).unwrap();
        let out_dir = config.document_dir().join("SRD-Abilities");
        assert_eq!(orphans[&out_dir], vec![out_dir.join("SRD-Blaze.md")]);
    }

    #[test]
    fn test_clear_respects_confirmation() {
        let (_dir, config) = setup();
        let exporter = Exporter::new(&config);
        exporter.documents(EntityKind::Ability).unwrap();
        let out_dir = config.document_dir().join("SRD-Abilities");
        fs::write(out_dir.join("SRD-Old.md"), "stale").unwrap();
        fs::write(out_dir.join("SRD-Older.md"), "stale").unwrap();

        let report = exporter.documents(EntityKind::Ability).unwrap();
        let orphans = find_orphans(&[report]).unwrap();
        assert_eq!(orphans[&out_dir].len(), 2);

        let removed = clear_orphans(&orphans, |path| path.ends_with("SRD-Old.md")).unwrap();
        assert_eq!(removed, 1);
        assert!(!out_dir.join("SRD-Old.md").exists());
        assert!(out_dir.join("SRD-Older.md").exists());
        assert!(out_dir.join("SRD-Overgrow.md").exists());
    }

    #[test]
    fn test_filtered_run_keeps_other_documents() {
        let (_dir, config) = setup();
        Exporter::new(&config).documents(EntityKind::Ability).unwrap();
        let out_dir = config.document_dir().join("SRD-Abilities");

        let report = Exporter::new(&config)
            .with_pattern("O*.json")
            .documents(EntityKind::Ability)
            .unwrap();
        assert_eq!(report.artifacts, vec![out_dir.join("SRD-Overgrow.md")]);

        let orphans = find_orphans(&[report]).unwrap();
        assert!(orphans.values().all(Vec::is_empty));
        assert_eq!(clear_orphans(&orphans, |_| true).unwrap(), 0);
        assert!(out_dir.join("SRD-Blaze.md").exists());
    }

    #[test]
    fn test_clean_run_has_no_orphans() {
        let (_dir, config) = setup();
        let report = Exporter::new(&config).documents(EntityKind::Ability).unwrap();
        let orphans = find_orphans(&[report]).unwrap();
        assert!(orphans.values().all(Vec::is_empty));
    }
}
