//! Export command handlers
//!
//! Handles the `foundry` and `srd` subcommands.

use anyhow::{Context, Result};
use dexbuild::{clear_orphans, find_orphans, EntityKind, ExportConfig, ExportReport, Exporter, Target};
use tracing::warn;

use super::prompt::confirm;
use crate::cli::{BuildArgs, OrphanAction};

/// Kinds a target can export
fn supported(target: Target) -> Vec<EntityKind> {
    EntityKind::ALL
        .into_iter()
        .filter(|kind| target == Target::Documents || kind.pack_file().is_some())
        .collect()
}

/// Resolve the requested collection names; unknown names are warned and skipped
pub fn select_kinds(names: &[String], batch: bool, target: Target) -> Vec<EntityKind> {
    let supported = supported(target);
    if batch {
        return supported;
    }

    let mut selected = Vec::new();
    for name in names {
        match name.parse::<EntityKind>() {
            Ok(kind) if !supported.contains(&kind) => {
                warn!("{} has no {} output, skipping", kind, target);
            }
            Ok(kind) if selected.contains(&kind) => {}
            Ok(kind) => selected.push(kind),
            Err(err) => warn!("{}, skipping", err),
        }
    }
    selected
}

/// Print the selection and ask before overwriting anything
fn confirm_build(config: &ExportConfig, kinds: &[EntityKind], target: Target) -> Result<bool> {
    println!("Dataset: {}", config.data_dir().display());
    match target {
        Target::Foundry => println!("Output:  {}", config.pack_dir().display()),
        Target::Documents => println!("Output:  {}", config.document_dir().display()),
    }
    println!("Building:");
    for kind in kinds {
        println!("  {}", kind.source_dir());
    }

    confirm("Proceed?")
}

fn print_report(report: &ExportReport) {
    println!(
        "{}: {} written, {} skipped, {} missing references",
        report.kind.source_dir(),
        report.written,
        report.skipped.len(),
        report.missing.len()
    );
    for skipped in &report.skipped {
        println!("  skipped {} '{}': {}", skipped.kind, skipped.name, skipped.reason);
    }
    for missing in &report.missing {
        println!("  missing {}", missing);
    }
}

/// Run the selected exports; returns the reports of every run
fn run(config: &ExportConfig, build: &BuildArgs, target: Target) -> Result<Vec<ExportReport>> {
    let kinds = select_kinds(&build.kinds, build.batch, target);
    if kinds.is_empty() {
        println!("No collections selected, nothing to do.");
        return Ok(Vec::new());
    }

    if !build.yes && !confirm_build(config, &kinds, target)? {
        println!("Cancelled.");
        return Ok(Vec::new());
    }

    let exporter = Exporter::new(config).with_pattern(build.pattern.as_str());
    let mut reports = Vec::new();
    for kind in kinds {
        let report = exporter
            .export(kind, target)
            .with_context(|| format!("Failed to export {} to {}", kind.source_dir(), target))?;
        print_report(&report);
        reports.push(report);
    }

    Ok(reports)
}

/// Handle the `foundry` command
pub fn foundry(config: &ExportConfig, build: &BuildArgs) -> Result<()> {
    run(config, build, Target::Foundry)?;
    Ok(())
}

/// Handle the `srd` command
pub fn srd(config: &ExportConfig, build: &BuildArgs, orphans: Option<OrphanAction>) -> Result<()> {
    let reports = run(config, build, Target::Documents)?;
    let Some(action) = orphans else {
        return Ok(());
    };
    if reports.is_empty() {
        return Ok(());
    }

    let found = find_orphans(&reports).context("Failed to scan for orphan documents")?;
    let total: usize = found.values().map(Vec::len).sum();
    println!("Orphan files (not rewritten by this run): {}", total);
    for (dir, files) in &found {
        if files.is_empty() {
            continue;
        }
        println!("  {}", dir.display());
        for file in files {
            println!("    {}", file.display());
        }
    }

    if action == OrphanAction::Clear && total > 0 {
        let removed = clear_orphans(&found, |file| {
            build.yes
                || confirm(&format!("Delete {}?", file.display())).unwrap_or(false)
        })
        .context("Failed to delete orphan documents")?;
        println!("Deleted {} orphan files", removed);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_batch_selects_supported_kinds() {
        let kinds = select_kinds(&[], true, Target::Foundry);
        assert_eq!(
            kinds,
            vec![EntityKind::Creature, EntityKind::Move, EntityKind::Ability, EntityKind::Item]
        );
        assert_eq!(select_kinds(&[], true, Target::Documents).len(), 6);
    }

    #[test]
    fn test_unknown_and_unsupported_kinds_skipped() {
        let kinds = select_kinds(
            &names(&["moves", "bogus", "natures", "Moves", "pokedex"]),
            false,
            Target::Foundry,
        );
        assert_eq!(kinds, vec![EntityKind::Move, EntityKind::Creature]);

        let kinds = select_kinds(&names(&["natures", "learnsets"]), false, Target::Documents);
        assert_eq!(kinds, vec![EntityKind::Nature, EntityKind::Learnset]);
    }

    #[test]
    fn test_empty_selection() {
        assert!(select_kinds(&[], false, Target::Documents).is_empty());
        assert!(select_kinds(&names(&["images"]), false, Target::Foundry).is_empty());
    }

    #[test]
    fn test_run_without_selection_does_nothing() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = ExportConfig {
            root: dir.path().to_path_buf(),
            ..Default::default()
        };
        let build = BuildArgs {
            kinds: Vec::new(),
            batch: false,
            yes: true,
            pattern: "*.json".to_string(),
        };
        assert!(run(&config, &build, Target::Foundry).unwrap().is_empty());
        assert!(!config.pack_dir().exists());
    }

    #[test]
    fn test_missing_dataset_is_fatal() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = ExportConfig {
            root: dir.path().to_path_buf(),
            ..Default::default()
        };
        let build = BuildArgs {
            kinds: names(&["moves"]),
            batch: false,
            yes: true,
            pattern: "*.json".to_string(),
        };
        let err = run(&config, &build, Target::Foundry).unwrap_err();
        assert!(err.to_string().contains("Failed to export Moves to foundry"));
    }
}
