//! Image set command handler

use anyhow::{Context, Result};
use dexbuild::{copy_for_documents, copy_for_foundry, ExportConfig, ImageSet};
use tracing::warn;

use crate::cli::ImageTarget;

/// Resolve image set names; `all` selects every set
pub fn select_sets(names: &[String]) -> Vec<ImageSet> {
    if names.iter().any(|n| n.eq_ignore_ascii_case("all")) {
        return ImageSet::ALL.to_vec();
    }

    let mut selected = Vec::new();
    for name in names {
        match name.parse::<ImageSet>() {
            Ok(set) if !selected.contains(&set) => selected.push(set),
            Ok(_) => {}
            Err(err) => warn!("{}, skipping", err),
        }
    }
    selected
}

/// Handle the `images` command
pub fn handle(config: &ExportConfig, target: ImageTarget, names: &[String]) -> Result<()> {
    let sets = select_sets(names);
    if sets.is_empty() {
        println!("No image sets selected, nothing to do.");
        return Ok(());
    }

    for set in sets {
        let copied = match target {
            ImageTarget::Foundry => copy_for_foundry(config, set),
            ImageTarget::Srd => copy_for_documents(config, set),
        }
        .with_context(|| format!("Failed to copy {}", set))?;
        println!("{}: {} images copied", set, copied.len());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_select_sets() {
        assert_eq!(select_sets(&names(&["ALL"])).len(), 5);
        assert_eq!(
            select_sets(&names(&["booksprites", "Nope", "BookSprites", "ItemSprites"])),
            vec![ImageSet::BookSprites, ImageSet::ItemSprites]
        );
        assert!(select_sets(&[]).is_empty());
    }

    #[test]
    fn test_copy_to_srd() {
        let dir = TempDir::new().unwrap();
        let config = ExportConfig {
            root: dir.path().to_path_buf(),
            ..Default::default()
        };
        let source = config.images_dir().join("HomeSprites");
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("25.png"), b"png").unwrap();

        handle(&config, ImageTarget::Srd, &names(&["HomeSprites"])).unwrap();
        assert!(config
            .document_dir()
            .join("SRD-HomeSprites")
            .join("SRD-25-HomeSprite.png")
            .is_file());
    }

    #[test]
    fn test_missing_set_is_an_error() {
        let dir = TempDir::new().unwrap();
        let config = ExportConfig {
            root: dir.path().to_path_buf(),
            ..Default::default()
        };
        assert!(handle(&config, ImageTarget::Foundry, &names(&["BoxSprites"])).is_err());
    }
}
