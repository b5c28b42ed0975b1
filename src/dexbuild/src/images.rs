//! Image set copying
//!
//! Sprite sets live under `<root>/images/<Set>/`. Foundry keeps the original
//! file names under its own folder layout; the SRD vault renames every file to
//! `<prefix>-<stem>-<Kind>.<ext>` so sprites of different sets never collide.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::ExportConfig;
use crate::error::Result;
use crate::source::{require_dir, walk_entities};

const IMAGE_PATTERN: &str = "*.png";

/// Sprite style used for creature sheets and tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageStyle {
    Book,
    Box,
    Home,
    Shuffle,
}

impl ImageStyle {
    /// Folder under `images/pokemon/` in the Foundry system
    pub fn folder(&self) -> &'static str {
        match self {
            Self::Book => "book",
            Self::Box => "box",
            Self::Home => "home",
            Self::Shuffle => "shuffle",
        }
    }
}

impl std::str::FromStr for ImageStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "book" => Ok(Self::Book),
            "box" => Ok(Self::Box),
            "home" => Ok(Self::Home),
            "shuffle" => Ok(Self::Shuffle),
            other => Err(format!(
                "unknown image style '{}' (expected book, box, home or shuffle)",
                other
            )),
        }
    }
}

/// One sprite directory of the dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ImageSet {
    BookSprites,
    HomeSprites,
    BoxSprites,
    ShuffleTokens,
    ItemSprites,
}

impl ImageSet {
    pub const ALL: [ImageSet; 5] = [
        Self::BookSprites,
        Self::HomeSprites,
        Self::BoxSprites,
        Self::ShuffleTokens,
        Self::ItemSprites,
    ];

    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::BookSprites => "BookSprites",
            Self::HomeSprites => "HomeSprites",
            Self::BoxSprites => "BoxSprites",
            Self::ShuffleTokens => "ShuffleTokens",
            Self::ItemSprites => "ItemSprites",
        }
    }

    /// Destination relative to the Foundry system directory
    pub fn foundry_path(&self) -> &'static str {
        match self {
            Self::BookSprites => "images/pokemon/book",
            Self::HomeSprites => "images/pokemon/home",
            Self::BoxSprites => "images/pokemon/box",
            Self::ShuffleTokens => "images/pokemon/shuffle",
            Self::ItemSprites => "images/items",
        }
    }

    /// Singular suffix used in vault file names
    pub fn document_suffix(&self) -> &'static str {
        match self {
            Self::BookSprites => "BookSprite",
            Self::HomeSprites => "HomeSprite",
            Self::BoxSprites => "BoxSprite",
            Self::ShuffleTokens => "ShuffleToken",
            Self::ItemSprites => "ItemSprite",
        }
    }
}

impl std::fmt::Display for ImageSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl std::str::FromStr for ImageSet {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|set| set.dir_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown image set '{}'", s))
    }
}

/// Vault file name for a sprite: `SRD-1-BookSprite.png` for `1.png`
pub fn document_image_name(prefix: &str, file_name: &str, suffix: &str) -> String {
    match file_name.split_once('.') {
        Some((stem, ext)) => format!("{}-{}-{}.{}", prefix, stem, suffix, ext),
        None => format!("{}-{}-{}", prefix, file_name, suffix),
    }
}

/// Copy an image set into the Foundry system directory
pub fn copy_for_foundry(config: &ExportConfig, set: ImageSet) -> Result<Vec<PathBuf>> {
    let source = config.images_dir().join(set.dir_name());
    let target = config.foundry_dir().join(set.foundry_path());
    copy_set(&source, &target, |name| name.to_string())
}

/// Copy an image set into the SRD vault, renaming each file
pub fn copy_for_documents(config: &ExportConfig, set: ImageSet) -> Result<Vec<PathBuf>> {
    let prefix = &config.srd.prefix;
    let source = config.images_dir().join(set.dir_name());
    let target = config
        .document_dir()
        .join(format!("{}-{}", prefix, set.dir_name()));
    copy_set(&source, &target, |name| {
        document_image_name(prefix, name, set.document_suffix())
    })
}

fn copy_set<F>(source: &Path, target: &Path, rename: F) -> Result<Vec<PathBuf>>
where
    F: Fn(&str) -> String,
{
    require_dir(source)?;
    fs::create_dir_all(target)?;

    let mut copied = Vec::new();
    walk_entities(source, IMAGE_PATTERN, |path| {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return Ok(());
        };
        let destination = target.join(rename(name));
        debug!("Copying {} -> {}", path.display(), destination.display());
        fs::copy(path, &destination)?;
        copied.push(destination);
        Ok(())
    })?;

    info!("Copied {} images from {}", copied.len(), source.display());
    Ok(copied)
}
