//! Export configuration
//!
//! Every field has a default so a partial TOML file (or none at all) yields a
//! usable configuration. Path templates may contain `{version}`, which is
//! replaced with the selected dataset version.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::images::ImageStyle;
use crate::kind::EntityKind;
use crate::reference::DEFAULT_MANEUVERS;
use crate::transform::learnset::LearnsetLayout;

/// Placeholder replaced by the dataset version in path templates
pub const VERSION_PLACEHOLDER: &str = "{version}";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Dataset root holding the version folders and `images/`
    pub root: PathBuf,
    /// Dataset version folder, e.g. `v3.0`
    pub version: String,
    /// Versioned data directory, relative to `root`
    pub source: String,
    /// Image sets directory, relative to `root`
    pub images: String,
    pub foundry: FoundryConfig,
    pub srd: DocumentConfig,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            version: "v3.0".to_string(),
            source: VERSION_PLACEHOLDER.to_string(),
            images: "images".to_string(),
            foundry: FoundryConfig::default(),
            srd: DocumentConfig::default(),
        }
    }
}

impl ExportConfig {
    /// Substitute the dataset version into a path template
    pub fn expand(&self, template: &str) -> String {
        template.replace(VERSION_PLACEHOLDER, &self.version)
    }

    /// Versioned dataset directory
    pub fn data_dir(&self) -> PathBuf {
        self.root.join(self.expand(&self.source))
    }

    /// Source directory of one collection
    pub fn source_dir(&self, kind: EntityKind) -> PathBuf {
        self.data_dir().join(kind.source_dir())
    }

    pub fn images_dir(&self) -> PathBuf {
        self.root.join(self.expand(&self.images))
    }

    /// Foundry system directory receiving packs and images
    pub fn foundry_dir(&self) -> PathBuf {
        self.root.join(self.expand(&self.foundry.output))
    }

    pub fn pack_dir(&self) -> PathBuf {
        self.foundry_dir().join("packs")
    }

    /// SRD folder path as seen from inside the vault, used in wiki links
    pub fn vault_folder(&self) -> String {
        self.expand(&self.srd.folder)
    }

    /// SRD folder on disk
    pub fn document_dir(&self) -> PathBuf {
        self.root
            .join(self.expand(&self.srd.vault))
            .join(self.vault_folder())
    }

    /// Source label stamped on Foundry records
    pub fn display_version(&self) -> String {
        format!("Core {}", self.version)
    }
}

/// Settings for the Foundry pack target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoundryConfig {
    /// Foundry system directory, relative to the dataset root
    pub output: String,
    pub system_version: String,
    pub core_version: String,
    pub sheet_image: ImageStyle,
    pub token_image: ImageStyle,
    /// Key mixed into every content-derived identifier
    pub hash_key: String,
    /// `_stats.modifiedTime` stamped on every record
    pub modified_time: i64,
    /// Foundry type used for typeless moves
    pub typeless: String,
    /// Maneuvers added to every creature at the lowest rank
    pub maneuvers: Vec<String>,
    /// Replacement move override table
    pub overrides: Option<PathBuf>,
}

impl Default for FoundryConfig {
    fn default() -> Self {
        Self {
            output: "foundry".to_string(),
            system_version: "0.3.1".to_string(),
            core_version: "10.291".to_string(),
            sheet_image: ImageStyle::Book,
            token_image: ImageStyle::Book,
            hash_key: "pokerole".to_string(),
            modified_time: 1_704_067_200_000,
            typeless: "none".to_string(),
            maneuvers: DEFAULT_MANEUVERS.iter().map(|m| m.to_string()).collect(),
            overrides: None,
        }
    }
}

/// Settings for the SRD vault target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Vault directory, relative to the dataset root
    pub vault: String,
    /// SRD folder inside the vault
    pub folder: String,
    /// File and directory name prefix
    pub prefix: String,
    /// Tag written under the front matter
    pub tag: String,
    pub learnset_layout: LearnsetLayout,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            vault: "vault".to_string(),
            folder: "Pokerole SRD/SRD {version}".to_string(),
            prefix: "SRD".to_string(),
            tag: "PokeroleSRD".to_string(),
            learnset_layout: LearnsetLayout::Contiguous,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_default_paths() {
        let config = ExportConfig {
            root: PathBuf::from("/data"),
            ..Default::default()
        };
        assert_eq!(config.data_dir(), Path::new("/data/v3.0"));
        assert_eq!(
            config.source_dir(EntityKind::Move),
            Path::new("/data/v3.0/Moves")
        );
        assert_eq!(config.images_dir(), Path::new("/data/images"));
        assert_eq!(config.pack_dir(), Path::new("/data/foundry/packs"));
        assert_eq!(config.vault_folder(), "Pokerole SRD/SRD v3.0");
        assert_eq!(
            config.document_dir(),
            Path::new("/data/vault/Pokerole SRD/SRD v3.0")
        );
        assert_eq!(config.display_version(), "Core v3.0");
    }

    #[test]
    fn test_absolute_output_wins() {
        let mut config = ExportConfig::default();
        config.foundry.output = "/srv/foundry/systems/pokerole-{version}".to_string();
        config.version = "v2.0".to_string();
        assert_eq!(
            config.foundry_dir(),
            Path::new("/srv/foundry/systems/pokerole-v2.0")
        );
    }

    #[test]
    fn test_partial_deserialize() {
        let config: ExportConfig =
            serde_json::from_str(r#"{"version": "v2.0", "foundry": {"typeless": "normal"}}"#)
                .unwrap();
        assert_eq!(config.version, "v2.0");
        assert_eq!(config.foundry.typeless, "normal");
        assert_eq!(config.foundry.system_version, "0.3.1");
        assert_eq!(config.foundry.maneuvers.len(), DEFAULT_MANEUVERS.len());
        assert_eq!(config.srd.learnset_layout, LearnsetLayout::Contiguous);
    }
}
