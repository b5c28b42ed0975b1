//! Configuration management for dexbuild CLI

use anyhow::{bail, Context, Result};
use dexbuild::ExportConfig;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct Config {
    /// File the configuration was read from, or will be saved to
    pub path: Option<PathBuf>,
    pub export: ExportConfig,
}

impl Config {
    /// Get the path to the default config file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("dexbuild");

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from `explicit`, else the default file, else defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config_path = match explicit {
            Some(path) if !path.exists() => bail!("Config file {} not found", path.display()),
            Some(path) => path.to_path_buf(),
            None => Self::config_path()?,
        };

        if !config_path.exists() {
            return Ok(Config {
                path: Some(config_path),
                export: ExportConfig::default(),
            });
        }

        let contents = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
        let export = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", config_path.display()))?;

        Ok(Config {
            path: Some(config_path),
            export,
        })
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<PathBuf> {
        let config_path = match &self.path {
            Some(path) => path.clone(),
            None => Self::config_path()?,
        };

        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory at {}", parent.display())
            })?;
        }

        let contents = self.to_toml()?;

        fs::write(&config_path, contents)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        Ok(config_path)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(&self.export).context("Failed to serialize config")
    }

    /// Apply command-line overrides on top of the file values
    pub fn apply_overrides(&mut self, root: Option<PathBuf>, version: Option<String>) {
        if let Some(root) = root {
            self.export.root = root;
        }
        if let Some(version) = version {
            self.export.version = version;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dexbuild::LearnsetLayout;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config {
            path: Some(path.clone()),
            export: ExportConfig::default(),
        };
        config.export.srd.learnset_layout = LearnsetLayout::ByRank;
        config.export.foundry.typeless = "normal".to_string();
        assert_eq!(config.save().unwrap(), path);

        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded.export, config.export);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "version = \"v2.1\"\n\n[srd]\nprefix = \"DEX\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.export.version, "v2.1");
        assert_eq!(config.export.srd.prefix, "DEX");
        assert_eq!(config.export.srd.tag, "PokeroleSRD");
        assert_eq!(config.export.foundry.hash_key, "pokerole");
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(Config::load(Some(&dir.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn test_overrides() {
        let mut config = Config::default();
        config.apply_overrides(Some(PathBuf::from("/data")), None);
        assert_eq!(config.export.root, PathBuf::from("/data"));
        assert_eq!(config.export.version, "v3.0");

        config.apply_overrides(None, Some("v2.0".to_string()));
        assert_eq!(config.export.version, "v2.0");
    }

    #[test]
    fn test_config_path() {
        // Config::config_path() should return a valid path
        let result = Config::config_path();
        assert!(result.is_ok());
    }
}
