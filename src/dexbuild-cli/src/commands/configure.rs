//! Configuration command handlers
//!
//! Handles the `configure` subcommand.

use crate::config::Config;
use anyhow::Result;

/// Handle the configure command
///
/// # Arguments
/// * `config` - Effective configuration (file values plus command-line overrides)
/// * `show` - If true, show the configuration
/// * `save` - If true, write it to the config file
pub fn handle(config: &Config, show: bool, save: bool) -> Result<()> {
    if show {
        show_config(config)?;
    }

    if save {
        let path = config.save()?;
        println!("Config saved to: {}", path.display());
    }

    if !show && !save {
        show_usage();
    }

    Ok(())
}

/// Display current configuration
fn show_config(config: &Config) -> Result<()> {
    let export = &config.export;
    println!("Dataset:   {}", export.data_dir().display());
    println!("Images:    {}", export.images_dir().display());
    println!("Foundry:   {}", export.foundry_dir().display());
    println!("SRD vault: {}", export.document_dir().display());

    match &config.path {
        Some(path) if path.exists() => println!("Config file: {}", path.display()),
        Some(path) => println!("Config file: {} (not created, using defaults)", path.display()),
        None => println!("No config file"),
    }

    println!();
    print!("{}", config.to_toml()?);

    Ok(())
}

/// Show usage help for the configure command
fn show_usage() {
    println!("Usage: dexbuild configure --show");
    println!("   or: dexbuild --root /path/to/Pokerole-Data --version v3.0 configure --save");
    println!();
    println!("Note: --root and --version override the config file for any command.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_show_usage_does_not_panic() {
        show_usage();
    }

    #[test]
    fn test_show_and_save() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let config = Config {
            path: Some(path.clone()),
            ..Default::default()
        };

        handle(&config, true, true).unwrap();
        assert!(path.is_file());
    }
}
