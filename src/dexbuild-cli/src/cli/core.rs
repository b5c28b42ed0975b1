//! Core CLI definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dexbuild")]
#[command(about = "Export the Pokerole dataset to SRD documents and Foundry packs", long_about = None)]
pub struct Cli {
    /// Log per-file detail
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (defaults to <config dir>/dexbuild/config.toml)
    #[arg(long, global = true, env = "DEXBUILD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Dataset root holding the version folders and images/
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Dataset version folder (e.g. v3.0)
    #[arg(long, global = true)]
    pub version: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rewrite Foundry packs (pokedex, moves, abilities, items)
    #[command(visible_alias = "f")]
    Foundry {
        #[command(flatten)]
        build: BuildArgs,
    },

    /// Rewrite SRD vault documents
    #[command(visible_alias = "s")]
    Srd {
        #[command(flatten)]
        build: BuildArgs,

        /// Report files the run did not rewrite; `clear` also deletes them
        #[arg(long, value_enum, num_args = 0..=1, default_missing_value = "report")]
        orphans: Option<OrphanAction>,
    },

    /// Copy image sets into a target
    #[command(visible_alias = "i")]
    Images {
        /// Target receiving the images
        #[arg(value_enum)]
        target: ImageTarget,

        /// Image sets (BookSprites, HomeSprites, BoxSprites, ShuffleTokens, ItemSprites, all)
        sets: Vec<String>,
    },

    /// Show or save the effective configuration
    #[command(visible_alias = "c")]
    Configure {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Write the effective configuration (including --root/--version) to the config file
        #[arg(long)]
        save: bool,
    },
}

/// Selection shared by the export commands
#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    /// Collections to export (pokedex, moves, abilities, items, natures, learnsets)
    pub kinds: Vec<String>,

    /// Export every collection the target supports
    #[arg(long)]
    pub batch: bool,

    /// Skip confirmation prompts
    #[arg(short, long)]
    pub yes: bool,

    /// Only export entity files matching this glob
    #[arg(long, default_value = "*.json")]
    pub pattern: String,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrphanAction {
    Report,
    Clear,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageTarget {
    Foundry,
    Srd,
}
