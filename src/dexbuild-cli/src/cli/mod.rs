//! CLI argument definitions for dexbuild
//!
//! This module contains all clap-derived structs and enums for CLI parsing.

mod core;

pub use core::{BuildArgs, Cli, Commands, ImageTarget, OrphanAction};
