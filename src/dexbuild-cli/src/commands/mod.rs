//! Command handlers for dexbuild CLI
//!
//! Each subcommand has its own module with handler functions.

pub mod configure;
pub mod export;
pub mod images;
pub mod prompt;
