//! Output rendering: vault documents and Foundry packs

pub mod document;
pub mod pack;
pub mod template;

pub use document::{parse_front_matter, render_document};
pub use pack::{read_pack, PackWriter};
