//! # dexbuild
//!
//! Export pipeline for the Pokerole dataset: one JSON file per creature, move,
//! ability, item, nature and learnset, turned into
//! - Markdown documents with YAML front matter for an SRD vault
//! - Line-delimited JSON packs for the Pokerole Foundry system
//!
//! ## Example
//!
//! ```no_run
//! use dexbuild::{EntityKind, ExportConfig, Exporter};
//!
//! # fn main() -> Result<(), dexbuild::Error> {
//! let config = ExportConfig {
//!     root: "/data/Pokerole-Data".into(),
//!     ..Default::default()
//! };
//!
//! let exporter = Exporter::new(&config);
//! let report = exporter.foundry(EntityKind::Move)?;
//! println!("{} moves written", report.written);
//!
//! exporter.documents(EntityKind::Creature)?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod id;
pub mod images;
pub mod index;
pub mod kind;
pub mod loader;
pub mod orphans;
pub mod overrides;
pub mod pipeline;
pub mod record;
pub mod reference;
pub mod render;
pub mod resolve;
pub mod source;
pub mod transform;

#[doc(inline)]
pub use config::{DocumentConfig, ExportConfig, FoundryConfig};
#[doc(inline)]
pub use error::{Error, Result};
#[doc(inline)]
pub use images::{copy_for_documents, copy_for_foundry, ImageSet, ImageStyle};
#[doc(inline)]
pub use index::CollectionIndex;
#[doc(inline)]
pub use kind::EntityKind;
#[doc(inline)]
pub use orphans::{clear_orphans, find_orphans, Orphans};
#[doc(inline)]
pub use pipeline::{ExportReport, Exporter, SkippedEntity, Target};
#[doc(inline)]
pub use record::EntityRecord;
#[doc(inline)]
pub use resolve::MissingReference;
#[doc(inline)]
pub use transform::LearnsetLayout;
