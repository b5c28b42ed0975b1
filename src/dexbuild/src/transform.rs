//! Per-target field transforms

pub mod document;
pub mod effects;
pub mod foundry;
pub mod learnset;

pub use document::{Document, DocumentTransformer};
pub use foundry::FoundryTransformer;
pub use learnset::LearnsetLayout;
