//! Content-derived record identifiers
//!
//! Foundry persists relationships by `_id`, so the identifier of a generated
//! record depends only on the hash key and the canonical source `_id`.

use sha2::{Digest, Sha256};

/// Number of digest bytes kept in an identifier
pub const ID_BYTES: usize = 16;

/// Stable 32-character hex identifier for a source `_id`
pub fn content_id(key: &str, source_id: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    hasher.update([0u8]);
    hasher.update(source_id.as_bytes());
    let digest = hasher.finalize();
    hex::encode(&digest[..ID_BYTES])
}
