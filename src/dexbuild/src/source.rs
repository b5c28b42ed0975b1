//! Source enumeration
//!
//! Lists the entity files of one collection directory. File names are not
//! tied to entity identity here; callers that need name-keyed lookup go
//! through [`crate::index::CollectionIndex`].

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Filter matching every entity file
pub const ALL_ENTITIES: &str = "*.json";

/// Fail with [`Error::NotFound`] unless `path` is an existing directory
pub fn require_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(Error::NotFound(path.to_path_buf()))
    }
}

/// Walk the files directly under `dir` whose name matches `pattern`
///
/// Entries are visited in file-name order so repeated runs see the same
/// sequence.
pub fn walk_entities<F>(dir: &Path, pattern: &str, mut handler: F) -> Result<()>
where
    F: FnMut(&Path) -> Result<()>,
{
    require_dir(dir)?;

    for entry in walkdir::WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let matches = entry
            .file_name()
            .to_str()
            .map(|name| glob_match::glob_match(pattern, name))
            .unwrap_or(false);

        if matches {
            handler(entry.path())?;
        }
    }

    Ok(())
}

/// Collect matching entity files into a vector
pub fn collect_entities(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    walk_entities(dir, pattern, |path| {
        files.push(path.to_path_buf());
        Ok(())
    })?;

    Ok(files)
}

/// File stem as a string, used as the lookup name of an entity file
pub fn file_stem(path: &Path) -> Option<&str> {
    path.file_stem().and_then(|s| s.to_str())
}
