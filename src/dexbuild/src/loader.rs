//! Entity loading

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::record::{EntityRecord, ID_FIELD, NAME_FIELD};

/// Parse one entity file into a record
///
/// The file must hold a JSON object with string `_id` and `Name` fields.
pub fn load_record(path: &Path) -> Result<EntityRecord> {
    let contents = fs::read_to_string(path)?;
    parse_record(path, &contents)
}

/// Parse entity text that was read from `path`
pub fn parse_record(path: &Path, contents: &str) -> Result<EntityRecord> {
    let malformed = |reason: String| Error::MalformedRecord {
        path: path.to_path_buf(),
        reason,
    };

    let value: Value = serde_json::from_str(contents).map_err(|e| malformed(e.to_string()))?;
    let Value::Object(fields) = value else {
        return Err(malformed("expected a JSON object".to_string()));
    };

    let record = EntityRecord::new(fields);
    for field in [ID_FIELD, NAME_FIELD] {
        match record.get_str(field) {
            Some(s) if !s.is_empty() => {}
            _ => return Err(malformed(format!("missing string field '{}'", field))),
        }
    }

    Ok(record)
}
