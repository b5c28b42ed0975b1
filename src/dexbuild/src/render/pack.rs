//! Foundry pack writer
//!
//! A pack is a line-delimited JSON file. It is truncated once when the writer
//! opens it and every record of the run is appended as one compact line.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::error::Result;

pub struct PackWriter {
    path: PathBuf,
    writer: BufWriter<File>,
    written: usize,
}

impl PackWriter {
    /// Create (or truncate) `file` under `dir`
    pub fn create(dir: &Path, file: &str) -> Result<Self> {
        fs::create_dir_all(dir)?;
        let path = dir.join(file);
        let writer = BufWriter::new(File::create(&path)?);
        debug!("Opened pack {}", path.display());
        Ok(Self {
            path,
            writer,
            written: 0,
        })
    }

    /// Records appended so far
    pub fn written(&self) -> usize {
        self.written
    }

    /// Append one record as a single line
    pub fn append(&mut self, record: &Value) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    /// Flush buffered lines and return the pack path
    pub fn finish(mut self) -> Result<PathBuf> {
        self.writer.flush()?;
        Ok(self.path)
    }
}

/// Read a pack back into its records
pub fn read_pack(path: &Path) -> Result<Vec<Value>> {
    let contents = fs::read_to_string(path)?;
    contents
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| Ok(serde_json::from_str(line)?))
        .collect()
}
