// File: src/writer.rs
// Purpose: Persist generated files without touching unchanged ones

use crate::error::{Result, RouteError};
use std::fs;
use std::path::Path;

/// What a write attempt did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    /// Existing content was byte-identical; the file was left alone
    Unchanged,
}

/// Writes `content` to `path` unless it already holds exactly that
///
/// Parent directories are created as needed. Skipping identical writes
/// keeps file watchers downstream from rebuilding for nothing.
pub fn write_if_changed(path: &Path, content: &str) -> Result<WriteOutcome> {
    let io_err = |source| RouteError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Ok(existing) = fs::read(path) {
        if existing == content.as_bytes() {
            tracing::debug!("{:?} is up to date", path);
            return Ok(WriteOutcome::Unchanged);
        }
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    fs::write(path, content).map_err(io_err)?;
    tracing::info!("Wrote {:?}", path);

    Ok(WriteOutcome::Written)
}
