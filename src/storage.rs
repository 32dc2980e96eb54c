//! Whole-file reads and writes of table text
//!
//! The engine itself never touches the file system; the CLI and the pipeline
//! runner use these to load inputs and persist results.

use std::path::Path;

use crate::error::{TableError, TableResult};

/// Read a whole table file as text
pub fn read_table_text(path: &Path) -> TableResult<String> {
    std::fs::read_to_string(path).map_err(|source| TableError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Write table text to `path`, replacing any existing file
pub fn write_table_text(path: &Path, content: &str) -> TableResult<()> {
    std::fs::write(path, content).map_err(|source| TableError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "wrote table");
    Ok(())
}
