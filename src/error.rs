//! Error types for table transformations

use std::path::PathBuf;

use thiserror::Error;

/// Which table of a merge a key name was looked up in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableSide {
    Input,
    Content,
}

impl std::fmt::Display for TableSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableSide::Input => write!(f, "input"),
            TableSide::Content => write!(f, "content"),
        }
    }
}

/// Errors raised by the transformation engine
#[derive(Debug, Error)]
pub enum TableError {
    /// A merge key is missing from one of the headers.
    #[error("Key header {key} not found in {side}")]
    KeyNotFound { key: String, side: TableSide },

    /// Computed output width disagrees with the expected width. Indicates a bug.
    #[error("Internal invariant violated: expected {expected} columns, built {actual}")]
    InvariantViolation { expected: usize, actual: usize },

    /// A positional column reference lies outside the header.
    #[error("Column index {index} out of range for table with {width} columns")]
    ColumnOutOfRange { index: usize, width: usize },

    /// A named column reference does not match any header cell.
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// The operation needs a header row but the table has none.
    #[error("Table has no header row")]
    EmptyTable,

    /// Reading or writing a table file failed.
    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No parser handles the file extension.
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// A separator that the chosen reader cannot use.
    #[error("Unsupported separator {0:?}")]
    InvalidSeparator(char),

    /// A quoted CSV source could not be read.
    #[error("Invalid CSV input: {0}")]
    Csv(#[from] csv::Error),

    /// A pipeline recipe is malformed.
    #[error("Invalid recipe: {0}")]
    Recipe(String),
}

/// Result type for engine operations.
pub type TableResult<T> = Result<T, TableError>;
