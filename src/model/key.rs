//! Composite key handling

use super::table::Row;

/// Builder for composite row keys over a fixed set of columns
#[derive(Debug, Clone)]
pub struct KeyBuilder {
    column_indices: Vec<usize>,
    separator: String,
}

impl KeyBuilder {
    /// Create a key builder over the given column indices
    pub fn new(indices: Vec<usize>) -> Self {
        Self {
            column_indices: indices,
            separator: String::new(),
        }
    }

    /// Set the separator placed between key components in `build_key`
    pub fn with_separator(mut self, sep: impl Into<String>) -> Self {
        self.separator = sep.into();
        self
    }

    /// Build a key string by joining the key cells
    pub fn build_key(&self, row: &Row) -> String {
        self.key_values(row).join(&self.separator)
    }

    /// The key cells in key order, borrowed from the row
    ///
    /// Two rows have equal keys exactly when these vectors are equal.
    pub fn key_values<'a>(&self, row: &'a Row) -> Vec<&'a str> {
        self.column_indices.iter().map(|&i| row.cell(i)).collect()
    }

    /// Get the column indices
    pub fn column_indices(&self) -> &[usize] {
        &self.column_indices
    }

    /// Check whether a column takes part in the key
    pub fn contains(&self, index: usize) -> bool {
        self.column_indices.contains(&index)
    }
}
