//! Table and Row data structures

use crate::error::{TableError, TableResult};
use crate::parser::delimited;

use super::column::ColumnRef;

/// A row of text cells
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Row {
    pub(crate) cells: Vec<String>,
}

impl Row {
    /// Create a row from owned cells
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    /// Cell values in column order
    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    /// Get a cell by column index
    pub fn get(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(String::as_str)
    }

    /// Get a cell by column index, treating missing cells as empty
    pub fn cell(&self, index: usize) -> &str {
        self.get(index).unwrap_or("")
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Truncate or pad with empty cells to exactly `width` cells
    pub(crate) fn resize(&mut self, width: usize) {
        self.cells.resize(width, String::new());
    }
}

impl<S: Into<String>> FromIterator<S> for Row {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

/// A header-first table of text rows
///
/// Row 0 is the header. Every row is kept at the header's width: short rows
/// are padded with empty cells and long rows are truncated on construction.
/// Rows are only reachable read-only from outside the crate, so the width
/// cannot drift after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub(crate) rows: Vec<Row>,
}

impl Table {
    /// Create a table, normalizing every row to the header width
    pub fn new(rows: Vec<Row>) -> Self {
        let mut table = Self { rows };
        table.normalize();
        table
    }

    /// Build a table from nested string-like records
    pub fn from_records<R, S>(records: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(records.into_iter().map(Row::from_iter).collect())
    }

    /// Parse a whole-table text blob
    pub fn parse(text: &str, separator: char) -> Self {
        delimited::parse_table(text, separator)
    }

    /// Serialize to a whole-table text blob
    pub fn to_text(&self, separator: char) -> String {
        delimited::serialize_table(self, separator)
    }

    /// All rows, header first
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// The header row, if the table has any rows
    pub fn header(&self) -> Option<&Row> {
        self.rows.first()
    }

    /// All rows after the header
    pub fn data_rows(&self) -> &[Row] {
        self.rows.get(1..).unwrap_or(&[])
    }

    /// Mutable access to the rows after the header
    pub(crate) fn data_rows_mut(&mut self) -> &mut [Row] {
        self.rows.get_mut(1..).unwrap_or(&mut [])
    }

    /// Number of columns, as defined by the header
    pub fn width(&self) -> usize {
        self.header().map_or(0, Row::len)
    }

    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    /// True when the table has no header
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First header index whose text equals the trimmed `name`
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.header()?.cells.iter().position(|c| c == name)
    }

    /// Resolve a column reference against the header
    pub fn resolve(&self, column: &ColumnRef) -> TableResult<usize> {
        match column {
            ColumnRef::Index(index) => {
                self.ensure_column(*index)?;
                Ok(*index)
            }
            ColumnRef::Name(name) => self
                .column_index(name)
                .ok_or_else(|| TableError::ColumnNotFound(name.clone())),
        }
    }

    /// Fail unless `index` addresses an existing column
    pub fn ensure_column(&self, index: usize) -> TableResult<()> {
        let width = self.width();
        if index < width {
            Ok(())
        } else {
            Err(TableError::ColumnOutOfRange { index, width })
        }
    }

    /// Clone the cells out as plain nested vectors
    pub fn records(&self) -> Vec<Vec<String>> {
        self.rows.iter().map(|r| r.cells.clone()).collect()
    }

    /// Copy with every row fixed to the header width
    ///
    /// Operations that index cells directly start from this copy, so a table
    /// assembled without `Table::new` cannot make them index out of bounds.
    pub(crate) fn normalized(&self) -> Table {
        Table::new(self.rows.clone())
    }

    fn normalize(&mut self) {
        let width = self.width();
        for row in self.data_rows_mut() {
            if row.len() != width {
                row.resize(width);
            }
        }
    }
}
