//! Plain delimited text: field tokenizer, line serializer and table text codec
//!
//! Fields are split on a literal separator character. There is no quoting, so a
//! separator inside a value is indistinguishable from a column boundary and
//! callers must pick a separator that never appears in the data.

use std::path::Path;

use rayon::prelude::*;

use crate::config::Config;
use crate::error::TableResult;
use crate::model::{Row, Table};
use crate::storage::read_table_text;

use super::Parser;

/// Split a line into cells on `sep`
pub fn split(line: &str, sep: char) -> Vec<String> {
    line.split(sep).map(String::from).collect()
}

/// Join cells with `sep` (n cells produce n-1 separators)
pub fn join<S: AsRef<str>>(cells: &[S], sep: char) -> String {
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            line.push(sep);
        }
        line.push_str(cell.as_ref());
    }
    line
}

/// Split a text blob into its lines
///
/// A trailing `\r` is stripped from each line and trailing empty lines are
/// dropped, so both `"a\nb\n"` and `"a\r\nb"` give two lines.
pub fn lines(text: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = text
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .collect();
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}

/// Append `line` and its terminating newline
pub fn push_line(output: &mut String, line: &str) {
    output.push_str(line);
    output.push('\n');
}

/// Parse a whole-table text blob into a normalized table
pub fn parse_table(text: &str, sep: char) -> Table {
    let rows: Vec<Row> = lines(text)
        .par_iter()
        .map(|line| Row::new(split(line, sep)))
        .collect();
    Table::new(rows)
}

/// Serialize a table, one line per row, each followed by `\n`
pub fn serialize_table(table: &Table, sep: char) -> String {
    let mut output = String::new();
    for row in &table.rows {
        push_line(&mut output, &join(&row.cells, sep));
    }
    output
}

/// Parser for unquoted delimited files
pub struct DelimitedParser {
    separator: char,
}

impl DelimitedParser {
    /// Create a parser for the given separator
    pub fn new(separator: char) -> Self {
        Self { separator }
    }

    /// Tab-separated values
    pub fn tsv() -> Self {
        Self::new('\t')
    }

    /// Comma-separated values
    pub fn csv() -> Self {
        Self::new(',')
    }
}

impl Parser for DelimitedParser {
    fn parse(&self, path: &Path, config: &Config) -> TableResult<Table> {
        let text = read_table_text(path)?;
        let sep = config.separator.unwrap_or(self.separator);
        Ok(parse_table(&text, sep))
    }

    fn supports_extension(&self, ext: &str) -> bool {
        match self.separator {
            '\t' => matches!(ext, "tsv" | "tab"),
            ',' => matches!(ext, "csv" | "txt"),
            _ => false,
        }
    }
}
