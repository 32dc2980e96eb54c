//! RFC 4180 quoted CSV import

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::config::Config;
use crate::error::{TableError, TableResult};
use crate::model::{Row, Table};

use super::{separator_for_path, Parser};

/// Parser for CSV files that quote fields
///
/// Quotes are resolved on import; the resulting table is plain text cells and
/// is written back out unquoted.
pub struct QuotedCsvParser;

impl QuotedCsvParser {
    /// Read quoted CSV from any reader
    pub fn read<R: Read>(&self, reader: R, separator: char) -> TableResult<Table> {
        if !separator.is_ascii() {
            return Err(TableError::InvalidSeparator(separator));
        }
        let delimiter = separator as u8;
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(delimiter)
            .from_reader(reader);

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            rows.push(record.iter().collect::<Row>());
        }

        tracing::debug!(rows = rows.len(), "read quoted csv");
        Ok(Table::new(rows))
    }
}

impl Parser for QuotedCsvParser {
    fn parse(&self, path: &Path, config: &Config) -> TableResult<Table> {
        let file = File::open(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let separator = config
            .separator
            .unwrap_or_else(|| separator_for_path(path));
        self.read(BufReader::new(file), separator)
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext, "csv" | "tsv" | "tab")
    }
}
