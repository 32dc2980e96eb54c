//! JSON output format

use std::io::Write;

use anyhow::Result;
use indexmap::IndexMap;
use serde::Serialize;

use crate::model::Table;

use super::OutputFormatter;

/// JSON output formatter
///
/// Each data row becomes an object keyed by header name, in column order. When
/// header names repeat, the rightmost column's value is kept.
pub struct JsonOutput {
    pretty: bool,
}

impl JsonOutput {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct JsonTable<'a> {
    columns: Vec<&'a str>,
    rows: Vec<IndexMap<&'a str, &'a str>>,
}

impl<'a> JsonTable<'a> {
    fn from_table(table: &'a Table) -> Self {
        let columns: Vec<&str> = table
            .header()
            .map(|h| h.cells.iter().map(String::as_str).collect())
            .unwrap_or_default();

        let rows = table
            .data_rows()
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .enumerate()
                    .map(|(i, name)| (*name, row.cell(i)))
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }
}

impl OutputFormatter for JsonOutput {
    fn render(&self, table: &Table, writer: &mut dyn Write) -> Result<()> {
        let output = JsonTable::from_table(table);

        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, &output)?;
        } else {
            serde_json::to_writer(&mut *writer, &output)?;
        }
        writeln!(writer)?;

        Ok(())
    }
}
