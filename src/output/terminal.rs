//! Boxed table preview for terminals

use std::io::Write;

use anyhow::Result;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::model::Table;

use super::OutputFormatter;

/// Terminal preview, optionally limited to the first rows
pub struct TerminalOutput {
    max_rows: Option<usize>,
}

impl TerminalOutput {
    pub fn new() -> Self {
        Self { max_rows: None }
    }

    pub fn with_max_rows(max_rows: usize) -> Self {
        Self {
            max_rows: Some(max_rows),
        }
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TerminalOutput {
    fn render(&self, table: &Table, writer: &mut dyn Write) -> Result<()> {
        if table.is_empty() {
            writeln!(writer, "(empty table)")?;
            return Ok(());
        }

        let shown = self.max_rows.unwrap_or(usize::MAX).min(table.row_count());
        let mut builder = Builder::default();
        for row in table.rows.iter().take(shown + 1) {
            builder.push_record(row.cells.iter().map(String::as_str));
        }

        let mut display = builder.build();
        display.with(Style::modern());
        writeln!(writer, "{}", display)?;

        if shown < table.row_count() {
            writeln!(writer, "... {} more rows", table.row_count() - shown)?;
        }
        writeln!(
            writer,
            "{} rows x {} columns",
            table.row_count(),
            table.width()
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_contains_cells_and_summary() {
        let table = Table::from_records(vec![vec!["Name", "Tags"], vec!["a", "x;y"]]);
        let mut buf = Vec::new();
        TerminalOutput::new().render(&table, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Name"));
        assert!(text.contains("x;y"));
        assert!(text.ends_with("1 rows x 2 columns\n"));
    }

    #[test]
    fn test_render_truncates() {
        let table = Table::from_records(vec![vec!["n"], vec!["1"], vec!["2"], vec!["3"]]);
        let mut buf = Vec::new();
        TerminalOutput::with_max_rows(1).render(&table, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("... 2 more rows"));
        assert!(text.ends_with("3 rows x 1 columns\n"));
    }
}
