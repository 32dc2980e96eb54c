//! Plain delimited text output

use std::io::Write;

use anyhow::Result;

use crate::model::Table;

use super::OutputFormatter;

/// Writes the table in the engine's native text format
pub struct DelimitedOutput {
    separator: char,
}

impl DelimitedOutput {
    pub fn new(separator: char) -> Self {
        Self { separator }
    }
}

impl OutputFormatter for DelimitedOutput {
    fn render(&self, table: &Table, writer: &mut dyn Write) -> Result<()> {
        writer.write_all(table.to_text(self.separator).as_bytes())?;
        Ok(())
    }
}
