//! Output formatting for transformed tables

mod delimited;
mod json;
mod terminal;

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::OutputFormat;
use crate::model::Table;

pub use delimited::DelimitedOutput;
pub use json::JsonOutput;
pub use terminal::TerminalOutput;

/// Trait for output formatters
pub trait OutputFormatter {
    /// Render a table to a writer
    fn render(&self, table: &Table, writer: &mut dyn Write) -> Result<()>;
}

/// Factory for creating output formatters
pub struct OutputFactory;

impl OutputFactory {
    /// Create an output formatter based on format type
    pub fn create(format: OutputFormat, separator: char) -> Box<dyn OutputFormatter> {
        match format {
            OutputFormat::Delimited => Box::new(DelimitedOutput::new(separator)),
            OutputFormat::Json => Box::new(JsonOutput::new()),
            OutputFormat::Terminal => Box::new(TerminalOutput::new()),
        }
    }
}

/// Render a table to stdout
pub fn render_to_stdout(table: &Table, format: OutputFormat, separator: char) -> Result<()> {
    let formatter = OutputFactory::create(format, separator);
    let mut stdout = std::io::stdout().lock();
    formatter.render(table, &mut stdout)
}

/// Render a table into a file
pub fn render_to_file(
    table: &Table,
    path: &Path,
    format: OutputFormat,
    separator: char,
) -> Result<()> {
    let formatter = OutputFactory::create(format, separator);
    let mut buf = Vec::new();
    formatter.render(table, &mut buf)?;
    std::fs::write(path, buf)
        .with_context(|| format!("Failed to write output file: {}", path.display()))?;
    Ok(())
}
