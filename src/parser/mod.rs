//! Parser layer for reading delimited table files

pub mod delimited;
mod quoted;

use std::path::Path;

use crate::config::Config;
use crate::error::{TableError, TableResult};
use crate::model::Table;

pub use self::delimited::{join, split, DelimitedParser};
pub use self::quoted::QuotedCsvParser;

/// Trait for parsing table files
pub trait Parser: Send + Sync {
    /// Parse a file and return a Table
    fn parse(&self, path: &Path, config: &Config) -> TableResult<Table>;

    /// Check if this parser can handle the given file extension
    fn supports_extension(&self, ext: &str) -> bool;
}

/// Factory for choosing a parser from the file extension
pub struct ParserFactory {
    parsers: Vec<Box<dyn Parser>>,
}

impl Default for ParserFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserFactory {
    /// Create a new parser factory with all supported parsers
    pub fn new() -> Self {
        Self {
            parsers: vec![
                Box::new(DelimitedParser::tsv()),
                Box::new(DelimitedParser::csv()),
            ],
        }
    }

    /// Get a parser for the given file path
    ///
    /// Quoted mode always uses the CSV reader. An explicit separator makes any
    /// extension readable as plain delimited text.
    pub fn get_parser(&self, path: &Path, config: &Config) -> TableResult<&dyn Parser> {
        if config.quoted {
            return Ok(&QuotedCsvParser);
        }

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        for parser in &self.parsers {
            if parser.supports_extension(&ext) {
                return Ok(parser.as_ref());
            }
        }

        if config.separator.is_some() {
            // the separator override wins over the parser's own
            return Ok(self.parsers[1].as_ref());
        }

        Err(TableError::UnsupportedFormat(
            path.extension()
                .and_then(|e| e.to_str())
                .unwrap_or("unknown")
                .to_string(),
        ))
    }

    /// Parse a file using the appropriate parser
    pub fn parse(&self, path: &Path, config: &Config) -> TableResult<Table> {
        let parser = self.get_parser(path, config)?;
        let table = parser.parse(path, config)?;
        tracing::debug!(
            path = %path.display(),
            rows = table.row_count(),
            columns = table.width(),
            "parsed table"
        );
        Ok(table)
    }
}

/// Separator implied by a file's extension: tab for `.tsv`/`.tab`, else comma
pub fn separator_for_path(path: &Path) -> char {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .as_deref()
    {
        Some("tsv" | "tab") => '\t',
        _ => ',',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parser_by_extension() {
        let factory = ParserFactory::new();
        let config = Config::default();
        assert!(factory.get_parser(Path::new("assays.tsv"), &config).is_ok());
        assert!(factory.get_parser(Path::new("annotation.CSV"), &config).is_ok());
        assert!(matches!(
            factory.get_parser(Path::new("data.xlsx"), &config),
            Err(TableError::UnsupportedFormat(ext)) if ext == "xlsx"
        ));
    }

    #[test]
    fn test_separator_override_accepts_any_extension() {
        let factory = ParserFactory::new();
        let config = Config::default().with_separator('|');
        assert!(factory.get_parser(&PathBuf::from("data.psv"), &config).is_ok());
    }

    #[test]
    fn test_parse_file_with_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.psv");
        std::fs::write(&path, "a|b\n1|2\n").unwrap();

        let config = Config::default().with_separator('|');
        let table = ParserFactory::new().parse(&path, &config).unwrap();
        assert_eq!(table.records(), vec![vec!["a", "b"], vec!["1", "2"]]);
    }

    #[test]
    fn test_separator_for_path() {
        assert_eq!(separator_for_path(Path::new("assays.TSV")), '\t');
        assert_eq!(separator_for_path(Path::new("annotation.csv")), ',');
        assert_eq!(separator_for_path(Path::new("noext")), ',');
    }
}
