//! Recipe execution: chained table operations with file collaborators

mod recipe;

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::{parse_separator, DEFAULT_SECONDARY_SEPARATOR};
use crate::error::{TableError, TableResult};
use crate::model::{ColumnRef, Table};
use crate::storage::{read_table_text, write_table_text};

pub use recipe::{Recipe, Step};

/// Shape of the table after one step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub step: String,
    pub rows: usize,
    pub columns: usize,
}

/// Final state of a recipe run
#[derive(Debug)]
pub struct PipelineResult {
    /// The table after the last step
    pub table: Table,
    /// Separator in effect after the last step
    pub separator: char,
    /// One report per executed step
    pub reports: Vec<StepReport>,
}

impl PipelineResult {
    /// Serialize the final table with the separator in effect
    pub fn to_text(&self) -> String {
        self.table.to_text(self.separator)
    }
}

/// Runs recipe steps against a table
pub struct PipelineRunner {
    base_dir: PathBuf,
}

impl Default for PipelineRunner {
    fn default() -> Self {
        Self::new(PathBuf::from("."))
    }
}

impl PipelineRunner {
    /// Create a runner resolving relative paths against `base_dir`
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Run every step of `recipe` on `input`
    pub fn run(&self, recipe: &Recipe, input: Table) -> TableResult<PipelineResult> {
        let mut separator = separator_arg(&recipe.separator)?;
        let mut table = input;
        let mut reports = Vec::with_capacity(recipe.steps.len());

        for (n, step) in recipe.steps.iter().enumerate() {
            tracing::debug!(step = n + 1, op = step.name(), "running step");
            table = self.apply(step, table, &mut separator)?;
            reports.push(StepReport {
                step: step.name().to_string(),
                rows: table.row_count(),
                columns: table.width(),
            });
        }

        tracing::info!(
            steps = reports.len(),
            rows = table.row_count(),
            columns = table.width(),
            "recipe finished"
        );
        Ok(PipelineResult {
            table,
            separator,
            reports,
        })
    }

    /// Read the recipe's input file and run the recipe on it
    pub fn run_file(&self, recipe: &Recipe, input: &Path) -> TableResult<PipelineResult> {
        let separator = separator_arg(&recipe.separator)?;
        let text = read_table_text(&self.resolve_path(input))?;
        self.run(recipe, Table::parse(&text, separator))
    }

    fn apply(&self, step: &Step, table: Table, separator: &mut char) -> TableResult<Table> {
        match step {
            Step::Format { separator: to } => {
                *separator = separator_arg(to)?;
                Ok(table)
            }
            Step::ExtractColumns { columns } => {
                let indices = resolve_all(&table, columns)?;
                table.extract_columns(&indices)
            }
            Step::AddColumn {
                index,
                header,
                content,
            } => table.add_column(*index, content, header),
            Step::CopyContent {
                from,
                to,
                overwrite,
            } => table.copy_content(table.resolve(from)?, table.resolve(to)?, *overwrite),
            Step::Shrink { keys, compress } => {
                let keys = resolve_all(&table, keys)?;
                let compress = resolve_all(&table, compress)?;
                table.shrink(&keys, &compress)
            }
            Step::Merge {
                content,
                keys,
                separator: content_sep,
            } => {
                let sep = match content_sep {
                    Some(s) => separator_arg(s)?,
                    None => *separator,
                };
                let content = Table::parse(&read_table_text(&self.resolve_path(content))?, sep);
                let keys: Vec<&str> = keys.iter().map(String::as_str).collect();
                table.merge(&content, &keys)
            }
            Step::Prefix {
                column,
                prefix,
                postfix,
            } => table.prefix_column(table.resolve(column)?, prefix.as_deref(), postfix.as_deref()),
            Step::RemoveRow { index } => Ok(table.remove_row(*index)),
            Step::RemoveColumn { column } => table.remove_column(table.resolve(column)?),
            Step::RemoveEmptyColumns => Ok(table.remove_empty_columns()),
            Step::SwapColumns { a, b } => table.swap_columns(table.resolve(a)?, table.resolve(b)?),
            Step::RenameColumn { column, name } => table.rename_column(table.resolve(column)?, name),
            Step::SplitColumn {
                column,
                separator: sep2,
            } => {
                let sep2 = match sep2 {
                    Some(s) => separator_arg(s)?,
                    None => DEFAULT_SECONDARY_SEPARATOR,
                };
                table.split_column(table.resolve(column)?, sep2)
            }
            Step::Process { column, processor } => {
                table.process(table.resolve(column)?, |cell| processor.apply(cell))
            }
            Step::Filter { column, predicate } => {
                table.filter(table.resolve(column)?, |cell| predicate.matches(cell))
            }
            Step::Load {
                path,
                separator: load_sep,
            } => {
                if let Some(s) = load_sep {
                    *separator = separator_arg(s)?;
                }
                let text = read_table_text(&self.resolve_path(path))?;
                Ok(Table::parse(&text, *separator))
            }
            Step::Write {
                path,
                separator: write_sep,
            } => {
                let sep = match write_sep {
                    Some(s) => separator_arg(s)?,
                    None => *separator,
                };
                write_table_text(&self.resolve_path(path), &table.to_text(sep))?;
                Ok(table)
            }
        }
    }

    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_relative() {
            self.base_dir.join(path)
        } else {
            path.to_path_buf()
        }
    }
}

/// Convenience function to run a recipe on an in-memory table
pub fn run_recipe(recipe: &Recipe, input: Table) -> TableResult<PipelineResult> {
    PipelineRunner::default().run(recipe, input)
}

fn separator_arg(s: &str) -> TableResult<char> {
    parse_separator(s).map_err(TableError::Recipe)
}

fn resolve_all(table: &Table, columns: &[ColumnRef]) -> TableResult<Vec<usize>> {
    columns.iter().map(|c| table.resolve(c)).collect()
}
