//! Recipe documents describing a chain of table operations

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{TableError, TableResult};
use crate::model::ColumnRef;
use crate::storage::read_table_text;
use crate::transform::{CellPredicate, CellProcessor};

fn default_separator() -> String {
    ",".to_string()
}

/// A sequence of steps applied to one input table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// Separator of the input table
    #[serde(default = "default_separator")]
    pub separator: String,
    /// Steps, applied in order
    pub steps: Vec<Step>,
}

/// One operation of a recipe
///
/// Column arguments accept either a 0-based index or a header name, resolved
/// against the table as it stands when the step runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// Switch the separator used by later writes
    Format { separator: String },

    ExtractColumns { columns: Vec<ColumnRef> },

    AddColumn {
        index: usize,
        header: String,
        #[serde(default)]
        content: String,
    },

    CopyContent {
        from: ColumnRef,
        to: ColumnRef,
        #[serde(default)]
        overwrite: bool,
    },

    Shrink {
        keys: Vec<ColumnRef>,
        #[serde(default)]
        compress: Vec<ColumnRef>,
    },

    /// Merge another table file onto this one by named key columns
    Merge {
        content: PathBuf,
        keys: Vec<String>,
        #[serde(default)]
        separator: Option<String>,
    },

    Prefix {
        column: ColumnRef,
        #[serde(default)]
        prefix: Option<String>,
        #[serde(default)]
        postfix: Option<String>,
    },

    RemoveRow { index: usize },

    RemoveColumn { column: ColumnRef },

    RemoveEmptyColumns,

    SwapColumns { a: ColumnRef, b: ColumnRef },

    RenameColumn { column: ColumnRef, name: String },

    SplitColumn {
        column: ColumnRef,
        #[serde(default)]
        separator: Option<String>,
    },

    Process {
        column: ColumnRef,
        processor: CellProcessor,
    },

    Filter {
        column: ColumnRef,
        predicate: CellPredicate,
    },

    /// Replace the current table with a file's contents
    Load {
        path: PathBuf,
        #[serde(default)]
        separator: Option<String>,
    },

    /// Save the current table
    Write {
        path: PathBuf,
        #[serde(default)]
        separator: Option<String>,
    },
}

impl Step {
    /// Operation name, as written in recipes
    pub fn name(&self) -> &'static str {
        match self {
            Step::Format { .. } => "format",
            Step::ExtractColumns { .. } => "extract_columns",
            Step::AddColumn { .. } => "add_column",
            Step::CopyContent { .. } => "copy_content",
            Step::Shrink { .. } => "shrink",
            Step::Merge { .. } => "merge",
            Step::Prefix { .. } => "prefix",
            Step::RemoveRow { .. } => "remove_row",
            Step::RemoveColumn { .. } => "remove_column",
            Step::RemoveEmptyColumns => "remove_empty_columns",
            Step::SwapColumns { .. } => "swap_columns",
            Step::RenameColumn { .. } => "rename_column",
            Step::SplitColumn { .. } => "split_column",
            Step::Process { .. } => "process",
            Step::Filter { .. } => "filter",
            Step::Load { .. } => "load",
            Step::Write { .. } => "write",
        }
    }
}

impl Recipe {
    /// Parse a recipe from JSON
    pub fn from_json(json: &str) -> TableResult<Self> {
        serde_json::from_str(json).map_err(|e| TableError::Recipe(e.to_string()))
    }

    /// Load a recipe file
    pub fn load(path: &Path) -> TableResult<Self> {
        Self::from_json(&read_table_text(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_recipe() {
        let recipe = Recipe::from_json(
            r#"{
                "separator": "tab",
                "steps": [
                    {"op": "extract_columns", "columns": ["Assay Name", 3]},
                    {"op": "process", "column": 1,
                     "processor": {"kind": "strip_through", "delimiter": "/"}},
                    {"op": "prefix", "column": 0, "prefix": "Dataset:name:"},
                    {"op": "remove_row", "index": 0},
                    {"op": "remove_empty_columns"},
                    {"op": "write", "path": "out.tsv"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(recipe.separator, "tab");
        let names: Vec<_> = recipe.steps.iter().map(Step::name).collect();
        assert_eq!(
            names,
            vec!["extract_columns", "process", "prefix", "remove_row", "remove_empty_columns", "write"]
        );
        match &recipe.steps[0] {
            Step::ExtractColumns { columns } => {
                assert_eq!(columns, &vec![ColumnRef::from("Assay Name"), ColumnRef::Index(3)]);
            }
            other => panic!("unexpected step: {:?}", other),
        }
    }

    #[test]
    fn test_default_separator() {
        let recipe = Recipe::from_json(r#"{"steps": []}"#).unwrap();
        assert_eq!(recipe.separator, ",");
    }

    #[test]
    fn test_unknown_op_is_recipe_error() {
        let err = Recipe::from_json(r#"{"steps": [{"op": "explode"}]}"#).unwrap_err();
        assert!(matches!(err, TableError::Recipe(_)));
    }
}
