//! Built-in cell processors and predicates
//!
//! `Table::process` and `Table::filter` accept any closure. These enums cover
//! the common cases so recipes and the CLI can name them declaratively.

use serde::{Deserialize, Serialize};

/// A text-to-text cell rewrite
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CellProcessor {
    /// Replace every occurrence of `find` with `replace`
    Replace {
        find: String,
        #[serde(default)]
        replace: String,
    },

    /// Drop everything up to and including the first `delimiter`
    StripThrough { delimiter: String },

    /// Remove leading and trailing whitespace
    Trim,

    /// Convert to uppercase
    Uppercase,

    /// Convert to lowercase
    Lowercase,

    /// Replace the whole cell with a constant
    Set { value: String },
}

impl CellProcessor {
    /// Apply this processor to a cell
    pub fn apply(&self, cell: &str) -> String {
        match self {
            CellProcessor::Replace { find, replace } => {
                if find.is_empty() {
                    cell.to_string()
                } else {
                    cell.replace(find.as_str(), replace)
                }
            }
            CellProcessor::StripThrough { delimiter } => match cell.find(delimiter.as_str()) {
                Some(pos) => cell[pos + delimiter.len()..].to_string(),
                None => cell.to_string(),
            },
            CellProcessor::Trim => cell.trim().to_string(),
            CellProcessor::Uppercase => cell.to_uppercase(),
            CellProcessor::Lowercase => cell.to_lowercase(),
            CellProcessor::Set { value } => value.clone(),
        }
    }
}

/// A cell test; matching rows are removed by `filter`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CellPredicate {
    Equals { value: String },
    Contains { value: String },
    StartsWith { value: String },
    EndsWith { value: String },
    /// Empty or whitespace only
    Empty,
    /// Inverts the inner predicate
    Not { predicate: Box<CellPredicate> },
}

impl CellPredicate {
    /// Test a cell
    pub fn matches(&self, cell: &str) -> bool {
        match self {
            CellPredicate::Equals { value } => cell == value,
            CellPredicate::Contains { value } => cell.contains(value.as_str()),
            CellPredicate::StartsWith { value } => cell.starts_with(value.as_str()),
            CellPredicate::EndsWith { value } => cell.ends_with(value.as_str()),
            CellPredicate::Empty => cell.trim().is_empty(),
            CellPredicate::Not { predicate } => !predicate.matches(cell),
        }
    }

    /// Wrap in `Not`
    pub fn negate(self) -> Self {
        CellPredicate::Not {
            predicate: Box::new(self),
        }
    }
}
