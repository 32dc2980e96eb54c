//! Column references

use serde::{Deserialize, Serialize};

/// A reference to a column, by position or by header name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnRef {
    /// 0-based position
    Index(usize),
    /// Header name, matched after trimming
    Name(String),
}

impl From<usize> for ColumnRef {
    fn from(index: usize) -> Self {
        ColumnRef::Index(index)
    }
}

impl From<&str> for ColumnRef {
    fn from(name: &str) -> Self {
        ColumnRef::Name(name.to_string())
    }
}

impl From<String> for ColumnRef {
    fn from(name: String) -> Self {
        ColumnRef::Name(name)
    }
}

impl std::str::FromStr for ColumnRef {
    type Err = std::convert::Infallible;

    /// Digits are read as an index, anything else as a header name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().parse::<usize>() {
            Ok(index) => ColumnRef::Index(index),
            Err(_) => ColumnRef::Name(s.to_string()),
        })
    }
}

impl std::fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnRef::Index(i) => write!(f, "#{}", i),
            ColumnRef::Name(name) => write!(f, "{}", name),
        }
    }
}
