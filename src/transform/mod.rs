//! Whole-table text transformations
//!
//! Each function takes a complete table as text (rows separated by `\n`, header
//! first) and returns a new complete table as text, so calls chain by feeding
//! one output into the next. The work is done by the `Table` methods defined
//! in the submodules; these wrappers parse and serialize around them.

mod columns;
mod join;
pub mod processor;
mod rows;
mod shrink;

use crate::error::TableResult;
use crate::model::Table;
use crate::parser::delimited;

pub use processor::{CellPredicate, CellProcessor};
pub use shrink::AGGREGATE_SEPARATOR;

/// Change the separator, fixing every row to the header's column count
pub fn format(input: &str, from_sep: char, to_sep: char) -> String {
    Table::parse(input, from_sep).to_text(to_sep)
}

/// Project columns, keeping one data row per distinct projected value string
pub fn extract_columns(input: &str, indices: &[usize], sep: char) -> TableResult<String> {
    let table = Table::parse(input, sep).extract_columns(indices)?;
    Ok(table.to_text(sep))
}

/// Insert a column holding `content` in every data row and `header` on top
pub fn add_new_column(
    input: &str,
    sep: char,
    index: usize,
    content: &str,
    header: &str,
) -> TableResult<String> {
    let table = Table::parse(input, sep).add_column(index, content, header)?;
    Ok(table.to_text(sep))
}

/// Copy one column into another, optionally only into empty cells
pub fn copy_content(
    input: &str,
    from: usize,
    to: usize,
    overwrite: bool,
    sep: char,
) -> TableResult<String> {
    let table = Table::parse(input, sep).copy_content(from, to, overwrite)?;
    Ok(table.to_text(sep))
}

/// Collapse rows sharing `key_cols`, aggregating `compress_cols`
pub fn shrink(
    input: &str,
    key_cols: &[usize],
    compress_cols: &[usize],
    sep: char,
) -> TableResult<String> {
    let table = Table::parse(input, sep).shrink(key_cols, compress_cols)?;
    Ok(table.to_text(sep))
}

/// Merge the non-key columns of `content` onto `input` by the named keys
pub fn merge_columns(input: &str, content: &str, keys: &[&str], sep: char) -> TableResult<String> {
    let left = Table::parse(input, sep);
    let right = Table::parse(content, sep);
    Ok(left.merge(&right, keys)?.to_text(sep))
}

/// Wrap every data cell of a column with a prefix and/or postfix
pub fn prefix_column(
    input: &str,
    index: usize,
    sep: char,
    prefix: Option<&str>,
    postfix: Option<&str>,
) -> TableResult<String> {
    let table = Table::parse(input, sep).prefix_column(index, prefix, postfix)?;
    Ok(table.to_text(sep))
}

/// Drop one row, where index 0 is the header
///
/// The rows that remain are fixed to the width of the (possibly new) header.
pub fn remove_row(input: &str, row_index: usize, sep: char) -> String {
    Table::parse(input, sep).remove_row(row_index).to_text(sep)
}

/// Drop a column from every row
pub fn remove_column(input: &str, index: usize, sep: char) -> TableResult<String> {
    let table = Table::parse(input, sep).remove_column(index)?;
    Ok(table.to_text(sep))
}

/// Drop columns that are empty or whitespace in every data row
pub fn remove_empty_columns(input: &str, sep: char) -> String {
    Table::parse(input, sep).remove_empty_columns().to_text(sep)
}

/// Exchange two columns
pub fn swap_columns(input: &str, a: usize, b: usize, sep: char) -> TableResult<String> {
    let table = Table::parse(input, sep).swap_columns(a, b)?;
    Ok(table.to_text(sep))
}

/// Rename one header cell
pub fn rename_column(input: &str, index: usize, name: &str, sep: char) -> TableResult<String> {
    let table = Table::parse(input, sep).rename_column(index, name)?;
    Ok(table.to_text(sep))
}

/// Turn a multi-value column into numbered trailing columns
pub fn split_column(input: &str, index: usize, sep: char, sep2: char) -> TableResult<String> {
    let table = Table::parse(input, sep).split_column(index, sep2)?;
    Ok(table.to_text(sep))
}

/// Rewrite a column with `processor`, then drop repeated rows
pub fn process<F>(input: &str, index: usize, sep: char, processor: F) -> TableResult<String>
where
    F: Fn(&str) -> String,
{
    let table = Table::parse(input, sep).process(index, processor)?;
    Ok(table.to_text(sep))
}

/// Drop data rows whose cell satisfies `predicate`
pub fn filter<F>(input: &str, index: usize, sep: char, predicate: F) -> TableResult<String>
where
    F: Fn(&str) -> bool,
{
    let table = Table::parse(input, sep).filter(index, predicate)?;
    Ok(table.to_text(sep))
}

/// Index of the first header cell equal to the trimmed `name`
pub fn get_column_index(input: &str, name: &str, sep: char) -> Option<usize> {
    let header = delimited::lines(input).into_iter().next()?;
    let name = name.trim();
    delimited::split(header, sep).iter().position(|c| c == name)
}
