//! Column reshaping: projection, insertion, removal, rename, swap, split

use rayon::prelude::*;
use rustc_hash::FxHashSet;

use crate::error::{TableError, TableResult};
use crate::model::{KeyBuilder, Row, Table};
use crate::parser::split;

impl Table {
    /// Project the listed columns into a new table
    ///
    /// Indices may repeat and are emitted in the order given. Data rows whose
    /// projected values concatenate to an already emitted string are dropped.
    pub fn extract_columns(&self, indices: &[usize]) -> TableResult<Table> {
        for &index in indices {
            self.ensure_column(index)?;
        }
        let Some(header) = self.header() else {
            return Ok(Table::default());
        };

        let key = KeyBuilder::new(indices.to_vec());
        let mut seen = FxHashSet::default();
        let mut rows = Vec::with_capacity(self.rows.len());
        rows.push(project(header, indices));

        for row in self.data_rows() {
            if seen.insert(key.build_key(row)) {
                rows.push(project(row, indices));
            }
        }

        tracing::debug!(
            columns = indices.len(),
            kept = rows.len() - 1,
            dropped = self.row_count() + 1 - rows.len(),
            "extracted columns"
        );
        Ok(Table::new(rows))
    }

    /// Insert a column at `index` (equal to the width to append)
    ///
    /// The header receives `header`; every data row receives `content`.
    pub fn add_column(&self, index: usize, content: &str, header: &str) -> TableResult<Table> {
        let width = self.width();
        if index > width {
            return Err(TableError::ColumnOutOfRange { index, width });
        }

        let mut out = self.normalized();
        for (i, row) in out.rows.iter_mut().enumerate() {
            let value = if i == 0 { header } else { content };
            row.cells.insert(index, value.to_string());
        }
        Ok(out)
    }

    /// Drop a column from every row, header included
    pub fn remove_column(&self, index: usize) -> TableResult<Table> {
        self.ensure_column(index)?;
        let mut out = self.normalized();
        for row in &mut out.rows {
            row.cells.remove(index);
        }
        Ok(out)
    }

    /// Drop every column that is empty or whitespace in all data rows
    pub fn remove_empty_columns(&self) -> Table {
        let table = self.normalized();
        let width = table.width();
        let mut empty = vec![true; width];
        for row in table.data_rows() {
            for (i, cell) in row.cells.iter().enumerate() {
                if !cell.trim().is_empty() {
                    empty[i] = false;
                }
            }
        }

        let removed: Vec<usize> = (0..width).filter(|&i| empty[i]).collect();
        if removed.is_empty() {
            return table;
        }
        tracing::debug!(?removed, "removing empty columns");

        let mut out = table;
        for row in &mut out.rows {
            // highest index first so lower indices stay valid
            for &index in removed.iter().rev() {
                row.cells.remove(index);
            }
        }
        out
    }

    /// Exchange two columns in every row, header included
    pub fn swap_columns(&self, a: usize, b: usize) -> TableResult<Table> {
        self.ensure_column(a)?;
        self.ensure_column(b)?;
        let mut out = self.normalized();
        for row in &mut out.rows {
            row.cells.swap(a, b);
        }
        Ok(out)
    }

    /// Rewrite one header cell
    pub fn rename_column(&self, index: usize, name: &str) -> TableResult<Table> {
        self.ensure_column(index)?;
        let mut out = self.normalized();
        out.rows[0].cells[index] = name.to_string();
        Ok(out)
    }

    /// Copy column `from` into column `to` in every data row
    ///
    /// Without `overwrite` only empty target cells are filled.
    pub fn copy_content(&self, from: usize, to: usize, overwrite: bool) -> TableResult<Table> {
        self.ensure_column(from)?;
        self.ensure_column(to)?;
        let mut out = self.normalized();
        out.data_rows_mut().par_iter_mut().for_each(|row| {
            if overwrite || row.cells[to].is_empty() {
                row.cells[to] = row.cells[from].clone();
            }
        });
        Ok(out)
    }

    /// Wrap every data cell of a column with literal text
    pub fn prefix_column(
        &self,
        index: usize,
        prefix: Option<&str>,
        postfix: Option<&str>,
    ) -> TableResult<Table> {
        self.ensure_column(index)?;
        let prefix = prefix.unwrap_or("");
        let postfix = postfix.unwrap_or("");
        if prefix.is_empty() && postfix.is_empty() {
            return Ok(self.clone());
        }

        let mut out = self.normalized();
        out.data_rows_mut().par_iter_mut().for_each(|row| {
            let cell = &mut row.cells[index];
            cell.insert_str(0, prefix);
            cell.push_str(postfix);
        });
        Ok(out)
    }

    /// Replace a multi-value column with one trailing column per value
    ///
    /// The column at `index` is removed and N columns named `"<header> 1"` to
    /// `"<header> N"` are appended, N being the largest number of
    /// `separator`-delimited values found in any data row.
    pub fn split_column(&self, index: usize, separator: char) -> TableResult<Table> {
        self.ensure_column(index)?;

        let values: Vec<Vec<String>> = self
            .data_rows()
            .iter()
            .map(|row| split(row.cell(index), separator))
            .collect();
        let count = values.iter().map(Vec::len).max().unwrap_or(0);

        let header = &self.rows[0];
        let name = header.cell(index);
        let mut header_cells = without(header, index);
        header_cells.extend((1..=count).map(|n| format!("{} {}", name, n)));
        let width = header_cells.len();

        let mut rows = Vec::with_capacity(self.rows.len());
        rows.push(Row::new(header_cells));
        for (row, parts) in self.data_rows().iter().zip(values) {
            let mut cells = without(row, index);
            cells.extend(parts);
            cells.resize(width, String::new());
            rows.push(Row::new(cells));
        }

        tracing::debug!(column = name, parts = count, "split column");
        Ok(Table::new(rows))
    }
}

fn project(row: &Row, indices: &[usize]) -> Row {
    indices.iter().map(|&i| row.cell(i)).collect()
}

fn without(row: &Row, index: usize) -> Vec<String> {
    row.cells
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, c)| c.clone())
        .collect()
}
