//! Key-based row collapsing with multi-value aggregation

use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxBuildHasher;

use crate::error::TableResult;
use crate::model::{KeyBuilder, Table};
use crate::parser::join;

/// Separator between aggregated values in a shrunk cell
pub const AGGREGATE_SEPARATOR: char = ';';

/// Rows sharing one key
struct Group<'a> {
    first_row: usize,
    values: Vec<IndexSet<&'a str, FxBuildHasher>>,
}

impl Table {
    /// Collapse rows that share the same key columns
    ///
    /// One row is emitted per distinct key, in first-seen order, using the
    /// first row with that key. Each `compress_cols` cell is replaced by the
    /// distinct values of that column across the group, in first-seen order,
    /// joined with `;`. The header row takes part like any other row.
    pub fn shrink(&self, key_cols: &[usize], compress_cols: &[usize]) -> TableResult<Table> {
        for &index in key_cols.iter().chain(compress_cols) {
            self.ensure_column(index)?;
        }

        let width = self.width();
        let key = KeyBuilder::new(key_cols.to_vec());
        let mut groups: IndexMap<Vec<&str>, Group<'_>, FxBuildHasher> = IndexMap::default();

        for (row_index, row) in self.rows.iter().enumerate() {
            let group = groups.entry(key.key_values(row)).or_insert_with(|| Group {
                first_row: row_index,
                values: vec![IndexSet::default(); compress_cols.len()],
            });
            for (values, &col) in group.values.iter_mut().zip(compress_cols) {
                values.insert(row.cell(col));
            }
        }

        let rows = groups
            .values()
            .map(|group| {
                let mut row = self.rows[group.first_row].clone();
                row.resize(width);
                for (values, &col) in group.values.iter().zip(compress_cols) {
                    let values: Vec<&str> = values.iter().copied().collect();
                    row.cells[col] = join(&values, AGGREGATE_SEPARATOR);
                }
                row
            })
            .collect();

        tracing::debug!(
            groups = groups.len(),
            rows = self.rows.len(),
            "shrunk table"
        );
        Ok(Table::new(rows))
    }
}
