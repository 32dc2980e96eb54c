//! Key-based merge of two tables (left outer equi-join)

use rustc_hash::FxHashMap;

use crate::error::{TableError, TableResult, TableSide};
use crate::model::{KeyBuilder, Row, Table};

impl Table {
    /// Merge the non-key columns of `content` onto this table
    ///
    /// Rows are matched on the named key columns, which must exist in both
    /// headers. The output header is this table's header followed by the
    /// content table's non-key columns. Every row of this table is kept in
    /// order; when several content rows share a key the last one supplies the
    /// values, and rows without a match get empty trailing cells.
    ///
    /// A key name that appears in a header more than once resolves to its
    /// first (leftmost) column, as with `column_index`.
    pub fn merge(&self, content: &Table, keys: &[&str]) -> TableResult<Table> {
        let (Some(in_header), Some(c_header)) = (self.header(), content.header()) else {
            return Err(TableError::EmptyTable);
        };

        let in_key = KeyBuilder::new(resolve_keys(self, keys, TableSide::Input)?);
        let c_key = KeyBuilder::new(resolve_keys(content, keys, TableSide::Content)?);
        tracing::debug!(
            input = ?in_key.column_indices(),
            content = ?c_key.column_indices(),
            "resolved merge keys"
        );

        let mut header = in_header.cells.clone();
        header.extend(
            c_header
                .cells
                .iter()
                .filter(|cell| !keys.iter().any(|k| k.trim() == cell.as_str()))
                .cloned(),
        );

        let in_width = self.width();
        let width = (in_width + content.width()).saturating_sub(keys.len());
        if header.len() != width {
            return Err(TableError::InvariantViolation {
                expected: width,
                actual: header.len(),
            });
        }

        let value_columns: Vec<usize> = (0..content.width())
            .filter(|&i| !c_key.contains(i))
            .collect();
        debug_assert_eq!(in_width + value_columns.len(), width);

        // later rows overwrite earlier ones, so the last match wins
        let mut index: FxHashMap<Vec<&str>, &Row> = FxHashMap::default();
        for row in content.data_rows() {
            index.insert(c_key.key_values(row), row);
        }

        let mut rows = Vec::with_capacity(self.rows.len());
        rows.push(Row::new(header));
        let mut matched = 0usize;

        for (line, row) in self.data_rows().iter().enumerate() {
            let mut out = row.clone();
            out.resize(width);
            if let Some(found) = index.get(&in_key.key_values(row)) {
                for (offset, &col) in value_columns.iter().enumerate() {
                    out.cells[in_width + offset] = found.cell(col).to_string();
                }
                matched += 1;
            }
            tracing::trace!("Merging line {}/{}", line + 1, self.row_count());
            rows.push(out);
        }

        tracing::debug!(
            matched,
            unmatched = self.row_count() - matched,
            "merged tables"
        );
        Ok(Table::new(rows))
    }
}

fn resolve_keys(table: &Table, keys: &[&str], side: TableSide) -> TableResult<Vec<usize>> {
    keys.iter()
        .map(|key| {
            table.column_index(key).ok_or_else(|| TableError::KeyNotFound {
                key: key.to_string(),
                side,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(records: Vec<Vec<&str>>) -> Table {
        Table::from_records(records)
    }

    #[test]
    fn test_merge_on_composite_key() {
        let left = table(vec![vec!["A", "B", "C"], vec!["k1", "x", "1"]]);
        let right = table(vec![vec!["A", "B", "D"], vec!["k1", "x", "9"]]);
        let out = left.merge(&right, &["A", "B"]).unwrap();
        assert_eq!(
            out.records(),
            vec![vec!["A", "B", "C", "D"], vec!["k1", "x", "1", "9"]]
        );
    }

    #[test]
    fn test_merge_without_match_leaves_empty() {
        let left = table(vec![vec!["A", "B", "C"], vec!["k1", "x", "1"]]);
        let right = table(vec![vec!["A", "B", "D"], vec!["k1", "y", "9"]]);
        let out = left.merge(&right, &["A", "B"]).unwrap();
        assert_eq!(out.records()[1], vec!["k1", "x", "1", ""]);
    }

    #[test]
    fn test_merge_last_match_wins() {
        let left = table(vec![vec!["A", "C"], vec!["k1", "1"], vec!["k2", "2"]]);
        let right = table(vec![
            vec!["D", "A", "E"],
            vec!["first", "k1", "e1"],
            vec!["other", "k2", "e2"],
            vec!["second", "k1", "e3"],
        ]);
        let out = left.merge(&right, &["A"]).unwrap();
        assert_eq!(
            out.records(),
            vec![
                vec!["A", "C", "D", "E"],
                vec!["k1", "1", "second", "e3"],
                vec!["k2", "2", "other", "e2"],
            ]
        );
    }

    #[test]
    fn test_merge_keys_at_different_positions() {
        let left = table(vec![vec!["Dataset Name", "Image File", "X"], vec!["d", "f.tif", "1"]]);
        let right = table(vec![
            vec!["Image File", "Image Name", "Dataset Name"],
            vec!["f.tif", "f.pattern", "d"],
        ]);
        let out = left.merge(&right, &["Dataset Name", "Image File"]).unwrap();
        assert_eq!(
            out.records(),
            vec![
                vec!["Dataset Name", "Image File", "X", "Image Name"],
                vec!["d", "f.tif", "1", "f.pattern"],
            ]
        );
    }

    #[test]
    fn test_merge_missing_key() {
        let left = table(vec![vec!["A", "C"]]);
        let right = table(vec![vec!["B", "D"]]);
        match left.merge(&right, &["A"]) {
            Err(TableError::KeyNotFound { key, side }) => {
                assert_eq!(key, "A");
                assert_eq!(side, TableSide::Content);
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(matches!(
            left.merge(&right, &["B"]),
            Err(TableError::KeyNotFound { side: TableSide::Input, .. })
        ));
    }

    #[test]
    fn test_merge_repeated_key_name_uses_first_column() {
        let left = table(vec![vec!["A", "C", "A"], vec!["k1", "1", "k2"]]);
        let right = table(vec![vec!["A", "D"], vec!["k1", "x"], vec!["k2", "y"]]);
        let out = left.merge(&right, &["A"]).unwrap();
        assert_eq!(
            out.records(),
            vec![vec!["A", "C", "A", "D"], vec!["k1", "1", "k2", "x"]]
        );
    }

    #[test]
    fn test_merge_duplicate_key_header_is_invariant_violation() {
        let left = table(vec![vec!["A", "C"], vec!["k", "1"]]);
        let right = table(vec![vec!["A", "A", "D"], vec!["k", "k", "9"]]);
        assert!(matches!(
            left.merge(&right, &["A"]),
            Err(TableError::InvariantViolation { expected: 4, actual: 3 })
        ));
    }

    #[test]
    fn test_merge_empty_table() {
        let right = table(vec![vec!["A"]]);
        assert!(matches!(
            Table::default().merge(&right, &["A"]),
            Err(TableError::EmptyTable)
        ));
    }
}
