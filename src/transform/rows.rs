//! Row-level operations: removal, per-cell processing and filtering

use rustc_hash::FxHashSet;

use crate::error::TableResult;
use crate::model::Table;

impl Table {
    /// Drop the row at `index`, where index 0 is the header
    ///
    /// An index past the last row leaves the table unchanged.
    pub fn remove_row(&self, index: usize) -> Table {
        if index >= self.rows.len() {
            tracing::debug!(index, rows = self.rows.len(), "row to remove does not exist");
            return self.normalized();
        }
        let mut rows = self.rows.clone();
        rows.remove(index);
        Table::new(rows)
    }

    /// Rewrite one column of every data row, then drop repeated rows
    ///
    /// The first occurrence of each distinct row is kept.
    pub fn process<F>(&self, index: usize, processor: F) -> TableResult<Table>
    where
        F: Fn(&str) -> String,
    {
        self.ensure_column(index)?;

        let width = self.width();
        let mut seen = FxHashSet::default();
        let mut rows = Vec::with_capacity(self.rows.len());
        rows.push(self.rows[0].clone());

        for row in self.data_rows() {
            let mut row = row.clone();
            row.resize(width);
            row.cells[index] = processor(&row.cells[index]);
            if !seen.contains(&row) {
                seen.insert(row.clone());
                rows.push(row);
            }
        }

        tracing::debug!(
            column = index,
            kept = rows.len() - 1,
            dropped = self.row_count() + 1 - rows.len(),
            "processed column"
        );
        Ok(Table::new(rows))
    }

    /// Keep the header and every data row whose cell does not match
    pub fn filter<F>(&self, index: usize, predicate: F) -> TableResult<Table>
    where
        F: Fn(&str) -> bool,
    {
        self.ensure_column(index)?;

        let mut rows = Vec::with_capacity(self.rows.len());
        rows.push(self.rows[0].clone());
        rows.extend(
            self.data_rows()
                .iter()
                .filter(|row| !predicate(row.cell(index)))
                .cloned(),
        );

        tracing::debug!(
            column = index,
            removed = self.row_count() + 1 - rows.len(),
            "filtered rows"
        );
        Ok(Table::new(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TableError;
    use crate::model::Row;

    fn sample() -> Table {
        Table::from_records(vec![
            vec!["Name", "Path"],
            vec!["a", "Reichmann-2018/Figure01A/a.tif"],
            vec!["b", "Reichmann-2018/Figure01C/b.lif"],
            vec!["a", "Other/Figure01A/a.tif"],
        ])
    }

    #[test]
    fn test_remove_row() {
        let table = sample();
        let out = table.remove_row(2);
        assert_eq!(out.row_count(), 2);
        assert_eq!(out.rows[2].cell(0), "a");
        assert_eq!(table.remove_row(10), table);
    }

    #[test]
    fn test_remove_header_row() {
        let out = sample().remove_row(0);
        assert_eq!(out.header().unwrap().cell(0), "a");
        assert_eq!(out.row_count(), 2);
    }

    #[test]
    fn test_process_collapses_identical_rows() {
        let out = sample()
            .process(1, |c| c[c.find('/').map_or(0, |i| i + 1)..].to_string())
            .unwrap();
        assert_eq!(
            out.records(),
            vec![
                vec!["Name", "Path"],
                vec!["a", "Figure01A/a.tif"],
                vec!["b", "Figure01C/b.lif"],
            ]
        );
    }

    #[test]
    fn test_process_leaves_header_alone() {
        let out = sample().process(0, |c| c.to_uppercase()).unwrap();
        assert_eq!(out.header().unwrap().cell(0), "Name");
        assert_eq!(out.rows[1].cell(0), "A");
    }

    #[test]
    fn test_filter_excludes_matches() {
        let out = sample().filter(1, |c| c.ends_with(".lif")).unwrap();
        assert_eq!(out.row_count(), 2);
        assert!(out.data_rows().iter().all(|r| r.cell(0) == "a"));
        assert_eq!(out.header(), sample().header());
    }

    #[test]
    fn test_filter_bad_column() {
        assert!(matches!(
            sample().filter(9, |_| true),
            Err(TableError::ColumnOutOfRange { index: 9, .. })
        ));
    }

    #[test]
    fn test_process_pads_short_rows() {
        let ragged = Table {
            rows: vec![
                Row::new(vec!["Name".into(), "Path".into()]),
                Row::new(vec!["a".into()]),
            ],
        };
        let out = ragged.process(1, |c| format!("{}.tif", c)).unwrap();
        assert_eq!(out.records(), vec![vec!["Name", "Path"], vec!["a", ".tif"]]);
        assert_eq!(ragged.remove_row(5).records()[1], vec!["a", ""]);
    }
}
