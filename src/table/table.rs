//! The in-memory table and its edit operations.

use std::collections::HashSet;
use std::mem;

use crate::error::{Result, WorkbenchError};

use super::column::Column;
use super::value::Value;

/// An ordered set of equally sized named columns.
///
/// Invariants (enforced at construction and preserved by every edit):
/// all columns hold the same number of rows, and column names are unique.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Build a table, validating the column invariants.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        if let Some(first) = columns.first() {
            let rows = first.values.len();
            for col in &columns {
                if col.values.len() != rows {
                    return Err(WorkbenchError::Parse(format!(
                        "column '{}' has {} rows, expected {}",
                        col.name,
                        col.values.len(),
                        rows
                    )));
                }
            }
        }
        let mut seen = HashSet::new();
        for col in &columns {
            if !seen.insert(col.name.as_str()) {
                return Err(WorkbenchError::DuplicateColumnName(col.name.clone()));
            }
        }
        Ok(Self { columns })
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| WorkbenchError::UnknownColumn(name.to_string()))
    }

    fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| WorkbenchError::UnknownColumn(name.to_string()))
    }

    /// Replace all column names positionally.
    ///
    /// Validates before touching anything: the list must match the column
    /// count and must not contain duplicates. A failed rename leaves the
    /// table unchanged.
    pub fn rename_columns(&mut self, names: &[String]) -> Result<()> {
        if names.len() != self.columns.len() {
            return Err(WorkbenchError::ColumnCountMismatch {
                expected: self.columns.len(),
                actual: names.len(),
            });
        }
        let mut seen = HashSet::new();
        for name in names {
            if !seen.insert(name.as_str()) {
                return Err(WorkbenchError::DuplicateColumnName(name.clone()));
            }
        }
        for (col, name) in self.columns.iter_mut().zip(names) {
            col.name.clone_from(name);
        }
        Ok(())
    }

    /// Parse a literal for a target column, rejecting text aimed at a
    /// numeric column. Missing tokens parse to `Null`, which any column
    /// accepts.
    fn coerced(column: &Column, literal: &str) -> Result<Value> {
        let parsed = Value::parse(literal);
        let target = column.column_type();
        if target.is_numeric() && matches!(parsed, Value::Text(_)) {
            return Err(WorkbenchError::TypeCoercion {
                column: column.name.clone(),
                value: literal.to_string(),
                target,
            });
        }
        Ok(parsed)
    }

    /// Overwrite one cell with the parsed literal, returning the previous
    /// value. A literal that reads as missing clears the cell.
    pub fn set_cell(&mut self, column: &str, row: usize, literal: &str) -> Result<Value> {
        let idx = self.column_index(column)?;
        let rows = self.row_count();
        if row >= rows {
            return Err(WorkbenchError::RowIndexOutOfRange { index: row, rows });
        }
        let parsed = Self::coerced(&self.columns[idx], literal)?;
        Ok(mem::replace(&mut self.columns[idx].values[row], parsed))
    }

    fn row_key(&self, row: usize) -> Vec<super::value::ValueKey> {
        self.columns.iter().map(|c| c.values[row].key()).collect()
    }

    /// Count rows that are full-row duplicates of an earlier row.
    pub fn duplicate_count(&self) -> usize {
        let mut seen = HashSet::new();
        let mut duplicates = 0;
        for row in 0..self.row_count() {
            if !seen.insert(self.row_key(row)) {
                duplicates += 1;
            }
        }
        duplicates
    }

    /// Remove every row equal to an earlier row, keeping first occurrences
    /// and relative order. Returns the number of rows removed.
    ///
    /// Rows compare cell-by-cell with `Null` equal to `Null` and floats
    /// compared bitwise.
    pub fn drop_duplicates(&mut self) -> usize {
        let rows = self.row_count();
        let mut seen = HashSet::new();
        let mut keep = Vec::with_capacity(rows);
        for row in 0..rows {
            keep.push(seen.insert(self.row_key(row)));
        }
        let removed = keep.iter().filter(|k| !**k).count();
        if removed == 0 {
            return 0;
        }
        for col in &mut self.columns {
            let mut row = 0;
            col.values.retain(|_| {
                let keep_row = keep[row];
                row += 1;
                keep_row
            });
        }
        removed
    }

    /// Fill every missing cell in the selected columns with the parsed
    /// literal. Returns the number of cells that received a value.
    ///
    /// The whole call validates first (columns exist, literal coercible
    /// into each target), so a failure mutates nothing. A literal that
    /// itself reads as missing is accepted and fills nothing.
    pub fn fill_missing(&mut self, columns: &[String], literal: &str) -> Result<usize> {
        let mut indexes = Vec::new();
        for name in columns {
            let idx = self.column_index(name)?;
            if !indexes.contains(&idx) {
                indexes.push(idx);
            }
        }
        for &idx in &indexes {
            Self::coerced(&self.columns[idx], literal)?;
        }
        let fill = Value::parse(literal);
        if fill.is_missing() {
            return Ok(0);
        }
        let mut filled = 0;
        for &idx in &indexes {
            for value in &mut self.columns[idx].values {
                if value.is_missing() {
                    *value = fill.clone();
                    filled += 1;
                }
            }
        }
        Ok(filled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::ColumnType;

    fn sample() -> Table {
        Table::new(vec![
            Column::new(
                "name",
                vec![
                    Value::Text("a".into()),
                    Value::Text("b".into()),
                    Value::Text("a".into()),
                ],
            ),
            Column::new("count", vec![Value::Int(1), Value::Null, Value::Int(1)]),
        ])
        .unwrap()
    }

    #[test]
    fn test_new_rejects_ragged_columns() {
        let err = Table::new(vec![
            Column::new("a", vec![Value::Int(1)]),
            Column::new("b", vec![]),
        ])
        .unwrap_err();
        assert!(matches!(err, WorkbenchError::Parse(_)));
    }

    #[test]
    fn test_new_rejects_duplicate_names() {
        let err = Table::new(vec![
            Column::new("a", vec![Value::Int(1)]),
            Column::new("a", vec![Value::Int(2)]),
        ])
        .unwrap_err();
        assert!(matches!(err, WorkbenchError::DuplicateColumnName(name) if name == "a"));
    }

    #[test]
    fn test_empty_table() {
        let table = Table::new(vec![]).unwrap();
        assert_eq!(table.column_count(), 0);
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.duplicate_count(), 0);
    }

    #[test]
    fn test_basic_accessors() {
        let table = sample();
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.column_names(), vec!["name", "count"]);
        assert_eq!(table.column("count").unwrap().missing_count(), 1);
        assert!(table.column("nope").is_err());
    }

    #[test]
    fn test_rename_columns() {
        let mut table = sample();
        table
            .rename_columns(&["label".to_string(), "n".to_string()])
            .unwrap();
        assert_eq!(table.column_names(), vec!["label", "n"]);
        // Renaming to the current names is a no-op, not an error.
        table
            .rename_columns(&["label".to_string(), "n".to_string()])
            .unwrap();
    }

    #[test]
    fn test_rename_count_mismatch() {
        let mut table = sample();
        let err = table.rename_columns(&["only".to_string()]).unwrap_err();
        assert!(matches!(
            err,
            WorkbenchError::ColumnCountMismatch {
                expected: 2,
                actual: 1
            }
        ));
        assert_eq!(table.column_names(), vec!["name", "count"]);
    }

    #[test]
    fn test_rename_duplicate_rejected_without_mutation() {
        let mut table = sample();
        let err = table
            .rename_columns(&["x".to_string(), "x".to_string()])
            .unwrap_err();
        assert!(matches!(err, WorkbenchError::DuplicateColumnName(_)));
        assert_eq!(table.column_names(), vec!["name", "count"]);
    }

    #[test]
    fn test_set_cell_returns_previous() {
        let mut table = sample();
        let previous = table.set_cell("count", 0, "9").unwrap();
        assert_eq!(previous, Value::Int(1));
        assert_eq!(table.column("count").unwrap().values[0], Value::Int(9));
    }

    #[test]
    fn test_set_cell_unknown_column() {
        let mut table = sample();
        assert!(matches!(
            table.set_cell("nope", 0, "1").unwrap_err(),
            WorkbenchError::UnknownColumn(_)
        ));
    }

    #[test]
    fn test_set_cell_row_out_of_range() {
        let mut table = sample();
        let err = table.set_cell("count", 3, "1").unwrap_err();
        assert!(matches!(
            err,
            WorkbenchError::RowIndexOutOfRange { index: 3, rows: 3 }
        ));
    }

    #[test]
    fn test_set_cell_text_into_numeric_rejected() {
        let mut table = sample();
        let err = table.set_cell("count", 0, "abc").unwrap_err();
        match err {
            WorkbenchError::TypeCoercion {
                column,
                value,
                target,
            } => {
                assert_eq!(column, "count");
                assert_eq!(value, "abc");
                assert_eq!(target, ColumnType::Integer);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(table.column("count").unwrap().values[0], Value::Int(1));
    }

    #[test]
    fn test_set_cell_missing_token_clears() {
        let mut table = sample();
        table.set_cell("count", 0, "NA").unwrap();
        assert_eq!(table.column("count").unwrap().values[0], Value::Null);
    }

    #[test]
    fn test_set_cell_float_widens_integer_column() {
        let mut table = sample();
        table.set_cell("count", 0, "1.5").unwrap();
        assert_eq!(
            table.column("count").unwrap().column_type(),
            ColumnType::Float
        );
    }

    #[test]
    fn test_duplicate_count_and_drop() {
        let mut table = sample();
        assert_eq!(table.duplicate_count(), 1);
        assert_eq!(table.drop_duplicates(), 1);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.duplicate_count(), 0);
        // Idempotent: nothing left to remove.
        assert_eq!(table.drop_duplicates(), 0);
    }

    #[test]
    fn test_drop_duplicates_keeps_first_and_order() {
        let mut table = Table::new(vec![Column::new(
            "v",
            vec![
                Value::Int(2),
                Value::Int(1),
                Value::Int(2),
                Value::Int(3),
                Value::Int(1),
            ],
        )])
        .unwrap();
        assert_eq!(table.drop_duplicates(), 2);
        assert_eq!(
            table.column("v").unwrap().values,
            vec![Value::Int(2), Value::Int(1), Value::Int(3)]
        );
    }

    #[test]
    fn test_drop_duplicates_null_rows_equal() {
        let mut table = Table::new(vec![
            Column::new("a", vec![Value::Null, Value::Null]),
            Column::new("b", vec![Value::Int(1), Value::Int(1)]),
        ])
        .unwrap();
        assert_eq!(table.drop_duplicates(), 1);
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_fill_missing_counts_cells() {
        let mut table = Table::new(vec![
            Column::new("a", vec![Value::Null, Value::Int(2), Value::Null]),
            Column::new("b", vec![Value::Null, Value::Null, Value::Int(5)]),
        ])
        .unwrap();
        let filled = table
            .fill_missing(&["a".to_string(), "b".to_string()], "0")
            .unwrap();
        assert_eq!(filled, 4);
        assert_eq!(table.column("a").unwrap().missing_count(), 0);
        assert_eq!(table.column("b").unwrap().missing_count(), 0);
    }

    #[test]
    fn test_fill_only_selected_columns() {
        let mut table = Table::new(vec![
            Column::new("a", vec![Value::Null]),
            Column::new("b", vec![Value::Null]),
        ])
        .unwrap();
        assert_eq!(table.fill_missing(&["a".to_string()], "1").unwrap(), 1);
        assert_eq!(table.column("b").unwrap().missing_count(), 1);
    }

    #[test]
    fn test_fill_validates_before_any_write() {
        let mut table = Table::new(vec![
            Column::new("notes", vec![Value::Null, Value::Text("x".into())]),
            Column::new("n", vec![Value::Null, Value::Int(1)]),
        ])
        .unwrap();
        let err = table
            .fill_missing(&["notes".to_string(), "n".to_string()], "abc")
            .unwrap_err();
        assert!(matches!(err, WorkbenchError::TypeCoercion { .. }));
        // The text column was not touched even though it came first.
        assert_eq!(table.column("notes").unwrap().missing_count(), 1);
    }

    #[test]
    fn test_fill_missing_token_literal_is_noop() {
        let mut table = sample();
        assert_eq!(table.fill_missing(&["count".to_string()], "NA").unwrap(), 0);
        assert_eq!(table.column("count").unwrap().missing_count(), 1);
    }

    #[test]
    fn test_fill_unknown_column() {
        let mut table = sample();
        assert!(matches!(
            table.fill_missing(&["nope".to_string()], "0").unwrap_err(),
            WorkbenchError::UnknownColumn(_)
        ));
    }

    #[test]
    fn test_fill_empty_selection() {
        let mut table = sample();
        assert_eq!(table.fill_missing(&[], "0").unwrap(), 0);
    }

    #[test]
    fn test_fill_repeated_selection_counted_once() {
        let mut table = sample();
        let filled = table
            .fill_missing(&["count".to_string(), "count".to_string()], "7")
            .unwrap();
        assert_eq!(filled, 1);
    }
}
