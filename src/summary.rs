//! Read-only views over a table: the inspection summary and row previews.

use serde::Serialize;

use crate::table::{ColumnType, Table};

/// One `(name, dtype)` entry of the summary.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnDtype {
    pub name: String,
    pub dtype: ColumnType,
}

/// Per-column missing-cell count. Columns without missing cells are
/// omitted from the summary.
#[derive(Debug, Clone, Serialize)]
pub struct MissingCount {
    pub column: String,
    pub count: usize,
}

/// The inspection summary shown after upload and after every edit.
#[derive(Debug, Clone, Serialize)]
pub struct TableSummary {
    pub rows: usize,
    pub columns: usize,
    pub dtypes: Vec<ColumnDtype>,
    pub duplicate_rows: usize,
    pub missing: Vec<MissingCount>,
}

/// Compute the summary for the current table state.
pub fn summarize(table: &Table) -> TableSummary {
    let dtypes = table
        .columns()
        .iter()
        .map(|col| ColumnDtype {
            name: col.name.clone(),
            dtype: col.column_type(),
        })
        .collect();
    let missing = table
        .columns()
        .iter()
        .filter_map(|col| {
            let count = col.missing_count();
            (count > 0).then(|| MissingCount {
                column: col.name.clone(),
                count,
            })
        })
        .collect();
    TableSummary {
        rows: table.row_count(),
        columns: table.column_count(),
        dtypes,
        duplicate_rows: table.duplicate_count(),
        missing,
    }
}

/// A window of rows for display. Missing cells serialize as JSON `null`.
#[derive(Debug, Clone, Serialize)]
pub struct Preview {
    pub columns: Vec<String>,
    pub offset: usize,
    pub total_rows: usize,
    pub rows: Vec<Vec<Option<String>>>,
}

/// Extract up to `limit` rows starting at `offset`.
///
/// An offset past the end yields an empty window, not an error.
pub fn preview(table: &Table, offset: usize, limit: usize) -> Preview {
    let total_rows = table.row_count();
    let end = offset.saturating_add(limit).min(total_rows);
    let start = offset.min(total_rows);
    let rows = (start..end)
        .map(|row| {
            table
                .columns()
                .iter()
                .map(|col| col.values[row].display())
                .collect()
        })
        .collect();
    Preview {
        columns: table.column_names(),
        offset,
        total_rows,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Column, Value};

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
    fn test_summary_counts() {
        let summary = summarize(&sample());
        assert_eq!(summary.rows, 3);
        assert_eq!(summary.columns, 2);
        assert_eq!(summary.duplicate_rows, 1);
        assert_eq!(summary.missing.len(), 1);
        assert_eq!(summary.missing[0].column, "count");
        assert_eq!(summary.missing[0].count, 1);
    }

    #[test]
    fn test_summary_dtypes_in_column_order() {
        let summary = summarize(&sample());
        let names: Vec<_> = summary.dtypes.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["name", "count"]);
        assert_eq!(summary.dtypes[1].dtype, ColumnType::Integer);
    }

    #[test]
    fn test_summary_omits_complete_columns() {
        let table = Table::new(vec![Column::new("a", vec![Value::Int(1)])]).unwrap();
        assert!(summarize(&table).missing.is_empty());
    }

    #[test]
    fn test_summary_serializes() {
        let json = serde_json::to_value(summarize(&sample())).unwrap();
        assert_eq!(json["rows"], 3);
        assert_eq!(json["dtypes"][1]["dtype"], "integer");
        assert_eq!(json["missing"][0]["count"], 1);
    }

    #[test]
    fn test_preview_window() {
        let view = preview(&sample(), 1, 1);
        assert_eq!(view.offset, 1);
        assert_eq!(view.total_rows, 3);
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0][0], Some("b".to_string()));
        // Missing cell comes through as None.
        assert_eq!(view.rows[0][1], None);
    }

    #[test]
    fn test_preview_past_end_is_empty() {
        let view = preview(&sample(), 10, 5);
        assert!(view.rows.is_empty());
        assert_eq!(view.total_rows, 3);
    }

    #[test]
    fn test_preview_limit_clamped() {
        let view = preview(&sample(), 0, 100);
        assert_eq!(view.rows.len(), 3);
    }

    #[test]
    fn test_preview_null_serializes_as_json_null() {
        let json = serde_json::to_value(preview(&sample(), 0, 3)).unwrap();
        assert_eq!(json["rows"][1][1], serde_json::Value::Null);
    }
}
