//! Error types for csv-workbench.

use thiserror::Error;

/// Main error type for csv-workbench operations.
#[derive(Error, Debug)]
pub enum WorkbenchError {
    /// Uploaded data could not be interpreted as a CSV table.
    #[error("malformed upload: {0}")]
    Parse(String),

    /// Low-level CSV reader/writer error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A column with the given name does not exist in the table.
    #[error("unknown column: {0}")]
    UnknownColumn(String),

    /// A row index was outside the table's current bounds.
    #[error("row index {index} out of range for table with {rows} rows")]
    RowIndexOutOfRange { index: usize, rows: usize },

    /// A literal could not be coerced into the column's inferred type.
    #[error("cannot coerce '{value}' into {target} column '{column}'")]
    TypeCoercion {
        column: String,
        value: String,
        target: crate::table::ColumnType,
    },

    /// A rename would produce two columns with the same name.
    #[error("duplicate column name: {0}")]
    DuplicateColumnName(String),

    /// A rename supplied the wrong number of column names.
    #[error("expected {expected} column names, got {actual}")]
    ColumnCountMismatch { expected: usize, actual: usize },

    /// A column's type makes it unusable for the requested chart kind.
    #[error("column '{column}' is not usable for a {kind} chart")]
    ChartColumn {
        column: String,
        kind: crate::chart::ChartKind,
    },

    /// No table is loaded in the session.
    #[error("no table loaded")]
    NoTable,

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal lock was poisoned.
    #[error("internal lock poisoned")]
    LockPoisoned,
}

/// Convenience Result type for csv-workbench operations.
pub type Result<T> = std::result::Result<T, WorkbenchError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartKind;
    use crate::table::ColumnType;

    #[test]
    fn test_unknown_column_display() {
        let err = WorkbenchError::UnknownColumn("price".into());
        assert!(err.to_string().contains("price"));
        assert!(err.to_string().contains("unknown column"));
    }

    #[test]
    fn test_row_out_of_range_display() {
        let err = WorkbenchError::RowIndexOutOfRange { index: 9, rows: 3 };
        assert!(err.to_string().contains('9'));
        assert!(err.to_string().contains('3'));
    }

    #[test]
    fn test_type_coercion_display() {
        let err = WorkbenchError::TypeCoercion {
            column: "count".into(),
            value: "abc".into(),
            target: ColumnType::Integer,
        };
        let msg = err.to_string();
        assert!(msg.contains("abc"));
        assert!(msg.contains("integer"));
        assert!(msg.contains("count"));
    }

    #[test]
    fn test_chart_column_display() {
        let err = WorkbenchError::ChartColumn {
            column: "name".into(),
            kind: ChartKind::Histogram,
        };
        let msg = err.to_string();
        assert!(msg.contains("name"));
        assert!(msg.contains("histogram"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: WorkbenchError = io_err.into();
        assert!(matches!(err, WorkbenchError::Io(_)));
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_no_table_display() {
        let err = WorkbenchError::NoTable;
        assert!(err.to_string().contains("no table"));
    }
}
