//! API request and response types.

use serde::{Deserialize, Serialize};

use crate::chart::{eligible_columns, ChartKind};
use crate::error::WorkbenchError;
use crate::session::Session;
use crate::summary::{summarize, TableSummary};
use crate::table::Table;

/// Response for a table upload.
#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    /// Fingerprint of the uploaded file.
    pub upload_id: String,
    /// Original filename.
    pub filename: String,
    /// Whether this upload started a new session. `false` means the same
    /// file was already loaded and the session (with its edits) was kept.
    pub fresh: bool,
    /// Summary of the table now live.
    pub summary: TableSummary,
}

/// Response for the session status query.
#[derive(Debug, Clone, Serialize)]
pub struct SessionStatusResponse {
    /// Whether a table is currently loaded.
    pub loaded: bool,
    /// Upload fingerprint (if loaded).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload_id: Option<String>,
    /// Original filename (if loaded).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Current row count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<usize>,
    /// Current column count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<usize>,
    /// Mutating operations applied so far.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_count: Option<u64>,
    /// Seconds since the upload was loaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loaded_seconds: Option<u64>,
}

impl SessionStatusResponse {
    /// Status of an empty store.
    pub fn empty() -> Self {
        Self {
            loaded: false,
            upload_id: None,
            filename: None,
            rows: None,
            columns: None,
            edit_count: None,
            loaded_seconds: None,
        }
    }

    pub fn from_session(session: &Session) -> Self {
        Self {
            loaded: true,
            upload_id: Some(session.upload.id.to_string()),
            filename: Some(session.upload.filename.clone()),
            rows: Some(session.table.row_count()),
            columns: Some(session.table.column_count()),
            edit_count: Some(session.edit_count),
            loaded_seconds: Some(session.loaded_seconds()),
        }
    }
}

/// Response for the table inspection query.
#[derive(Debug, Clone, Serialize)]
pub struct TableResponse {
    /// Fingerprint of the backing upload.
    pub upload_id: String,
    /// Original filename.
    pub filename: String,
    /// Summary of the current table state.
    pub summary: TableSummary,
}

impl TableResponse {
    pub fn from_session(session: &Session) -> Self {
        Self {
            upload_id: session.upload.id.to_string(),
            filename: session.upload.filename.clone(),
            summary: summarize(&session.table),
        }
    }
}

/// Request to rename all columns positionally.
#[derive(Debug, Clone, Deserialize)]
pub struct RenameRequest {
    /// New names, one per column, in table order.
    pub names: Vec<String>,
}

/// Response after a rename.
#[derive(Debug, Clone, Serialize)]
pub struct RenameResponse {
    /// Column names now in effect.
    pub columns: Vec<String>,
}

/// Request to overwrite a single cell.
#[derive(Debug, Clone, Deserialize)]
pub struct EditCellRequest {
    /// Target column name.
    pub column: String,
    /// Zero-based row index.
    pub row: usize,
    /// Replacement value as text; missing tokens clear the cell.
    pub value: String,
}

/// Response echoing a cell edit.
#[derive(Debug, Clone, Serialize)]
pub struct EditCellResponse {
    pub column: String,
    pub row: usize,
    /// Display form of the value that was overwritten (`null` if it
    /// was missing).
    pub previous: Option<String>,
    /// Display form of the value now in place.
    pub value: Option<String>,
}

/// Response after duplicate removal.
#[derive(Debug, Clone, Serialize)]
pub struct DedupResponse {
    /// Rows removed (0 when the table was already duplicate-free).
    pub removed: usize,
    /// Rows remaining.
    pub rows: usize,
}

/// Request to fill missing cells.
#[derive(Debug, Clone, Deserialize)]
pub struct FillRequest {
    /// Columns to fill.
    pub columns: Vec<String>,
    /// Fill value as text.
    pub value: String,
}

/// Response after a fill.
#[derive(Debug, Clone, Serialize)]
pub struct FillResponse {
    /// Cells that received a value.
    pub filled: usize,
}

/// Query parameters for the row preview.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PreviewQuery {
    /// First row to include (default 0).
    #[serde(default)]
    pub offset: Option<usize>,
    /// Maximum rows to return (default from config).
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Query parameters for chart data.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartQuery {
    /// Which chart family to build.
    pub kind: ChartKind,
    /// Column for pie, bar and histogram charts.
    #[serde(default)]
    pub column: Option<String>,
    /// X-axis column for scatter charts.
    #[serde(default)]
    pub x: Option<String>,
    /// Y-axis column for scatter charts.
    #[serde(default)]
    pub y: Option<String>,
    /// Histogram bin count (default 20).
    #[serde(default)]
    pub bins: Option<usize>,
}

/// Eligible columns per chart kind.
#[derive(Debug, Clone, Serialize)]
pub struct ChartOptionsResponse {
    pub pie: Vec<String>,
    pub bar: Vec<String>,
    pub histogram: Vec<String>,
    pub scatter: Vec<String>,
}

impl ChartOptionsResponse {
    pub fn from_table(table: &Table) -> Self {
        Self {
            pie: eligible_columns(table, ChartKind::Pie),
            bar: eligible_columns(table, ChartKind::Bar),
            histogram: eligible_columns(table, ChartKind::Histogram),
            scatter: eligible_columns(table, ChartKind::Scatter),
        }
    }
}

/// Generic API error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "UNKNOWN_COLUMN").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional details (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }

    /// Map a workbench error to its wire code and message.
    pub fn from_error(err: &WorkbenchError) -> Self {
        let code = match err {
            WorkbenchError::NoTable => "NO_TABLE",
            WorkbenchError::UnknownColumn(_) => "UNKNOWN_COLUMN",
            WorkbenchError::RowIndexOutOfRange { .. } => "ROW_OUT_OF_RANGE",
            WorkbenchError::TypeCoercion { .. } => "TYPE_COERCION",
            WorkbenchError::DuplicateColumnName(_) => "DUPLICATE_COLUMN",
            WorkbenchError::ColumnCountMismatch { .. } => "COLUMN_COUNT_MISMATCH",
            WorkbenchError::ChartColumn { .. } => "CHART_COLUMN",
            WorkbenchError::Parse(_) | WorkbenchError::Csv(_) => "PARSE_ERROR",
            WorkbenchError::Io(_) | WorkbenchError::LockPoisoned => "INTERNAL_ERROR",
        };
        Self::new(code, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_query_defaults() {
        let query: PreviewQuery = serde_json::from_str("{}").unwrap();
        assert!(query.offset.is_none());
        assert!(query.limit.is_none());
    }

    #[test]
    fn test_chart_query_parses_kind() {
        let json = r#"{"kind": "histogram", "column": "age", "bins": 10}"#;
        let query: ChartQuery = serde_json::from_str(json).unwrap();
        assert_eq!(query.kind, ChartKind::Histogram);
        assert_eq!(query.column.as_deref(), Some("age"));
        assert_eq!(query.bins, Some(10));
        assert!(query.x.is_none());
    }

    #[test]
    fn test_edit_cell_request() {
        let json = r#"{"column": "count", "row": 2, "value": "7"}"#;
        let req: EditCellRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.column, "count");
        assert_eq!(req.row, 2);
        assert_eq!(req.value, "7");
    }

    #[test]
    fn test_error_response_serialization() {
        let err = ErrorResponse::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("TEST_ERROR"));
        assert!(json.contains("Test message"));
        assert!(!json.contains("details")); // skip_serializing_if
    }

    #[test]
    fn test_error_codes_from_variants() {
        let cases = [
            (WorkbenchError::NoTable, "NO_TABLE"),
            (
                WorkbenchError::UnknownColumn("x".into()),
                "UNKNOWN_COLUMN",
            ),
            (
                WorkbenchError::RowIndexOutOfRange { index: 9, rows: 3 },
                "ROW_OUT_OF_RANGE",
            ),
            (
                WorkbenchError::DuplicateColumnName("a".into()),
                "DUPLICATE_COLUMN",
            ),
            (WorkbenchError::Parse("bad".into()), "PARSE_ERROR"),
            (WorkbenchError::LockPoisoned, "INTERNAL_ERROR"),
        ];
        for (err, code) in cases {
            assert_eq!(ErrorResponse::from_error(&err).code, code);
        }
    }

    #[test]
    fn test_empty_status_omits_optional_fields() {
        let json = serde_json::to_string(&SessionStatusResponse::empty()).unwrap();
        assert_eq!(json, r#"{"loaded":false}"#);
    }
}
