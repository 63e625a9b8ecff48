//! REST API handlers.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::Html,
    Json,
};
use tracing::info;

use super::extract::{JsonBody, MultipartUpload, QueryParams};
use super::types::{
    ChartOptionsResponse, ChartQuery, DedupResponse, EditCellRequest, EditCellResponse,
    ErrorResponse, FillRequest, FillResponse, PreviewQuery, RenameRequest, RenameResponse,
    SessionStatusResponse, TableResponse, UploadResponse,
};
use crate::chart::{self, ChartData, ChartKind, DEFAULT_HISTOGRAM_BINS};
use crate::error::WorkbenchError;
use crate::io;
use crate::session::{LoadOutcome, SessionStore, UploadId, UploadInfo};
use crate::summary::{preview, summarize, Preview};

/// Rows returned by the preview endpoint when the query gives no limit.
pub const DEFAULT_PREVIEW_ROWS: usize = 50;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SessionStore>,
    /// Preview row cap when the query does not specify one.
    pub preview_rows: usize,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            store: Arc::new(SessionStore::new()),
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

type Rejection = (StatusCode, Json<ErrorResponse>);

/// Map a workbench error to its HTTP status and JSON body.
///
/// Absent table and unknown columns read as 404; domain validation
/// failures as 422; lock or IO trouble as 500.
fn reject(err: WorkbenchError) -> Rejection {
    let status = match &err {
        WorkbenchError::NoTable | WorkbenchError::UnknownColumn(_) => StatusCode::NOT_FOUND,
        WorkbenchError::RowIndexOutOfRange { .. }
        | WorkbenchError::TypeCoercion { .. }
        | WorkbenchError::DuplicateColumnName(_)
        | WorkbenchError::ColumnCountMismatch { .. }
        | WorkbenchError::ChartColumn { .. }
        | WorkbenchError::Parse(_)
        | WorkbenchError::Csv(_) => StatusCode::UNPROCESSABLE_ENTITY,
        WorkbenchError::Io(_) | WorkbenchError::LockPoisoned => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(ErrorResponse::from_error(&err)))
}

fn bad_request(message: impl Into<String>) -> Rejection {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::bad_request(message)),
    )
}

/// Health check endpoint.
pub async fn health() -> &'static str {
    "OK"
}

/// API information endpoint.
pub async fn api_info() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "csv-workbench",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}

/// The embedded single-page dashboard.
pub async fn dashboard() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}

/// Current session status; an empty store is a valid answer, not an error.
pub async fn session_status(
    State(state): State<AppState>,
) -> Result<Json<SessionStatusResponse>, Rejection> {
    match state
        .store
        .with_session(|s| Ok(SessionStatusResponse::from_session(s)))
    {
        Ok(status) => Ok(Json(status)),
        Err(WorkbenchError::NoTable) => Ok(Json(SessionStatusResponse::empty())),
        Err(err) => Err(reject(err)),
    }
}

/// Clear the session unconditionally.
pub async fn reset_session(State(state): State<AppState>) -> Result<StatusCode, Rejection> {
    let cleared = state.store.reset().map_err(reject)?;
    if cleared {
        info!("session reset");
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Accept a CSV upload (multipart field `file`) and load it.
///
/// Parsing happens before the store is touched, so a malformed upload
/// never displaces the live table. Re-uploading the identical file keeps
/// the session and answers 200; a fresh load answers 201.
pub async fn upload_table(
    State(state): State<AppState>,
    MultipartUpload(mut multipart): MultipartUpload,
) -> Result<(StatusCode, Json<UploadResponse>), Rejection> {
    let mut file: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(format!("malformed multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field
            .file_name()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "upload.csv".to_string());
        let bytes = field
            .bytes()
            .await
            .map_err(|e| bad_request(format!("failed to read upload: {}", e)))?;
        file = Some((filename, bytes.to_vec()));
        break;
    }
    let (filename, bytes) = file.ok_or_else(|| bad_request("missing multipart field 'file'"))?;

    let table = io::read_csv(bytes.as_slice()).map_err(reject)?;
    let upload = UploadInfo::new(UploadId::fingerprint(&filename, &bytes), filename);
    let outcome = state.store.load_upload(upload, table).map_err(reject)?;

    // Summarize whatever is live now: on a re-upload that is the kept
    // session, edits included.
    let response = state
        .store
        .with_session(|s| {
            Ok(UploadResponse {
                upload_id: s.upload.id.to_string(),
                filename: s.upload.filename.clone(),
                fresh: outcome == LoadOutcome::Fresh,
                summary: summarize(&s.table),
            })
        })
        .map_err(reject)?;

    let status = match outcome {
        LoadOutcome::Fresh => {
            info!(
                upload = %response.upload_id,
                rows = response.summary.rows,
                columns = response.summary.columns,
                "table loaded"
            );
            StatusCode::CREATED
        }
        LoadOutcome::Kept => {
            info!(upload = %response.upload_id, "same file re-uploaded, session kept");
            StatusCode::OK
        }
    };
    Ok((status, Json(response)))
}

/// Upload info plus the summary of the current table state.
pub async fn get_table(State(state): State<AppState>) -> Result<Json<TableResponse>, Rejection> {
    state
        .store
        .with_session(|s| Ok(TableResponse::from_session(s)))
        .map(Json)
        .map_err(reject)
}

/// A window of rows for display.
pub async fn preview_table(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<PreviewQuery>,
) -> Result<Json<Preview>, Rejection> {
    let offset = query.offset.unwrap_or(0);
    let limit = query.limit.unwrap_or(state.preview_rows);
    state
        .store
        .with_session(|s| Ok(preview(&s.table, offset, limit)))
        .map(Json)
        .map_err(reject)
}

/// Rename all columns positionally.
pub async fn rename_columns(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RenameRequest>,
) -> Result<Json<RenameResponse>, Rejection> {
    state
        .store
        .update(|s| {
            s.table.rename_columns(&req.names)?;
            Ok(RenameResponse {
                columns: s.table.column_names(),
            })
        })
        .map(Json)
        .map_err(reject)
}

/// Overwrite a single cell, echoing previous and new display values.
pub async fn edit_cell(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<EditCellRequest>,
) -> Result<Json<EditCellResponse>, Rejection> {
    state
        .store
        .update(|s| {
            let previous = s.table.set_cell(&req.column, req.row, &req.value)?;
            let value = s.table.column(&req.column)?.values[req.row].display();
            Ok(EditCellResponse {
                column: req.column.clone(),
                row: req.row,
                previous: previous.display(),
                value,
            })
        })
        .map(Json)
        .map_err(reject)
}

/// Remove fully duplicate rows.
pub async fn dedup_table(State(state): State<AppState>) -> Result<Json<DedupResponse>, Rejection> {
    state
        .store
        .update(|s| {
            let removed = s.table.drop_duplicates();
            Ok(DedupResponse {
                removed,
                rows: s.table.row_count(),
            })
        })
        .map(Json)
        .map_err(reject)
}

/// Fill missing cells in the selected columns.
pub async fn fill_missing(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<FillRequest>,
) -> Result<Json<FillResponse>, Rejection> {
    state
        .store
        .update(|s| {
            let filled = s.table.fill_missing(&req.columns, &req.value)?;
            Ok(FillResponse { filled })
        })
        .map(Json)
        .map_err(reject)
}

/// Eligible columns per chart kind for the current table.
pub async fn chart_options(
    State(state): State<AppState>,
) -> Result<Json<ChartOptionsResponse>, Rejection> {
    state
        .store
        .with_session(|s| Ok(ChartOptionsResponse::from_table(&s.table)))
        .map(Json)
        .map_err(reject)
}

/// Build chart data for the requested kind.
pub async fn chart_data(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ChartQuery>,
) -> Result<Json<ChartData>, Rejection> {
    let data = match query.kind {
        ChartKind::Pie => {
            let column = query
                .column
                .as_deref()
                .ok_or_else(|| bad_request("pie chart requires 'column'"))?;
            state
                .store
                .with_session(|s| chart::pie_data(&s.table, column))
        }
        ChartKind::Bar => {
            let column = query
                .column
                .as_deref()
                .ok_or_else(|| bad_request("bar chart requires 'column'"))?;
            state
                .store
                .with_session(|s| chart::bar_data(&s.table, column))
        }
        ChartKind::Histogram => {
            let column = query
                .column
                .as_deref()
                .ok_or_else(|| bad_request("histogram requires 'column'"))?;
            let bins = query.bins.unwrap_or(DEFAULT_HISTOGRAM_BINS);
            state
                .store
                .with_session(|s| chart::histogram_data(&s.table, column, bins))
        }
        ChartKind::Scatter => {
            let x = query
                .x
                .as_deref()
                .ok_or_else(|| bad_request("scatter chart requires 'x'"))?;
            let y = query
                .y
                .as_deref()
                .ok_or_else(|| bad_request("scatter chart requires 'y'"))?;
            state
                .store
                .with_session(|s| chart::scatter_data(&s.table, x, y))
        }
    };
    data.map(Json).map_err(reject)
}

/// Download the current table as CSV.
pub async fn export_table(
    State(state): State<AppState>,
) -> Result<([(header::HeaderName, String); 2], Vec<u8>), Rejection> {
    let bytes = state
        .store
        .with_session(|s| io::to_csv_bytes(&s.table))
        .map_err(reject)?;
    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", io::DEFAULT_EXPORT_FILENAME),
        ),
    ];
    Ok((headers, bytes))
}
