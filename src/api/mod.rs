//! API layer for csv-workbench.
//!
//! This module exposes the table session over REST so a browser dashboard
//! (or any HTTP client) can drive the cleaning workflow.
//!
//! ## Endpoints
//!
//! ### Health & Info
//! - `GET /` - Embedded dashboard page
//! - `GET /health` - Health check
//! - `GET /api/v1/` - API information
//!
//! ### Session
//! - `GET /api/v1/session` - Session status
//! - `DELETE /api/v1/session` - Reset (clear) the session
//!
//! ### Table
//! - `POST /api/v1/table` - Upload a CSV (multipart field `file`)
//! - `GET /api/v1/table` - Upload info and table summary
//! - `GET /api/v1/table/preview` - Row preview (`offset`, `limit`)
//! - `PUT /api/v1/table/columns` - Rename all columns
//! - `POST /api/v1/table/cell` - Overwrite one cell
//! - `POST /api/v1/table/dedup` - Remove duplicate rows
//! - `POST /api/v1/table/fill` - Fill missing values
//! - `GET /api/v1/table/chart/options` - Eligible columns per chart kind
//! - `GET /api/v1/table/chart` - Chart data (`kind`, `column`, `x`, `y`, `bins`)
//! - `GET /api/v1/table/export` - Download the edited CSV
//!
//! ## Example
//!
//! ```no_run
//! use csv_workbench::api::{ServerConfig, serve};
//!
//! #[tokio::main]
//! async fn main() -> csv_workbench::Result<()> {
//!     let config = ServerConfig::new("127.0.0.1", 3000);
//!     serve(config).await
//! }
//! ```

pub mod extract;
pub mod handlers;
pub mod router;
pub mod types;

// Re-export commonly used types
pub use handlers::AppState;
pub use router::{create_router, create_router_with_state, serve, serve_with_state, ServerConfig};
pub use types::{
    ChartOptionsResponse, ChartQuery, DedupResponse, EditCellRequest, EditCellResponse,
    ErrorResponse, FillRequest, FillResponse, PreviewQuery, RenameRequest, RenameResponse,
    SessionStatusResponse, TableResponse, UploadResponse,
};
