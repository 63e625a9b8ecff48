//! # csv-workbench
//!
//! Interactive CSV cleaning workbench: typed table edits, summaries, and
//! chart-ready data over a local HTTP API.
//!
//! Upload a CSV, inspect inferred column types and missing values, rename
//! columns, fix cells, drop duplicate rows, fill gaps, then download the
//! cleaned file. A small embedded dashboard drives the API from the
//! browser; everything also works from plain HTTP clients.
//!
//! ## Features
//!
//! - **Typed table model**: columns inferred as integer, float, text or
//!   categorical, with missing cells as first-class values
//! - **Validate-first edits**: rename, cell edit, dedup and fill either
//!   apply completely or leave the table untouched
//! - **Chart-ready data**: pie/bar value counts, equal-width histograms,
//!   scatter pairs, with per-kind column eligibility
//! - **Single-session store**: one table at a time behind an `RwLock`;
//!   re-uploading the same file keeps your edits
//!
//! ## Quick Start
//!
//! ```
//! use csv_workbench::{SessionStore, UploadId, UploadInfo};
//!
//! fn main() -> csv_workbench::Result<()> {
//!     let raw = b"name,count\na,1\nb,\na,1\n";
//!     let table = csv_workbench::io::read_csv(&raw[..])?;
//!
//!     let store = SessionStore::new();
//!     let upload = UploadInfo::new(UploadId::fingerprint("people.csv", raw), "people.csv");
//!     store.load(upload, table)?;
//!
//!     let removed = store.update(|s| Ok(s.table.drop_duplicates()))?;
//!     assert_eq!(removed, 1);
//!
//!     let csv = store.with_session(|s| csv_workbench::io::to_csv_bytes(&s.table))?;
//!     assert_eq!(csv, b"name,count\na,1\nb,\n");
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod chart;
pub mod cli;
pub mod config;
pub mod error;
pub mod io;
pub mod logging;
pub mod session;
pub mod summary;
pub mod table;

// Re-export commonly used types
pub use chart::{ChartData, ChartKind};
pub use error::{Result, WorkbenchError};
pub use session::{LoadOutcome, Session, SessionStore, UploadId, UploadInfo};
pub use summary::{preview, summarize, Preview, TableSummary};
pub use table::{Column, ColumnType, Table, Value};
