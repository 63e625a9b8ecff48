//! Session management module.
//!
//! A session pairs one uploaded table with its accumulated edits. The
//! store holds at most one session at a time and decides, on each upload,
//! whether to keep the live session or start over.

mod id;
mod store;

pub use id::UploadId;
pub use store::{LoadOutcome, Session, SessionStore, UploadInfo};
