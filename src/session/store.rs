//! Session storage and management.

use std::sync::RwLock;
use std::time::Instant;

use super::UploadId;
use crate::error::WorkbenchError;
use crate::table::Table;
use crate::Result;

/// Identity of the upload backing a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadInfo {
    /// Fingerprint of the uploaded file.
    pub id: UploadId,
    /// Original filename as sent by the client.
    pub filename: String,
}

impl UploadInfo {
    pub fn new(id: UploadId, filename: impl Into<String>) -> Self {
        Self {
            id,
            filename: filename.into(),
        }
    }
}

/// A live editing session over one uploaded table.
#[derive(Debug, Clone)]
pub struct Session {
    /// Identity of the backing upload.
    pub upload: UploadInfo,
    /// Current table state, including every edit applied so far.
    pub table: Table,
    /// Time when the upload was loaded.
    pub loaded_at: Instant,
    /// Number of mutating operations applied.
    pub edit_count: u64,
}

impl Session {
    /// Create a session for a freshly parsed upload.
    pub fn new(upload: UploadInfo, table: Table) -> Self {
        Self {
            upload,
            table,
            loaded_at: Instant::now(),
            edit_count: 0,
        }
    }

    /// Seconds since the upload was loaded.
    pub fn loaded_seconds(&self) -> u64 {
        self.loaded_at.elapsed().as_secs()
    }
}

/// What [`SessionStore::load_upload`] did with an incoming upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The upload started a new session (first upload or a different file).
    Fresh,
    /// The same file was re-uploaded; the live session and its edits were kept.
    Kept,
}

/// Thread-safe holder for the single live session.
///
/// The workbench edits one table at a time. All access goes through one
/// `RwLock`, so edits are serialized and readers see a consistent table.
pub struct SessionStore {
    session: RwLock<Option<Session>>,
}

impl SessionStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            session: RwLock::new(None),
        }
    }

    /// Replace whatever is loaded with a fresh session.
    pub fn load(&self, upload: UploadInfo, table: Table) -> Result<()> {
        let mut guard = self
            .session
            .write()
            .map_err(|_| WorkbenchError::LockPoisoned)?;
        *guard = Some(Session::new(upload, table));
        Ok(())
    }

    /// Handle a new upload event.
    ///
    /// Re-uploading the file that is currently loaded keeps the live
    /// session (the parsed table is discarded); any other upload replaces
    /// the session wholesale. The check and the swap happen under one
    /// write lock.
    pub fn load_upload(&self, upload: UploadInfo, table: Table) -> Result<LoadOutcome> {
        let mut guard = self
            .session
            .write()
            .map_err(|_| WorkbenchError::LockPoisoned)?;
        if let Some(session) = guard.as_ref() {
            if session.upload.id == upload.id {
                return Ok(LoadOutcome::Kept);
            }
        }
        *guard = Some(Session::new(upload, table));
        Ok(LoadOutcome::Fresh)
    }

    /// Clear the session unconditionally.
    ///
    /// Returns whether a session was actually loaded.
    pub fn reset(&self) -> Result<bool> {
        let mut guard = self
            .session
            .write()
            .map_err(|_| WorkbenchError::LockPoisoned)?;
        Ok(guard.take().is_some())
    }

    /// Fingerprint of the currently loaded upload, if any.
    pub fn current_upload_id(&self) -> Result<Option<UploadId>> {
        let guard = self
            .session
            .read()
            .map_err(|_| WorkbenchError::LockPoisoned)?;
        Ok(guard.as_ref().map(|s| s.upload.id))
    }

    /// Whether a table is loaded.
    pub fn is_loaded(&self) -> bool {
        self.session.read().map(|g| g.is_some()).unwrap_or(false)
    }

    /// Run a read-only closure against the live session.
    ///
    /// Fails with `NoTable` when nothing is loaded.
    pub fn with_session<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&Session) -> Result<R>,
    {
        let guard = self
            .session
            .read()
            .map_err(|_| WorkbenchError::LockPoisoned)?;
        let session = guard.as_ref().ok_or(WorkbenchError::NoTable)?;
        f(session)
    }

    /// Run a mutating closure against the live session.
    ///
    /// The edit counter is bumped only when the closure succeeds, so a
    /// rejected edit leaves the session exactly as it was.
    pub fn update<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut Session) -> Result<R>,
    {
        let mut guard = self
            .session
            .write()
            .map_err(|_| WorkbenchError::LockPoisoned)?;
        let session = guard.as_mut().ok_or(WorkbenchError::NoTable)?;
        let result = f(session)?;
        session.edit_count += 1;
        Ok(result)
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
