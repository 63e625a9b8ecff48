//! Upload identifier type.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Deterministic identifier for an uploaded file.
///
/// The ID is a 64-bit fingerprint over the filename and the raw bytes, so
/// re-uploading the identical file yields the identical ID while any change
/// to name or content produces a new one. Displayed as `upload-` followed
/// by sixteen hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UploadId(u64);

impl UploadId {
    /// Fingerprint an upload from its filename and content.
    pub fn fingerprint(filename: &str, bytes: &[u8]) -> Self {
        let mut hasher = DefaultHasher::new();
        filename.hash(&mut hasher);
        bytes.hash(&mut hasher);
        Self(hasher.finish())
    }

    /// Get the raw u64 value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Create an UploadId from a raw u64 value.
    ///
    /// This is primarily for testing.
    pub fn from_raw(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for UploadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "upload-{:016x}", self.0)
    }
}
