//! Durable blobs - single-key storage for the serialized record set.
//!
//! A blob store maps a key to one serialized document and nothing else.
//! The record store writes its whole snapshot under one key after every
//! mutation, so a blob store only has to offer read, overwrite and remove.
//!
//! ## Example
//!
//! ```ignore
//! use student_records::{BlobStore, InMemoryBlobStore};
//!
//! let blobs = InMemoryBlobStore::new();
//! blobs.write_blob("students_db", "[]")?;
//! assert_eq!(blobs.read_blob("students_db")?.as_deref(), Some("[]"));
//! ```

mod file;
mod in_memory;

use std::fmt;
use std::thread;
use std::time::Duration;

pub use file::FileBlobStore;
pub use in_memory::InMemoryBlobStore;

/// Error type for blob store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlobError {
    /// Underlying read/write failed.
    Io(String),
    /// Key cannot be mapped onto the backing storage.
    InvalidKey(String),
    /// Storage-level lock poisoned.
    LockPoisoned(&'static str),
}

impl fmt::Display for BlobError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlobError::Io(msg) => write!(f, "blob io error: {}", msg),
            BlobError::InvalidKey(key) => write!(f, "invalid blob key: {:?}", key),
            BlobError::LockPoisoned(operation) => {
                write!(f, "blob store lock poisoned during {}", operation)
            }
        }
    }
}

impl std::error::Error for BlobError {}

impl BlobError {
    /// Whether retrying the same write may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, BlobError::Io(_))
    }
}

/// Abstract single-key document storage.
pub trait BlobStore: Send + Sync {
    /// Read the blob stored under `key`. Returns None if absent.
    fn read_blob(&self, key: &str) -> Result<Option<String>, BlobError>;

    /// Overwrite the blob stored under `key`.
    fn write_blob(&self, key: &str, contents: &str) -> Result<(), BlobError>;

    /// Remove the blob stored under `key`. Returns true if it existed.
    fn remove_blob(&self, key: &str) -> Result<bool, BlobError>;
}

/// Bounded retry policy for blob writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WritePolicy {
    /// Total attempts, including the first. Zero is treated as one.
    pub max_attempts: u32,
    /// Pause between attempts.
    pub backoff: Duration,
}

impl Default for WritePolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_millis(10),
        }
    }
}

impl WritePolicy {
    /// Single attempt, no retry.
    pub fn once() -> Self {
        Self {
            max_attempts: 1,
            backoff: Duration::ZERO,
        }
    }

    /// Write `contents` under `key`, retrying transient failures.
    ///
    /// Returns the last error once the attempts are exhausted.
    pub fn write<B: BlobStore + ?Sized>(
        &self,
        blobs: &B,
        key: &str,
        contents: &str,
    ) -> Result<(), BlobError> {
        let attempts = self.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match blobs.write_blob(key, contents) {
                Ok(()) => return Ok(()),
                Err(err) if err.is_transient() && attempt < attempts => {
                    tracing::warn!(key, attempt, error = %err, "blob write failed, retrying");
                    if !self.backoff.is_zero() {
                        thread::sleep(self.backoff);
                    }
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
