use std::fmt;

use crate::blob::BlobError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    LockPoisoned(&'static str),
    /// The durable blob could not be read or written. When this comes back
    /// from a mutation, the in-memory records already carry the change and
    /// the persisted blob may be stale.
    Storage {
        key: String,
        message: String,
    },
    Serde(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::LockPoisoned(operation) => {
                write!(f, "record store lock poisoned during {}", operation)
            }
            StoreError::Storage { key, message } => {
                write!(f, "storage error on blob {}: {}", key, message)
            }
            StoreError::Serde(message) => write!(f, "record serialization error: {}", message),
        }
    }
}

impl std::error::Error for StoreError {}

impl StoreError {
    pub(crate) fn storage(key: &str, err: BlobError) -> Self {
        StoreError::Storage {
            key: key.to_string(),
            message: err.to_string(),
        }
    }
}
