//! InMemoryBlobStore - HashMap-backed blob store for testing and development.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{BlobError, BlobStore};

/// In-memory blob store, the stand-in for browser local storage.
///
/// Clone-friendly via Arc: clones share the same blobs, so a test can keep a
/// handle and inspect what the record store persisted.
#[derive(Clone, Default)]
pub struct InMemoryBlobStore {
    storage: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryBlobStore {
    /// Create a new empty blob store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for InMemoryBlobStore {
    fn read_blob(&self, key: &str) -> Result<Option<String>, BlobError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| BlobError::LockPoisoned("blob read"))?;
        Ok(storage.get(key).cloned())
    }

    fn write_blob(&self, key: &str, contents: &str) -> Result<(), BlobError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| BlobError::LockPoisoned("blob write"))?;
        storage.insert(key.to_string(), contents.to_string());
        Ok(())
    }

    fn remove_blob(&self, key: &str) -> Result<bool, BlobError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| BlobError::LockPoisoned("blob write"))?;
        Ok(storage.remove(key).is_some())
    }
}
