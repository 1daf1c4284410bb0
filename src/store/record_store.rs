use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;

use crate::aggregate::{average_marks_by_semester, SemesterAverage};
use crate::blob::BlobStore;
use crate::error::StoreError;
use crate::id::generate_id;
use crate::query::{run_query, QueryPage, StudentQuery};
use crate::report::ReportSummary;
use crate::student::{seed_students, NewStudent, Student, StudentPatch};

use crate::emitter::{STORE_RESET, STUDENT_CREATED, STUDENT_DELETED, STUDENT_UPDATED};
#[cfg(feature = "emitter")]
use crate::emitter::{ChangeEmitter, ChangeEvent};

use super::StoreConfig;

#[derive(Default)]
struct State {
    records: Vec<Student>,
    initialized: bool,
}

/// Student records held in memory and written through to a blob store.
///
/// Every mutation holds the write lock across read-modify-persist, so
/// concurrent callers cannot lose each other's updates. Queries read under
/// the read lock and always see a whole record set. Clones share state.
#[derive(Clone)]
pub struct RecordStore<B> {
    blobs: B,
    config: StoreConfig,
    state: Arc<RwLock<State>>,
    #[cfg(feature = "emitter")]
    emitter: ChangeEmitter,
}

impl<B: BlobStore> RecordStore<B> {
    /// Create an empty, uninitialized store with the default config.
    pub fn new(blobs: B) -> Self {
        Self::with_config(blobs, StoreConfig::default())
    }

    pub fn with_config(blobs: B, config: StoreConfig) -> Self {
        Self {
            blobs,
            config,
            state: Arc::new(RwLock::new(State::default())),
            #[cfg(feature = "emitter")]
            emitter: ChangeEmitter::new(),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn blobs(&self) -> &B {
        &self.blobs
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, State>, StoreError> {
        self.state
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, State>, StoreError> {
        self.state
            .write()
            .map_err(|_| StoreError::LockPoisoned("write"))
    }

    /// Load records from the blob, or reset to the seed list when the blob
    /// is absent. Calls after the first successful one do nothing.
    pub fn initialize(&self) -> Result<(), StoreError> {
        let reset_count = {
            let mut state = self.write()?;
            if state.initialized {
                return Ok(());
            }

            let stored = self
                .blobs
                .read_blob(&self.config.key)
                .map_err(|e| StoreError::storage(&self.config.key, e))?;

            let reset_count = match stored {
                Some(json) => {
                    let records: Vec<Student> =
                        serde_json::from_str(&json).map_err(|e| StoreError::Serde(e.to_string()))?;
                    tracing::info!(key = %self.config.key, count = records.len(), "loaded records");
                    state.records = records;
                    None
                }
                None => {
                    tracing::info!(key = %self.config.key, "no stored records, seeding");
                    Some(self.reset_locked(&mut state)?)
                }
            };
            state.initialized = true;
            reset_count
        };

        if let Some(count) = reset_count {
            self.notify_reset(count);
        }
        Ok(())
    }

    pub fn is_initialized(&self) -> Result<bool, StoreError> {
        Ok(self.read()?.initialized)
    }

    /// Replace every record with the seed list under fresh ids and persist.
    pub fn reset(&self) -> Result<(), StoreError> {
        let count = {
            let mut state = self.write()?;
            state.initialized = true;
            self.reset_locked(&mut state)?
        };
        tracing::info!(key = %self.config.key, count, "store reset");
        self.notify_reset(count);
        Ok(())
    }

    /// Delete the stored blob and empty the store. The store is left
    /// uninitialized, so the next [`initialize`](Self::initialize) seeds it
    /// again. Returns whether a blob existed.
    pub fn wipe(&self) -> Result<bool, StoreError> {
        let mut state = self.write()?;
        let removed = self
            .blobs
            .remove_blob(&self.config.key)
            .map_err(|e| StoreError::storage(&self.config.key, e))?;
        state.records.clear();
        state.initialized = false;
        tracing::info!(key = %self.config.key, removed, "store wiped");
        Ok(removed)
    }

    fn reset_locked(&self, state: &mut State) -> Result<usize, StoreError> {
        state.records = seed_students()
            .into_iter()
            .map(|draft| draft.with_id(generate_id()))
            .collect();
        self.persist(&state.records)?;
        Ok(state.records.len())
    }

    /// Append a record under a fresh id and persist.
    ///
    /// Field values are stored as given; see [`NewStudent::validate`] for
    /// form-level checks.
    pub fn create(&self, draft: NewStudent) -> Result<Student, StoreError> {
        let student = draft.with_id(generate_id());
        {
            let mut state = self.write()?;
            state.records.push(student.clone());
            self.persist(&state.records)?;
        }
        tracing::debug!(id = %student.id, "created student");
        self.notify(STUDENT_CREATED, &student);
        Ok(student)
    }

    /// Merge `patch` into the record with `id`. Returns None when no record
    /// has that id.
    pub fn update(&self, id: &str, patch: &StudentPatch) -> Result<Option<Student>, StoreError> {
        let updated = {
            let mut state = self.write()?;
            let Some(slot) = state.records.iter_mut().find(|s| s.id == id) else {
                tracing::debug!(id, "update target not found");
                return Ok(None);
            };
            let updated = patch.apply(slot);
            *slot = updated.clone();
            self.persist(&state.records)?;
            updated
        };
        tracing::debug!(id, "updated student");
        self.notify(STUDENT_UPDATED, &updated);
        Ok(Some(updated))
    }

    /// Remove the record with `id`. Returns false when none matched.
    pub fn delete(&self, id: &str) -> Result<bool, StoreError> {
        {
            let mut state = self.write()?;
            let before = state.records.len();
            state.records.retain(|s| s.id != id);
            if state.records.len() == before {
                tracing::debug!(id, "delete target not found");
                return Ok(false);
            }
            self.persist(&state.records)?;
        }
        tracing::debug!(id, "deleted student");
        self.notify(STUDENT_DELETED, &serde_json::json!({ "id": id }));
        Ok(true)
    }

    pub fn get(&self, id: &str) -> Result<Option<Student>, StoreError> {
        Ok(self.read()?.records.iter().find(|s| s.id == id).cloned())
    }

    /// Copy of every record in insertion order.
    pub fn snapshot(&self) -> Result<Vec<Student>, StoreError> {
        Ok(self.read()?.records.clone())
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.records.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    /// Run `query` against the current records. A query without a limit
    /// uses the configured page size.
    pub fn query(&self, query: &StudentQuery) -> Result<QueryPage, StoreError> {
        let state = self.read()?;
        if query.limit.is_some() {
            return Ok(run_query(&state.records, query));
        }
        let mut query = query.clone();
        query.limit = Some(self.config.page_size);
        Ok(run_query(&state.records, &query))
    }

    /// Average marks per semester over every record.
    pub fn average_marks_by_semester(&self) -> Result<Vec<SemesterAverage>, StoreError> {
        Ok(average_marks_by_semester(&self.read()?.records))
    }

    /// Report statistics over every record; None when the store is empty.
    pub fn report_summary(&self) -> Result<Option<ReportSummary>, StoreError> {
        Ok(ReportSummary::from_records(&self.read()?.records))
    }

    fn persist(&self, records: &[Student]) -> Result<(), StoreError> {
        let json = serde_json::to_string(records).map_err(|e| StoreError::Serde(e.to_string()))?;
        self.config
            .write_policy
            .write(&self.blobs, &self.config.key, &json)
            .map_err(|e| {
                tracing::error!(key = %self.config.key, error = %e, "persist failed, blob is stale");
                StoreError::storage(&self.config.key, e)
            })
    }

    fn notify_reset(&self, count: usize) {
        self.notify(STORE_RESET, &serde_json::json!({ "count": count }));
    }
}

#[cfg(feature = "emitter")]
impl<B: BlobStore> RecordStore<B> {
    /// Register a listener for a change event; returns the listener id.
    pub fn on<F>(&self, event: &str, listener: F) -> Result<String, StoreError>
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        self.emitter.on(event, listener)
    }

    fn notify<T: Serialize>(&self, event_type: &'static str, payload: &T) {
        match serde_json::to_string(payload) {
            Ok(data) => {
                // listener threads run detached
                self.emitter.emit(ChangeEvent { event_type, data });
            }
            Err(e) => tracing::warn!(event = event_type, error = %e, "unserializable event"),
        }
    }
}

#[cfg(not(feature = "emitter"))]
impl<B: BlobStore> RecordStore<B> {
    fn notify<T: Serialize>(&self, _event_type: &'static str, _payload: &T) {}
}
