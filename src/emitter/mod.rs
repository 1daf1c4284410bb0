//! Change notifications for record store mutations.
//!
//! Event names are always available; registering listeners requires the
//! `emitter` feature.
//!
//! Listeners receive the event payload as a JSON string. Events fire only
//! after the mutation has been persisted, on the emitter's own threads.
//!
//! ```ignore
//! store.on(STUDENT_CREATED, |json| println!("created: {}", json))?;
//! store.create(draft)?;
//! ```

#[cfg(feature = "emitter")]
use std::sync::{Arc, Mutex};
#[cfg(feature = "emitter")]
use std::thread::JoinHandle;

#[cfg(feature = "emitter")]
use event_emitter_rs::EventEmitter;

#[cfg(feature = "emitter")]
use crate::error::StoreError;

pub const STUDENT_CREATED: &str = "StudentCreated";
pub const STUDENT_UPDATED: &str = "StudentUpdated";
pub const STUDENT_DELETED: &str = "StudentDeleted";
pub const STORE_RESET: &str = "StoreReset";

/// A mutation notification waiting to be emitted.
#[derive(Clone, Debug, PartialEq)]
pub struct ChangeEvent {
    pub event_type: &'static str,
    pub data: String,
}

/// Shared listener registry. Clones share listeners.
#[cfg(feature = "emitter")]
#[derive(Clone)]
pub struct ChangeEmitter {
    inner: Arc<Mutex<EventEmitter>>,
}

#[cfg(feature = "emitter")]
impl Default for ChangeEmitter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "emitter")]
impl ChangeEmitter {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(EventEmitter::new())),
        }
    }

    /// Register a listener; returns its id.
    pub fn on<F>(&self, event: &str, listener: F) -> Result<String, StoreError>
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        let mut emitter = self
            .inner
            .lock()
            .map_err(|_| StoreError::LockPoisoned("emitter register"))?;
        Ok(emitter.on(event, listener))
    }

    /// Fire `event`, returning one handle per listener thread. A poisoned
    /// registry drops the notification.
    pub fn emit(&self, event: ChangeEvent) -> Vec<JoinHandle<()>> {
        match self.inner.lock() {
            Ok(mut emitter) => emitter.emit(event.event_type, event.data),
            Err(_) => {
                tracing::warn!(event = event.event_type, "emitter lock poisoned, event dropped");
                Vec::new()
            }
        }
    }
}
