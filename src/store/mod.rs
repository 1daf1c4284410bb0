//! Record store - the in-memory record set mirrored to a durable blob.
//!
//! ## Example
//!
//! ```ignore
//! use student_records::{InMemoryBlobStore, NewStudent, RecordStore, StudentQuery};
//!
//! let store = RecordStore::new(InMemoryBlobStore::new());
//! store.initialize()?; // load the blob, or seed a fresh store
//!
//! let ada = store.create(NewStudent::new("Ada", "1MS24CS001", 97, 1, "Computer Science"))?;
//! let page = store.query(&StudentQuery::new().search("ada"))?;
//! assert_eq!(page.total, 1);
//! store.delete(&ada.id)?;
//! ```

mod config;
mod record_store;

pub use config::{StoreConfig, DEFAULT_BLOB_KEY};
pub use record_store::RecordStore;
