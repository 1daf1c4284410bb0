use crate::blob::WritePolicy;
use crate::query::DEFAULT_PAGE_SIZE;

/// Blob key the record set is persisted under unless configured otherwise.
pub const DEFAULT_BLOB_KEY: &str = "students_db";

/// Record store settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Blob key holding the serialized record set.
    pub key: String,
    /// Limit applied to queries that do not carry one.
    pub page_size: i64,
    pub write_policy: WritePolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            key: DEFAULT_BLOB_KEY.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            write_policy: WritePolicy::default(),
        }
    }
}

impl StoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_page_size(mut self, page_size: i64) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_write_policy(mut self, write_policy: WritePolicy) -> Self {
        self.write_policy = write_policy;
        self
    }
}
