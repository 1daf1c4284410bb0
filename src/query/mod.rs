//! Queries - filter, search, sort and paginate a record snapshot.
//!
//! ## Example
//!
//! ```ignore
//! use student_records::{StudentQuery, SortOrder};
//!
//! let query = StudentQuery::new()
//!     .marks_between(50, 100)
//!     .search("alice")
//!     .department("Computer Science")
//!     .sort(SortOrder::Desc)
//!     .page(1, 6);
//! let page = store.query(&query)?;
//! println!("{} of {}", page.data.len(), page.total);
//! ```

mod pipeline;

use serde::{Deserialize, Serialize};

use crate::student::Student;

pub use pipeline::{page_count, run_query};

/// Page size used when a query does not carry a limit.
pub const DEFAULT_PAGE_SIZE: i64 = 6;

/// Inclusive marks bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarksRange {
    pub min: i64,
    pub max: i64,
}

impl MarksRange {
    pub fn contains(&self, marks: i64) -> bool {
        self.min <= marks && marks <= self.max
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Caller-supplied filter, sort and page parameters for a read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StudentQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marks_range: Option<MarksRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Exact department match; `"All"` disables the filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// 1-indexed page number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

impl StudentQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn marks_between(mut self, min: i64, max: i64) -> Self {
        self.marks_range = Some(MarksRange { min, max });
        self
    }

    pub fn sort(mut self, order: SortOrder) -> Self {
        self.sort = Some(order);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    pub fn page(mut self, page: i64, limit: i64) -> Self {
        self.page = Some(page);
        self.limit = Some(limit);
        self
    }
}

/// One page of query results plus the count of all matches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryPage {
    pub data: Vec<Student>,
    pub total: usize,
}
