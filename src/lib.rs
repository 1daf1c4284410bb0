mod aggregate;
mod blob;
mod emitter;
mod error;
mod id;
mod query;
mod report;
mod store;
mod student;

pub use aggregate::{average_marks_by_semester, round2, SemesterAverage};
pub use blob::{BlobError, BlobStore, FileBlobStore, InMemoryBlobStore, WritePolicy};
#[cfg(feature = "emitter")]
pub use emitter::ChangeEmitter;
pub use emitter::{ChangeEvent, STORE_RESET, STUDENT_CREATED, STUDENT_DELETED, STUDENT_UPDATED};
pub use error::StoreError;
pub use id::generate_id;
pub use query::{
    page_count, run_query, MarksRange, QueryPage, SortOrder, StudentQuery, DEFAULT_PAGE_SIZE,
};
pub use report::{BracketCount, DepartmentPerformance, ReportSummary};
pub use store::{RecordStore, StoreConfig, DEFAULT_BLOB_KEY};
pub use student::{
    seed_students, NewStudent, Student, StudentPatch, Violation, ALL_DEPARTMENTS, DEPARTMENTS,
    MARKS_RANGE, SEMESTER_RANGE,
};
