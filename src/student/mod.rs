//! Student records and the payloads that create and patch them.

mod seed;
mod validate;

use serde::{Deserialize, Serialize};

pub use seed::{seed_students, ALL_DEPARTMENTS, DEPARTMENTS};
pub use validate::{Violation, MARKS_RANGE, SEMESTER_RANGE};

/// One stored student record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub name: String,
    /// University seat number.
    pub usn: String,
    pub marks: i64,
    pub semester: i64,
    pub department: String,
}

/// Creation payload: a student without an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudent {
    pub name: String,
    pub usn: String,
    pub marks: i64,
    pub semester: i64,
    pub department: String,
}

impl NewStudent {
    pub fn new(
        name: impl Into<String>,
        usn: impl Into<String>,
        marks: i64,
        semester: i64,
        department: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            usn: usn.into(),
            marks,
            semester,
            department: department.into(),
        }
    }

    /// Attach an identifier.
    pub fn with_id(self, id: impl Into<String>) -> Student {
        Student {
            id: id.into(),
            name: self.name,
            usn: self.usn,
            marks: self.marks,
            semester: self.semester,
            department: self.department,
        }
    }
}

impl From<Student> for NewStudent {
    fn from(student: Student) -> Self {
        Self {
            name: student.name,
            usn: student.usn,
            marks: student.marks,
            semester: student.semester,
            department: student.department,
        }
    }
}

/// Partial update. Absent fields keep their current value; the id never
/// changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marks: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semester: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

impl StudentPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn usn(mut self, usn: impl Into<String>) -> Self {
        self.usn = Some(usn.into());
        self
    }

    pub fn marks(mut self, marks: i64) -> Self {
        self.marks = Some(marks);
        self
    }

    pub fn semester(mut self, semester: i64) -> Self {
        self.semester = Some(semester);
        self
    }

    pub fn department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Merge this patch over `student`, returning the updated record.
    pub fn apply(&self, student: &Student) -> Student {
        Student {
            id: student.id.clone(),
            name: self.name.clone().unwrap_or_else(|| student.name.clone()),
            usn: self.usn.clone().unwrap_or_else(|| student.usn.clone()),
            marks: self.marks.unwrap_or(student.marks),
            semester: self.semester.unwrap_or(student.semester),
            department: self
                .department
                .clone()
                .unwrap_or_else(|| student.department.clone()),
        }
    }
}
