//! Form-level checks. The record store never calls these; callers that want
//! the editing form's constraints opt in.

use std::fmt;

use super::NewStudent;

pub const MARKS_RANGE: (i64, i64) = (0, 100);
pub const SEMESTER_RANGE: (i64, i64) = (1, 8);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    EmptyName,
    EmptyUsn,
    MarksOutOfRange(i64),
    SemesterOutOfRange(i64),
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::EmptyName => write!(f, "name must not be empty"),
            Violation::EmptyUsn => write!(f, "usn must not be empty"),
            Violation::MarksOutOfRange(marks) => write!(
                f,
                "marks {} outside {}..={}",
                marks, MARKS_RANGE.0, MARKS_RANGE.1
            ),
            Violation::SemesterOutOfRange(semester) => write!(
                f,
                "semester {} outside {}..={}",
                semester, SEMESTER_RANGE.0, SEMESTER_RANGE.1
            ),
        }
    }
}

impl NewStudent {
    /// Every form constraint this draft breaks; empty when it is valid.
    pub fn validate(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        if self.name.trim().is_empty() {
            violations.push(Violation::EmptyName);
        }
        if self.usn.trim().is_empty() {
            violations.push(Violation::EmptyUsn);
        }
        if !(MARKS_RANGE.0..=MARKS_RANGE.1).contains(&self.marks) {
            violations.push(Violation::MarksOutOfRange(self.marks));
        }
        if !(SEMESTER_RANGE.0..=SEMESTER_RANGE.1).contains(&self.semester) {
            violations.push(Violation::SemesterOutOfRange(self.semester));
        }
        violations
    }
}
