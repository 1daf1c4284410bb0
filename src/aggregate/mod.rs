//! Per-semester aggregation over the full record set.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::student::Student;

/// Average marks of one semester.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterAverage {
    pub semester: i64,
    pub average_marks: f64,
}

/// Round to two decimals, halves away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Mean of `sum / count` rounded by [`round2`]. `count` must be non-zero.
///
/// Sums are `i128` so any mix of `i64` marks adds up without overflow.
pub(crate) fn mean2(sum: i128, count: usize) -> f64 {
    round2(sum as f64 / count as f64)
}

/// Group every record by semester and average its marks.
///
/// One entry per semester present, ascending by semester. Query filters do
/// not apply here.
pub fn average_marks_by_semester(records: &[Student]) -> Vec<SemesterAverage> {
    let mut groups: BTreeMap<i64, (i128, usize)> = BTreeMap::new();
    for student in records {
        let (sum, count) = groups.entry(student.semester).or_insert((0, 0));
        *sum += i128::from(student.marks);
        *count += 1;
    }

    groups
        .into_iter()
        .map(|(semester, (sum, count))| SemesterAverage {
            semester,
            average_marks: mean2(sum, count),
        })
        .collect()
}
