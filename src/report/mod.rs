//! Report input - the statistics handed to the narrative report generator.
//!
//! The generator itself (a hosted text model) lives outside this crate. This
//! module computes what it is given: overall average, mark distribution and
//! per-department performance, plus the prompt text built from them.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::aggregate::mean2;
use crate::student::Student;

/// Mark brackets in report order: label, inclusive lower bound, exclusive
/// upper bound.
const BRACKETS: [(&str, Option<i64>, Option<i64>); 4] = [
    ("Excellent (90-100)", Some(90), None),
    ("Good (75-89)", Some(75), Some(90)),
    ("Average (50-74)", Some(50), Some(75)),
    ("Needs Improvement (<50)", None, Some(50)),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BracketCount {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentPerformance {
    pub department: String,
    pub count: usize,
    pub average_marks: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_students: usize,
    pub average_mark: f64,
    pub brackets: Vec<BracketCount>,
    /// In order of first appearance in the snapshot.
    pub departments: Vec<DepartmentPerformance>,
}

impl ReportSummary {
    /// Summarize a full snapshot. None when there are no records to report on.
    pub fn from_records(records: &[Student]) -> Option<Self> {
        if records.is_empty() {
            return None;
        }

        let brackets = BRACKETS
            .iter()
            .map(|&(label, low, high)| BracketCount {
                label: label.to_string(),
                count: records
                    .iter()
                    .filter(|s| low.map_or(true, |l| s.marks >= l))
                    .filter(|s| high.map_or(true, |h| s.marks < h))
                    .count(),
            })
            .collect();

        let mut totals: Vec<(String, i128, usize)> = Vec::new();
        for student in records {
            match totals.iter_mut().find(|(d, _, _)| *d == student.department) {
                Some((_, sum, count)) => {
                    *sum += i128::from(student.marks);
                    *count += 1;
                }
                None => totals.push((student.department.clone(), i128::from(student.marks), 1)),
            }
        }
        let departments = totals
            .into_iter()
            .map(|(department, sum, count)| DepartmentPerformance {
                department,
                count,
                average_marks: mean2(sum, count),
            })
            .collect();

        let sum: i128 = records.iter().map(|s| i128::from(s.marks)).sum();

        Some(Self {
            total_students: records.len(),
            average_mark: mean2(sum, records.len()),
            brackets,
            departments,
        })
    }

    /// Prompt text for the report generator.
    pub fn prompt(&self) -> String {
        let mut out = String::new();
        out.push_str(
            "You are an expert academic analyst AI. Your task is to generate a comprehensive \
             student performance report based on the provided data. The report should be \
             insightful, well-structured, and easy for an educator to understand.\n\n",
        );
        out.push_str("**Input Data:**\n\n");
        out.push_str("*   **Overall Summary:**\n");
        let _ = writeln!(out, "    *   Total Students: {}", self.total_students);
        let _ = writeln!(out, "    *   Overall Average Mark: {:.2}", self.average_mark);
        out.push_str("*   **Mark Distribution:**\n");
        for bracket in &self.brackets {
            let _ = writeln!(out, "    *   {}: {} students", bracket.label, bracket.count);
        }
        out.push_str("*   **Performance by Department:**\n");
        for dep in &self.departments {
            let _ = writeln!(
                out,
                "    *   {}: {} students, Average Mark: {}",
                dep.department, dep.count, dep.average_marks
            );
        }
        out.push_str(REPORT_STRUCTURE);
        out
    }
}

const REPORT_STRUCTURE: &str = "
**Required Report Structure (Use Markdown):**

Please generate a report with the following sections:

### 1. Executive Summary
Provide a high-level overview of the class's performance. Mention the overall average and the total number of students.

### 2. Performance Distribution Analysis
Analyze the distribution of marks across the different brackets (Excellent, Good, etc.). Comment on the proportion of high-achievers versus students who may need support.

### 3. Departmental Insights
Compare the performance across different departments. Highlight any departments that are performing particularly well or any that might have a lower average. Avoid making definitive judgments, but point out the statistical differences.

### 4. Actionable Recommendations
Based on your analysis, provide 2-3 concrete and actionable recommendations for the faculty. These could relate to teaching strategies, student support initiatives, or curriculum adjustments.

**Formatting Guidelines:**
*   Use Markdown for headings ('###'), bold text ('**text**'), and unordered lists ('- ').
*   Keep the tone professional, objective, and constructive.
";
