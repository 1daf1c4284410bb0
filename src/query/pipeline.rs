use crate::student::{Student, ALL_DEPARTMENTS};

use super::{QueryPage, SortOrder, StudentQuery, DEFAULT_PAGE_SIZE};

/// Run `query` over `records`.
///
/// Stages run in a fixed order: marks range, search, department, sort,
/// count, paginate. `records` is never modified.
pub fn run_query(records: &[Student], query: &StudentQuery) -> QueryPage {
    let mut matched: Vec<&Student> = records
        .iter()
        .filter(|s| query.marks_range.map_or(true, |range| range.contains(s.marks)))
        .collect();

    if let Some(term) = query.search.as_deref().filter(|t| !t.is_empty()) {
        let term = term.to_lowercase();
        matched.retain(|s| {
            s.name.to_lowercase().contains(&term) || s.usn.to_lowercase().contains(&term)
        });
    }

    if let Some(department) = query
        .department
        .as_deref()
        .filter(|d| *d != ALL_DEPARTMENTS)
    {
        matched.retain(|s| s.department == department);
    }

    // sort_by is stable: equal marks keep their filtered order either way
    match query.sort {
        Some(SortOrder::Asc) => matched.sort_by(|a, b| a.marks.cmp(&b.marks)),
        Some(SortOrder::Desc) => matched.sort_by(|a, b| b.marks.cmp(&a.marks)),
        None => {}
    }

    let total = matched.len();
    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE);
    let data = match page_bounds(page, limit, total) {
        Some((start, end)) => matched[start..end].iter().map(|s| (*s).clone()).collect(),
        None => Vec::new(),
    };

    QueryPage { data, total }
}

/// Slice bounds for a 1-indexed page, or None when the page is empty.
fn page_bounds(page: i64, limit: i64, total: usize) -> Option<(usize, usize)> {
    if page < 1 || limit < 1 {
        return None;
    }
    let start = usize::try_from((page - 1).checked_mul(limit)?).ok()?;
    if start >= total {
        return None;
    }
    let limit = usize::try_from(limit).ok()?;
    Some((start, start.saturating_add(limit).min(total)))
}

/// Number of pages needed to show `total` matches at `limit` per page.
pub fn page_count(total: usize, limit: i64) -> usize {
    match usize::try_from(limit) {
        Ok(limit) if limit > 0 => total.div_ceil(limit),
        _ => 0,
    }
}
