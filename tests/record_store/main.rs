//! Integration tests for the record store: lifecycle, CRUD, queries and
//! aggregation through the public API.


use std::collections::HashSet;

use fixtures::{draft, empty_store, fields, seeded_store, store_with};
use student_records::{
    page_count, BlobStore, SemesterAverage, SortOrder, StudentPatch, StudentQuery,
    ALL_DEPARTMENTS, DEFAULT_BLOB_KEY,
};

#[test]
fn seeded_store_matches_seed_list() {
    let store = seeded_store();
    let records = store.snapshot().unwrap();
    assert_eq!(records.len(), 12);
    assert_eq!(records[0].name, "Alice Johnson");
    assert_eq!(records[0].usn, "1MS21CS001");
    assert_eq!(records[11].name, "Luna Lovegood");

    let ids: HashSet<&str> = records.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids.len(), 12);
}

#[test]
fn reset_twice_keeps_fields_but_not_ids() {
    let store = seeded_store();
    store.reset().unwrap();
    let first = store.snapshot().unwrap();
    store.reset().unwrap();
    let second = store.snapshot().unwrap();

    let first_fields: Vec<_> = first.iter().map(fields).collect();
    let second_fields: Vec<_> = second.iter().map(fields).collect();
    assert_eq!(first_fields, second_fields);

    let first_ids: HashSet<&str> = first.iter().map(|s| s.id.as_str()).collect();
    assert!(second.iter().all(|s| !first_ids.contains(s.id.as_str())));
}

#[test]
fn reset_discards_created_records() {
    let store = seeded_store();
    let extra = store.create(draft("Extra", 50, 2, "Civil")).unwrap();
    store.reset().unwrap();
    assert_eq!(store.len().unwrap(), 12);
    assert!(store.get(&extra.id).unwrap().is_none());
}

#[test]
fn create_then_query_then_delete() {
    let store = seeded_store();
    let created = store
        .create(draft("Mira Patel", 77, 6, "Electronics"))
        .unwrap();

    let query = StudentQuery::new()
        .marks_between(77, 77)
        .department("Electronics")
        .page(1, 100);
    let page = store.query(&query).unwrap();
    assert!(page.data.contains(&created));

    assert!(store.delete(&created.id).unwrap());
    let page = store.query(&query).unwrap();
    assert!(!page.data.contains(&created));
    assert!(!store.delete(&created.id).unwrap());
}

#[test]
fn create_accepts_out_of_range_values() {
    let store = empty_store();
    let created = store.create(draft("Odd", -4, 0, "Nowhere")).unwrap();
    assert_eq!(created.marks, -4);
    assert_eq!(created.semester, 0);
}

#[test]
fn update_merges_and_persists() {
    let store = seeded_store();
    let target = store.snapshot().unwrap()[1].clone();

    let updated = store
        .update(&target.id, &StudentPatch::new().marks(100).name("Robert Smith"))
        .unwrap()
        .unwrap();
    assert_eq!(updated.id, target.id);
    assert_eq!(updated.name, "Robert Smith");
    assert_eq!(updated.marks, 100);
    assert_eq!(updated.usn, target.usn);
    assert_eq!(updated.department, target.department);
    assert_eq!(store.get(&target.id).unwrap(), Some(updated.clone()));

    let persisted = store.blobs().read_blob(DEFAULT_BLOB_KEY).unwrap().unwrap();
    assert!(persisted.contains("Robert Smith"));
}

#[test]
fn no_filter_query_returns_everything() {
    let store = seeded_store();
    let page = store.query(&StudentQuery::new().page(1, 100)).unwrap();
    assert_eq!(page.total, 12);
    assert_eq!(page.data, store.snapshot().unwrap());
}

#[test]
fn default_query_returns_first_six() {
    let store = seeded_store();
    let page = store.query(&StudentQuery::new()).unwrap();
    assert_eq!(page.total, 12);
    assert_eq!(page.data, store.snapshot().unwrap()[..6].to_vec());
}

#[test]
fn pages_cover_result_exactly_once() {
    let store = seeded_store();
    let base = StudentQuery::new().marks_between(60, 100).sort(SortOrder::Desc);
    let full = store.query(&base.clone().page(1, 1000)).unwrap();

    for limit in 1..=7 {
        let pages = page_count(full.total, limit);
        let mut collected = Vec::new();
        for page in 1..=pages as i64 {
            let result = store.query(&base.clone().page(page, limit)).unwrap();
            assert_eq!(result.total, full.total);
            collected.extend(result.data);
        }
        assert_eq!(collected, full.data, "limit {limit}");
    }
}

#[test]
fn sort_keeps_insertion_order_for_ties() {
    let (store, created) = store_with(&[
        draft("First", 70, 1, "Civil"),
        draft("Second", 80, 1, "Civil"),
        draft("Third", 70, 1, "Civil"),
        draft("Fourth", 80, 1, "Civil"),
    ]);
    let names = |order| -> Vec<String> {
        store
            .query(&StudentQuery::new().sort(order))
            .unwrap()
            .data
            .into_iter()
            .map(|s| s.name)
            .collect()
    };

    assert_eq!(names(SortOrder::Asc), ["First", "Third", "Second", "Fourth"]);
    assert_eq!(names(SortOrder::Desc), ["Second", "Fourth", "First", "Third"]);
    assert_eq!(created.len(), 4);
}

#[test]
fn search_is_case_insensitive_and_ors_name_with_usn() {
    let store = seeded_store();

    let alice = store.query(&StudentQuery::new().search("alice")).unwrap();
    assert_eq!(alice.total, 1);
    assert_eq!(alice.data[0].name, "Alice Johnson");

    let by_usn = store.query(&StudentQuery::new().search("1ms22")).unwrap();
    assert_eq!(by_usn.total, 4);
}

#[test]
fn department_filter_combines_with_search() {
    let store = seeded_store();
    let query = StudentQuery::new()
        .department("Computer Science")
        .search("cs")
        .page(1, 100);
    let page = store.query(&query).unwrap();
    assert_eq!(page.total, 4);
    assert!(page.data.iter().all(|s| s.department == "Computer Science"));

    let all = store
        .query(&StudentQuery::new().department(ALL_DEPARTMENTS))
        .unwrap();
    assert_eq!(all.total, 12);
}

#[test]
fn full_marks_range_equals_no_filter() {
    let store = seeded_store();
    let full = store
        .query(&StudentQuery::new().marks_between(0, 100).page(1, 100))
        .unwrap();
    let none = store.query(&StudentQuery::new().page(1, 100)).unwrap();
    assert_eq!(full, none);
}

#[test]
fn empty_store_and_past_last_page() {
    let store = empty_store();
    let page = store.query(&StudentQuery::new().page(1, 6)).unwrap();
    assert!(page.data.is_empty());
    assert_eq!(page.total, 0);

    let store = seeded_store();
    let page = store.query(&StudentQuery::new().page(3, 6)).unwrap();
    assert!(page.data.is_empty());
    assert_eq!(page.total, 12);

    let page = store.query(&StudentQuery::new().page(0, 6)).unwrap();
    assert!(page.data.is_empty());
    assert_eq!(page.total, 12);
}

#[test]
fn semester_averages_example() {
    let (store, _) = store_with(&[
        draft("A", 85, 5, "Civil"),
        draft("B", 68, 3, "Civil"),
        draft("C", 95, 5, "Civil"),
        draft("D", 45, 3, "Civil"),
        draft("E", 92, 3, "Civil"),
    ]);
    assert_eq!(
        store.average_marks_by_semester().unwrap(),
        vec![
            SemesterAverage {
                semester: 3,
                average_marks: 68.33,
            },
            SemesterAverage {
                semester: 5,
                average_marks: 90.0,
            },
        ]
    );
}

#[test]
fn averages_ignore_query_filters_and_cover_seed() {
    let store = seeded_store();
    let averages = store.average_marks_by_semester().unwrap();
    let semesters: Vec<i64> = averages.iter().map(|a| a.semester).collect();
    assert_eq!(semesters, vec![3, 5, 7]);
    // semester 3: 68, 45, 82, 92
    assert_eq!(averages[0].average_marks, 71.75);
    // semester 7: 91, 88, 99
    assert_eq!(averages[2].average_marks, 92.67);
}

#[test]
fn report_summary_covers_snapshot() {
    assert!(empty_store().report_summary().unwrap().is_none());

    let summary = seeded_store().report_summary().unwrap().unwrap();
    assert_eq!(summary.total_students, 12);
    let counts: Vec<usize> = summary.brackets.iter().map(|b| b.count).collect();
    assert_eq!(counts, vec![4, 4, 3, 1]);
    assert_eq!(summary.departments[0].department, "Computer Science");
    assert_eq!(summary.departments[0].count, 4);
}

#[test]
fn extreme_marks_aggregate_without_overflow() {
    let (store, _) = store_with(&[
        draft("Max", i64::MAX, 1, "Civil"),
        draft("One", 1, 1, "Civil"),
    ]);

    let averages = store.average_marks_by_semester().unwrap();
    assert_eq!(averages.len(), 1);
    assert_eq!(averages[0].average_marks, 2f64.powi(62));

    let summary = store.report_summary().unwrap().unwrap();
    assert_eq!(summary.total_students, 2);
    assert_eq!(summary.average_mark, 2f64.powi(62));
}
