use super::NewStudent;

/// Departments offered by the editing form.
pub const DEPARTMENTS: [&str; 6] = [
    "Computer Science",
    "Mechanical",
    "Civil",
    "Electrical",
    "Information Science",
    "Electronics",
];

/// Department filter value meaning "no filter".
pub const ALL_DEPARTMENTS: &str = "All";

const SEED: [(&str, &str, i64, i64, &str); 12] = [
    ("Alice Johnson", "1MS21CS001", 85, 5, "Computer Science"),
    ("Bob Smith", "1MS21ME010", 72, 5, "Mechanical"),
    ("Charlie Brown", "1MS20CV020", 91, 7, "Civil"),
    ("Diana Prince", "1MS21CS035", 95, 5, "Computer Science"),
    ("Ethan Hunt", "1MS22EE005", 68, 3, "Electrical"),
    ("Fiona Glenanne", "1MS20IS015", 88, 7, "Information Science"),
    ("George Costanza", "1MS22CS050", 45, 3, "Computer Science"),
    ("Hannah Montana", "1MS21EC025", 78, 5, "Electronics"),
    ("Isaac Newton", "1MS20ME030", 99, 7, "Mechanical"),
    ("Jane Eyre", "1MS22CV012", 82, 3, "Civil"),
    ("Kevin McCallister", "1MS21IS008", 65, 5, "Information Science"),
    ("Luna Lovegood", "1MS22CS060", 92, 3, "Computer Science"),
];

/// The fixed list a reset store is populated with, in order.
pub fn seed_students() -> Vec<NewStudent> {
    SEED.iter()
        .map(|&(name, usn, marks, semester, department)| {
            NewStudent::new(name, usn, marks, semester, department)
        })
        .collect()
}
