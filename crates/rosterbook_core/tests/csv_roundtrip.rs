use chrono::NaiveDate;
use rosterbook_core::persist::csv;
use rosterbook_core::{PersistError, Student, StudentStore};
use std::cell::Cell;
use std::fs;
use std::rc::Rc;

const HEADER: &str = "ID,FirstName,LastName,DateOfBirth,Gender,Email,Phone,Address,Major,GPA";

#[test]
fn export_writes_fixed_header_and_two_decimal_gpa() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("roster.csv");

    let mut store = StudentStore::new();
    store.add(sample_student("S-1001")).unwrap();
    csv::export(&store, &path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some(HEADER));
    assert_eq!(
        lines.next(),
        Some(
            "S-1001,Ada,Lovelace,2000-01-15,Female,ada@example.edu,\
             555-0100,12 College Walk,Computer Science,3.50"
        )
    );
    assert_eq!(lines.next(), None);
}

#[test]
fn export_quotes_fields_containing_commas_and_quotes() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("roster.csv");

    let mut store = StudentStore::new();
    let mut student = sample_student("S-1001");
    student.address = "1 Main St, Apt 4".to_string();
    student.last_name = "O\"Brien".to_string();
    store.add(student).unwrap();
    csv::export(&store, &path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"1 Main St, Apt 4\""));
    assert!(text.contains("\"O\"\"Brien\""));
}

#[test]
fn export_then_import_roundtrips_plain_and_quoted_fields() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("roster.csv");

    let mut store = StudentStore::new();
    store.add(sample_student("S-1001")).unwrap();
    let mut tricky = sample_student("S-1002");
    tricky.first_name = "Mary, Jane".to_string();
    tricky.major = "History \"of Science\"".to_string();
    tricky.date_of_birth = None;
    tricky.gpa = 2.25;
    store.add(tricky).unwrap();

    csv::export(&store, &path).unwrap();

    let mut reloaded = StudentStore::new();
    let installed = csv::import(&mut reloaded, &path).unwrap();

    assert_eq!(installed, 2);
    assert_eq!(reloaded.all(), store.all());
}

#[test]
fn import_accepts_reordered_and_differently_cased_headers() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("roster.csv");
    fs::write(
        &path,
        "gpa,id,firstname,LASTNAME,dateofbirth,GENDER,email,phone,address,major\n\
         3.10,S-42,Rosa,Diaz,1999-07-04,Female,rosa@example.edu,555-0042,99 Precinct Rd,Criminology\n",
    )
    .unwrap();

    let mut store = StudentStore::new();
    csv::import(&mut store, &path).unwrap();

    let student = store.get("S-42").unwrap();
    assert_eq!(student.first_name, "Rosa");
    assert_eq!(student.date_of_birth, NaiveDate::from_ymd_opt(1999, 7, 4));
    assert_eq!(student.gpa, 3.10);
}

#[test]
fn import_missing_required_header_fails_and_keeps_store() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("roster.csv");
    fs::write(
        &path,
        "ID,FirstName,LastName,DateOfBirth,Gender,Email,Phone,Address,Major\n\
         S-1,A,B,2000-01-01,F,a@b.c,1,addr,CS\n",
    )
    .unwrap();

    let mut store = StudentStore::new();
    store.add(sample_student("keep-me")).unwrap();

    let err = csv::import(&mut store, &path).unwrap_err();
    assert!(matches!(
        err,
        PersistError::MissingHeader { column: "GPA", .. }
    ));
    assert_eq!(store.len(), 1);
    assert!(store.get("keep-me").is_some());
}

#[test]
fn import_skips_rows_with_wrong_field_count_but_keeps_the_rest() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("roster.csv");
    fs::write(
        &path,
        format!(
            "{HEADER}\n\
             S-1,Ann,Able,2001-01-01,Female,ann@example.edu,555-1,1 First St,Math,3.00\n\
             S-2,Bob,Broken,2001-02-02,Male,bob@example.edu,555-2,2 Second St,Physics\n\
             S-3,Cal,Clear,2001-03-03,Male,cal@example.edu,555-3,3 Third St,Chemistry,2.50\n"
        ),
    )
    .unwrap();

    let mut store = StudentStore::new();
    let installed = csv::import(&mut store, &path).unwrap();

    assert_eq!(installed, 2);
    assert!(store.get("S-1").is_some());
    assert!(store.get("S-2").is_none());
    assert!(store.get("S-3").is_some());
}

#[test]
fn import_skips_rows_with_blank_id_and_blank_lines() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("roster.csv");
    fs::write(
        &path,
        format!(
            "{HEADER}\n\
             \n\
             ,Anon,Nobody,2001-01-01,Female,x@example.edu,555-1,1 First St,Math,3.00\n\
             S-2,Bea,Present,2001-02-02,Female,bea@example.edu,555-2,2 Second St,Art,3.20\n"
        ),
    )
    .unwrap();

    let mut store = StudentStore::new();
    let installed = csv::import(&mut store, &path).unwrap();

    assert_eq!(installed, 1);
    assert!(store.get("S-2").is_some());
}

#[test]
fn import_defaults_bad_gpa_and_bad_date() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("roster.csv");
    fs::write(
        &path,
        format!(
            "{HEADER}\n\
             S-1,Ann,Able,not-a-date,Female,ann@example.edu,555-1,1 First St,Math,not-a-gpa\n"
        ),
    )
    .unwrap();

    let mut store = StudentStore::new();
    csv::import(&mut store, &path).unwrap();

    let student = store.get("S-1").unwrap();
    assert_eq!(student.date_of_birth, None);
    assert_eq!(student.gpa, 0.0);
}

#[test]
fn import_replaces_prior_contents_and_notifies_once() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("roster.csv");
    fs::write(
        &path,
        format!(
            "{HEADER}\n\
             S-1,Ann,Able,2001-01-01,Female,ann@example.edu,555-1,1 First St,Math,3.00\n"
        ),
    )
    .unwrap();

    let mut store = StudentStore::new();
    store.add(sample_student("stale")).unwrap();

    let fired = Rc::new(Cell::new(0usize));
    let counter = Rc::clone(&fired);
    store.subscribe(move || counter.set(counter.get() + 1));

    csv::import(&mut store, &path).unwrap();

    assert_eq!(fired.get(), 1);
    assert!(store.get("stale").is_none());
    assert_eq!(store.len(), 1);
}

fn sample_student(id: &str) -> Student {
    Student {
        id: id.to_string(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(2000, 1, 15),
        gender: "Female".to_string(),
        email: "ada@example.edu".to_string(),
        phone: "555-0100".to_string(),
        address: "12 College Walk".to_string(),
        major: "Computer Science".to_string(),
        gpa: 3.5,
    }
}
