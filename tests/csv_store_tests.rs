//! tests/csv_store_tests.rs
//! Loading, saving and repairing the CSV files

mod common;

use std::fs;

use checkmygrade::consts::{COURSE_HEADER, LOGIN_HEADER, PROFESSOR_HEADER, STUDENT_HEADER};
use checkmygrade::csv_store::{load, save};
use checkmygrade::{Course, GradeBook, LoginUser, Professor, Role, Student};
use tempfile::tempdir;

fn first_line(path: &std::path::Path) -> String {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .next()
        .unwrap_or_default()
        .to_string()
}

#[test]
fn missing_file_is_created_with_header() {
    common::setup();
    let dir = tempdir().unwrap();
    let path = dir.path().join("students.csv");

    let loaded = load::<Student>(&path).unwrap();

    assert!(loaded.created);
    assert!(loaded.records.is_empty());
    assert_eq!(first_line(&path), STUDENT_HEADER.join(","));
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("courses.csv");
    let courses = vec![
        Course::new("DATA200", "Data Science", "Provides insight about DS and Python", Some(3)),
        Course::new("CS101", "Intro CS", "", None),
        Course::new("STAT150", "Statistics I", "Descriptive & inferential stats", Some(3)),
    ];

    save(&path, &courses).unwrap();
    let loaded = load::<Course>(&path).unwrap();

    assert_eq!(loaded.records, courses);
    assert_eq!(loaded.skipped, 0);
    assert!(!loaded.created && !loaded.header_repaired);
}

#[test]
fn delimiter_and_quotes_in_free_text_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("students.csv");
    let students = vec![
        Student::new("anne@mycsu.edu", "Anne, Jr.", "O\"Brien", "CS101", 72.5),
        Student::new("line@mycsu.edu", "Multi\nLine", "Name", "CS101", 60.0),
    ];

    save(&path, &students).unwrap();
    let loaded = load::<Student>(&path).unwrap();

    assert_eq!(loaded.records, students);
}

#[test]
fn unquoted_stray_delimiter_in_hand_edited_row_is_skipped() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("students.csv");
    fs::write(
        &path,
        "email_address,first_name,last_name,course_id,grade,marks\n\
         ok@mycsu.edu,Ok,Row,CS101,B,84\n\
         bad@mycsu.edu,Anne, Jr.,Smith,CS101,B,84\n",
    )
    .unwrap();

    let loaded = load::<Student>(&path).unwrap();

    assert_eq!(loaded.records.len(), 1);
    assert_eq!(loaded.records[0].email_address, "ok@mycsu.edu");
    assert_eq!(loaded.skipped, 1);
}

#[test]
fn rows_with_bad_fields_are_skipped_and_the_rest_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("students.csv");
    fs::write(
        &path,
        "email_address,first_name,last_name,course_id,grade,marks\n\
         a@mycsu.edu,A,One,CS101,A,95\n\
         b@mycsu.edu,B,Two,CS101,A,not-a-number\n\
         c@mycsu.edu,C,Three,CS101,A,140\n\
         d@mycsu.edu,D,Four\n\
         e@mycsu.edu,E,Five,CS101,F,12\n",
    )
    .unwrap();

    let loaded = load::<Student>(&path).unwrap();

    let emails: Vec<&str> = loaded
        .records
        .iter()
        .map(|s| s.email_address.as_str())
        .collect();
    assert_eq!(emails, ["a@mycsu.edu", "e@mycsu.edu"]);
    assert_eq!(loaded.skipped, 3);
    assert!(!loaded.header_repaired);
}

#[test]
fn stored_grade_column_is_ignored_on_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("students.csv");
    fs::write(
        &path,
        "email_address,first_name,last_name,course_id,grade,marks\n\
         a@mycsu.edu,A,One,CS101,F,95\n",
    )
    .unwrap();

    let loaded = load::<Student>(&path).unwrap();

    assert_eq!(loaded.records[0].grade(), "A");
}

#[test]
fn header_with_extra_and_reordered_columns_is_accepted() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("courses.csv");
    fs::write(
        &path,
        "credits,course_id,notes,course_name,description\n\
         4,CS101,ignored,Intro CS,Basics\n",
    )
    .unwrap();

    let loaded = load::<Course>(&path).unwrap();

    assert!(!loaded.header_repaired);
    assert_eq!(
        loaded.records,
        vec![Course::new("CS101", "Intro CS", "Basics", Some(4))]
    );
}

#[test]
fn bad_header_is_repaired_with_positional_recovery() {
    common::setup();
    let dir = tempdir().unwrap();
    let path = dir.path().join("students.csv");
    fs::write(
        &path,
        "garbage;header;line\n\
         smriti.mandhana@mycsu.edu,Smriti,Mandhana,DATA200,A,95\n\
         only,three,columns\n\
         virat.kohli@mycsu.edu,Virat,Kohli,DATA200,A,97\n",
    )
    .unwrap();

    let loaded = load::<Student>(&path).unwrap();

    assert!(loaded.header_repaired);
    assert_eq!(loaded.records.len(), 2);
    assert_eq!(loaded.skipped, 1);
    assert_eq!(first_line(&path), STUDENT_HEADER.join(","));

    // The rewritten file now loads cleanly
    let again = load::<Student>(&path).unwrap();
    assert!(!again.header_repaired);
    assert_eq!(again.records, loaded.records);
}

#[test]
fn misnamed_header_line_never_becomes_a_record() {
    common::setup();
    let dir = tempdir().unwrap();
    let path = dir.path().join("professors.csv");
    fs::write(
        &path,
        "prof_id,name,title,course\n\
         kapil@mycsu.edu,Kapil Dev,Professor,CS101\n",
    )
    .unwrap();

    let book = GradeBook::open_dir(dir.path()).unwrap();

    assert!(book.find_professor("prof_id").is_none());
    assert_eq!(
        book.professors().list().to_vec(),
        vec![Professor::new("kapil@mycsu.edu", "Kapil Dev", "Professor", "CS101")]
    );

    // The repaired file keeps only the canonical header and the real row
    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(
        content.lines().collect::<Vec<_>>(),
        vec![
            PROFESSOR_HEADER.join(",").as_str(),
            "kapil@mycsu.edu,Kapil Dev,Professor,CS101"
        ]
    );
    let reopened = GradeBook::open_dir(dir.path()).unwrap();
    assert_eq!(reopened.professors().len(), 1);
}

#[test]
fn empty_file_gets_a_header() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("courses.csv");
    fs::write(&path, "").unwrap();

    let loaded = load::<Course>(&path).unwrap();

    assert!(loaded.header_repaired);
    assert!(loaded.records.is_empty());
    assert_eq!(first_line(&path), COURSE_HEADER.join(","));
}

#[test]
fn unknown_role_rows_are_skipped() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("login.csv");
    fs::write(
        &path,
        format!(
            "{}\nkapil@mycsu.edu,abc=,professor\nroot@mycsu.edu,abc=,superuser\n",
            LOGIN_HEADER.join(",")
        ),
    )
    .unwrap();

    let loaded = load::<LoginUser>(&path).unwrap();

    assert_eq!(loaded.records.len(), 1);
    assert_eq!(loaded.records[0].role, Role::Professor);
    assert_eq!(loaded.skipped, 1);
}

#[test]
fn save_into_missing_directory_creates_it() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("courses.csv");

    save::<Course>(&path, &[]).unwrap();

    assert_eq!(first_line(&path), COURSE_HEADER.join(","));
}
