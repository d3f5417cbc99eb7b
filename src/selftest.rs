//! Built-in self-test
//!
//! Runs every check against a private temporary data directory and reports
//! pass/fail per check plus timing lines for the bulk pass over synthetic
//! students.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::aliases::LoginPassword;
use crate::cipher::SimpleCipher;
use crate::config::{Config, SelfTestSettings};
use crate::consts::{STUDENT_HEADER, STUDENTS_FILE};
use crate::enums::{Role, StudentSortKey};
use crate::error::{CoreError, Result};
use crate::gradebook::GradeBook;
use crate::grade::letter_grade;
use crate::models::{Course, Professor, Student};
use crate::seed::{sample_courses, seed_sample_data};
use crate::stats::{mean, median};
use crate::timing::{format_elapsed, time};

const FIRST_NAMES: &[&str] = &[
    "Aarav", "Priya", "Rahul", "Ananya", "Vikram", "Sneha", "Arjun", "Kavya", "Rohan", "Isha",
    "Deepti", "Shafali", "Yastika", "Renuka", "Ishan",
];

const LAST_NAMES: &[&str] = &[
    "Sharma", "Verma", "Iyer", "Reddy", "Patel", "Nair", "Gupta", "Menon", "Rao", "Joshi",
    "Bhatia", "Yadav", "Thakur", "Singh", "Kishan",
];

pub const SYNTHETIC_DOMAIN: &str = "@student.edu";

/// Detail on success, reason on failure
type CheckResult = std::result::Result<String, String>;

#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub name: &'static str,
    pub passed: bool,
    pub detail: String,
}

#[derive(Debug, Clone)]
pub struct TimingLine {
    pub label: String,
    pub elapsed: Duration,
}

impl fmt::Display for TimingLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_elapsed(&self.label, self.elapsed))
    }
}

#[derive(Debug, Default)]
pub struct SelfTestReport {
    pub checks: Vec<CheckOutcome>,
    pub timings: Vec<TimingLine>,
}

impl SelfTestReport {
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    pub fn failures(&self) -> usize {
        self.checks.iter().filter(|c| !c.passed).count()
    }

    fn record(&mut self, name: &'static str, result: CheckResult) {
        let (passed, detail) = match result {
            Ok(detail) => (true, detail),
            Err(reason) => (false, reason),
        };
        debug!("check {name}: passed={passed} {detail}");
        self.checks.push(CheckOutcome {
            name,
            passed,
            detail,
        });
    }
}

impl fmt::Display for SelfTestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for check in &self.checks {
            let tag = if check.passed { "PASS" } else { "FAIL" };
            writeln!(f, "[{tag}] {}: {}", check.name, check.detail)?;
        }
        for timing in &self.timings {
            writeln!(f, "{timing}")?;
        }
        write!(
            f,
            "{} check(s), {} failed",
            self.checks.len(),
            self.failures()
        )
    }
}

/// Generate `n` students with unique e-mail keys spread over `course_ids`
pub fn synthetic_students<G: Rng + ?Sized>(
    n: usize,
    course_ids: &[&str],
    rng: &mut G,
) -> Vec<Student> {
    (0..n)
        .map(|i| {
            let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Test");
            let last = LAST_NAMES.choose(rng).copied().unwrap_or("Student");
            let course = course_ids.choose(rng).copied().unwrap_or("");
            let email = format!(
                "{}.{}.{i}{SYNTHETIC_DOMAIN}",
                first.to_lowercase(),
                last.to_lowercase()
            );
            let marks = rng.random_range(40..=100u32);
            Student::new(email, first, last, course, f64::from(marks))
        })
        .collect()
}

/// Run every check in a fresh temporary directory
pub fn run(settings: &SelfTestSettings, cipher_key: &str) -> Result<SelfTestReport> {
    let workspace = tempfile::tempdir()?;
    let root = workspace.path();
    let mut report = SelfTestReport::default();

    report.record("cipher round trip", check_cipher(cipher_key));
    report.record("grade thresholds", check_grades());
    report.record("mean and median", check_stats());
    report.record("student CRUD", check_student_crud(&root.join("crud")));
    report.record(
        "course and professor CRUD",
        check_course_professor_crud(&root.join("catalog")),
    );
    report.record("login", check_login(&root.join("login"), cipher_key));
    report.record("csv round trip", check_csv_round_trip(&root.join("round_trip")));
    report.record(
        "malformed file recovery",
        check_malformed_recovery(&root.join("malformed")),
    );

    let seed = settings.rng_seed.unwrap_or_else(rand::random::<u64>);
    let bulk = check_bulk(&root.join("bulk"), settings.synthetic_students, seed);
    match bulk {
        Ok((detail, timings)) => {
            report.timings = timings;
            report.record("bulk insert, search and sort", Ok(detail));
        }
        Err(reason) => report.record("bulk insert, search and sort", Err(reason)),
    }

    info!(
        "self-test finished: {} check(s), {} failed",
        report.checks.len(),
        report.failures()
    );
    Ok(report)
}

fn ensure(condition: bool, reason: impl Into<String>) -> std::result::Result<(), String> {
    if condition {
        Ok(())
    } else {
        Err(reason.into())
    }
}

fn fail(e: CoreError) -> String {
    e.to_string()
}

fn quiet_book(dir: &Path) -> std::result::Result<GradeBook, String> {
    GradeBook::open_dir(dir).map_err(fail)
}

fn check_cipher(key: &str) -> CheckResult {
    let cipher = SimpleCipher::new(key).map_err(|e| e.to_string())?;
    let samples = [
        "",
        "Welcome12#_",
        "p@ss, with a comma",
        "naïve ünïcode ✓",
        "a much longer passphrase that wraps the key several times over",
    ];
    for sample in samples {
        let encrypted = cipher.encrypt(sample);
        let decrypted = cipher.decrypt(&encrypted).map_err(|e| e.to_string())?;
        ensure(decrypted == sample, format!("{sample:?} did not survive"))?;
        ensure(
            cipher.encrypt(&decrypted) == encrypted,
            format!("{encrypted:?} did not re-encrypt identically"),
        )?;
    }
    Ok(format!("{} sample(s)", samples.len()))
}

fn check_grades() -> CheckResult {
    for (mark, expected) in [(95.0, "A"), (88.0, "B+"), (84.0, "B"), (91.0, "A-")] {
        let got = letter_grade(mark);
        ensure(got == expected, format!("{mark} graded {got}, expected {expected}"))?;
    }
    Ok("95=A 91=A- 88=B+ 84=B".to_string())
}

fn check_stats() -> CheckResult {
    ensure(mean(&[95.0, 97.0]) == Some(96.0), "mean of [95, 97]")?;
    ensure(median(&[95.0, 97.0]) == Some(96.0), "median of [95, 97]")?;
    let odd = [88.0, 84.0, 91.0];
    let m = mean(&odd).unwrap_or(f64::NAN);
    ensure((m - 87.6667).abs() < 1e-3, format!("mean of {odd:?} was {m}"))?;
    ensure(median(&odd) == Some(88.0), "median of [88, 84, 91]")?;
    ensure(mean(&[]).is_none() && median(&[]).is_none(), "empty set")?;
    Ok("[95,97] -> 96/96, [88,84,91] -> 87.67/88".to_string())
}

fn check_student_crud(dir: &Path) -> CheckResult {
    let mut book = quiet_book(dir)?;
    book.add_course(Course::new("DATA200", "Data Science", "", Some(3)))
        .map_err(fail)?;
    let sam = Student::new("sam@mycsu.edu", "Sam", "Carpenter", "DATA200", 96.0);

    book.add_student(sam.clone()).map_err(fail)?;
    ensure(
        matches!(book.add_student(sam), Err(CoreError::DuplicateKey { .. })),
        "duplicate add was accepted",
    )?;
    book.update_student("sam@mycsu.edu", |s| s.marks = 97.0)
        .map_err(fail)?;
    ensure(
        book.find_student("sam@mycsu.edu").map(|s| s.marks) == Some(97.0),
        "update did not stick",
    )?;
    ensure(
        matches!(
            book.update_student("ghost@mycsu.edu", |s| s.marks = 1.0),
            Err(CoreError::NotFound { .. })
        ),
        "update of absent key succeeded",
    )?;
    book.delete_student("sam@mycsu.edu").map_err(fail)?;
    ensure(
        book.find_student("sam@mycsu.edu").is_none(),
        "deleted student still found",
    )?;
    ensure(
        book.delete_student("sam@mycsu.edu").is_err(),
        "second delete succeeded",
    )?;
    Ok("add/duplicate/update/delete/find".to_string())
}

fn check_course_professor_crud(dir: &Path) -> CheckResult {
    let mut book = quiet_book(dir)?;
    book.add_course(Course::new("CS101", "Intro CS", "Basics", Some(4)))
        .map_err(fail)?;
    book.update_course("CS101", |c| c.description = "Basics of CS".into())
        .map_err(fail)?;
    ensure(
        book.find_course("CS101").map(|c| c.description.as_str()) == Some("Basics of CS"),
        "course update did not stick",
    )?;

    book.add_professor(Professor::new(
        "ada@mycsu.edu",
        "Ada Lovelace",
        "Professor",
        "CS101",
    ))
    .map_err(fail)?;
    book.update_professor("ada@mycsu.edu", |p| p.rank = "Associate Professor".into())
        .map_err(fail)?;
    book.delete_professor("ada@mycsu.edu").map_err(fail)?;
    book.delete_course("CS101").map_err(fail)?;
    ensure(
        book.courses().is_empty() && book.professors().is_empty(),
        "records left behind after delete",
    )?;
    Ok("course + professor add/update/delete".to_string())
}

fn check_login(dir: &Path, key: &str) -> CheckResult {
    let mut config = Config::with_data_dir(dir);
    config.cipher.key = key.to_string();
    let mut book = GradeBook::open(&config).map_err(fail)?;

    let user = "michael@mycsu.edu";
    let first = LoginPassword::new("Welcome12#_".to_string());
    let wrong = LoginPassword::new("wrong".to_string());
    let second = LoginPassword::new("NewP@ss1".to_string());

    book.register_user(user, &first, Role::Professor)
        .map_err(fail)?;
    ensure(book.login(user, &first), "correct password rejected")?;
    ensure(!book.login(user, &wrong), "wrong password accepted")?;
    ensure(!book.login("nobody@mycsu.edu", &first), "unknown user accepted")?;
    book.change_password(user, &second).map_err(fail)?;
    ensure(book.login(user, &second), "new password rejected")?;
    ensure(!book.login(user, &first), "old password still accepted")?;
    Ok("register/verify/change".to_string())
}

fn check_csv_round_trip(dir: &Path) -> CheckResult {
    let mut book = quiet_book(dir)?;
    seed_sample_data(&mut book, true).map_err(fail)?;
    book.add_student(Student::new(
        "quoted@mycsu.edu",
        "Anne, Jr.",
        "O\"Brien",
        "CS101",
        72.5,
    ))
    .map_err(fail)?;

    let reopened = quiet_book(dir)?;
    ensure(
        reopened.students().list() == book.students().list(),
        "students differ after reopen",
    )?;
    ensure(
        reopened.courses().list() == book.courses().list(),
        "courses differ after reopen",
    )?;
    ensure(
        reopened.professors().list() == book.professors().list(),
        "professors differ after reopen",
    )?;
    ensure(
        reopened.logins().list() == book.logins().list(),
        "logins differ after reopen",
    )?;
    Ok(format!(
        "{} student(s) incl. one with a comma and a quote",
        reopened.students().len()
    ))
}

fn check_malformed_recovery(dir: &Path) -> CheckResult {
    std::fs::create_dir_all(dir).map_err(|e| e.to_string())?;
    let path = dir.join(STUDENTS_FILE);
    std::fs::write(
        &path,
        "this is not a header\n\
         smriti.mandhana@mycsu.edu,Smriti,Mandhana,DATA200,A,95\n\
         too,few,columns\n",
    )
    .map_err(|e| e.to_string())?;

    let book = quiet_book(dir)?;
    ensure(
        book.students().len() == 1,
        format!("recovered {} row(s), expected 1", book.students().len()),
    )?;

    let content = std::fs::read_to_string(&path).map_err(|e| e.to_string())?;
    let header = content.lines().next().unwrap_or_default();
    ensure(
        header == STUDENT_HEADER.join(","),
        format!("header not regenerated: {header:?}"),
    )?;
    Ok("1 row recovered, header regenerated".to_string())
}

fn check_bulk(
    dir: &Path,
    n: usize,
    seed: u64,
) -> std::result::Result<(String, Vec<TimingLine>), String> {
    let mut config = Config::with_data_dir(dir);
    config.features.autosave = false;
    let mut book = GradeBook::open(&config).map_err(fail)?;
    for course in sample_courses() {
        book.add_course(course).map_err(fail)?;
    }
    let course_ids: Vec<String> = book
        .courses()
        .iter()
        .map(|c| c.course_id.clone())
        .collect();
    let course_ids: Vec<&str> = course_ids.iter().map(String::as_str).collect();

    let mut rng = StdRng::seed_from_u64(seed);
    let students = synthetic_students(n, &course_ids, &mut rng);
    let known_key = students.get(n / 2).map(|s| s.email_address.clone());
    let mut timings = Vec::new();

    let inserted = time(|| book.add_students(students));
    let added = inserted.value.map_err(fail)?;
    ensure(added == n, format!("inserted {added} of {n}"))?;
    timings.push(TimingLine {
        label: format!("Inserted {n} students"),
        elapsed: inserted.elapsed,
    });

    if let Some(key) = &known_key {
        let search = time(|| book.find_student(key).is_some());
        ensure(search.value, format!("known key {key} not found"))?;
        timings.push(TimingLine {
            label: "Linear search for a known key".to_string(),
            elapsed: search.elapsed,
        });
    }

    let domain = book.search_students(|s| s.email_address.ends_with(SYNTHETIC_DOMAIN));
    ensure(
        domain.value.len() == n,
        format!("domain search matched {} of {n}", domain.value.len()),
    )?;
    timings.push(TimingLine {
        label: format!("Search matched {} students", domain.value.len()),
        elapsed: domain.elapsed,
    });

    let sort_elapsed = book
        .sort_students(StudentSortKey::Marks, true)
        .map_err(fail)?;
    ensure(
        book.students()
            .list()
            .windows(2)
            .all(|w| w[0].marks >= w[1].marks),
        "students not sorted by marks (descending)",
    )?;
    timings.push(TimingLine {
        label: "Sort by marks".to_string(),
        elapsed: sort_elapsed,
    });

    book.save_all().map_err(fail)?;
    let reopened = quiet_book(dir)?;
    ensure(
        reopened.students().len() == n,
        format!("reopened {} of {n}", reopened.students().len()),
    )?;

    Ok((format!("{n} synthetic student(s), seed {seed}"), timings))
}
