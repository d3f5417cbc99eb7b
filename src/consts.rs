// src/consts.rs
//! Shared constants: file names, headers and defaults

/// File names inside the data directory
pub const STUDENTS_FILE: &str = "students.csv";
pub const COURSES_FILE: &str = "courses.csv";
pub const PROFESSORS_FILE: &str = "professors.csv";
pub const LOGIN_FILE: &str = "login.csv";

/// Canonical column headers, one per file
pub const STUDENT_HEADER: &[&str] = &[
    "email_address",
    "first_name",
    "last_name",
    "course_id",
    "grade",
    "marks",
];
pub const COURSE_HEADER: &[&str] = &["course_id", "course_name", "description", "credits"];
pub const PROFESSOR_HEADER: &[&str] = &["professor_id", "name", "rank", "course_id"];
pub const LOGIN_HEADER: &[&str] = &["user_id", "password", "role"];

/// Fixed XOR key for the login cipher (illustrative only)
pub const DEFAULT_CIPHER_KEY: &str = "CheckMyGradeKey";

/// Password given to every seeded professor login
pub const DEFAULT_SEED_PASSWORD: &str = "Welcome12#_";

/// Size of the synthetic student set used by the self-test
pub const DEFAULT_SYNTHETIC_STUDENTS: usize = 1000;

pub const MIN_MARKS: f64 = 0.0;
pub const MAX_MARKS: f64 = 100.0;

/// Config file looked up when `CHECKMYGRADE_CONFIG` is unset
pub const DEFAULT_CONFIG_FILE: &str = "checkmygrade.toml";
pub const CONFIG_ENV: &str = "CHECKMYGRADE_CONFIG";
pub const DATA_DIR_ENV: &str = "CHECKMYGRADE_DATA_DIR";
