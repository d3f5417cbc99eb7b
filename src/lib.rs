// src/lib.rs
//! checkmygrade: a console grade book backed by flat CSV files
//!
//! Features:
//! - Students, professors, courses and logins in insertion-ordered collections
//! - Forgiving CSV persistence (header repair, malformed-row skipping)
//! - Toy XOR + Base64 login cipher (illustrative only)
//! - Per-course mean/median and letter grades
//! - Built-in self-test with timed bulk operations

pub mod aliases;
pub mod cipher;
pub mod config;
pub mod consts;
pub mod csv_store;
pub mod enums;
pub mod error;
pub mod export;
pub mod grade;
pub mod gradebook;
pub mod models;
pub mod report;
pub mod seed;
pub mod selftest;
pub mod stats;
pub mod store;
pub mod timing;

// Re-export everything users need at the crate root
pub use aliases::LoginPassword;
pub use cipher::SimpleCipher;
pub use config::{load as load_config, Config};
pub use enums::{Role, StudentSortKey};
pub use error::{CipherError, CoreError, Result as CoreResult};
pub use export::export_to_json;
pub use grade::letter_grade;
pub use gradebook::{DataPaths, GradeBook, ProfessorReport};
pub use models::{Course, LoginUser, Professor, Student};
pub use stats::CourseStats;
pub use store::{Collection, Record};
