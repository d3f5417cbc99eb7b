// tests/common.rs
//! Shared test utilities: logging setup and data directories

use std::path::Path;

use checkmygrade::{Config, GradeBook};
use tempfile::TempDir;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize test-friendly logging
/// Call once at the start of any test that needs logs
#[allow(dead_code)]
pub fn setup() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_test_writer()) // works in `cargo test`
        .with(EnvFilter::from_default_env()) // respects RUST_LOG=
        .try_init()
        .ok(); // idempotent, safe to call multiple times
}

/// Fresh temporary data directory plus a grade book opened in it
#[allow(dead_code)]
pub fn fresh_book() -> (TempDir, GradeBook) {
    setup();
    let dir = tempfile::tempdir().expect("create temp dir");
    let book = GradeBook::open_dir(dir.path()).expect("open grade book");
    (dir, book)
}

/// Open a grade book in `dir` with a tweaked config
#[allow(dead_code)]
pub fn book_with(dir: &Path, tweak: impl FnOnce(&mut Config)) -> GradeBook {
    let mut config = Config::with_data_dir(dir);
    tweak(&mut config);
    GradeBook::open(&config).expect("open grade book")
}
