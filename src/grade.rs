//! Letter grades
//!
//! One ordered table of `(threshold, label)` pairs, evaluated top-down:
//! the first threshold the mark reaches wins.

pub const GRADE_TABLE: &[(f64, &str)] = &[
    (93.0, "A"),
    (90.0, "A-"),
    (87.0, "B+"),
    (83.0, "B"),
    (80.0, "B-"),
    (77.0, "C+"),
    (73.0, "C"),
    (70.0, "C-"),
    (67.0, "D+"),
    (60.0, "D"),
];

pub const FAILING_GRADE: &str = "F";

/// Letter grade for a numeric mark. NaN falls through to `F`.
pub fn letter_grade(mark: f64) -> &'static str {
    GRADE_TABLE
        .iter()
        .find(|(threshold, _)| mark >= *threshold)
        .map(|(_, label)| *label)
        .unwrap_or(FAILING_GRADE)
}
