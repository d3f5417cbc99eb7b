// tests/core/stats.rs
use checkmygrade::stats::{display_value, mean, median, CourseStats};

#[test]
fn test_even_count_mean_and_median() {
    assert_eq!(mean(&[95.0, 97.0]), Some(96.0));
    assert_eq!(median(&[95.0, 97.0]), Some(96.0));
}

#[test]
fn test_odd_count_mean_and_median() {
    let marks = [88.0, 84.0, 91.0];
    let m = mean(&marks).unwrap();
    assert!((m - 87.666_666).abs() < 1e-5, "mean was {m}");
    assert_eq!(median(&marks), Some(88.0));
}

#[test]
fn test_median_sorts_before_picking() {
    assert_eq!(median(&[10.0, 1.0, 7.0, 3.0]), Some(5.0));
}

#[test]
fn test_empty_set_is_not_available() {
    let stats = CourseStats::from_marks(&[]);
    assert_eq!(stats.count, 0);
    assert_eq!(stats.mean, None);
    assert_eq!(stats.median, None);
    assert_eq!(
        stats.to_string(),
        "average N/A, median N/A (0 student(s))"
    );
}

#[test]
fn test_display_rounds_to_two_decimals() {
    assert_eq!(display_value(Some(87.666_666)), "87.67");
    let stats = CourseStats::from_marks(&[95.0, 97.0]);
    assert_eq!(
        stats.to_string(),
        "average 96.00, median 96.00 (2 student(s))"
    );
}
