// tests/core/grade.rs
use checkmygrade::grade::{letter_grade, GRADE_TABLE};
use checkmygrade::Student;

#[test]
fn test_reference_marks() {
    assert_eq!(letter_grade(95.0), "A");
    assert_eq!(letter_grade(88.0), "B+");
    assert_eq!(letter_grade(84.0), "B");
    assert_eq!(letter_grade(91.0), "A-");
}

#[test]
fn test_every_threshold_maps_to_its_own_label() {
    for (threshold, label) in GRADE_TABLE {
        assert_eq!(letter_grade(*threshold), *label);
    }
}

#[test]
fn test_extremes() {
    assert_eq!(letter_grade(100.0), "A");
    assert_eq!(letter_grade(0.0), "F");
    assert_eq!(letter_grade(40.0), "F");
}

#[test]
fn test_student_grade_is_derived_from_marks() {
    let mut s = Student::new("a@b.edu", "A", "B", "CS101", 84.0);
    assert_eq!(s.grade(), "B");
    s.marks = 97.0;
    assert_eq!(s.grade(), "A");
}
