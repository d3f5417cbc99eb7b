// tests/core/store.rs
use checkmygrade::{Collection, CoreError, Course};

fn course(id: &str) -> Course {
    Course::new(id, format!("{id} title"), "", Some(3))
}

#[test]
fn test_add_rejects_duplicate_key() {
    let mut c = Collection::new();
    c.add(course("CS101")).unwrap();
    let err = c.add(course("CS101")).unwrap_err();
    assert!(matches!(
        err,
        CoreError::DuplicateKey { kind: "course", ref key } if key == "CS101"
    ));
    assert_eq!(c.len(), 1);
}

#[test]
fn test_delete_then_find_is_absent() {
    let mut c = Collection::new();
    c.add(course("CS101")).unwrap();
    let removed = c.delete("CS101").unwrap();
    assert_eq!(removed.course_id, "CS101");
    assert!(c.find("CS101").is_none());
    assert!(c.is_empty());
}

#[test]
fn test_update_and_delete_of_absent_key_fail() {
    let mut c: Collection<Course> = Collection::new();
    assert!(matches!(
        c.update("NOPE", |x| x.credits = None),
        Err(CoreError::NotFound { .. })
    ));
    assert!(matches!(c.delete("NOPE"), Err(CoreError::NotFound { .. })));
}

#[test]
fn test_update_changes_fields_in_place() {
    let mut c = Collection::new();
    c.add(course("A")).unwrap();
    c.add(course("B")).unwrap();
    c.update("A", |x| x.credits = Some(5)).unwrap();
    assert_eq!(c.find("A").unwrap().credits, Some(5));
    let ids: Vec<&str> = c.list().iter().map(|x| x.course_id.as_str()).collect();
    assert_eq!(ids, ["A", "B"]);
}
