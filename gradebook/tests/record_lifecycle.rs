//! Library-level lifecycle tests: a record store over file storage reopened
//! between steps, the way a UI collaborator would use it across sessions.

use gradebook::core::aggregate::{cumulative_gpa, semester_table, term_gpa};
use gradebook::record::{CoursePatch, NewCourse};
use gradebook::store::{LoadSource, RecordStore};
use gradebook::test_support::TestDataDir;

fn course(code: &str, credits: u32, grade: &str, kind: &str) -> NewCourse {
    NewCourse {
        code: code.to_string(),
        name: format!("{code} course"),
        credits,
        grade: grade.to_string(),
        kind: Some(kind.to_string()),
    }
}

/// Seeds, adds across two semesters, reopens, edits, and checks figures.
#[test]
fn record_survives_reopen_and_recomputes() {
    let dir = TestDataDir::new().expect("tempdir");

    let init = RecordStore::initialize(dir.storage());
    assert_eq!(init.source, LoadSource::Seeded);
    let mut store = init.store;
    let first = store
        .add_course("1-1", course("CS F111", 4, "A", "CDC"))
        .course_id
        .expect("id");
    let _ = store.add_course("1-1", course("MATH F111", 3, "B", "CDC"));
    let _ = store.add_course("1-2", course("GD F100", 4, "A", "GD"));
    let _ = store.add_course("1-2", course("HSS F222", 3, "B", "HuEL"));

    let reopened = RecordStore::initialize(dir.storage());
    assert_eq!(reopened.source, LoadSource::Restored);
    let mut store = reopened.store;
    let doc = store.document();
    assert!((term_gpa(&doc.semesters[0]) - 64.0 / 7.0).abs() < 1e-9);
    assert!((term_gpa(&doc.semesters[1]) - 24.0 / 7.0).abs() < 1e-9);
    assert!((cumulative_gpa(doc) - 88.0 / 10.0).abs() < 1e-9);

    let patch = CoursePatch {
        grade: Some("C".to_string()),
        ..CoursePatch::default()
    };
    let mutation = store.update_course("1-1", &first, &patch);
    assert!(mutation.applied);
    assert!(mutation.warning.is_none());

    let rows = semester_table(store.document());
    assert!((rows[0].sgpa - 48.0 / 7.0).abs() < 1e-9);
    assert!((rows[1].cgpa_to_date - 112.0 / 14.0).abs() < 1e-9);
    assert!((cumulative_gpa(store.document()) - 72.0 / 10.0).abs() < 1e-9);
    assert_eq!(rows.len(), 10);
    assert!((rows[9].cgpa_to_date - rows[1].cgpa_to_date).abs() < 1e-9);
}

/// New ids never collide with ids minted in an earlier session.
#[test]
fn ids_stay_unique_across_sessions() {
    let dir = TestDataDir::new().expect("tempdir");
    let mut store = RecordStore::initialize(dir.storage()).store;
    let a = store.add_course("1-1", course("A", 1, "A", "CDC")).course_id;
    let b = store.add_course("1-1", course("B", 1, "A", "CDC")).course_id;
    let _ = store.delete_course("1-1", b.as_deref().expect("id"));

    let mut store = RecordStore::initialize(dir.storage()).store;
    let c = store.add_course("1-1", course("C", 1, "A", "CDC")).course_id;
    assert_ne!(a, c);
    let ids: Vec<&str> = store.document().semesters[0]
        .courses
        .iter()
        .map(|course| course.id.as_str())
        .collect();
    assert_eq!(ids.len(), 2);
    assert_ne!(ids[0], ids[1]);
}
