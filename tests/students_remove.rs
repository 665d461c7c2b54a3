mod test_support;

use escolad::directory;
use escolad::error::StoreError;
use escolad::ledger;
use escolad::subjects::Subject;
use test_support::open_conn;

const STAFF_ID: i64 = 1;

#[test]
fn remove_deletes_student_and_all_grades_atomically() {
    let conn = open_conn("escolad-remove");
    let ana = directory::register(&conn, "Ana", "11111111111", "Rua A").expect("register");
    let bruno = directory::register(&conn, "Bruno", "22222222222", "Rua B").expect("register");

    ledger::assign(&conn, ana.id, Subject::Matematica, 8.0, STAFF_ID).expect("assign");
    ledger::assign(&conn, ana.id, Subject::Historia, 6.5, STAFF_ID).expect("assign");
    ledger::assign(&conn, ana.id, Subject::Artes, 9.0, STAFF_ID).expect("assign");
    ledger::assign(&conn, bruno.id, Subject::Matematica, 5.0, STAFF_ID).expect("assign");

    let report = directory::remove(&conn, ana.id).expect("remove");
    assert_eq!(report.grades_removed, 3);
    assert_eq!(report.students_removed, 1);

    assert!(directory::find_by_id(&conn, ana.id).expect("find").is_none());
    assert!(ledger::grades_for(&conn, ana.id).expect("grades").is_empty());

    // Unrelated rows are untouched.
    assert_eq!(ledger::grades_for(&conn, bruno.id).expect("grades").len(), 1);
    assert_eq!(directory::list(&conn).expect("list").len(), 1);
}

#[test]
fn remove_without_grades_reports_zero() {
    let conn = open_conn("escolad-remove-zero");
    let ana = directory::register(&conn, "Ana", "11111111111", "Rua A").expect("register");

    let report = directory::remove(&conn, ana.id).expect("remove");
    assert_eq!(report.grades_removed, 0);
    assert_eq!(report.students_removed, 1);
}

#[test]
fn remove_missing_student_fails_and_mutates_nothing() {
    let conn = open_conn("escolad-remove-missing");
    let ana = directory::register(&conn, "Ana", "11111111111", "Rua A").expect("register");
    ledger::assign(&conn, ana.id, Subject::Ciencias, 7.0, STAFF_ID).expect("assign");

    let err = directory::remove(&conn, 99).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)), "got {:?}", err);

    assert_eq!(directory::list(&conn).expect("list").len(), 1);
    assert_eq!(ledger::grades_for(&conn, ana.id).expect("grades").len(), 1);
}
