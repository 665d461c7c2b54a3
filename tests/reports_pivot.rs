mod test_support;

use escolad::directory;
use escolad::ledger;
use escolad::subjects::Subject;
use test_support::open_conn;

const STAFF_ID: i64 = 1;

#[test]
fn empty_filter_yields_one_row_per_student_with_null_gaps() {
    let conn = open_conn("escolad-pivot");
    let ana = directory::register(&conn, "Ana", "11111111111", "Rua A").expect("register");
    let bruno = directory::register(&conn, "Bruno", "22222222222", "Rua B").expect("register");
    directory::register(&conn, "Carla", "33333333333", "Rua C").expect("register");

    ledger::assign(&conn, ana.id, Subject::Matematica, 9.0, STAFF_ID).expect("assign");
    ledger::assign(&conn, ana.id, Subject::Artes, 7.5, STAFF_ID).expect("assign");
    ledger::assign(&conn, bruno.id, Subject::Portugues, 6.0, STAFF_ID).expect("assign");

    let rows = ledger::pivot_report(&conn, "").expect("pivot");
    assert_eq!(rows.len(), 3);

    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Ana", "Bruno", "Carla"]);

    let ana_row = &rows[0];
    assert_eq!(ana_row.scores[Subject::Matematica.index()], Some(9.0));
    assert_eq!(ana_row.scores[Subject::Artes.index()], Some(7.5));
    // An absent grade is null, never zero.
    assert_eq!(ana_row.scores[Subject::Historia.index()], None);

    let bruno_row = &rows[1];
    assert_eq!(bruno_row.scores[Subject::Portugues.index()], Some(6.0));
    assert_eq!(bruno_row.scores[Subject::Matematica.index()], None);

    let carla_row = &rows[2];
    assert!(carla_row.scores.iter().all(|s| s.is_none()));
    assert_eq!(carla_row.scores.len(), 8);
}

#[test]
fn name_filter_is_case_sensitive_substring() {
    let conn = open_conn("escolad-pivot-filter");
    directory::register(&conn, "Ana Souza", "11111111111", "Rua A").expect("register");
    directory::register(&conn, "Mariana", "22222222222", "Rua B").expect("register");
    directory::register(&conn, "Bruno", "33333333333", "Rua C").expect("register");

    let rows = ledger::pivot_report(&conn, "ana").expect("pivot");
    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Mariana"]);

    let rows = ledger::pivot_report(&conn, "Ana").expect("pivot");
    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Ana Souza"]);

    assert!(ledger::pivot_report(&conn, "Zé").expect("pivot").is_empty());
}

#[test]
fn pivot_on_empty_directory_is_empty() {
    let conn = open_conn("escolad-pivot-empty");
    assert!(ledger::pivot_report(&conn, "").expect("pivot").is_empty());
}
