mod test_support;

use escolad::directory;
use escolad::error::StoreError;
use test_support::open_conn;

#[test]
fn register_derives_enrollment_from_assigned_id() {
    let conn = open_conn("escolad-register-enrollment");

    let ana = directory::register(&conn, "Ana", "11111111111", "Rua A, 1").expect("register");
    assert_eq!(ana.id, 1);
    assert_eq!(ana.enrollment.as_deref(), Some("MAT0001"));

    let bruno =
        directory::register(&conn, "Bruno", "22222222222", "Rua B, 2").expect("register");
    assert_eq!(bruno.id, 2);
    assert_eq!(bruno.enrollment.as_deref(), Some("MAT0002"));

    let stored = directory::find_by_id(&conn, ana.id)
        .expect("find")
        .expect("student exists");
    assert_eq!(stored.name, "Ana");
    assert_eq!(stored.enrollment.as_deref(), Some("MAT0001"));
}

#[test]
fn register_trims_and_rejects_empty_fields() {
    let conn = open_conn("escolad-register-empty");

    for (name, cpf, address) in [
        ("", "11111111111", "Rua A"),
        ("   ", "11111111111", "Rua A"),
        ("Ana", "", "Rua A"),
        ("Ana", "11111111111", "  "),
    ] {
        let err = directory::register(&conn, name, cpf, address).unwrap_err();
        assert!(matches!(err, StoreError::InvalidInput(_)), "got {:?}", err);
    }
    assert!(directory::list(&conn).expect("list").is_empty());

    let student =
        directory::register(&conn, "  Ana  ", " 11111111111 ", " Rua A ").expect("register");
    assert_eq!(student.name, "Ana");
    assert_eq!(student.cpf, "11111111111");
    assert_eq!(student.address, "Rua A");
}

#[test]
fn duplicate_cpf_is_rejected_and_first_row_survives() {
    let conn = open_conn("escolad-register-dup");

    directory::register(&conn, "Ana", "11111111111", "Rua A").expect("register");
    let err = directory::register(&conn, "Outra Ana", "11111111111", "Rua B").unwrap_err();
    assert!(matches!(err, StoreError::DuplicateKey(_)), "got {:?}", err);

    let students = directory::list(&conn).expect("list");
    assert_eq!(students.len(), 1);
    assert_eq!(students[0].name, "Ana");
    assert_eq!(students[0].address, "Rua A");
}

#[test]
fn list_orders_by_name() {
    let conn = open_conn("escolad-register-order");

    directory::register(&conn, "Carla", "33333333333", "Rua C").expect("register");
    directory::register(&conn, "Ana", "11111111111", "Rua A").expect("register");
    directory::register(&conn, "Bruno", "22222222222", "Rua B").expect("register");

    let names: Vec<String> = directory::list(&conn)
        .expect("list")
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(names, ["Ana", "Bruno", "Carla"]);
}

#[test]
fn find_by_id_misses_cleanly() {
    let conn = open_conn("escolad-register-miss");
    assert!(directory::find_by_id(&conn, 42).expect("find").is_none());
}
