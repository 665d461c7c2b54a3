use serde_json::json;

use crate::cpf;
use crate::directory;
use crate::ipc::error::{ok, store_err};
use crate::ipc::handlers::{db_conn, required_i64, required_str};
use crate::ipc::types::{AppState, Request};

fn handle_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let conn = match db_conn(state, req) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    match directory::list(conn) {
        Ok(students) => ok(&req.id, json!({ "students": students })),
        Err(e) => store_err(&req.id, &e),
    }
}

fn handle_register(state: &mut AppState, req: &Request) -> serde_json::Value {
    let conn = match db_conn(state, req) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    let name = match required_str(req, "name") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let cpf_value = match required_str(req, "cpf") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let address = match required_str(req, "address") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match directory::register(conn, &name, &cpf_value, &address) {
        Ok(student) => {
            // Advisory only: front-ends warn on a failed check digit, but a
            // registration is never rejected for it.
            let cpf_valid = cpf::is_valid(&student.cpf);
            ok(&req.id, json!({ "student": student, "cpfValid": cpf_valid }))
        }
        Err(e) => store_err(&req.id, &e),
    }
}

fn handle_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    let conn = match db_conn(state, req) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    let student_id = match required_i64(req, "studentId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match directory::find_by_id(conn, student_id) {
        Ok(student) => ok(&req.id, json!({ "student": student })),
        Err(e) => store_err(&req.id, &e),
    }
}

fn handle_remove(state: &mut AppState, req: &Request) -> serde_json::Value {
    let conn = match db_conn(state, req) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    let student_id = match required_i64(req, "studentId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match directory::remove(conn, student_id) {
        Ok(report) => ok(
            &req.id,
            json!({
                "gradesRemoved": report.grades_removed,
                "studentsRemoved": report.students_removed
            }),
        ),
        Err(e) => store_err(&req.id, &e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "students.list" => Some(handle_list(state, req)),
        "students.register" => Some(handle_register(state, req)),
        "students.get" => Some(handle_get(state, req)),
        "students.remove" => Some(handle_remove(state, req)),
        _ => None,
    }
}
