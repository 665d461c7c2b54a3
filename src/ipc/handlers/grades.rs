use serde_json::json;

use crate::ipc::error::{err, ok, store_err};
use crate::ipc::handlers::{db_conn, required_f64, required_i64};
use crate::ipc::types::{AppState, Request};
use crate::ledger;
use crate::subjects::{self, Subject};

/// Accepts the subject either as its display name ("Matemática") or as the
/// 1-based menu number the text front-end shows.
fn parse_subject(req: &Request) -> Result<Subject, serde_json::Value> {
    if let Some(name) = req.params.get("subject").and_then(|v| v.as_str()) {
        return Subject::parse(name).ok_or_else(|| {
            err(
                &req.id,
                "invalid_input",
                format!("unknown subject: {}", name),
                None,
            )
        });
    }
    if let Some(n) = req.params.get("subjectNumber").and_then(|v| v.as_i64()) {
        return Subject::from_number(n).ok_or_else(|| {
            err(
                &req.id,
                "invalid_input",
                format!("subject number must be 1..={}, got {}", subjects::ALL.len(), n),
                None,
            )
        });
    }
    Err(err(&req.id, "bad_params", "missing subject", None))
}

fn handle_assign(state: &mut AppState, req: &Request) -> serde_json::Value {
    let conn = match db_conn(state, req) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    let student_id = match required_i64(req, "studentId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let subject = match parse_subject(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let score = match required_f64(req, "score") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let staff_id = match required_i64(req, "staffId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match ledger::assign(conn, student_id, subject, score, staff_id) {
        Ok(outcome) => ok(
            &req.id,
            json!({ "outcome": outcome, "subject": subject.as_str() }),
        ),
        Err(e) => store_err(&req.id, &e),
    }
}

fn handle_for_student(state: &mut AppState, req: &Request) -> serde_json::Value {
    let conn = match db_conn(state, req) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    let student_id = match required_i64(req, "studentId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match ledger::grades_for(conn, student_id) {
        Ok(grades) => ok(&req.id, json!({ "grades": grades })),
        Err(e) => store_err(&req.id, &e),
    }
}

fn handle_subjects_list(_state: &mut AppState, req: &Request) -> serde_json::Value {
    let subjects: Vec<serde_json::Value> = subjects::ALL
        .iter()
        .enumerate()
        .map(|(i, s)| {
            json!({
                "number": i + 1,
                "name": s.as_str(),
                "key": s.key()
            })
        })
        .collect();
    ok(&req.id, json!({ "subjects": subjects }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "grades.assign" => Some(handle_assign(state, req)),
        "grades.forStudent" => Some(handle_for_student(state, req)),
        "subjects.list" => Some(handle_subjects_list(state, req)),
        _ => None,
    }
}
