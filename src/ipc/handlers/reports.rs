use serde_json::json;

use crate::ipc::error::{ok, store_err};
use crate::ipc::handlers::db_conn;
use crate::ipc::types::{AppState, Request};
use crate::ledger;
use crate::subjects;

fn handle_pivot(state: &mut AppState, req: &Request) -> serde_json::Value {
    let conn = match db_conn(state, req) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    let name_filter = req
        .params
        .get("nameFilter")
        .and_then(|v| v.as_str())
        .unwrap_or("");

    match ledger::pivot_report(conn, name_filter) {
        Ok(rows) => {
            let columns: Vec<&str> = subjects::ALL.iter().map(|s| s.key()).collect();
            let out: Vec<serde_json::Value> = rows
                .iter()
                .map(|r| {
                    let mut row = json!({
                        "studentId": r.student_id,
                        "name": r.name,
                        "enrollment": r.enrollment,
                    });
                    for (subject, score) in subjects::ALL.iter().zip(&r.scores) {
                        row[subject.key()] = json!(score);
                    }
                    row
                })
                .collect();
            ok(&req.id, json!({ "columns": columns, "rows": out }))
        }
        Err(e) => store_err(&req.id, &e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "reports.pivot" => Some(handle_pivot(state, req)),
        _ => None,
    }
}
