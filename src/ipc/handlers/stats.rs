use serde_json::json;

use crate::ipc::error::{ok, store_err};
use crate::ipc::handlers::db_conn;
use crate::ipc::types::{AppState, Request};
use crate::stats;

fn handle_summary(state: &mut AppState, req: &Request) -> serde_json::Value {
    let conn = match db_conn(state, req) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    match stats::summary(conn) {
        Ok(summary) => ok(&req.id, json!({ "summary": summary })),
        Err(e) => store_err(&req.id, &e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "stats.summary" => Some(handle_summary(state, req)),
        _ => None,
    }
}
