#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use rusqlite::Connection;
use serde_json::json;

use escolad::ipc::{self, AppState, Request};

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Fresh workspace directory under the system temp dir. Unique per call so
/// tests never share a store file.
pub fn temp_dir(prefix: &str) -> PathBuf {
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    let dir = std::env::temp_dir().join(format!(
        "{}-{}-{}",
        prefix,
        std::process::id(),
        n
    ));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

/// Opens a schema-ready connection in a fresh workspace.
pub fn open_conn(prefix: &str) -> Connection {
    escolad::db::open_db(&temp_dir(prefix)).expect("open db")
}

/// App state with a selected workspace, for driving the IPC layer directly.
pub fn open_state(prefix: &str) -> AppState {
    let workspace = temp_dir(prefix);
    let conn = escolad::db::open_db(&workspace).expect("open db");
    AppState {
        workspace: Some(workspace),
        db: Some(conn),
    }
}

pub fn request(
    state: &mut AppState,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    ipc::handle_request(
        state,
        Request {
            id: id.to_string(),
            method: method.to_string(),
            params,
        },
    )
}

/// Sends a request and unwraps the `result` payload, panicking on an error
/// response.
pub fn request_ok(
    state: &mut AppState,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let resp = request(state, id, method, params);
    assert_eq!(
        resp.get("ok"),
        Some(&json!(true)),
        "expected ok response, got: {}",
        resp
    );
    resp.get("result").cloned().unwrap_or(json!(null))
}

/// Sends a request expected to fail and returns its error code.
pub fn request_err_code(
    state: &mut AppState,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> String {
    let resp = request(state, id, method, params);
    assert_eq!(
        resp.get("ok"),
        Some(&json!(false)),
        "expected error response, got: {}",
        resp
    );
    resp.get("error")
        .and_then(|e| e.get("code"))
        .and_then(|c| c.as_str())
        .expect("error code")
        .to_string()
}
