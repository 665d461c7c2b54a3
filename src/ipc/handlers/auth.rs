use serde_json::json;

use crate::auth;
use crate::ipc::error::{ok, store_err};
use crate::ipc::handlers::{db_conn, required_str};
use crate::ipc::types::{AppState, Request};

fn handle_login(state: &mut AppState, req: &Request) -> serde_json::Value {
    let conn = match db_conn(state, req) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    let cpf = match required_str(req, "cpf") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let password = match required_str(req, "password") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match auth::authenticate(conn, cpf.trim(), &password) {
        // A failed match is a normal outcome, not an error response.
        Ok(Some(identity)) => ok(
            &req.id,
            json!({ "authenticated": true, "staff": identity }),
        ),
        Ok(None) => ok(&req.id, json!({ "authenticated": false, "staff": null })),
        Err(e) => store_err(&req.id, &e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "auth.login" => Some(handle_login(state, req)),
        _ => None,
    }
}
