use rusqlite::{Connection, OptionalExtension};
use serde::Serialize;

use crate::error::StoreResult;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffIdentity {
    pub id: i64,
    pub name: String,
}

/// Exact plaintext credential match, as the legacy system stores it.
/// Known anti-pattern; kept as-is because stores in the field carry these
/// rows and nothing hashes them on the way in.
pub fn authenticate(conn: &Connection, cpf: &str, password: &str) -> StoreResult<Option<StaffIdentity>> {
    let identity = conn
        .query_row(
            "SELECT id, nome FROM funcionario WHERE cpf = ? AND senha = ?",
            (cpf, password),
            |row| {
                Ok(StaffIdentity {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            },
        )
        .optional()?;
    Ok(identity)
}
