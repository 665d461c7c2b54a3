use rusqlite::{Connection, OptionalExtension};
use serde::Serialize;

use crate::error::{StoreError, StoreResult};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub cpf: String,
    pub address: String,
    pub enrollment: Option<String>,
}

/// Counts reported after a removal; grades are always deleted in the same
/// transaction as the student row.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovalReport {
    pub grades_removed: usize,
    pub students_removed: usize,
}

const STUDENT_COLUMNS: &str = "id, nome, cpf, endereco, matricula";

fn student_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Student> {
    Ok(Student {
        id: row.get(0)?,
        name: row.get(1)?,
        cpf: row.get(2)?,
        address: row.get(3)?,
        enrollment: row.get(4)?,
    })
}

/// Registers a student and derives the enrollment code from the assigned
/// surrogate id (MAT + zero-padded sequence). The insert and the enrollment
/// backfill commit together.
pub fn register(conn: &Connection, name: &str, cpf: &str, address: &str) -> StoreResult<Student> {
    let name = name.trim();
    let cpf = cpf.trim();
    let address = address.trim();
    if name.is_empty() {
        return Err(StoreError::invalid("name must not be empty"));
    }
    if cpf.is_empty() {
        return Err(StoreError::invalid("cpf must not be empty"));
    }
    if address.is_empty() {
        return Err(StoreError::invalid("address must not be empty"));
    }

    let tx = conn.unchecked_transaction()?;
    tx.execute(
        "INSERT INTO alunos (nome, cpf, endereco) VALUES (?, ?, ?)",
        (name, cpf, address),
    )
    .map_err(|e| StoreError::from_write(e, "cpf"))?;

    let id = tx.last_insert_rowid();
    let enrollment = format!("MAT{:04}", id);
    tx.execute(
        "UPDATE alunos SET matricula = ? WHERE id = ?",
        (&enrollment, id),
    )?;
    tx.commit()?;

    tracing::info!(id, enrollment = %enrollment, "registered student");
    Ok(Student {
        id,
        name: name.to_string(),
        cpf: cpf.to_string(),
        address: address.to_string(),
        enrollment: Some(enrollment),
    })
}

/// Full directory scan, ascending by name.
pub fn list(conn: &Connection) -> StoreResult<Vec<Student>> {
    let sql = format!("SELECT {} FROM alunos ORDER BY nome", STUDENT_COLUMNS);
    let mut stmt = conn.prepare(&sql)?;
    let students = stmt
        .query_map([], student_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(students)
}

pub fn find_by_id(conn: &Connection, id: i64) -> StoreResult<Option<Student>> {
    let sql = format!("SELECT {} FROM alunos WHERE id = ?", STUDENT_COLUMNS);
    let student = conn
        .query_row(&sql, [id], student_from_row)
        .optional()?;
    Ok(student)
}

/// Removes a student and every grade referencing it as one atomic unit.
/// A missing id fails before anything is touched.
pub fn remove(conn: &Connection, id: i64) -> StoreResult<RemovalReport> {
    let tx = conn.unchecked_transaction()?;

    let exists: Option<i64> = tx
        .query_row("SELECT id FROM alunos WHERE id = ?", [id], |r| r.get(0))
        .optional()?;
    if exists.is_none() {
        return Err(StoreError::not_found(format!("student {} not found", id)));
    }

    let grades_removed = tx.execute("DELETE FROM notas WHERE aluno_id = ?", [id])?;
    let students_removed = tx.execute("DELETE FROM alunos WHERE id = ?", [id])?;
    tx.commit()?;

    tracing::info!(id, grades_removed, "removed student");
    Ok(RemovalReport {
        grades_removed,
        students_removed,
    })
}
