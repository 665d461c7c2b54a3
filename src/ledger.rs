use std::collections::HashMap;

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};
use serde::Serialize;

use crate::error::{StoreError, StoreResult};
use crate::subjects::{self, Subject};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

/// One grade as read back for a student: the stored subject name, the
/// score, who recorded it and when.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeEntry {
    pub subject: String,
    pub score: f64,
    pub staff_name: String,
    pub assigned_at: Option<String>,
}

/// One pivot-report row: per-subject cells in curriculum column order,
/// `None` where no grade exists (never rendered as zero).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentGradeRow {
    pub student_id: i64,
    pub name: String,
    pub enrollment: Option<String>,
    pub scores: Vec<Option<f64>>,
}

/// Records a score for (student, subject), replacing any previous score for
/// the pair. The pre-read and the conditional write share one transaction;
/// the unique index on (aluno_id, disciplina) holds the invariant even
/// against a concurrent writer.
pub fn assign(
    conn: &Connection,
    student_id: i64,
    subject: Subject,
    score: f64,
    staff_id: i64,
) -> StoreResult<UpsertOutcome> {
    if !(0.0..=10.0).contains(&score) {
        return Err(StoreError::invalid(format!(
            "score must be between 0 and 10, got {}",
            score
        )));
    }

    let tx = conn.unchecked_transaction()?;

    let student: Option<i64> = tx
        .query_row("SELECT id FROM alunos WHERE id = ?", [student_id], |r| {
            r.get(0)
        })
        .optional()?;
    if student.is_none() {
        return Err(StoreError::not_found(format!(
            "student {} not found",
            student_id
        )));
    }
    let staff: Option<i64> = tx
        .query_row("SELECT id FROM funcionario WHERE id = ?", [staff_id], |r| {
            r.get(0)
        })
        .optional()?;
    if staff.is_none() {
        return Err(StoreError::not_found(format!(
            "staff {} not found",
            staff_id
        )));
    }

    let existing: Option<i64> = tx
        .query_row(
            "SELECT id FROM notas WHERE aluno_id = ? AND disciplina = ?",
            (student_id, subject.as_str()),
            |r| r.get(0),
        )
        .optional()?;

    let assigned_at = Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();
    tx.execute(
        "INSERT INTO notas (aluno_id, disciplina, nota, funcionario_id, data_atribuicao)
         VALUES (?, ?, ?, ?, ?)
         ON CONFLICT(aluno_id, disciplina) DO UPDATE SET
           nota = excluded.nota,
           funcionario_id = excluded.funcionario_id,
           data_atribuicao = excluded.data_atribuicao",
        (student_id, subject.as_str(), score, staff_id, &assigned_at),
    )?;
    tx.commit()?;

    let outcome = if existing.is_some() {
        UpsertOutcome::Updated
    } else {
        UpsertOutcome::Inserted
    };
    tracing::info!(
        student_id,
        subject = subject.as_str(),
        score,
        ?outcome,
        "assigned grade"
    );
    Ok(outcome)
}

/// Every grade of one student, ascending by subject name. A student with no
/// grades yields an empty list, not an error.
pub fn grades_for(conn: &Connection, student_id: i64) -> StoreResult<Vec<GradeEntry>> {
    let mut stmt = conn.prepare(
        "SELECT n.disciplina, n.nota, f.nome, n.data_atribuicao
         FROM notas n
         JOIN funcionario f ON f.id = n.funcionario_id
         WHERE n.aluno_id = ?
         ORDER BY n.disciplina",
    )?;
    let entries = stmt
        .query_map([student_id], |row| {
            Ok(GradeEntry {
                subject: row.get(0)?,
                score: row.get(1)?,
                staff_name: row.get(2)?,
                assigned_at: row.get(3)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(entries)
}

/// Subject-by-student report: one row per matching student, one column per
/// fixed subject. The store has no pivot primitive, so this fetches the
/// left-joined rows and folds them into a cell matrix keyed by student
/// index and curriculum column.
pub fn pivot_report(conn: &Connection, name_filter: &str) -> StoreResult<Vec<StudentGradeRow>> {
    // Substring match is case-sensitive per contract; SQLite LIKE is not,
    // so the filter is applied here rather than in SQL.
    let mut stmt = conn.prepare("SELECT id, nome, matricula FROM alunos ORDER BY nome")?;
    let mut rows: Vec<StudentGradeRow> = stmt
        .query_map([], |row| {
            Ok(StudentGradeRow {
                student_id: row.get(0)?,
                name: row.get(1)?,
                enrollment: row.get(2)?,
                scores: vec![None; subjects::ALL.len()],
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    rows.retain(|r| name_filter.is_empty() || r.name.contains(name_filter));

    if rows.is_empty() {
        return Ok(rows);
    }

    let student_index: HashMap<i64, usize> = rows
        .iter()
        .enumerate()
        .map(|(i, r)| (r.student_id, i))
        .collect();

    let mut grade_stmt = conn.prepare("SELECT aluno_id, disciplina, nota FROM notas")?;
    let grade_rows = grade_stmt.query_map([], |row| {
        let student_id: i64 = row.get(0)?;
        let subject: String = row.get(1)?;
        let score: f64 = row.get(2)?;
        Ok((student_id, subject, score))
    })?;

    for grade in grade_rows {
        let (student_id, subject, score) = grade?;
        let Some(&r_i) = student_index.get(&student_id) else {
            continue;
        };
        // Rows with a subject outside the fixed set are ignored.
        let Some(subject) = Subject::parse(&subject) else {
            continue;
        };
        rows[r_i].scores[subject.index()] = Some(score);
    }

    Ok(rows)
}
