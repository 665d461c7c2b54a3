use rusqlite::Connection;
use serde::Serialize;

use crate::error::StoreResult;
use crate::subjects;

/// Aggregate rollups over the whole ledger. Average/min/max over zero
/// grades report as `None`, never as zero.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub student_count: i64,
    pub grade_count: i64,
    pub average: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub per_subject: Vec<SubjectSummary>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectSummary {
    pub subject: String,
    pub key: String,
    pub count: i64,
    pub average: Option<f64>,
}

pub fn summary(conn: &Connection) -> StoreResult<Summary> {
    let student_count: i64 = conn.query_row("SELECT COUNT(*) FROM alunos", [], |r| r.get(0))?;
    let (grade_count, average, min, max) = conn.query_row(
        "SELECT COUNT(nota), AVG(nota), MIN(nota), MAX(nota) FROM notas",
        [],
        |r| {
            Ok((
                r.get::<_, i64>(0)?,
                r.get::<_, Option<f64>>(1)?,
                r.get::<_, Option<f64>>(2)?,
                r.get::<_, Option<f64>>(3)?,
            ))
        },
    )?;

    // Every fixed subject appears in the rollup, with count 0 and no
    // average where nothing has been recorded.
    let mut per_subject: Vec<SubjectSummary> = subjects::ALL
        .iter()
        .map(|s| SubjectSummary {
            subject: s.as_str().to_string(),
            key: s.key().to_string(),
            count: 0,
            average: None,
        })
        .collect();

    let mut stmt =
        conn.prepare("SELECT disciplina, COUNT(nota), AVG(nota) FROM notas GROUP BY disciplina")?;
    let groups = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, i64>(1)?,
            row.get::<_, Option<f64>>(2)?,
        ))
    })?;
    for group in groups {
        let (name, count, average) = group?;
        if let Some(slot) = per_subject.iter_mut().find(|s| s.subject == name) {
            slot.count = count;
            slot.average = average;
        }
    }

    Ok(Summary {
        student_count,
        grade_count,
        average,
        min,
        max,
        per_subject,
    })
}
