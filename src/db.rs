use rusqlite::Connection;
use std::path::Path;

/// Fixed CPF of the seeded staff record; the seed is keyed on it so a
/// partially seeded store never gains a second administrator.
const SEED_STAFF_CPF: &str = "12345678900";

pub fn open_db(workspace: &Path) -> anyhow::Result<Connection> {
    std::fs::create_dir_all(workspace)?;
    let db_path = workspace.join("escola.sqlite3");
    let conn = Connection::open(db_path)?;
    conn.execute("PRAGMA foreign_keys = ON", [])?;
    ensure_schema(&conn)?;
    Ok(conn)
}

/// Idempotent schema bootstrap. Safe to run on every start; also upgrades
/// stores written by legacy variants that predate the timestamp column and
/// the natural-key index on grades.
pub fn ensure_schema(conn: &Connection) -> anyhow::Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS funcionario(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            nome TEXT NOT NULL,
            cpf TEXT UNIQUE NOT NULL,
            senha TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS alunos(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            nome TEXT NOT NULL,
            cpf TEXT UNIQUE NOT NULL,
            endereco TEXT NOT NULL,
            matricula TEXT UNIQUE
        )",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_alunos_nome ON alunos(nome)",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS notas(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            aluno_id INTEGER NOT NULL,
            disciplina TEXT NOT NULL,
            nota REAL NOT NULL,
            funcionario_id INTEGER NOT NULL,
            data_atribuicao TEXT,
            FOREIGN KEY(aluno_id) REFERENCES alunos(id),
            FOREIGN KEY(funcionario_id) REFERENCES funcionario(id)
        )",
        [],
    )?;

    // Legacy stores carry a notas table without the timestamp column.
    ensure_notas_data_atribuicao(conn)?;

    // The natural key behind the grade upsert: at most one row per
    // (student, subject) pair, enforced by the store rather than by a
    // read-then-branch check.
    conn.execute(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_notas_aluno_disciplina
         ON notas(aluno_id, disciplina)",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_notas_aluno ON notas(aluno_id)",
        [],
    )?;

    seed_default_staff(conn)?;
    Ok(())
}

fn ensure_notas_data_atribuicao(conn: &Connection) -> anyhow::Result<()> {
    if table_has_column(conn, "notas", "data_atribuicao")? {
        return Ok(());
    }
    conn.execute("ALTER TABLE notas ADD COLUMN data_atribuicao TEXT", [])?;
    Ok(())
}

fn seed_default_staff(conn: &Connection) -> anyhow::Result<()> {
    let inserted = conn.execute(
        "INSERT INTO funcionario (nome, cpf, senha)
         SELECT 'Administrador', ?1, 'admin123'
         WHERE NOT EXISTS (SELECT 1 FROM funcionario WHERE cpf = ?1)",
        [SEED_STAFF_CPF],
    )?;
    if inserted > 0 {
        tracing::info!(cpf = SEED_STAFF_CPF, "seeded default staff record");
    }
    Ok(())
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> anyhow::Result<bool> {
    let sql = format!("PRAGMA table_info({})", table);
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let name: String = row.get(1)?;
        if name == column {
            return Ok(true);
        }
    }
    Ok(false)
}
