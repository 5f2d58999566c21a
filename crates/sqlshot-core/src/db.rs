use crate::model::Row;
use anyhow::Context;
use rusqlite::types::ValueRef;
use rusqlite::Connection;
use std::path::Path;

/// The run's single database handle. Opened once at startup, used
/// sequentially, closed on drop at the end of the run.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Deletes any previous database file and seeds a fresh one from the
    /// schema script, then the seed script. No state survives between runs;
    /// a broken script aborts the whole run.
    pub fn init(db_path: &Path, schema_path: &Path, seed_path: &Path) -> anyhow::Result<Self> {
        match std::fs::remove_file(db_path) {
            Ok(()) => tracing::info!(event = "db_removed", path = %db_path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(e).with_context(|| format!("failed to remove {}", db_path.display()))
            }
        }

        let schema = std::fs::read_to_string(schema_path)
            .with_context(|| format!("failed to read schema script {}", schema_path.display()))?;
        let seed = std::fs::read_to_string(seed_path)
            .with_context(|| format!("failed to read seed script {}", seed_path.display()))?;

        let conn = Connection::open(db_path)
            .with_context(|| format!("failed to create database {}", db_path.display()))?;
        conn.execute_batch(&schema).context("schema script failed")?;
        conn.execute_batch(&seed).context("seed script failed")?;

        tracing::info!(event = "db_seeded", path = %db_path.display());
        Ok(Self { conn })
    }

    pub fn open_in_memory_seeded(schema: &str, seed: &str) -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema).context("schema script failed")?;
        conn.execute_batch(seed).context("seed script failed")?;
        Ok(Self { conn })
    }

    /// Executes SQL text as-is and collects every row, column names kept in
    /// statement order. The text comes straight from an LLM reply, so a
    /// syntax error here is an expected outcome, not a bug.
    pub fn run_sql(&self, sql: &str) -> anyhow::Result<Vec<Row>> {
        let mut stmt = self.conn.prepare(sql)?;
        let columns: Vec<String> = stmt
            .column_names()
            .iter()
            .map(|c| c.to_string())
            .collect();

        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let mut map = Row::new();
            for (i, name) in columns.iter().enumerate() {
                map.insert(name.clone(), value_to_json(row.get_ref(i)?));
            }
            out.push(map);
        }
        Ok(out)
    }
}

fn value_to_json(v: ValueRef<'_>) -> serde_json::Value {
    match v {
        ValueRef::Null => serde_json::Value::Null,
        ValueRef::Integer(i) => serde_json::Value::from(i),
        ValueRef::Real(f) => serde_json::Value::from(f),
        ValueRef::Text(t) => serde_json::Value::from(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => serde_json::Value::from(String::from_utf8_lossy(b).into_owned()),
    }
}
