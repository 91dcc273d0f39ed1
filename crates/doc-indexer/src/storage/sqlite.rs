//! Embedded SQLite chunk store
//!
//! Same row shape as the PostgreSQL table, with the embedding stored as a
//! JSON array. The store owns its file, so it creates the table if missing.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use super::ChunkStore;
use crate::config::CHUNKS_TABLE;
use crate::error::{Error, Result};
use crate::types::ChunkRow;

/// SQLite-backed chunk store; opens its file per write and closes it after
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Open the database and make sure the table exists
    fn open(&self) -> Result<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.execute_batch(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {table} (
                id TEXT PRIMARY KEY,
                chunk_text TEXT NOT NULL,
                embedding TEXT NOT NULL,
                filename TEXT NOT NULL,
                split_strategy TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_{table}_filename ON {table}(filename);
            "#,
            table = CHUNKS_TABLE
        ))?;
        Ok(conn)
    }

    fn write_rows(&self, rows: &[ChunkRow]) -> Result<()> {
        let mut conn = self.open()?;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(&format!(
                r#"
                INSERT INTO {} (id, chunk_text, embedding, filename, split_strategy, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
                CHUNKS_TABLE
            ))?;

            for row in rows {
                stmt.execute(params![
                    row.id.to_string(),
                    row.chunk_text,
                    serde_json::to_string(&row.embedding)?,
                    row.filename,
                    row.split_strategy,
                    row.created_at,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    /// Read back every stored row, oldest first
    pub fn load_rows(&self) -> Result<Vec<ChunkRow>> {
        let conn = self.open()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT id, chunk_text, embedding, filename, split_strategy, created_at \
             FROM {} ORDER BY rowid",
            CHUNKS_TABLE
        ))?;

        let raw = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, DateTime<Utc>>(5)?,
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        raw.into_iter()
            .map(|(id, chunk_text, embedding, filename, split_strategy, created_at)| {
                Ok(ChunkRow {
                    id: Uuid::parse_str(&id)
                        .map_err(|e| Error::storage(format!("Bad row id '{}': {}", id, e)))?,
                    chunk_text,
                    embedding: serde_json::from_str(&embedding)?,
                    filename,
                    split_strategy,
                    created_at,
                })
            })
            .collect()
    }
}

#[async_trait]
impl ChunkStore for SqliteStore {
    async fn insert_rows(&self, rows: &[ChunkRow]) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }
        self.write_rows(rows)?;
        tracing::info!(rows = rows.len(), path = %self.path.display(), "Inserted chunk rows");
        Ok(())
    }

    fn name(&self) -> &str {
        "sqlite"
    }

    fn destination(&self) -> String {
        format!("{} in {}", CHUNKS_TABLE, self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, SqliteStore) {
        let dir = TempDir::new().unwrap();
        let store = SqliteStore::new(dir.path().join("chunks.db"));
        (dir, store)
    }

    #[tokio::test]
    async fn test_insert_and_load() {
        let (_dir, store) = store();
        let chunks = vec!["first".to_string(), "second".to_string()];
        let embeddings = vec![vec![0.5, 1.5], vec![-2.0, 0.0]];

        let written = store
            .insert_chunks("report.pdf", "fixed_overlap", &chunks, &embeddings)
            .await
            .unwrap();
        assert_eq!(written, 2);

        let rows = store.load_rows().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].chunk_text, "first");
        assert_eq!(rows[1].embedding, vec![-2.0, 0.0]);
        assert_eq!(rows[0].filename, "report.pdf");
        assert_eq!(rows[0].split_strategy, "fixed_overlap");
        assert_eq!(rows[0].created_at, rows[1].created_at);
        assert_ne!(rows[0].id, rows[1].id);
    }

    #[tokio::test]
    async fn test_loads_append() {
        let (_dir, store) = store();
        store
            .insert_chunks("a.pdf", "fixed_overlap", &["a".to_string()], &[vec![1.0]])
            .await
            .unwrap();
        store
            .insert_chunks("b.docx", "fixed_overlap", &["b".to_string()], &[vec![2.0]])
            .await
            .unwrap();

        let filenames: Vec<String> = store.load_rows().unwrap().into_iter().map(|r| r.filename).collect();
        assert_eq!(filenames, vec!["a.pdf", "b.docx"]);
    }

    #[tokio::test]
    async fn test_failed_batch_leaves_nothing_behind() {
        let (_dir, store) = store();
        let mut rows =
            ChunkRow::build_batch("a.pdf", "fixed_overlap", &["x".to_string(), "y".to_string()], &[vec![1.0], vec![2.0]])
                .unwrap();
        // Duplicate primary key on the second row.
        rows[1].id = rows[0].id;

        let err = store.insert_rows(&rows).await.unwrap_err();
        assert!(matches!(err, Error::Sqlite(_)));
        assert!(store.load_rows().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_length_mismatch_does_not_create_file() {
        let (dir, store) = store();
        let err = store
            .insert_chunks("a.pdf", "fixed_overlap", &[], &[vec![1.0]])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::LengthMismatch { .. }));
        assert!(!dir.path().join("chunks.db").exists());
    }
}
