//! PostgreSQL/pgvector chunk store
//!
//! Expects the `document_chunks` table to exist (see `sql/document_chunks.sql`
//! at the repository root); the indexer never creates or migrates it.

use async_trait::async_trait;
use pgvector::Vector;
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::{Connection, Postgres, QueryBuilder};

use super::ChunkStore;
use crate::config::{DatabaseConfig, CHUNKS_TABLE};
use crate::error::Result;
use crate::types::ChunkRow;

/// Columns bound per row
const COLUMNS_PER_ROW: usize = 6;
/// Rows per INSERT statement; keeps binds under the protocol's 65535 limit
const ROWS_PER_STATEMENT: usize = u16::MAX as usize / COLUMNS_PER_ROW;

/// Chunk store backed by a pgvector-enabled PostgreSQL database
pub struct PgVectorStore {
    options: PgConnectOptions,
    table: String,
}

impl PgVectorStore {
    /// Create a store; no connection is opened until rows are written
    pub fn new(config: &DatabaseConfig) -> Self {
        let options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .database(&config.dbname)
            .username(&config.user)
            .password(&config.password);

        Self {
            options,
            table: CHUNKS_TABLE.to_string(),
        }
    }

    fn insert_prefix(&self) -> String {
        format!(
            "INSERT INTO {} (id, chunk_text, embedding, filename, split_strategy, created_at) ",
            self.table
        )
    }

    async fn write_rows(&self, conn: &mut PgConnection, rows: &[ChunkRow]) -> Result<()> {
        let mut tx = conn.begin().await?;

        for batch in rows.chunks(ROWS_PER_STATEMENT) {
            let mut query: QueryBuilder<Postgres> = QueryBuilder::new(self.insert_prefix());
            query.push_values(batch, |mut b, row| {
                b.push_bind(row.id)
                    .push_bind(&row.chunk_text)
                    .push_bind(Vector::from(row.embedding.clone()))
                    .push_bind(&row.filename)
                    .push_bind(&row.split_strategy)
                    .push_bind(row.created_at);
            });
            query.build().execute(&mut *tx).await?;
        }

        tx.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl ChunkStore for PgVectorStore {
    async fn insert_rows(&self, rows: &[ChunkRow]) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }

        let mut conn = PgConnection::connect_with(&self.options).await?;
        let written = self.write_rows(&mut conn, rows).await;
        // Close on both paths; an uncommitted transaction rolls back with it.
        let closed = conn.close().await;
        written?;
        closed?;

        tracing::info!(rows = rows.len(), table = %self.table, "Inserted chunk rows");
        Ok(())
    }

    fn name(&self) -> &str {
        "pgvector"
    }

    fn destination(&self) -> String {
        self.table.clone()
    }
}
