//! Chunk persistence
//!
//! [`ChunkStore`] is the capability seam between the pipeline and storage.
//! PostgreSQL/pgvector is the production backend; SQLite and memory stores
//! share the same contract.

mod memory;
mod postgres;
mod sqlite;

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{DatabaseConfig, StorageConfig, StoreBackend};
use crate::error::Result;
use crate::types::ChunkRow;

pub use self::memory::MemoryStore;
pub use self::postgres::PgVectorStore;
pub use self::sqlite::SqliteStore;

/// Trait for writing chunk rows
#[async_trait]
pub trait ChunkStore: Send + Sync {
    /// Write all rows in one transaction: every row commits or none do
    async fn insert_rows(&self, rows: &[ChunkRow]) -> Result<()>;

    /// Build rows from parallel chunk/embedding sequences and write them.
    ///
    /// Fails with `LengthMismatch` before touching storage when the
    /// sequences differ in length. Returns the number of rows written.
    async fn insert_chunks(
        &self,
        filename: &str,
        split_strategy: &str,
        chunks: &[String],
        embeddings: &[Vec<f32>],
    ) -> Result<usize> {
        let rows = ChunkRow::build_batch(filename, split_strategy, chunks, embeddings)?;
        self.insert_rows(&rows).await?;
        Ok(rows.len())
    }

    /// Get store name for logging
    fn name(&self) -> &str;

    /// Where written rows end up, for user-facing messages
    fn destination(&self) -> String {
        self.name().to_string()
    }
}

/// Build the store selected by configuration
pub fn open_store(storage: &StorageConfig, database: &DatabaseConfig) -> Arc<dyn ChunkStore> {
    match storage.backend {
        StoreBackend::Postgres => Arc::new(PgVectorStore::new(database)),
        StoreBackend::Sqlite => Arc::new(SqliteStore::new(&storage.sqlite_path)),
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
    }
}
