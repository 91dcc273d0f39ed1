//! In-memory chunk store

use async_trait::async_trait;
use parking_lot::Mutex;

use super::ChunkStore;
use crate::error::Result;
use crate::types::ChunkRow;

/// Keeps rows in process memory; used for tests and dry runs
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<ChunkRow>>,
    batches: Mutex<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every row written so far
    pub fn rows(&self) -> Vec<ChunkRow> {
        self.rows.lock().clone()
    }

    /// Number of `insert_rows` calls received
    pub fn batches(&self) -> usize {
        *self.batches.lock()
    }
}

#[async_trait]
impl ChunkStore for MemoryStore {
    async fn insert_rows(&self, rows: &[ChunkRow]) -> Result<()> {
        *self.batches.lock() += 1;
        self.rows.lock().extend_from_slice(rows);
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }

    fn destination(&self) -> String {
        "memory (not persisted)".to_string()
    }
}
