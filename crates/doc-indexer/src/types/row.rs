//! Rows written to the chunk store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// One persisted chunk with its embedding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkRow {
    /// Unique row ID
    pub id: Uuid,
    /// Chunk text
    pub chunk_text: String,
    /// Embedding vector
    pub embedding: Vec<f32>,
    /// Source file basename
    pub filename: String,
    /// Splitting strategy label
    pub split_strategy: String,
    /// Creation time, shared by every row of one load
    pub created_at: DateTime<Utc>,
}

impl ChunkRow {
    /// Pair chunks with embeddings into rows.
    ///
    /// Fails with `LengthMismatch` before building anything if the two
    /// sequences differ in length. The timestamp is taken once and shared.
    pub fn build_batch(
        filename: &str,
        split_strategy: &str,
        chunks: &[String],
        embeddings: &[Vec<f32>],
    ) -> Result<Vec<ChunkRow>> {
        if chunks.len() != embeddings.len() {
            return Err(Error::LengthMismatch {
                chunks: chunks.len(),
                embeddings: embeddings.len(),
            });
        }

        let now = Utc::now();
        Ok(chunks
            .iter()
            .zip(embeddings)
            .map(|(text, embedding)| ChunkRow {
                id: Uuid::new_v4(),
                chunk_text: text.clone(),
                embedding: embedding.clone(),
                filename: filename.to_string(),
                split_strategy: split_strategy.to_string(),
                created_at: now,
            })
            .collect())
    }
}
