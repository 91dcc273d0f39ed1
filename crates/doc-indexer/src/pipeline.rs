//! End-to-end indexing of one file: extract, chunk, embed, persist

use std::path::Path;
use std::sync::Arc;

use crate::config::IndexerConfig;
use crate::error::Result;
use crate::ingestion::{source_filename, FileParser, FixedOverlapChunker};
use crate::providers::{EmbeddingProvider, GeminiEmbedder};
use crate::storage::{open_store, ChunkStore};

/// Summary of a completed load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexReport {
    /// Basename stored with each row
    pub filename: String,
    /// Characters of extracted text, before normalization
    pub chars: usize,
    /// Chunks produced and rows written
    pub chunks: usize,
    /// Length of the first embedding, 0 when there were no chunks
    pub dimensions: usize,
    /// Window size used
    pub chunk_size: usize,
    /// Overlap used
    pub overlap: usize,
    /// Where the rows were written
    pub destination: String,
}

/// What happened to a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexOutcome {
    /// Extraction produced no text; embedder and store were not called
    NothingToIndex { filename: String },
    /// Rows were written
    Indexed(IndexReport),
}

/// Sequential single-file indexing pipeline
pub struct IndexPipeline {
    chunker: FixedOverlapChunker,
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn ChunkStore>,
}

impl IndexPipeline {
    /// Create a pipeline from its parts
    pub fn new(
        chunker: FixedOverlapChunker,
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn ChunkStore>,
    ) -> Self {
        Self {
            chunker,
            embedder,
            store,
        }
    }

    /// Create the production pipeline: Gemini embeddings into the configured store
    pub fn from_config(config: &IndexerConfig) -> Result<Self> {
        let chunker = FixedOverlapChunker::from_config(&config.chunking)?;
        let embedder = Arc::new(GeminiEmbedder::new(&config.embedding)?);
        let store = open_store(&config.storage, &config.database);

        tracing::info!(
            "Pipeline configured: embedder={}, store={}, size={}, overlap={}",
            embedder.name(),
            store.name(),
            chunker.chunk_size(),
            chunker.overlap()
        );

        Ok(Self::new(chunker, embedder, store))
    }

    /// Index one PDF or DOCX file
    pub async fn index_file(&self, path: &Path) -> Result<IndexOutcome> {
        let filename = source_filename(path);
        let text = FileParser::extract(path)?;
        self.index_text(&filename, &text).await
    }

    /// Index already-extracted text under `filename`
    pub async fn index_text(&self, filename: &str, text: &str) -> Result<IndexOutcome> {
        if text.is_empty() {
            tracing::info!("No text extracted from {}. Nothing to index.", filename);
            return Ok(IndexOutcome::NothingToIndex {
                filename: filename.to_string(),
            });
        }

        let chars = text.chars().count();
        let chunks = self.chunker.chunk_texts(text);
        tracing::info!(
            "Extracted {} chars -> {} chunks (size={}, overlap={})",
            chars,
            chunks.len(),
            self.chunker.chunk_size(),
            self.chunker.overlap()
        );

        let embeddings = self.embedder.embed_batch(&chunks).await?;
        let dimensions = embeddings.first().map(Vec::len).unwrap_or(0);
        tracing::info!("Created {} embeddings. dims={}", embeddings.len(), dimensions);

        let written = self
            .store
            .insert_chunks(filename, self.chunker.strategy(), &chunks, &embeddings)
            .await?;
        tracing::info!("Inserted {} rows from {} via {}", written, filename, self.store.name());

        Ok(IndexOutcome::Indexed(IndexReport {
            filename: filename.to_string(),
            chars,
            chunks: written,
            dimensions,
            chunk_size: self.chunker.chunk_size(),
            overlap: self.chunker.overlap(),
            destination: self.store.destination(),
        }))
    }
}
