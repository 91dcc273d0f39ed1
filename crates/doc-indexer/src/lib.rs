//! doc-indexer: index one PDF or DOCX document into a vector store
//!
//! The text is normalized and cut into fixed-size overlapping windows, each
//! window is embedded by a remote model, and the rows are written to
//! PostgreSQL/pgvector in a single transaction.

pub mod config;
pub mod error;
pub mod ingestion;
pub mod pipeline;
pub mod providers;
pub mod storage;
pub mod types;

pub use config::IndexerConfig;
pub use error::{Error, Result};
pub use ingestion::{normalize_whitespace, split_fixed_overlap, FileParser, FixedOverlapChunker};
pub use pipeline::{IndexOutcome, IndexPipeline, IndexReport};
pub use providers::EmbeddingProvider;
pub use storage::ChunkStore;
pub use types::{Chunk, ChunkRow, DocumentFormat};
