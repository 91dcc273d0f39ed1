//! Error types for the indexing pipeline

use thiserror::Error;

/// Result type alias for indexing operations
pub type Result<T> = std::result::Result<T, Error>;

/// Indexing errors
///
/// The first four variants are precondition failures raised by this crate.
/// The rest carry whatever diagnostic the underlying parser, service or
/// driver produced.
#[derive(Debug, Error)]
pub enum Error {
    /// File extension is neither `.pdf` nor `.docx`
    #[error("Unsupported file type '{0}'. Please provide a PDF or DOCX file.")]
    UnsupportedFormat(String),

    /// Chunk overlap does not leave a positive window step
    #[error("Invalid chunking configuration: overlap ({overlap}) must be smaller than chunk size ({chunk_size})")]
    InvalidConfiguration { chunk_size: usize, overlap: usize },

    /// Embedding service credential is absent
    #[error("Missing {0} env var. Set it before running.")]
    MissingCredential(&'static str),

    /// Chunks and embeddings disagree in count
    #[error("Chunks and embeddings length mismatch: {chunks} chunks, {embeddings} embeddings")]
    LengthMismatch { chunks: usize, embeddings: usize },

    /// Configuration value could not be interpreted
    #[error("Configuration error: {0}")]
    Config(String),

    /// File parsing error
    #[error("Failed to parse file '{filename}': {message}")]
    FileParse { filename: String, message: String },

    /// Embedding service error
    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    /// Storage error not covered by a driver error type
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// PostgreSQL driver error
    #[error("PostgreSQL error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// SQLite driver error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl Error {
    /// Create a file parse error
    pub fn file_parse(filename: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FileParse {
            filename: filename.into(),
            message: message.into(),
        }
    }

    /// Create an embedding error
    pub fn embedding(message: impl Into<String>) -> Self {
        Self::Embedding(message.into())
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
