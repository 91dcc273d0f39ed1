//! Configuration for the indexer
//!
//! Everything environment-derived lives in [`IndexerConfig`], which is built
//! once by the binary and handed to each component at construction. Tests
//! build it with [`IndexerConfig::from_lookup`] instead of touching the
//! process environment.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Embedding model used for every chunk
pub const EMBEDDING_MODEL: &str = "models/text-embedding-004";
/// Window size in characters
pub const CHUNK_SIZE: usize = 1000;
/// Characters shared by consecutive windows
pub const CHUNK_OVERLAP: usize = 200;
/// Label stored with every row
pub const SPLIT_STRATEGY: &str = "fixed_overlap";
/// Destination table
pub const CHUNKS_TABLE: &str = "document_chunks";
/// Environment variable holding the embedding API key
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Main indexer configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexerConfig {
    /// Relational store connection
    pub database: DatabaseConfig,
    /// Embedding service
    pub embedding: EmbeddingConfig,
    /// Chunking parameters
    pub chunking: ChunkingConfig,
    /// Which store receives the rows
    #[serde(default)]
    pub storage: StorageConfig,
}

impl IndexerConfig {
    /// Build from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = DatabaseConfig::default();
        let port = match lookup("PGPORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| Error::config(format!("PGPORT must be a port number, got '{}'", raw)))?,
            None => defaults.port,
        };

        let database = DatabaseConfig {
            host: lookup("PGHOST").unwrap_or(defaults.host),
            port,
            dbname: lookup("PGDATABASE").unwrap_or(defaults.dbname),
            user: lookup("PGUSER").unwrap_or(defaults.user),
            password: lookup("PGPASSWORD").unwrap_or(defaults.password),
        };

        let embedding = EmbeddingConfig {
            api_key: lookup(API_KEY_VAR).filter(|k| !k.trim().is_empty()),
            ..EmbeddingConfig::default()
        };

        let mut storage = StorageConfig::default();
        if let Some(raw) = lookup("DOC_INDEXER_STORE") {
            storage.backend = StoreBackend::parse(&raw)?;
        }
        if let Some(path) = lookup("DOC_INDEXER_SQLITE_PATH") {
            storage.sqlite_path = PathBuf::from(path);
        }

        Ok(Self {
            database,
            embedding,
            chunking: ChunkingConfig::default(),
            storage,
        })
    }
}

/// PostgreSQL connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database name
    pub dbname: String,
    /// Login role
    pub user: String,
    /// Login password
    pub password: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5434, // docker mapping localhost:5434 -> container:5432
            dbname: "jeen_ai".to_string(),
            user: "postgres".to_string(),
            password: "postgres".to_string(),
        }
    }
}

/// Embedding service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// API key; `None` fails at embedding time with `MissingCredential`
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Model identifier sent with each request
    pub model: String,
    /// REST base URL of the generative language API
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: EMBEDDING_MODEL.to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout_secs: 60,
        }
    }
}

/// Text chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Window size in characters
    pub chunk_size: usize,
    /// Overlap between consecutive windows in characters
    pub chunk_overlap: usize,
    /// Strategy label persisted with each row
    pub strategy: String,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: CHUNK_SIZE,
            chunk_overlap: CHUNK_OVERLAP,
            strategy: SPLIT_STRATEGY.to_string(),
        }
    }
}

/// Store selection
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// PostgreSQL with the pgvector extension
    #[default]
    Postgres,
    /// Embedded SQLite file
    Sqlite,
    /// Process memory, discarded on exit
    Memory,
}

impl StoreBackend {
    fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" | "pgvector" => Ok(Self::Postgres),
            "sqlite" => Ok(Self::Sqlite),
            "memory" => Ok(Self::Memory),
            other => Err(Error::config(format!(
                "DOC_INDEXER_STORE must be postgres, sqlite or memory, got '{}'",
                other
            ))),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Backend receiving the rows
    pub backend: StoreBackend,
    /// SQLite file used when `backend` is `sqlite`
    pub sqlite_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Postgres,
            sqlite_path: PathBuf::from("document_chunks.db"),
        }
    }
}
