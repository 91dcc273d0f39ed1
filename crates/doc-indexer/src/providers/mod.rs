//! Provider abstractions for embeddings
//!
//! The pipeline only sees [`EmbeddingProvider`]; the Gemini client is the
//! production implementation and tests substitute deterministic fakes.

pub mod embedding;
pub mod gemini;

pub use embedding::EmbeddingProvider;
pub use gemini::GeminiEmbedder;
