//! Core types for the indexing pipeline

pub mod document;
pub mod row;

pub use document::{Chunk, DocumentFormat};
pub use row::ChunkRow;
