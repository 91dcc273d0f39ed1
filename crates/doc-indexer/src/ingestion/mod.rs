//! Document ingestion: text extraction, normalization and chunking

mod chunker;
mod normalize;
mod parser;

pub use chunker::{split_fixed_overlap, FixedOverlapChunker};
pub use normalize::normalize_whitespace;
pub use parser::{source_filename, FileParser};
