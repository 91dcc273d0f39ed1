//! Document format detection and chunk type

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Formats the extractor can read
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    /// PDF document
    Pdf,
    /// Microsoft Word document (.docx)
    Docx,
}

impl DocumentFormat {
    /// Detect format from a file extension (case-insensitive, without the dot)
    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "docx" => Ok(Self::Docx),
            other => Err(Error::UnsupportedFormat(if other.is_empty() {
                "<none>".to_string()
            } else {
                format!(".{}", other)
            })),
        }
    }

    /// Detect format from a path's extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        Self::from_extension(ext)
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Docx => "Word Document (.docx)",
        }
    }
}

/// A window of normalized document text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Position in the chunk sequence
    pub index: usize,
    /// Character offset of the window start in the normalized text
    pub offset: usize,
    /// Trimmed window text
    pub text: String,
}

impl Chunk {
    /// Create a new chunk
    pub fn new(index: usize, offset: usize, text: String) -> Self {
        Self {
            index,
            offset,
            text,
        }
    }

    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}
