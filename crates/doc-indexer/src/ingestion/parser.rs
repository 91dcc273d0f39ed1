//! PDF and DOCX text extraction

use std::path::Path;

use crate::error::{Error, Result};
use crate::types::DocumentFormat;

/// Basename of `path`, stored with every row of the load
pub fn source_filename(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Format-dispatching text extractor
pub struct FileParser;

impl FileParser {
    /// Read `path` and return its text.
    ///
    /// The extension is checked before the file is opened, so an unsupported
    /// path fails with `UnsupportedFormat` even if it does not exist.
    pub fn extract(path: &Path) -> Result<String> {
        let format = DocumentFormat::from_path(path)?;
        let data = std::fs::read(path)?;
        Self::parse(format, &source_filename(path), &data)
    }

    /// Extract text from in-memory file contents
    pub fn parse(format: DocumentFormat, filename: &str, data: &[u8]) -> Result<String> {
        let text = match format {
            DocumentFormat::Pdf => Self::parse_pdf(filename, data)?,
            DocumentFormat::Docx => Self::parse_docx(filename, data)?,
        };
        tracing::debug!(
            filename,
            format = format.display_name(),
            chars = text.chars().count(),
            "Extracted text"
        );
        Ok(text)
    }

    /// Page texts joined by newlines; a page without text contributes an empty line.
    ///
    /// Runs on the calling thread. pdf-extract can panic on malformed fonts;
    /// such a panic ends the process with a non-zero exit, which is accepted.
    fn parse_pdf(filename: &str, data: &[u8]) -> Result<String> {
        let pages = pdf_extract::extract_text_from_mem_by_pages(data)
            .map_err(|e| Error::file_parse(filename, e.to_string()))?;

        Ok(pages.join("\n").trim().to_string())
    }

    /// Body paragraph texts joined by newlines; tables are not read
    fn parse_docx(filename: &str, data: &[u8]) -> Result<String> {
        let doc = docx_rs::read_docx(data).map_err(|e| Error::file_parse(filename, e.to_string()))?;

        let paragraphs: Vec<String> = doc
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                docx_rs::DocumentChild::Paragraph(p) => Some(paragraph_text(&p.children)),
                _ => None,
            })
            .collect();

        Ok(paragraphs.join("\n").trim().to_string())
    }
}

fn paragraph_text(children: &[docx_rs::ParagraphChild]) -> String {
    let mut text = String::new();
    for child in children {
        match child {
            docx_rs::ParagraphChild::Run(run) => {
                for child in &run.children {
                    match child {
                        docx_rs::RunChild::Text(t) => text.push_str(&t.text),
                        docx_rs::RunChild::Tab(_) => text.push('\t'),
                        docx_rs::RunChild::Break(_) => text.push('\n'),
                        _ => {}
                    }
                }
            }
            docx_rs::ParagraphChild::Hyperlink(link) => {
                text.push_str(&paragraph_text(&link.children));
            }
            _ => {}
        }
    }
    text
}
