use std::io::Write;
use std::time::Instant;

use lopdf::Document;
use pdf_extract::extract_text;
use tempfile::NamedTempFile;

use crate::error::{AppError, AppResult};
use crate::models::UploadedFile;

/// Extracts plain text from uploaded PDF resumes.
///
/// Primary path: parse with lopdf and concatenate per-page text with newline
/// separators, skipping empty pages. If the document cannot be loaded that
/// way, fall back to pdf-extract over the whole file.
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }

    pub async fn extract_text(&self, file: &UploadedFile) -> AppResult<String> {
        let start = Instant::now();

        tracing::info!(
            "Starting PDF text extraction for file: {} ({} bytes)",
            file.name,
            file.size
        );

        if !file.is_pdf() {
            return Err(AppError::UnsupportedResumeFormat);
        }

        let text = match Document::load_mem(&file.content) {
            Ok(doc) => self.extract_pages(&doc),
            Err(e) => {
                tracing::warn!(
                    "PDF structure parsing failed: {}, falling back to whole-document extraction",
                    e
                );
                self.extract_whole_document(&file.content)?
            }
        };

        tracing::info!(
            "PDF extraction completed in {}ms, {} characters",
            start.elapsed().as_millis(),
            text.len()
        );

        Ok(text)
    }

    /// Per-page extraction; empty pages contribute nothing.
    fn extract_pages(&self, doc: &Document) -> String {
        let mut chunks = Vec::new();

        for page_number in doc.get_pages().keys() {
            match doc.extract_text(&[*page_number]) {
                Ok(page_text) => {
                    let page_text = page_text.trim();
                    if !page_text.is_empty() {
                        chunks.push(page_text.to_string());
                    }
                }
                Err(e) => {
                    tracing::debug!(page = page_number, error = %e, "Page text extraction failed");
                }
            }
        }

        chunks.join("\n")
    }

    fn extract_whole_document(&self, content: &[u8]) -> AppResult<String> {
        // pdf-extract works on paths, so stage the upload in a temp file
        let mut temp_file = NamedTempFile::new().map_err(|e| {
            AppError::extraction(format!("Failed to create temporary file: {}", e))
        })?;

        temp_file.write_all(content).map_err(|e| {
            AppError::extraction(format!("Failed to write PDF to temporary file: {}", e))
        })?;

        let text = extract_text(temp_file.path())
            .map_err(|e| AppError::extraction(format!("PDF text extraction failed: {}", e)))?;

        Ok(text.trim().to_string())
    }

    pub fn is_available(&self) -> bool {
        true
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}
