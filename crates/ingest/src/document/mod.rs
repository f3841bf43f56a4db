mod pdf;

use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF extraction failed: {0}")]
    Pdf(String),
    #[error("document contains no extractable text")]
    NoText,
}

/// One physical page of extracted text.
#[derive(Debug, Clone)]
pub struct PageRecord {
    /// 1-based page number, assigned in load order.
    pub page_number: usize,
    /// The extracted text content, trimmed.
    pub text: String,
}

/// Load a PDF from disk, producing one `PageRecord` per physical page.
///
/// A missing or unreadable file surfaces as `LoadError::Io`; a file that is
/// not a valid PDF as `LoadError::Pdf`.
pub fn load_pdf(path: &Path) -> Result<Vec<PageRecord>, LoadError> {
    let bytes = std::fs::read(path)?;
    load_pdf_bytes(&bytes)
}

/// Load a PDF already held in memory (server upload path).
pub fn load_pdf_bytes(bytes: &[u8]) -> Result<Vec<PageRecord>, LoadError> {
    let pages = pdf::extract_pages(bytes)?;
    tracing::debug!("Loaded PDF: {} pages", pages.len());
    Ok(pages)
}
