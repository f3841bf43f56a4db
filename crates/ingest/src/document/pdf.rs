use super::{LoadError, PageRecord};

/// Extract per-page text from PDF bytes.
///
/// `pdf-extract` returns the whole document as one string with form feed
/// characters (`\x0C`) separating pages; a document without form feeds is
/// treated as a single page.
pub(super) fn extract_pages(bytes: &[u8]) -> Result<Vec<PageRecord>, LoadError> {
    let text =
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| LoadError::Pdf(e.to_string()))?;

    if text.trim().is_empty() {
        // Extraction succeeded but found nothing (scanned/image-only PDF).
        return Err(LoadError::NoText);
    }

    Ok(pages_from_text(&text))
}

/// Split extracted text into physically numbered pages.
fn pages_from_text(text: &str) -> Vec<PageRecord> {
    let mut pages: Vec<PageRecord> = text
        .split('\x0C')
        .enumerate()
        .map(|(i, page_text)| PageRecord {
            page_number: i + 1,
            text: page_text.trim().to_string(),
        })
        .collect();

    // A trailing form feed leaves an empty segment after the last page.
    while pages.len() > 1 && pages.last().is_some_and(|p| p.text.is_empty()) {
        pages.pop();
    }
    pages
}
