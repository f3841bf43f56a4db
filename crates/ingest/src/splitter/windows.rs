//! Fixed-size overlapping window extraction.

use super::types::{Chunk, SplitConfig};
use crate::document::PageRecord;

/// Split an ordered page sequence into overlapping chunks.
///
/// Each page is windowed independently; a page shorter than the window
/// becomes exactly one chunk. Whitespace-only pages yield no chunks.
pub fn split_pages(pages: &[PageRecord], config: &SplitConfig) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    for page in pages {
        for text in window_page(&page.text, config) {
            chunks.push(Chunk {
                index: chunks.len(),
                text,
                page_number: Some(page.page_number),
            });
        }
    }
    chunks
}

/// Extract overlapping windows from one page's text.
///
/// Windows are taken on `char` boundaries so multi-byte characters are never
/// split. Consecutive windows from the same page share `overlap_chars`
/// characters, which makes the page reconstructible by dropping each
/// window's leading overlap.
fn window_page(text: &str, config: &SplitConfig) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let chars: Vec<char> = text.chars().collect();
    let size = config.chunk_chars;
    let step = config.step();

    let mut windows = Vec::new();
    let mut start = 0usize;
    loop {
        let end = (start + size).min(chars.len());
        windows.push(chars[start..end].iter().collect());
        if end == chars.len() {
            break;
        }
        start += step;
    }
    windows
}

#[cfg(test)]
pub(super) fn window_page_for_tests(text: &str, config: &SplitConfig) -> Vec<String> {
    window_page(text, config)
}
