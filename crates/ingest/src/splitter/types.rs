//! Splitter configuration and output types.

use serde::{Deserialize, Serialize};

// ── Configuration ───────────────────────────────────────────────────────────

/// Configuration for the chunk splitter.
#[derive(Debug, Clone)]
pub struct SplitConfig {
    /// Maximum characters per chunk (default: 800).
    pub chunk_chars: usize,
    /// Overlap characters between adjacent chunks from the same page
    /// (default: 200). Must be smaller than `chunk_chars`.
    pub overlap_chars: usize,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            chunk_chars: 800,
            overlap_chars: 200,
        }
    }
}

impl SplitConfig {
    /// Window step between chunk start positions.
    pub fn step(&self) -> usize {
        self.chunk_chars.saturating_sub(self.overlap_chars).max(1)
    }
}

// ── Chunk output ────────────────────────────────────────────────────────────

/// A bounded substring of a document page, the unit of retrieval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// 0-based index within the document.
    pub index: usize,
    /// The chunk text content.
    pub text: String,
    /// 1-based source page number. `None` only for chunks whose origin
    /// lost its page metadata; rendered as "N/A" in citations.
    pub page_number: Option<usize>,
}
