//! Citation collection: page numbers of the chunks used as context.

use pagecite_index::ScoredChunk;

/// Sentinel rendered for chunks that lost their page metadata.
pub const UNKNOWN_PAGE: &str = "N/A";

/// Extract the cited page numbers from retrieved context, deduplicated and
/// sorted ascending, rendered as a comma-separated list.
///
/// Numeric pages sort numerically; chunks without a page contribute a single
/// trailing `N/A` instead of being mixed into the sort. Empty context
/// renders as `N/A`.
pub fn collect_citations(sources: &[ScoredChunk]) -> String {
    let mut pages: Vec<usize> = Vec::new();
    let mut has_unknown = false;

    for scored in sources {
        match scored.chunk.page_number {
            Some(page) => {
                if !pages.contains(&page) {
                    pages.push(page);
                }
            }
            None => has_unknown = true,
        }
    }

    pages.sort_unstable();

    let mut parts: Vec<String> = pages.iter().map(ToString::to_string).collect();
    if has_unknown || parts.is_empty() {
        parts.push(UNKNOWN_PAGE.to_string());
    }
    parts.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecite_ingest::Chunk;

    fn scored(page: Option<usize>) -> ScoredChunk {
        ScoredChunk {
            chunk: Chunk {
                index: 0,
                text: "text".to_string(),
                page_number: page,
            },
            score: 1.0,
        }
    }

    #[test]
    fn deduplicates_and_sorts_ascending() {
        let sources = vec![scored(Some(7)), scored(Some(2)), scored(Some(7)), scored(Some(10))];
        assert_eq!(collect_citations(&sources), "2, 7, 10");
    }

    #[test]
    fn numeric_sort_not_lexicographic() {
        let sources = vec![scored(Some(10)), scored(Some(2))];
        assert_eq!(collect_citations(&sources), "2, 10");
    }

    #[test]
    fn missing_page_metadata_renders_trailing_sentinel() {
        let sources = vec![scored(None), scored(Some(3)), scored(Some(1))];
        assert_eq!(collect_citations(&sources), "1, 3, N/A");
    }

    #[test]
    fn only_unknown_pages() {
        let sources = vec![scored(None), scored(None)];
        assert_eq!(collect_citations(&sources), "N/A");
    }

    #[test]
    fn empty_context_is_sentinel() {
        assert_eq!(collect_citations(&[]), "N/A");
    }
}
