use thiserror::Error;

use pagecite_index::IndexError;
use pagecite_ingest::document::LoadError;
use pagecite_ingest::embedding::EmbeddingError;
use pagecite_llm::LlmError;

/// Everything that can abort a question. All variants propagate to the top
/// of the request; none are retried or recovered locally.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("document load failed: {0}")]
    Load(#[from] LoadError),

    #[error("embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("index failure: {0}")]
    Index(#[from] IndexError),

    #[error("answer generation failed: {0}")]
    Generation(#[from] LlmError),
}
