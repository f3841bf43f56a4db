//! Embedding backends.
//!
//! Each backend turns a batch of texts into fixed-dimension vectors over a
//! hosted (OpenAI-compatible) or local (Ollama) HTTP API. Failures abort the
//! current question; there is no retry layer here.

mod ollama;
mod openai;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use pagecite_core::config::EmbeddingConfig;

pub use ollama::OllamaEmbedder;
pub use openai::OpenAiEmbedder;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("embedding provider not configured: {0}")]
    NotConfigured(String),
}

/// Trait for embedding backends.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a batch of texts, returning one vector per input (in order).
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError>;

    /// The dimensionality of the output vectors.
    fn dimensions(&self) -> usize;

    /// Embed a single query string.
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut vectors = self.embed_batch(&[text]).await?;
        vectors
            .pop()
            .ok_or_else(|| EmbeddingError::Api("empty embedding response".to_string()))
    }
}

/// Build the embedder named by the config.
pub fn create_embedder(config: &EmbeddingConfig) -> Result<Arc<dyn Embedder>, EmbeddingError> {
    match config.provider.as_str() {
        "openai" => {
            let api_key = config.openai_api_key.clone().ok_or_else(|| {
                EmbeddingError::NotConfigured("OPENAI_API_KEY not set".to_string())
            })?;
            Ok(Arc::new(OpenAiEmbedder::new(
                api_key,
                config.openai_model.clone(),
                config.openai_base_url.clone(),
                config.dimensions,
            )))
        }
        "ollama" => Ok(Arc::new(OllamaEmbedder::new(
            config.ollama_url.clone(),
            config.ollama_model.clone(),
            config.dimensions,
        ))),
        other => Err(EmbeddingError::NotConfigured(format!(
            "unknown embedding provider '{other}'"
        ))),
    }
}

/// Check that a response batch matches the input count and dimensionality.
pub(crate) fn validate_batch(
    embeddings: &[Vec<f32>],
    expected_count: usize,
    expected_dims: usize,
) -> Result<(), EmbeddingError> {
    if embeddings.len() != expected_count {
        return Err(EmbeddingError::Api(format!(
            "expected {} embeddings, got {}",
            expected_count,
            embeddings.len()
        )));
    }
    for vector in embeddings {
        if vector.len() != expected_dims {
            return Err(EmbeddingError::DimensionMismatch {
                expected: expected_dims,
                actual: vector.len(),
            });
        }
    }
    Ok(())
}
