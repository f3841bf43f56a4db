//! The question-answering pipeline.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use pagecite_core::Config;
use pagecite_index::{IndexCache, ScoredChunk, VectorIndex, DEFAULT_TOP_K};
use pagecite_ingest::embedding::{create_embedder, Embedder};
use pagecite_ingest::{load_pdf_bytes, split_pages, PageRecord, SplitConfig};
use pagecite_llm::{create_provider, LlmProvider};

use crate::citations::collect_citations;
use crate::error::PipelineError;
use crate::prompt::build_messages;

/// Tunables for one pipeline instance.
#[derive(Debug, Clone)]
pub struct QaOptions {
    pub split: SplitConfig,
    pub top_k: usize,
    pub temperature: f32,
    pub max_tokens: u32,
    pub embed_batch_size: usize,
}

impl Default for QaOptions {
    fn default() -> Self {
        Self {
            split: SplitConfig::default(),
            top_k: DEFAULT_TOP_K,
            temperature: 0.1,
            max_tokens: 1024,
            embed_batch_size: 64,
        }
    }
}

/// The answer to one question, with provenance.
#[derive(Debug, Clone, Serialize)]
pub struct QaResponse {
    pub answer: String,
    /// Ascending comma-separated page list, e.g. `"2, 7, 10"` or `"N/A"`.
    pub cited_pages: String,
    pub sources: Vec<ScoredChunk>,
}

/// Load → split → embed → index → retrieve → generate → cite.
pub struct QaPipeline {
    embedder: Arc<dyn Embedder>,
    provider: Arc<dyn LlmProvider>,
    options: QaOptions,
    cache: IndexCache,
}

impl QaPipeline {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        provider: Arc<dyn LlmProvider>,
        options: QaOptions,
    ) -> Self {
        Self {
            embedder,
            provider,
            options,
            cache: IndexCache::default(),
        }
    }

    /// Build embedder and provider from config.
    pub fn from_config(config: &Config) -> Result<Self, PipelineError> {
        let embedder = create_embedder(&config.embedding)?;
        let provider = create_provider(&config.llm)?;
        let options = QaOptions {
            temperature: config.llm.temperature,
            max_tokens: config.llm.max_tokens,
            embed_batch_size: config.embedding.batch_size,
            ..QaOptions::default()
        };
        Ok(Self::new(embedder, provider, options))
    }

    pub fn options(&self) -> &QaOptions {
        &self.options
    }

    pub fn with_options(mut self, options: QaOptions) -> Self {
        self.options = options;
        self
    }

    /// Answer a question against a PDF on disk.
    pub async fn ask_file(
        &mut self,
        path: &Path,
        question: &str,
    ) -> Result<QaResponse, PipelineError> {
        let bytes = std::fs::read(path).map_err(pagecite_ingest::LoadError::Io)?;
        self.ask_bytes(&bytes, question).await
    }

    /// Answer a question against in-memory PDF bytes (server upload path).
    pub async fn ask_bytes(
        &mut self,
        bytes: &[u8],
        question: &str,
    ) -> Result<QaResponse, PipelineError> {
        if question.trim().is_empty() {
            // An empty question is not an error; there is just nothing to
            // retrieve against.
            return Ok(QaResponse {
                answer: "No question was asked.".to_string(),
                cited_pages: collect_citations(&[]),
                sources: Vec::new(),
            });
        }

        let index = self.index_for(bytes).await?;
        self.answer_with(&index, question).await
    }

    /// Fetch or build the vector index for a document.
    ///
    /// Cache key is the SHA-256 of the file content, so a re-asked question
    /// against the unchanged file skips load/split/embed entirely and a new
    /// upload invalidates naturally.
    async fn index_for(&mut self, bytes: &[u8]) -> Result<Arc<VectorIndex>, PipelineError> {
        let key = IndexCache::fingerprint(bytes);
        if let Some(index) = self.cache.get(&key) {
            debug!("index cache hit for {key}");
            return Ok(index);
        }

        let pages = load_pdf_bytes(bytes)?;
        let index = Arc::new(self.build_index(&pages).await?);
        self.cache.put(key, Arc::clone(&index));
        Ok(index)
    }

    /// Split pages into chunks, embed them in batches, and index them.
    pub async fn build_index(&self, pages: &[PageRecord]) -> Result<VectorIndex, PipelineError> {
        let chunks = split_pages(pages, &self.options.split);
        info!("Split {} pages into {} chunks", pages.len(), chunks.len());

        let mut index = VectorIndex::new(self.embedder.dimensions());
        for batch in chunks.chunks(self.options.embed_batch_size.max(1)) {
            let texts: Vec<&str> = batch.iter().map(|c| c.text.as_str()).collect();
            let embeddings = self.embedder.embed_batch(&texts).await?;
            for (chunk, embedding) in batch.iter().zip(embeddings) {
                index.insert(embedding, chunk.clone())?;
            }
        }
        Ok(index)
    }

    /// Retrieve context, generate an answer, and collect citations.
    pub async fn answer_with(
        &self,
        index: &VectorIndex,
        question: &str,
    ) -> Result<QaResponse, PipelineError> {
        let query_embedding = self.embedder.embed_query(question).await?;
        let sources = index.search(&query_embedding, self.options.top_k);
        debug!("Retrieved {} chunks for question", sources.len());

        let messages = build_messages(&sources, question);
        let answer = self
            .provider
            .complete(messages, self.options.temperature, self.options.max_tokens)
            .await?;

        let cited_pages = collect_citations(&sources);
        Ok(QaResponse {
            answer,
            cited_pages,
            sources,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pagecite_ingest::embedding::EmbeddingError;
    use pagecite_llm::{LlmError, Message};

    /// Deterministic embedder: direction depends on which marker words the
    /// text contains, so retrieval is predictable without a model.
    struct MockEmbedder;

    fn axis(text: &str) -> usize {
        if text.contains("alpha") {
            0
        } else if text.contains("beta") {
            1
        } else {
            2
        }
    }

    #[async_trait]
    impl Embedder for MockEmbedder {
        async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
            Ok(texts
                .iter()
                .map(|t| {
                    let mut v = vec![0.0f32; 3];
                    v[axis(t)] = 1.0;
                    v
                })
                .collect())
        }

        fn dimensions(&self) -> usize {
            3
        }
    }

    /// Provider that echoes the context it was given.
    struct MockProvider;

    #[async_trait]
    impl LlmProvider for MockProvider {
        async fn complete(
            &self,
            messages: Vec<Message>,
            _temperature: f32,
            _max_tokens: u32,
        ) -> Result<String, LlmError> {
            Ok(format!("answer based on: {}", messages[0].content))
        }
    }

    /// Counts index-build embedding batches. Query embeds are answered
    /// directly so the count reflects build work only.
    struct CountingEmbedder {
        batches: std::sync::atomic::AtomicUsize,
    }

    #[async_trait]
    impl Embedder for CountingEmbedder {
        async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
            self.batches
                .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            MockEmbedder.embed_batch(texts).await
        }

        fn dimensions(&self) -> usize {
            3
        }

        async fn embed_query(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
            let mut v = vec![0.0f32; 3];
            v[axis(text)] = 1.0;
            Ok(v)
        }
    }

    /// Assemble a one-page PDF containing `text`, with a correct xref table
    /// computed from the actual byte offsets.
    fn minimal_pdf(text: &str) -> Vec<u8> {
        let stream = format!("BT /F1 12 Tf 72 720 Td ({text}) Tj ET");
        let objects = [
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents 4 0 R \
             /Resources << /Font << /F1 5 0 R >> >> >>"
                .to_string(),
            format!(
                "<< /Length {} >>\nstream\n{}\nendstream",
                stream.len(),
                stream
            ),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
        ];

        let mut out = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::new();
        for (i, body) in objects.iter().enumerate() {
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
        }
        let xref_start = out.len();
        let mut xref = String::from("xref\n0 6\n0000000000 65535 f \n");
        for offset in &offsets {
            xref.push_str(&format!("{offset:010} 00000 n \n"));
        }
        out.extend_from_slice(xref.as_bytes());
        out.extend_from_slice(
            format!("trailer\n<< /Size 6 /Root 1 0 R >>\nstartxref\n{xref_start}\n%%EOF\n")
                .as_bytes(),
        );
        out
    }

    fn pipeline() -> QaPipeline {
        QaPipeline::new(Arc::new(MockEmbedder), Arc::new(MockProvider), QaOptions::default())
    }

    fn pages(texts: &[&str]) -> Vec<PageRecord> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| PageRecord {
                page_number: i + 1,
                text: t.to_string(),
            })
            .collect()
    }

    #[tokio::test]
    async fn retrieves_matching_chunk_and_cites_its_page() {
        let p = pipeline();
        let index = p
            .build_index(&pages(&["alpha facts here", "beta facts here"]))
            .await
            .unwrap();

        let response = p.answer_with(&index, "tell me about alpha").await.unwrap();
        assert!(response.answer.contains("alpha facts"));
        assert_eq!(response.sources[0].chunk.page_number, Some(1));
        assert!(response.cited_pages.starts_with('1'));
    }

    #[tokio::test]
    async fn citations_are_deduplicated_and_ascending() {
        let p = pipeline();
        // Two alpha pages, both retrieved; each page yields one chunk.
        let index = p
            .build_index(&pages(&["alpha one", "beta filler", "alpha two"]))
            .await
            .unwrap();

        let response = p.answer_with(&index, "alpha?").await.unwrap();
        let cited: Vec<&str> = response.cited_pages.split(", ").collect();
        let mut sorted = cited.clone();
        sorted.sort_by_key(|s| s.parse::<usize>().unwrap_or(usize::MAX));
        assert_eq!(cited, sorted);
        let unique: std::collections::HashSet<&&str> = cited.iter().collect();
        assert_eq!(unique.len(), cited.len());
    }

    #[tokio::test]
    async fn sources_come_only_from_the_indexed_document() {
        let p = pipeline();
        let index = p.build_index(&pages(&["alpha", "beta"])).await.unwrap();
        let response = p.answer_with(&index, "anything").await.unwrap();
        assert!(response
            .sources
            .iter()
            .all(|s| matches!(s.chunk.page_number, Some(1) | Some(2))));
    }

    #[tokio::test]
    async fn empty_question_is_not_an_error() {
        let mut p = pipeline();
        let response = p.ask_bytes(b"irrelevant", "   ").await.unwrap();
        assert!(!response.answer.is_empty());
        assert_eq!(response.cited_pages, "N/A");
        assert!(response.sources.is_empty());
    }

    #[tokio::test]
    async fn invalid_pdf_surfaces_load_error() {
        let mut p = pipeline();
        let err = p.ask_bytes(b"not a pdf", "real question").await.unwrap_err();
        assert!(matches!(err, PipelineError::Load(_)));
    }

    #[tokio::test]
    async fn missing_file_surfaces_load_error() {
        let mut p = pipeline();
        let err = p
            .ask_file(Path::new("/no/such/file.pdf"), "question")
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::Load(_)));
    }

    #[tokio::test]
    async fn unchanged_bytes_skip_rebuilding_the_index() {
        use std::sync::atomic::Ordering;

        let embedder = Arc::new(CountingEmbedder {
            batches: std::sync::atomic::AtomicUsize::new(0),
        });
        let mut p = QaPipeline::new(
            Arc::clone(&embedder) as Arc<dyn Embedder>,
            Arc::new(MockProvider),
            QaOptions::default(),
        );
        let bytes = minimal_pdf("alpha facts here");

        let first = p.ask_bytes(&bytes, "alpha?").await.unwrap();
        assert!(first.answer.contains("alpha facts"));
        let batches_after_first = embedder.batches.load(Ordering::SeqCst);
        assert!(batches_after_first >= 1);

        // Same bytes again: the content-hash cache serves the index, so no
        // further batch embedding happens.
        let second = p.ask_bytes(&bytes, "more alpha?").await.unwrap();
        assert!(second.answer.contains("alpha facts"));
        assert_eq!(embedder.batches.load(Ordering::SeqCst), batches_after_first);
    }

    #[tokio::test]
    async fn top_k_bounds_retrieved_context() {
        let p = pipeline();
        let many: Vec<String> = (0..10).map(|i| format!("alpha page {i}")).collect();
        let refs: Vec<&str> = many.iter().map(String::as_str).collect();
        let index = p.build_index(&pages(&refs)).await.unwrap();
        let response = p.answer_with(&index, "alpha").await.unwrap();
        assert_eq!(response.sources.len(), DEFAULT_TOP_K);
    }
}
