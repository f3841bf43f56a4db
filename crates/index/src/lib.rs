//! In-memory embedding index.
//!
//! Brute-force cosine similarity over (embedding, chunk) pairs, plus an LRU
//! cache of built indexes keyed by document content hash so repeat questions
//! against an unchanged file skip the load/split/embed sequence.

pub mod cache;
pub mod store;

pub use cache::IndexCache;
pub use store::{IndexError, ScoredChunk, VectorIndex, DEFAULT_TOP_K};
