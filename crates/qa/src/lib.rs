//! Retrieval-augmented question answering over one PDF.
//!
//! A single linear sequence per question: load → split → embed → index →
//! retrieve → generate → cite. No persistent intermediate state; the only
//! shortcut is the content-hash index cache for an unchanged file.

pub mod citations;
pub mod error;
pub mod pipeline;
pub mod prompt;

pub use citations::collect_citations;
pub use error::PipelineError;
pub use pipeline::{QaOptions, QaPipeline, QaResponse};
