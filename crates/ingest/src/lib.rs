pub mod document;
pub mod embedding;
pub mod splitter;

pub use document::{load_pdf, load_pdf_bytes, LoadError, PageRecord};
pub use splitter::{split_pages, Chunk, SplitConfig};
