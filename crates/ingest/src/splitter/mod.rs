//! Page-aware chunk splitter.
//!
//! Breaks each page's text into overlapping fixed-size character windows.
//! Splitting is applied independently per page, so no chunk ever crosses a
//! page boundary and every chunk carries the page number it was sliced from.

mod types;
mod windows;

pub use types::{Chunk, SplitConfig};
pub use windows::split_pages;
