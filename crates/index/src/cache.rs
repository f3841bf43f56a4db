use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use sha2::{Digest, Sha256};

use crate::store::VectorIndex;

/// LRU cache mapping document content hash to a built index.
///
/// Re-asking a question against an unchanged file reuses the index instead
/// of re-running load/split/embed; uploading a different file simply misses
/// and the oldest entry is evicted.
pub struct IndexCache {
    cache: LruCache<String, Arc<VectorIndex>>,
    hits: u64,
    misses: u64,
}

impl IndexCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: LruCache::new(
                NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::new(1).unwrap()),
            ),
            hits: 0,
            misses: 0,
        }
    }

    /// Content hash used as cache key.
    pub fn fingerprint(bytes: &[u8]) -> String {
        format!("{:x}", Sha256::digest(bytes))
    }

    pub fn get(&mut self, key: &str) -> Option<Arc<VectorIndex>> {
        if let Some(index) = self.cache.get(key) {
            self.hits += 1;
            Some(Arc::clone(index))
        } else {
            self.misses += 1;
            None
        }
    }

    pub fn put(&mut self, key: String, index: Arc<VectorIndex>) {
        self.cache.put(key, index);
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

impl Default for IndexCache {
    fn default() -> Self {
        Self::new(4)
    }
}
