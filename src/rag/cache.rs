//! Embedding cache.
//!
//! Avoids re-computing vectors for unchanged content. Keys are SHA-256 hashes
//! of `text | model id`, so identical text embedded under different models
//! never collides.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use parking_lot::RwLock;
use sha2::{Digest, Sha256};

/// Statistics for cache performance monitoring.
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entry_count: usize,
    pub evictions: u64,
}

impl CacheStats {
    /// Hit rate as a percentage.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

struct CacheEntry {
    embedding: Vec<f32>,
    last_accessed: Instant,
}

/// In-memory embedding cache with LRU eviction.
///
/// Thread-safe via `parking_lot::RwLock`. When the entry count exceeds
/// `max_entries`, the least recently used entry is evicted.
pub struct EmbeddingCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    max_entries: usize,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl EmbeddingCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            max_entries,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    /// Compute the cache key for the given text and model.
    pub fn compute_key(&self, text: &str, model: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());
        hasher.update(b"|");
        hasher.update(model.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Get an embedding from the cache.
    pub fn get(&self, key: &str) -> Option<Vec<f32>> {
        let mut entries = self.entries.write();
        if let Some(entry) = entries.get_mut(key) {
            entry.last_accessed = Instant::now();
            self.hits.fetch_add(1, Ordering::Relaxed);
            Some(entry.embedding.clone())
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            None
        }
    }

    /// Store an embedding, evicting the least recently used entry if full.
    pub fn set(&self, key: &str, embedding: Vec<f32>) {
        let mut entries = self.entries.write();

        if !entries.contains_key(key) && entries.len() >= self.max_entries {
            let lru_key = entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_accessed)
                .map(|(key, _)| key.clone());
            if let Some(lru_key) = lru_key {
                entries.remove(&lru_key);
                self.evictions.fetch_add(1, Ordering::Relaxed);
            }
        }

        entries.insert(
            key.to_string(),
            CacheEntry {
                embedding,
                last_accessed: Instant::now(),
            },
        );
    }

    /// Clear all entries.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entry_count: self.entries.read().len(),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
