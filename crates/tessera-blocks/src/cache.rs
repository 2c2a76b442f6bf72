//! Bounded memo cache for compiled output.

use std::num::NonZeroUsize;
use std::sync::Mutex;

use lru::LruCache;
use sha2::{Digest, Sha256};
use tessera_model::{BlockConfigData, TemplateType};

use crate::compiler::GeneratedCode;

/// Cache key: SHA-256 of the template tag and the serialized config.
pub type CacheKey = [u8; 32];

/// LRU cache of compiled blocks keyed by input value.
#[derive(Debug)]
pub struct CompileCache {
    entries: Mutex<LruCache<CacheKey, GeneratedCode>>,
}

impl CompileCache {
    /// Create a cache holding at most `capacity` entries (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Key for a compile input, or `None` when the config cannot be serialized.
    pub fn key(template: TemplateType, config: &BlockConfigData) -> Option<CacheKey> {
        let body = serde_json::to_vec(config).ok()?;

        let mut hasher = Sha256::new();
        hasher.update(template.tag().as_bytes());
        hasher.update([0u8]);
        hasher.update(&body);
        Some(hasher.finalize().into())
    }

    pub fn get(&self, key: &CacheKey) -> Option<GeneratedCode> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.get(key).cloned()
    }

    pub fn insert(&self, key: CacheKey, code: GeneratedCode) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.put(key, code);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
