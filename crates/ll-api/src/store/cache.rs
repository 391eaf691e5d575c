//! In-process LRU cache with per-entry TTL.

use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::Mutex;

use ll_protocol::LogId;

use super::{LogCache, StoreResult};

/// Cached copy of a log's content.
#[derive(Debug, Clone)]
struct CacheEntry {
    content: String,
    inserted_at: Instant,
}

/// LRU-bounded log cache; entries expire `ttl` after insertion.
pub struct LruLogCache {
    entries: Mutex<LruCache<LogId, CacheEntry>>,
    ttl: Duration,
}

impl LruLogCache {
    /// * `capacity` - Maximum number of cached logs (clamped to at least 1)
    /// * `ttl` - Lifetime of a cached copy
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl,
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Drop every expired entry.
    pub async fn prune_expired(&self) -> usize {
        let mut entries = self.entries.lock().await;
        let now = Instant::now();

        let expired: Vec<LogId> = entries
            .iter()
            .filter(|(_, entry)| now.duration_since(entry.inserted_at) >= self.ttl)
            .map(|(id, _)| id.clone())
            .collect();

        for id in &expired {
            entries.pop(id);
        }
        expired.len()
    }
}

#[async_trait]
impl LogCache for LruLogCache {
    async fn get(&self, id: &LogId) -> StoreResult<Option<String>> {
        let mut entries = self.entries.lock().await;

        let Some(entry) = entries.get(id) else {
            return Ok(None);
        };

        if entry.inserted_at.elapsed() < self.ttl {
            return Ok(Some(entry.content.clone()));
        }

        entries.pop(id);
        Ok(None)
    }

    async fn contains(&self, id: &LogId) -> StoreResult<bool> {
        let mut entries = self.entries.lock().await;

        let Some(entry) = entries.peek(id) else {
            return Ok(false);
        };

        if entry.inserted_at.elapsed() < self.ttl {
            return Ok(true);
        }

        entries.pop(id);
        Ok(false)
    }

    async fn put(&self, id: &LogId, content: &str) -> StoreResult<()> {
        let mut entries = self.entries.lock().await;
        entries.put(
            id.clone(),
            CacheEntry {
                content: content.to_string(),
                inserted_at: Instant::now(),
            },
        );
        Ok(())
    }
}
