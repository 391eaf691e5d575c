//! Cache-aside log storage.
//!
//! [`LogStore`] answers existence and content queries for a [`LogId`] by
//! consulting a [`LogCache`] first and falling back to a [`DurableStore`].
//! The durable store owns every log; the cache only holds expiring copies,
//! so any cache failure degrades latency, never availability.

pub mod cache;
pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use ll_protocol::LogId;

pub use cache::LruLogCache;
pub use memory::MemoryDurableStore;
pub use postgres::PgDurableStore;

/// Errors from the storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("cache error: {0}")]
    Cache(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A stored log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Log {
    pub id: LogId,
    pub content: String,
}

/// Persistent owner of log content.
#[async_trait]
pub trait DurableStore: Send + Sync {
    /// Whether a log exists, without fetching its content.
    async fn exists(&self, id: &LogId) -> StoreResult<bool>;

    /// Fetch the full content. `Ok(None)` means the log does not exist.
    async fn fetch(&self, id: &LogId) -> StoreResult<Option<String>>;

    /// Backend name (for logging).
    fn backend_name(&self) -> &str;
}

/// Fast, lossy read cache in front of a [`DurableStore`].
#[async_trait]
pub trait LogCache: Send + Sync {
    async fn get(&self, id: &LogId) -> StoreResult<Option<String>>;

    /// Whether a live entry exists, without copying its content.
    async fn contains(&self, id: &LogId) -> StoreResult<bool>;

    async fn put(&self, id: &LogId, content: &str) -> StoreResult<()>;
}

/// Cache-aside read path over an injected cache and durable store.
#[derive(Clone)]
pub struct LogStore {
    durable: Arc<dyn DurableStore>,
    cache: Arc<dyn LogCache>,
}

impl LogStore {
    pub fn new(durable: Arc<dyn DurableStore>, cache: Arc<dyn LogCache>) -> Self {
        Self { durable, cache }
    }

    /// Whether a log is known for `id`.
    ///
    /// A cached copy answers immediately; otherwise the durable store's
    /// existence check is used, which never loads content.
    pub async fn exists(&self, id: &LogId) -> StoreResult<bool> {
        match self.cache.contains(id).await {
            Ok(true) => return Ok(true),
            Ok(false) => {}
            Err(e) => {
                tracing::warn!(log_id = %id, error = %e, "cache read failed, using durable store");
            }
        }
        self.durable.exists(id).await
    }

    /// Fetch a log. `Ok(None)` means not found; `Err` means the durable
    /// store could not be reached.
    pub async fn get(&self, id: &LogId) -> StoreResult<Option<Log>> {
        match self.cache.get(id).await {
            Ok(Some(content)) => {
                tracing::debug!(log_id = %id, "cache hit");
                return Ok(Some(Log {
                    id: id.clone(),
                    content,
                }));
            }
            Ok(None) => tracing::debug!(log_id = %id, "cache miss"),
            Err(e) => {
                tracing::warn!(log_id = %id, error = %e, "cache read failed, using durable store");
            }
        }

        let Some(content) = self.durable.fetch(id).await? else {
            return Ok(None);
        };

        if let Err(e) = self.cache.put(id, &content).await {
            tracing::warn!(log_id = %id, error = %e, "cache populate failed");
        }

        Ok(Some(Log {
            id: id.clone(),
            content,
        }))
    }

    pub fn backend_name(&self) -> &str {
        self.durable.backend_name()
    }
}
