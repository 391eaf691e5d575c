//! Shared application state for the Axum server.
//!
//! Supports two storage modes:
//! - **Database mode**: `PgDurableStore` over a `PgPool` (production).
//! - **In-memory mode**: `MemoryDurableStore` with sample logs (tests and development).
//!
//! Both sit behind the same LRU cache in a cache-aside `LogStore`.

use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;

use crate::analysis::AnalysisService;
use crate::config::AiConfig;
use crate::inference::{AnalysisBackend, GeminiClient};
use crate::store::{
    DurableStore, LogCache, LogStore, LruLogCache, MemoryDurableStore, PgDurableStore,
};

const DEFAULT_CACHE_CAPACITY: usize = 1024;
const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(600);

/// Shared application state, cheap to clone for Axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// Cache-aside log storage.
    pub store: LogStore,
    /// Analysis pipeline.
    pub analysis: Arc<AnalysisService>,
}

impl AppState {
    /// Assemble state from explicitly constructed parts.
    pub fn new(
        durable: Arc<dyn DurableStore>,
        cache: Arc<dyn LogCache>,
        analysis: AnalysisService,
    ) -> Self {
        Self {
            store: LogStore::new(durable, cache),
            analysis: Arc::new(analysis),
        }
    }

    /// Create state backed by a PostgreSQL pool.
    pub fn with_pool(pool: PgPool, cache: Arc<LruLogCache>, ai: Option<AiConfig>) -> Self {
        Self::new(
            Arc::new(PgDurableStore::new(pool)),
            cache,
            AnalysisService::new(ai, Arc::new(GeminiClient::new())),
        )
    }

    /// Create in-memory state with sample logs (`crash01`, `clean01`).
    pub fn with_sample_data(cache: Arc<LruLogCache>, ai: Option<AiConfig>) -> Self {
        Self::new(
            Arc::new(MemoryDurableStore::with_sample_data()),
            cache,
            AnalysisService::new(ai, Arc::new(GeminiClient::new())),
        )
    }

    /// In-memory state over the given store and backend (for tests).
    pub fn in_memory(
        durable: Arc<MemoryDurableStore>,
        ai: Option<AiConfig>,
        backend: Arc<dyn AnalysisBackend>,
    ) -> Self {
        Self::new(
            durable,
            Arc::new(LruLogCache::new(DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL)),
            AnalysisService::new(ai, backend),
        )
    }
}
