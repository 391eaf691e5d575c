//! PostgreSQL-backed durable store.

use async_trait::async_trait;
use sqlx::PgPool;

use ll_protocol::LogId;

use super::{DurableStore, StoreResult};
use crate::db;

/// Durable store over the `logs` table.
#[derive(Clone)]
pub struct PgDurableStore {
    pool: PgPool,
}

impl PgDurableStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DurableStore for PgDurableStore {
    async fn exists(&self, id: &LogId) -> StoreResult<bool> {
        Ok(db::logs::exists(&self.pool, id.as_str()).await?)
    }

    async fn fetch(&self, id: &LogId) -> StoreResult<Option<String>> {
        Ok(db::logs::get_content(&self.pool, id.as_str()).await?)
    }

    fn backend_name(&self) -> &str {
        "postgres"
    }
}
