//! LogLens API: log sharing and AI analysis REST server.
//!
//! Serves raw logs by identifier and analyzes them through an external
//! text-analysis provider, with a cache-aside store in front of PostgreSQL.

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use ll_api::config::{AiConfig, ApiConfig};
use ll_api::db;
use ll_api::routes;
use ll_api::state::AppState;
use ll_api::store::LruLogCache;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "ll-api starting");

    let config = ApiConfig::from_env();

    // A missing AI config is not fatal: analysis requests answer 500 until it exists.
    let ai = match AiConfig::from_file(&config.ai_config_path) {
        Ok(ai) => {
            tracing::info!(model = %ai.model, endpoint = %ai.endpoint, "AI config loaded");
            if ai.credential().is_none() {
                tracing::warn!("AI api_key is empty or still the placeholder");
            }
            if ai.key_diagnostics {
                tracing::warn!("key_diagnostics enabled, credential hints appear in responses");
            }
            Some(ai)
        }
        Err(e) => {
            tracing::warn!(error = %e, "AI config unavailable, analysis disabled");
            None
        }
    };

    let cache = Arc::new(LruLogCache::new(config.cache_capacity, config.cache_ttl()));

    // Connect to PostgreSQL if DATABASE_URL is set, otherwise use in-memory state.
    let state = if let Some(database_url) = &config.database_url {
        tracing::info!("connecting to PostgreSQL");
        let pool = db::connect(database_url).await?;
        AppState::with_pool(pool, cache.clone(), ai)
    } else {
        tracing::warn!("DATABASE_URL not set, using in-memory state with sample logs");
        AppState::with_sample_data(cache.clone(), ai)
    };

    // Expired entries are otherwise only dropped when read.
    let prune_every = config.cache_ttl().max(Duration::from_secs(1));
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(prune_every);
        loop {
            interval.tick().await;
            let pruned = cache.prune_expired().await;
            if pruned > 0 {
                tracing::debug!(pruned, "pruned expired cache entries");
            }
        }
    });

    let app = routes::build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "listening");

    axum::serve(listener, app).await?;

    Ok(())
}
