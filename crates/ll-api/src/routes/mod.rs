//! API route definitions and router builder.

pub mod analysis;
pub mod health;
pub mod raw;

use axum::Router;
use axum::routing::get;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Catch-all so that any path remainder reaches LogId::parse.
    let v1 = Router::new()
        .route("/ai-analysis/", get(analysis::analyze_without_id))
        .route("/ai-analysis/{*id}", get(analysis::analyze_log))
        .route("/raw/{*id}", get(raw::get_raw));

    Router::new()
        .route("/health", get(health::health))
        .nest("/1", v1)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::config::AiConfig;
    use crate::error::AnalysisError;
    use crate::inference::{AnalysisBackend, ProviderCall};
    use crate::store::MemoryDurableStore;

    /// Backend that echoes the prompt length.
    struct EchoBackend;

    #[async_trait]
    impl AnalysisBackend for EchoBackend {
        async fn generate(&self, call: &ProviderCall<'_>) -> Result<String, AnalysisError> {
            Ok(format!("analyzed {} chars", call.prompt.len()))
        }

        fn backend_name(&self) -> &str {
            "echo"
        }
    }

    fn ai() -> AiConfig {
        toml::from_str("api_key = \"AIzaSyTest\"").unwrap()
    }

    fn app_with(ai: Option<AiConfig>) -> Router {
        build_router(AppState::in_memory(
            Arc::new(MemoryDurableStore::with_sample_data()),
            ai,
            Arc::new(EchoBackend),
        ))
    }

    fn app() -> Router {
        app_with(Some(ai()))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let (status, json) = get_json(app(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["storage"], "memory");
        assert_eq!(json["ai_configured"], true);
    }

    #[tokio::test]
    async fn analysis_success() {
        let (status, json) = get_json(app(), "/1/ai-analysis/crash01").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert!(json["analysis"].as_str().unwrap().starts_with("analyzed "));
    }

    #[tokio::test]
    async fn analysis_ignores_query_string() {
        let (status, json) = get_json(app(), "/1/ai-analysis/crash01?lang=en").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
    }

    #[tokio::test]
    async fn analysis_unknown_log() {
        let (status, json) = get_json(app(), "/1/ai-analysis/nonexistent").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["success"], false);
        assert_eq!(json["analysis"], "Log not found");
    }

    #[tokio::test]
    async fn analysis_invalid_id() {
        let (status, json) = get_json(app(), "/1/ai-analysis/bad%20id").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn analysis_multi_segment_ids_get_envelope() {
        for uri in [
            "/1/ai-analysis/a/b",
            "/1/ai-analysis/crash01/",
            "/1/ai-analysis//x",
        ] {
            let (status, json) = get_json(app(), uri).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
            assert_eq!(json["success"], false, "{uri}");
            assert_eq!(json["analysis"], "Log not found", "{uri}");
        }
    }

    #[tokio::test]
    async fn analysis_empty_id() {
        let (status, json) = get_json(app(), "/1/ai-analysis/").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn analysis_without_config() {
        let (status, json) = get_json(app_with(None), "/1/ai-analysis/crash01").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["success"], false);
        assert_eq!(json["analysis"], "AI Configuration missing");
    }

    #[tokio::test]
    async fn cors_headers_present() {
        let response = app()
            .oneshot(
                Request::get("/1/ai-analysis/crash01")
                    .header("origin", "https://example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "*"
        );
    }

    #[tokio::test]
    async fn raw_returns_plain_text() {
        let response = app()
            .oneshot(Request::get("/1/raw/clean01").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response.headers()["content-type"]
                .to_str()
                .unwrap()
                .starts_with("text/plain")
        );
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("Steve joined the game"));
    }

    #[tokio::test]
    async fn raw_unknown_log() {
        let (status, json) = get_json(app(), "/1/raw/nonexistent").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["status"], 404);
    }

    #[tokio::test]
    async fn raw_invalid_id() {
        let (status, _) = get_json(app(), "/1/raw/a.b").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, json) = get_json(app(), "/1/raw/clean01/extra").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["status"], 404);
    }
}
