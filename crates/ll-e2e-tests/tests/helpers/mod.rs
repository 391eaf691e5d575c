//! Shared test harness for E2E integration tests.
//!
//! Wires the real router, cache-aside store and Gemini client together,
//! with an in-memory durable store and a wiremock server standing in for
//! the analysis provider.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ll_api::config::AiConfig;
use ll_api::inference::GeminiClient;
use ll_api::routes::build_router;
use ll_api::state::AppState;
use ll_api::store::MemoryDurableStore;
use ll_protocol::{AnalysisResult, LogId};

pub const TEST_KEY: &str = "AIzaSyE2eTestKey";
pub const MODEL: &str = "gemini-2.0-flash";
pub const GENERATE_PATH: &str = "/v1beta/models/gemini-2.0-flash:generateContent";

/// AI config pointed at the mock provider.
pub fn ai_config(endpoint: &str) -> AiConfig {
    toml::from_str(&format!(
        "api_key = \"{TEST_KEY}\"\nendpoint = \"{endpoint}\"\nmodel = \"{MODEL}\"\ntimeout_secs = 2\n"
    ))
    .unwrap()
}

/// Gemini success body carrying `text`.
pub fn gemini_response(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP",
            "index": 0
        }],
        "modelVersion": MODEL
    })
}

/// End-to-end harness: router + in-memory logs + mock provider.
pub struct TestHarness {
    pub provider: MockServer,
    pub logs: Arc<MemoryDurableStore>,
    pub router: Router,
}

impl TestHarness {
    /// Harness with a valid AI config and no logs.
    pub async fn new() -> Self {
        Self::with_config(|endpoint| Some(ai_config(endpoint))).await
    }

    /// Harness whose AI config is derived from the mock provider URI.
    pub async fn with_config(make: impl FnOnce(&str) -> Option<AiConfig>) -> Self {
        let provider = MockServer::start().await;
        let logs = Arc::new(MemoryDurableStore::new());
        let state = AppState::in_memory(
            logs.clone(),
            make(&provider.uri()),
            Arc::new(GeminiClient::new()),
        );
        Self {
            provider,
            logs,
            router: build_router(state),
        }
    }

    pub async fn add_log(&self, id: &str, content: impl Into<String>) {
        self.logs.insert(LogId::parse(id).unwrap(), content).await;
    }

    /// Provider answers 200 with `text` as the analysis.
    pub async fn provider_replies(&self, text: &str) {
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(query_param("key", TEST_KEY))
            .respond_with(ResponseTemplate::new(200).set_body_json(gemini_response(text)))
            .mount(&self.provider)
            .await;
    }

    /// Provider answers with an arbitrary status and raw body.
    pub async fn provider_responds(&self, response: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(response)
            .mount(&self.provider)
            .await;
    }

    /// GET /1/ai-analysis/{id}. Returns (status, envelope).
    pub async fn analyze(&self, id: &str) -> (StatusCode, AnalysisResult) {
        let (status, bytes) = self.get(&format!("/1/ai-analysis/{id}")).await;
        let envelope: AnalysisResult = serde_json::from_slice(&bytes).unwrap();
        (status, envelope)
    }

    /// GET /1/raw/{id}. Returns (status, body text).
    pub async fn raw(&self, id: &str) -> (StatusCode, String) {
        let (status, bytes) = self.get(&format!("/1/raw/{id}")).await;
        (status, String::from_utf8(bytes).unwrap())
    }

    async fn get(&self, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = self
            .router
            .clone()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    /// Number of calls the provider received.
    pub async fn provider_calls(&self) -> usize {
        self.provider
            .received_requests()
            .await
            .map(|r| r.len())
            .unwrap_or(0)
    }

    /// Prompt text of the most recent provider call.
    pub async fn last_prompt(&self) -> String {
        let requests = self.provider.received_requests().await.unwrap();
        let last = requests.last().expect("provider was not called");
        let body: serde_json::Value = serde_json::from_slice(&last.body).unwrap();
        body.pointer("/contents/0/parts/0/text")
            .and_then(|t| t.as_str())
            .unwrap()
            .to_string()
    }
}

/// Line block of a prompt: the text between the excerpt heading and the
/// context heading.
pub fn excerpt_block(prompt: &str) -> Vec<String> {
    let start = prompt.find("### Log Excerpt (Errors/Warnings):\n").unwrap()
        + "### Log Excerpt (Errors/Warnings):\n".len();
    let end = prompt.find("\n\n### End of Log (Context):\n").unwrap();
    prompt[start..end].split('\n').map(String::from).collect()
}

/// Trailing-context section of a prompt.
pub fn context_block(prompt: &str) -> String {
    let start = prompt.find("### End of Log (Context):\n").unwrap()
        + "### End of Log (Context):\n".len();
    let end = prompt.rfind("\n\nProvide your analysis in Markdown.").unwrap();
    prompt[start..end].to_string()
}
