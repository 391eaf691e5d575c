//! Gemini `generateContent` client.
//!
//! Sends the prompt as `{"contents":[{"parts":[{"text": ...}]}]}` to
//! `{endpoint}/v1beta/models/{model}:generateContent?key={credential}` and
//! reads the analysis from `candidates[0].content.parts[0].text`.

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;

use super::{AnalysisBackend, ProviderCall};
use crate::error::AnalysisError;

/// `generateContent` request body.
#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

/// Serialize the request body before any network activity.
fn encode_request(prompt: &str) -> Result<String, AnalysisError> {
    let body = GenerateContentRequest {
        contents: vec![Content {
            parts: vec![Part { text: prompt }],
        }],
    };
    serde_json::to_string(&body).map_err(|e| AnalysisError::EncodingFailure(e.to_string()))
}

/// `candidates[0].content.parts[0].text`, if the body has it.
fn extract_text(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(|t| t.as_str())
        .map(String::from)
}

fn endpoint_url(endpoint: &str, model: &str) -> String {
    format!(
        "{}/v1beta/models/{model}:generateContent",
        endpoint.trim_end_matches('/')
    )
}

/// HTTP client for the Gemini API. Cheap to clone; shares one connection pool.
#[derive(Clone, Default)]
pub struct GeminiClient {
    client: reqwest::Client,
}

impl GeminiClient {
    /// Client with transport-default timeouts. Callers bound latency
    /// themselves (see `AnalysisService`).
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AnalysisBackend for GeminiClient {
    async fn generate(&self, call: &ProviderCall<'_>) -> Result<String, AnalysisError> {
        let body = encode_request(call.prompt)?;
        let url = endpoint_url(call.endpoint, call.model);

        let response = self
            .client
            .post(&url)
            .query(&[("key", call.credential)])
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            // without_url: the URL carries the credential
            .map_err(|e| AnalysisError::TransportFailure {
                status: e.status().map(|s| s.as_u16()),
                error: e.without_url().to_string(),
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AnalysisError::TransportFailure {
                status: Some(status.as_u16()),
                error: e.without_url().to_string(),
            })?;

        if status != StatusCode::OK {
            tracing::warn!(status = status.as_u16(), model = call.model, "gemini returned non-200");
            return Err(AnalysisError::UpstreamError {
                status: status.as_u16(),
                body: text,
            });
        }

        match extract_text(&text) {
            Some(analysis) => Ok(analysis),
            None => {
                tracing::warn!(body_len = text.len(), "gemini response missing candidate text");
                Err(AnalysisError::UpstreamEmptyResponse { body: text })
            }
        }
    }

    fn backend_name(&self) -> &str {
        "gemini"
    }
}
