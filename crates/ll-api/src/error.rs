//! Error types and their HTTP mapping.
//!
//! - [`ApiError`]: generic JSON errors for plain routes (`/1/raw`).
//! - [`AnalysisError`]: every way an analysis request can fail. Only the
//!   route handler turns it into a status code and envelope message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use ll_protocol::{IdError, LogId};

use crate::config::CredentialHint;

/// Raw provider bodies are cut to this many characters in failure messages.
pub const MAX_BODY_EXCERPT: usize = 200;

/// API error type that converts to proper HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Convenience alias.
pub type ApiResult<T> = Result<T, ApiError>;

/// Failure taxonomy of the analysis pipeline.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("invalid log identifier: {0}")]
    InvalidIdentifier(#[from] IdError),

    #[error("log {0} not found")]
    NotFound(LogId),

    #[error("AI configuration missing: {0}")]
    ConfigMissing(String),

    #[error("AI credential is empty or still the placeholder")]
    ConfigPlaceholder,

    #[error("could not read log data: {0}")]
    ContentUnreadable(String),

    #[error("failed to encode payload JSON: {0}")]
    EncodingFailure(String),

    #[error("transport failure (status {status:?}): {error}")]
    TransportFailure { status: Option<u16>, error: String },

    #[error("upstream returned HTTP {status}")]
    UpstreamError { status: u16, body: String },

    #[error("upstream returned an empty response")]
    UpstreamEmptyResponse { body: String },
}

impl AnalysisError {
    /// HTTP status for the envelope. Upstream problems still answer 200.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AnalysisError::InvalidIdentifier(_) | AnalysisError::NotFound(_) => {
                StatusCode::NOT_FOUND
            }
            AnalysisError::ConfigMissing(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::OK,
        }
    }

    /// User-facing message for the envelope's `analysis` field.
    ///
    /// `hint` is appended to provider failures only; pass None unless the
    /// operator enabled key diagnostics.
    pub fn describe(&self, hint: Option<&CredentialHint>) -> String {
        match self {
            AnalysisError::InvalidIdentifier(_) | AnalysisError::NotFound(_) => {
                "Log not found".into()
            }
            AnalysisError::ConfigMissing(_) => "AI Configuration missing".into(),
            AnalysisError::ConfigPlaceholder => {
                "Please configure your Gemini API Key in the AI configuration file".into()
            }
            AnalysisError::ContentUnreadable(_) => "Could not read log data".into(),
            AnalysisError::EncodingFailure(e) => format!("Failed to encode payload JSON: {e}"),
            AnalysisError::UpstreamEmptyResponse { body } => {
                format!("AI returned an empty response. Response: {body}")
            }
            AnalysisError::TransportFailure { status, error } => {
                let mut msg = match status {
                    Some(code) => format!("AI Request Failed (HTTP {code})."),
                    None => "AI Request Failed (no HTTP response).".to_string(),
                };
                msg.push_str(&format!(" Transport Error: {error}"));
                append_hint(msg, hint)
            }
            AnalysisError::UpstreamError { status, body } => {
                let mut msg = format!("AI Request Failed (HTTP {status}).");
                if !body.is_empty() {
                    match upstream_message(body) {
                        Some(api_msg) => msg.push_str(&format!(" API Message: {api_msg}")),
                        None => msg.push_str(&format!(
                            " Response: {}",
                            truncate_chars(body, MAX_BODY_EXCERPT)
                        )),
                    }
                }
                append_hint(msg, hint)
            }
        }
    }
}

fn append_hint(mut msg: String, hint: Option<&CredentialHint>) -> String {
    if let Some(hint) = hint {
        msg.push(' ');
        msg.push_str(&hint.to_string());
    }
    msg
}

/// `error.message` from a provider error body, if present.
fn upstream_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .pointer("/error/message")
        .and_then(|m| m.as_str())
        .map(String::from)
}

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
