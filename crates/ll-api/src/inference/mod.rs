//! Log analysis backends.
//!
//! An [`AnalysisBackend`] turns a finished prompt into analysis text by
//! calling an external provider. Every provider failure is reported as an
//! [`AnalysisError`] so the caller can map it to the response envelope.

pub mod gemini;

use async_trait::async_trait;

use crate::error::AnalysisError;

pub use gemini::GeminiClient;

/// One outbound analysis request.
#[derive(Clone, Copy)]
pub struct ProviderCall<'a> {
    /// Provider base URL, e.g. "https://generativelanguage.googleapis.com".
    pub endpoint: &'a str,
    /// Model identifier, e.g. "gemini-2.0-flash".
    pub model: &'a str,
    pub credential: &'a str,
    pub prompt: &'a str,
}

impl std::fmt::Debug for ProviderCall<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderCall")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("credential", &"[REDACTED]")
            .field("prompt_len", &self.prompt.len())
            .finish()
    }
}

/// Trait for providers that analyze a prompt and return text.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// Perform one call. No retries.
    async fn generate(&self, call: &ProviderCall<'_>) -> Result<String, AnalysisError>;

    /// Name of this backend (for logging).
    fn backend_name(&self) -> &str;
}
