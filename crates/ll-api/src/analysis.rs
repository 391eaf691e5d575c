//! Log analysis pipeline.
//!
//! validate id → check existence → check AI config → load content →
//! excerpt → prompt → provider call (bounded by the configured timeout).

use std::sync::Arc;

use axum::http::StatusCode;
use tokio::time::timeout;

use ll_log_tools::{ExcerptExtractor, PromptBuilder};
use ll_protocol::{AnalysisResult, LogId};

use crate::config::AiConfig;
use crate::error::AnalysisError;
use crate::inference::{AnalysisBackend, ProviderCall};
use crate::store::LogStore;

/// Runs analysis requests against a log store and a provider backend.
pub struct AnalysisService {
    /// None when the AI config file was missing or invalid at startup.
    config: Option<AiConfig>,
    backend: Arc<dyn AnalysisBackend>,
    extractor: ExcerptExtractor,
    prompt: PromptBuilder,
}

impl AnalysisService {
    pub fn new(config: Option<AiConfig>, backend: Arc<dyn AnalysisBackend>) -> Self {
        let prompt = match &config {
            Some(ai) => PromptBuilder::new()
                .with_subject(ai.persona.clone(), ai.log_kind.clone())
                .with_language(ai.language.clone()),
            None => PromptBuilder::new(),
        };
        Self {
            config,
            backend,
            extractor: ExcerptExtractor::default(),
            prompt,
        }
    }

    /// Replace the default keyword extractor.
    pub fn with_extractor(mut self, extractor: ExcerptExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn config(&self) -> Option<&AiConfig> {
        self.config.as_ref()
    }

    /// Analyze the log addressed by an untrusted identifier.
    pub async fn analyze(&self, store: &LogStore, raw_id: &str) -> Result<String, AnalysisError> {
        let id = LogId::parse(raw_id)?;

        let exists = store
            .exists(&id)
            .await
            .map_err(|e| AnalysisError::ContentUnreadable(e.to_string()))?;
        if !exists {
            return Err(AnalysisError::NotFound(id));
        }

        let ai = self
            .config
            .as_ref()
            .ok_or_else(|| AnalysisError::ConfigMissing("AI config not loaded".into()))?;
        let credential = ai.credential().ok_or(AnalysisError::ConfigPlaceholder)?;

        let log = store
            .get(&id)
            .await
            .map_err(|e| AnalysisError::ContentUnreadable(e.to_string()))?
            .ok_or_else(|| AnalysisError::NotFound(id.clone()))?;

        let excerpt = self.extractor.extract(&log.content);
        let prompt = self.prompt.build(&excerpt);

        let call = ProviderCall {
            endpoint: &ai.endpoint,
            model: &ai.model,
            credential,
            prompt: &prompt,
        };

        tracing::info!(
            log_id = %id,
            backend = self.backend.backend_name(),
            model = %ai.model,
            excerpt_lines = excerpt.lines.len(),
            selection = excerpt.selection.as_str(),
            prompt_len = prompt.len(),
            "requesting log analysis"
        );

        match timeout(ai.timeout(), self.backend.generate(&call)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    log_id = %id,
                    timeout_secs = ai.timeout_secs,
                    "log analysis timed out"
                );
                Err(AnalysisError::TransportFailure {
                    status: None,
                    error: format!("request timed out after {}s", ai.timeout_secs),
                })
            }
        }
    }

    /// Map a pipeline outcome to its HTTP status and envelope.
    pub fn envelope(
        &self,
        outcome: Result<String, AnalysisError>,
    ) -> (StatusCode, AnalysisResult) {
        match outcome {
            Ok(analysis) => (StatusCode::OK, AnalysisResult::success(analysis)),
            Err(err) => {
                let hint = self.config.as_ref().and_then(AiConfig::credential_hint);
                (
                    err.status_code(),
                    AnalysisResult::failure(err.describe(hint.as_ref())),
                )
            }
        }
    }
}
