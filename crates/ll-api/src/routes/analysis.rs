//! AI analysis endpoint.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use ll_protocol::AnalysisResult;

use crate::state::AppState;

/// GET /1/ai-analysis/{id}: analyze a stored log.
///
/// Always answers with the `{success, analysis}` envelope: 404 for unknown
/// logs, 500 for missing AI configuration, 200 otherwise (including
/// provider failures).
pub async fn analyze_log(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> (StatusCode, Json<AnalysisResult>) {
    let outcome = state.analysis.analyze(&state.store, &raw_id).await;
    if let Err(e) = &outcome {
        tracing::info!(log_id = %raw_id, error = %e, "log analysis failed");
    }
    let (status, envelope) = state.analysis.envelope(outcome);
    (status, Json(envelope))
}

/// GET /1/ai-analysis/ with no identifier. Same envelope as an invalid one.
pub async fn analyze_without_id(state: State<AppState>) -> (StatusCode, Json<AnalysisResult>) {
    analyze_log(state, Path(String::new())).await
}
