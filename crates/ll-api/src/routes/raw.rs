//! Raw log retrieval endpoint.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;

use ll_protocol::LogId;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// GET /1/raw/{id}: raw log content as plain text.
pub async fn get_raw(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = LogId::parse(&raw_id)
        .map_err(|e| ApiError::NotFound(format!("log '{raw_id}' not found: {e}")))?;

    let log = state.store.get(&id).await.map_err(|e| {
        tracing::error!(log_id = %id, error = %e, "log store unavailable");
        ApiError::Internal("log storage unavailable".into())
    })?;

    let log = log.ok_or_else(|| ApiError::NotFound(format!("log '{id}' not found")))?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        log.content,
    ))
}
