//! Search history handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use super::HistoryEntry;
use crate::error::AppError;
use crate::state::AppState;

/// History listing response
#[derive(Debug, Serialize, ToSchema)]
pub struct HistoryResponse {
    /// Entries, most recent first
    pub entries: Vec<HistoryEntry>,
    /// Number of entries
    pub count: usize,
}

/// List recorded research runs, most recent first
#[utoipa::path(
    get,
    path = "/api/v1/history",
    tag = "history",
    responses(
        (status = 200, description = "Recorded research runs", body = HistoryResponse),
        (status = 500, description = "History store failure", body = ApiError)
    )
)]
pub async fn list_history(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HistoryResponse>, AppError> {
    state.increment_requests();

    let entries: Vec<HistoryEntry> = state
        .history
        .list()
        .await?
        .into_iter()
        .map(HistoryEntry::from)
        .collect();

    Ok(Json(HistoryResponse {
        count: entries.len(),
        entries,
    }))
}

/// Clear the recorded history
#[utoipa::path(
    delete,
    path = "/api/v1/history",
    tag = "history",
    responses(
        (status = 204, description = "History cleared")
    )
)]
pub async fn clear_history(State(state): State<Arc<AppState>>) -> Result<StatusCode, AppError> {
    state.increment_requests();
    state.history.clear().await?;
    Ok(StatusCode::NO_CONTENT)
}
