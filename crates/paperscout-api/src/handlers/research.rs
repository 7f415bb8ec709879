//! Issuer research handler

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use paperscout_core::SearchHistoryEntry;

use super::ExtractionRecord;
use crate::error::AppError;
use crate::state::AppState;

/// Research request
#[derive(Debug, Deserialize, ToSchema)]
pub struct ResearchRequest {
    /// Issuer or conduit name to research
    pub issuer: String,
}

/// Research response
#[derive(Debug, Serialize, ToSchema)]
pub struct ResearchResponse {
    /// Issuer that was researched
    pub issuer: String,
    /// Ranked extraction records, best first
    pub results: Vec<ExtractionRecord>,
    /// Number of records returned
    pub result_count: usize,
    /// Completion time, RFC 3339
    pub searched_at: String,
}

/// Run the full research pipeline for an issuer
#[utoipa::path(
    post,
    path = "/api/v1/research",
    tag = "research",
    request_body = ResearchRequest,
    responses(
        (status = 200, description = "Ranked extraction records", body = ResearchResponse),
        (status = 400, description = "Blank issuer name", body = ApiError),
        (status = 404, description = "No results found", body = ApiError)
    )
)]
pub async fn research_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ResearchRequest>,
) -> Result<Json<ResearchResponse>, AppError> {
    state.increment_requests();

    let results = state.pipeline.run(&request.issuer).await?;
    let issuer = request.issuer.trim().to_string();

    let entry = SearchHistoryEntry::new(issuer.clone(), results.clone());
    let searched_at = entry.timestamp.to_rfc3339();
    if let Err(e) = state.history.append(entry).await {
        tracing::warn!(error = %e, "failed to record history entry");
    }

    let records: Vec<ExtractionRecord> = results.into_iter().map(ExtractionRecord::from).collect();

    Ok(Json(ResearchResponse {
        issuer,
        result_count: records.len(),
        results: records,
        searched_at,
    }))
}
