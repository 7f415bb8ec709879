//! Document analysis handler
//!
//! Accepts an uploaded program document (base64-encoded), parses it with
//! the registered document parsers, and runs the document-tuned extractor
//! over the full text.

use axum::{extract::State, Json};
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use paperscout_parser::ParserRegistry;

use super::ExtractionRecord;
use crate::error::AppError;
use crate::state::AppState;

/// Document analysis request
#[derive(Debug, Deserialize, ToSchema)]
pub struct AnalyzeRequest {
    /// Issuer or conduit name the document concerns
    pub issuer: String,
    /// Original filename; the extension selects the parser
    pub filename: String,
    /// Base64-encoded file content
    pub content: String,
}

/// Document analysis response
#[derive(Debug, Serialize, ToSchema)]
pub struct AnalyzeResponse {
    /// Issuer the document was analyzed for
    pub issuer: String,
    /// Uploaded filename
    pub filename: String,
    /// Detected file type
    pub file_type: String,
    /// Page count, when the format carries page breaks
    pub page_count: Option<u32>,
    /// Approximate word count of the extracted text
    pub word_count: usize,
    /// Extraction record, absent when the document yields nothing
    pub result: Option<ExtractionRecord>,
}

/// Analyze one uploaded document
#[utoipa::path(
    post,
    path = "/api/v1/documents/analyze",
    tag = "documents",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Analysis outcome", body = AnalyzeResponse),
        (status = 400, description = "Blank issuer, bad encoding, or unsupported format", body = ApiError)
    )
)]
pub async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    state.increment_requests();

    let issuer = request.issuer.trim();
    if issuer.is_empty() {
        return Err(AppError::BadRequest(
            "issuer name must not be empty".to_string(),
        ));
    }

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(&request.content)
        .map_err(|e| AppError::BadRequest(format!("Invalid base64 content: {e}")))?;

    let registry = ParserRegistry::with_default_parsers();
    let doc = registry.parse_bytes(&bytes, &request.filename)?;

    let result = state
        .document_extractor
        .extract(&doc.content, issuer)
        .map(|r| r.with_source(&request.filename))
        .map(ExtractionRecord::from);

    Ok(Json(AnalyzeResponse {
        issuer: issuer.to_string(),
        filename: request.filename,
        file_type: doc.file_type.to_string(),
        page_count: doc.page_count,
        word_count: doc.word_count(),
        result,
    }))
}
