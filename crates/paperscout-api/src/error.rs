//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use paperscout_core::PaperscoutError;
use paperscout_parser::ParserError;

/// API error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// Error code
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn internal_error() -> Self {
        Self::new("INTERNAL_ERROR", "Internal server error")
    }
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NoResults(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ApiError::bad_request(msg)),
            AppError::NoResults(issuer) => (
                StatusCode::NOT_FOUND,
                ApiError::new("NO_RESULTS", format!("No results found for issuer: {issuer}")),
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::internal_error().with_details(msg),
            ),
        };

        (status, Json(error)).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<PaperscoutError> for AppError {
    fn from(err: PaperscoutError) -> Self {
        match err {
            PaperscoutError::Validation(msg) => AppError::BadRequest(msg),
            PaperscoutError::NoResults { issuer } => AppError::NoResults(issuer),
            PaperscoutError::Parser(msg) => AppError::BadRequest(format!("Parser error: {msg}")),
            PaperscoutError::Config(msg) => AppError::Internal(format!("Configuration error: {msg}")),
            PaperscoutError::Transport(msg) => AppError::Internal(format!("Transport error: {msg}")),
            PaperscoutError::History(msg) => AppError::Internal(format!("History error: {msg}")),
            PaperscoutError::Other(err) => AppError::Internal(err.to_string()),
        }
    }
}

impl From<ParserError> for AppError {
    fn from(err: ParserError) -> Self {
        match err {
            ParserError::UnsupportedFormat(fmt) => {
                AppError::BadRequest(format!("Unsupported file format: {fmt}"))
            }
            ParserError::EncodingError(msg) => {
                AppError::BadRequest(format!("Text encoding error: {msg}"))
            }
            ParserError::PdfError(msg) => AppError::BadRequest(format!("PDF parsing error: {msg}")),
            ParserError::IoError { path, .. } => {
                AppError::Internal(format!("IO error reading file: {path}"))
            }
        }
    }
}
