//! API route definitions

use crate::handlers::{documents, history, research};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Create API v1 routes
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/research", post(research::research_handler))
        .route("/documents/analyze", post(documents::analyze_handler))
        .route(
            "/history",
            get(history::list_history).delete(history::clear_history),
        )
}
