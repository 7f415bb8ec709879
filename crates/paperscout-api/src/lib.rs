//! Paperscout API - REST server
//!
//! Provides HTTP endpoints for issuer research, document analysis, and
//! search history, plus health probes and an OpenAPI description.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::{routing::get, Json, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

use crate::handlers::health;
use crate::state::AppState;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Paperscout API",
        description = "ABCP issuer research: liquidity providers, administrators, and sponsors"
    ),
    paths(
        handlers::health::health_check,
        handlers::health::readiness_check,
        handlers::research::research_handler,
        handlers::documents::analyze_handler,
        handlers::history::list_history,
        handlers::history::clear_history,
    ),
    components(schemas(
        error::ApiError,
        handlers::ExtractionRecord,
        handlers::HistoryEntry,
        handlers::research::ResearchRequest,
        handlers::research::ResearchResponse,
        handlers::documents::AnalyzeRequest,
        handlers::documents::AnalyzeResponse,
        handlers::history::HistoryResponse,
    )),
    tags(
        (name = "research", description = "Issuer research"),
        (name = "documents", description = "Document analysis"),
        (name = "history", description = "Search history"),
        (name = "health", description = "Health and readiness probes")
    )
)]
pub struct ApiDoc;

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .route("/metrics", get(health::metrics))
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Create a router backed by the fixture transport, for integration tests
#[cfg(any(test, feature = "test-utils"))]
pub fn create_router_for_testing() -> Router {
    use paperscout_core::config::AppConfig;
    use paperscout_search::FixtureProvider;

    let mut config = AppConfig::default();
    config.pipeline.query_delay_ms = 0;

    let state = AppState::with_provider(config, Arc::new(FixtureProvider::new()))
        .expect("fixture state construction cannot fail");

    create_router(Arc::new(state))
}
