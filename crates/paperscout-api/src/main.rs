//! Paperscout API Server
//!
//! REST API server for ABCP issuer research.

use paperscout_api::{create_router, state::AppState};
use paperscout_core::config::AppConfig;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "paperscout_api=debug,tower_http=debug".into()),
        )
        .init();

    // Load configuration; a malformed environment must not boot a server
    // silently running on defaults.
    let config = AppConfig::from_env()?;
    let addr = format!("{}:{}", config.server.host, config.server.port);

    // Create application state
    let state = Arc::new(AppState::from_config(config)?);
    tracing::info!(provider = %state.provider_name, "search provider ready");

    // Create router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Paperscout API Server starting on http://{}", addr);
    tracing::info!("OpenAPI spec at http://{}/api-docs/openapi.json", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
