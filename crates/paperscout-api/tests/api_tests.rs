//! API Integration Tests

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use base64::Engine;
use paperscout_api::create_router_for_testing;
use serde_json::{json, Value};
use tower::ServiceExt;

/// Helper to create a test request
fn create_json_request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");

    match body {
        Some(json_body) => builder
            .body(Body::from(serde_json::to_string(&json_body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn response_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

// =============================================================================
// Health Check Tests
// =============================================================================

#[tokio::test]
async fn test_health_check() {
    let app = create_router_for_testing();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_readiness_check() {
    let app = create_router_for_testing();

    let response = app
        .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert_eq!(json["ready"], true);
    assert_eq!(json["checks"]["search_provider"], "fixture");
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let app = create_router_for_testing();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert!(json["uptime_seconds"].is_number());
    assert!(json["total_requests"].is_number());
}

#[tokio::test]
async fn test_openapi_spec() {
    let app = create_router_for_testing();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api-docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert!(json["paths"]["/api/v1/research"].is_object());
}

// =============================================================================
// Research API Tests
// =============================================================================

#[tokio::test]
async fn test_research_returns_ranked_records() {
    let app = create_router_for_testing();

    let request = create_json_request(
        "POST",
        "/api/v1/research",
        Some(json!({"issuer": "Acme Funding LLC"})),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert_eq!(json["issuer"], "Acme Funding LLC");

    let results = json["results"].as_array().unwrap();
    assert!(!results.is_empty());
    assert_eq!(json["result_count"], results.len());

    // Ranked best-first.
    let confidences: Vec<f64> = results
        .iter()
        .map(|r| r["confidence"].as_f64().unwrap())
        .collect();
    for pair in confidences.windows(2) {
        assert!(pair[0] >= pair[1]);
    }
}

#[tokio::test]
async fn test_research_rejects_blank_issuer() {
    let app = create_router_for_testing();

    let request = create_json_request("POST", "/api/v1/research", Some(json!({"issuer": "   "})));

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = response_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_research_with_empty_transport_is_not_found() {
    use paperscout_api::state::AppState;
    use paperscout_core::config::AppConfig;
    use paperscout_search::FixtureProvider;
    use std::sync::Arc;

    let mut config = AppConfig::default();
    config.pipeline.query_delay_ms = 0;

    let state = AppState::with_provider(config, Arc::new(FixtureProvider::empty())).unwrap();
    let app = paperscout_api::create_router(Arc::new(state));

    let request = create_json_request(
        "POST",
        "/api/v1/research",
        Some(json!({"issuer": "Acme Funding LLC"})),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = response_json(response).await;
    assert_eq!(json["code"], "NO_RESULTS");
}

// =============================================================================
// Document Analysis Tests
// =============================================================================

#[tokio::test]
async fn test_analyze_plain_text_document() {
    let app = create_router_for_testing();

    let text = "Acme Funding LLC commercial paper program. Liquidity Provider: Big Bank Corp";
    let content = base64::engine::general_purpose::STANDARD.encode(text);

    let request = create_json_request(
        "POST",
        "/api/v1/documents/analyze",
        Some(json!({
            "issuer": "Acme Funding LLC",
            "filename": "program.txt",
            "content": content,
        })),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert_eq!(json["file_type"], "text");
    assert_eq!(json["result"]["liquidity_providers"][0], "Big Bank Corp");
    assert_eq!(json["result"]["source"], "program.txt");
}

#[tokio::test]
async fn test_analyze_unsupported_format() {
    let app = create_router_for_testing();

    let content = base64::engine::general_purpose::STANDARD.encode("data");
    let request = create_json_request(
        "POST",
        "/api/v1/documents/analyze",
        Some(json!({
            "issuer": "Acme Funding LLC",
            "filename": "report.docx",
            "content": content,
        })),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_analyze_invalid_base64() {
    let app = create_router_for_testing();

    let request = create_json_request(
        "POST",
        "/api/v1/documents/analyze",
        Some(json!({
            "issuer": "Acme Funding LLC",
            "filename": "program.txt",
            "content": "%%%not-base64%%%",
        })),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// History API Tests
// =============================================================================

#[tokio::test]
async fn test_history_records_research_runs() {
    let app = create_router_for_testing();

    let request = create_json_request(
        "POST",
        "/api/v1/research",
        Some(json!({"issuer": "Acme Funding LLC"})),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(create_json_request("GET", "/api/v1/history", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert_eq!(json["count"], 1);
    assert_eq!(json["entries"][0]["issuer"], "Acme Funding LLC");

    // Clear and verify.
    let response = app
        .clone()
        .oneshot(create_json_request("DELETE", "/api/v1/history", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(create_json_request("GET", "/api/v1/history", None))
        .await
        .unwrap();
    let json = response_json(response).await;
    assert_eq!(json["count"], 0);
}
