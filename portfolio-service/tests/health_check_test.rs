mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::{test_config, TestApp};
use tower::util::ServiceExt;

#[tokio::test]
async fn root_reports_api_running() {
    let app = TestApp::spawn();

    let (status, body) = app.get("/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Portfolio API running");
}

#[tokio::test]
async fn hello_returns_greeting() {
    let app = TestApp::spawn();

    let (status, body) = app.get("/api/hello").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Hello from the portfolio backend API!");
}

#[tokio::test]
async fn health_check_works() {
    let app = TestApp::spawn();

    let (status, body) = app.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "portfolio-service");
}

#[tokio::test]
async fn readiness_follows_store_availability() {
    let app = TestApp::spawn();
    let (status, _) = app.get("/ready").await;
    assert_eq!(status, StatusCode::OK);

    let app = TestApp::with_store(test_config(), None);
    let (status, _) = app.get("/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn metrics_endpoint_returns_text() {
    let app = TestApp::spawn();

    let response = app
        .router
        .clone()
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()["content-type"].to_str().unwrap();
    assert!(content_type.starts_with("text/plain"));
}

#[tokio::test]
async fn openapi_document_lists_contact_routes() {
    let app = TestApp::spawn();

    let (status, body) = app.get("/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/contact"]["post"].is_object());
    assert!(body["paths"]["/api/contact"]["get"].is_object());
    assert!(body["paths"]["/test"]["get"].is_object());
}

#[tokio::test]
async fn request_id_is_echoed() {
    let app = TestApp::spawn();

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/")
                .header("x-request-id", "portfolio-req-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers()["x-request-id"], "portfolio-req-1");
}

#[tokio::test]
async fn cors_preflight_allows_any_origin() {
    let app = TestApp::spawn();

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/contact")
                .header("origin", "https://someone-else.example")
                .header("access-control-request-method", "POST")
                .header("access-control-request-headers", "content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_success());
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}

#[tokio::test]
async fn cors_respects_configured_origins() {
    let mut config = test_config();
    config.cors.allowed_origins = vec!["https://portfolio.example".to_string()];
    let app = TestApp::with_store(config, None);

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/")
                .header("origin", "https://portfolio.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "https://portfolio.example"
    );
}
