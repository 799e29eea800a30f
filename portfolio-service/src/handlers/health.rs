use crate::dtos::MessageResponse;
use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// Root liveness message.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "API is running", body = MessageResponse)),
    tag = "Health"
)]
pub async fn read_root() -> Json<MessageResponse> {
    Json(MessageResponse::new("Portfolio API running"))
}

#[utoipa::path(
    get,
    path = "/api/hello",
    responses((status = 200, description = "Greeting", body = MessageResponse)),
    tag = "Health"
)]
pub async fn hello() -> Json<MessageResponse> {
    Json(MessageResponse::new("Hello from the portfolio backend API!"))
}

/// Health check endpoint for Docker/K8s liveness probes.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "portfolio-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness check endpoint for K8s readiness probes.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let Some(store) = state.store.as_ref() else {
        return StatusCode::SERVICE_UNAVAILABLE;
    };
    match store.ping().await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
