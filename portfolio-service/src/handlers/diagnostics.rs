use crate::dtos::DiagnosticsReport;
use crate::startup::AppState;
use axum::{extract::State, Json};

/// Report database reachability without ever failing the request.
#[utoipa::path(
    get,
    path = "/test",
    responses((status = 200, description = "Diagnostic report", body = DiagnosticsReport)),
    tag = "Diagnostics"
)]
#[tracing::instrument(skip(state))]
pub async fn test_database(State(state): State<AppState>) -> Json<DiagnosticsReport> {
    let status = match state.store.as_ref() {
        Some(store) => Some(store.status().await),
        None => None,
    };

    if let Some(status) = &status {
        tracing::debug!(?status, "Store status probed");
    } else {
        tracing::warn!("Diagnostic probe found no store adapter");
    }

    let database = &state.config.database;
    Json(DiagnosticsReport::new(
        status,
        database.url.is_some(),
        database.name.is_some(),
    ))
}
