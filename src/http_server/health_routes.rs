//! `/health` route

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

use super::client_routes::ClientsState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// "present" or "missing"
    pub storage: String,
}

/// Health check route
pub fn health_routes(state: Arc<ClientsState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Liveness plus whether the sheet file is there
async fn health_handler(State(state): State<Arc<ClientsState>>) -> impl IntoResponse {
    let storage = if state.query.store().exists() {
        "present"
    } else {
        "missing"
    };

    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage: storage.to_string(),
    };

    (StatusCode::OK, Json(response))
}
