//! Client HTTP Routes
//!
//! CRUD, search, and validation views over the client sheet.
//!
//! Store calls block on file I/O, so every handler runs them on tokio's
//! blocking pool.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::errors::{ApiError, ApiResult};
use crate::model::{AnnotatedClient, Client};
use crate::query::ClientQuery;
use crate::store::{StoreError, StoreResult};

// ==================
// Shared State
// ==================

/// Client state shared across handlers
pub struct ClientsState {
    pub query: ClientQuery,
}

impl ClientsState {
    pub fn new(query: ClientQuery) -> Self {
        Self { query }
    }
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: Option<String>,
}

impl SearchQuery {
    /// The search term; absent and empty are both rejected
    fn term(self) -> ApiResult<String> {
        match self.q {
            Some(q) if !q.is_empty() => Ok(q),
            _ => Err(ApiError::MissingParam("q".to_string())),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            message: message.into(),
        })
    }
}

// ==================
// Client Routes
// ==================

/// Create client routes
pub fn client_routes(state: Arc<ClientsState>) -> Router {
    Router::new()
        .route("/clients", get(list_clients_handler).post(create_client_handler))
        .route("/clients/search", get(search_clients_handler))
        .route(
            "/clients/:key",
            get(get_client_handler)
                .put(update_client_handler)
                .delete(delete_client_handler),
        )
        // Validation views
        .route("/clients/validation/all", get(list_annotated_handler))
        .route("/clients/validation/errors", get(list_with_errors_handler))
        .route("/clients/validation/search", get(search_annotated_handler))
        .with_state(state)
}

// ==================
// Helper Functions
// ==================

/// Run a store call on the blocking pool
async fn blocking<T, F>(state: &Arc<ClientsState>, op: F) -> ApiResult<T>
where
    F: FnOnce(&ClientQuery) -> StoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    let state = Arc::clone(state);
    tokio::task::spawn_blocking(move || op(&state.query))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .map_err(ApiError::from)
}

// ==================
// CRUD Handlers
// ==================

async fn list_clients_handler(
    State(state): State<Arc<ClientsState>>,
) -> ApiResult<Json<Vec<Client>>> {
    let clients = blocking(&state, |q| q.store().list_all()).await?;
    Ok(Json(clients))
}

async fn search_clients_handler(
    State(state): State<Arc<ClientsState>>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<Vec<Client>>> {
    let term = query.term()?;
    let clients = blocking(&state, move |q| q.search(&term)).await?;
    Ok(Json(clients))
}

async fn get_client_handler(
    State(state): State<Arc<ClientsState>>,
    Path(key): Path<String>,
) -> ApiResult<Json<Client>> {
    let lookup = key.clone();
    let client = blocking(&state, move |q| q.store().find_by_key(&lookup)).await?;
    client
        .map(Json)
        .ok_or_else(|| ApiError::Store(StoreError::NotFound(key)))
}

async fn create_client_handler(
    State(state): State<Arc<ClientsState>>,
    Json(client): Json<Client>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    state.query.validator().check(&client)?;
    blocking(&state, move |q| q.store().create(&client)).await?;
    Ok((StatusCode::CREATED, MessageResponse::new("Client created")))
}

async fn update_client_handler(
    State(state): State<Arc<ClientsState>>,
    Path(key): Path<String>,
    Json(client): Json<Client>,
) -> ApiResult<Json<MessageResponse>> {
    state.query.validator().check(&client)?;
    blocking(&state, move |q| q.store().update(&key, &client)).await?;
    Ok(MessageResponse::new("Client updated"))
}

async fn delete_client_handler(
    State(state): State<Arc<ClientsState>>,
    Path(key): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    blocking(&state, move |q| q.store().delete(&key)).await?;
    Ok(MessageResponse::new("Client deleted"))
}

// ==================
// Validation Handlers
// ==================

async fn list_annotated_handler(
    State(state): State<Arc<ClientsState>>,
) -> ApiResult<Json<Vec<AnnotatedClient>>> {
    let clients = blocking(&state, |q| q.list_annotated()).await?;
    Ok(Json(clients))
}

async fn list_with_errors_handler(
    State(state): State<Arc<ClientsState>>,
) -> ApiResult<Json<Vec<AnnotatedClient>>> {
    let clients = blocking(&state, |q| q.list_only_with_errors()).await?;
    Ok(Json(clients))
}

async fn search_annotated_handler(
    State(state): State<Arc<ClientsState>>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<Vec<AnnotatedClient>>> {
    let term = query.term()?;
    let clients = blocking(&state, move |q| q.search_annotated(&term)).await?;
    Ok(Json(clients))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_term_required() {
        assert!(SearchQuery { q: None }.term().is_err());
        assert!(SearchQuery { q: Some(String::new()) }.term().is_err());
        assert_eq!(SearchQuery { q: Some("ana".into()) }.term().unwrap(), "ana");
    }
}
