//! HTTP API Tests
//!
//! Drives the router in-process and checks status mapping:
//! 400 for validation and missing parameters, 404 not found, 409 conflict,
//! 500 storage.

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use clientsheet::http_server::{HttpServer, HttpServerConfig};
use clientsheet::query::ClientQuery;
use clientsheet::store::ClientStore;
use clientsheet::validation::ClientValidator;

// =============================================================================
// Helper Functions
// =============================================================================

fn router_for(store: ClientStore) -> Router {
    let query = ClientQuery::new(store, ClientValidator::default());
    HttpServer::with_config(HttpServerConfig::default(), query).router()
}

fn setup() -> (TempDir, Router) {
    let temp = TempDir::new().unwrap();
    let store = ClientStore::open(temp.path().join("clients.xlsx"));
    store.initialize().unwrap();
    (temp, router_for(store))
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

fn ana() -> Value {
    json!({
        "key": "1",
        "contactName": "Ana",
        "email": "ana@gmail.com",
        "contactPhone": "961 123 4567"
    })
}

// =============================================================================
// CRUD
// =============================================================================

#[tokio::test]
async fn test_create_get_list() {
    let (_temp, router) = setup();

    let (status, body) = send(&router, Method::POST, "/clients", Some(ana())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["message"].is_string());

    let (status, body) = send(&router, Method::GET, "/clients/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, ana());

    let (status, body) = send(&router, Method::GET, "/clients", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([ana()]));
}

#[tokio::test]
async fn test_get_missing_is_404() {
    let (_temp, router) = setup();
    let (status, body) = send(&router, Method::GET, "/clients/9", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 404);
}

#[tokio::test]
async fn test_create_invalid_is_400_with_errors() {
    let (_temp, router) = setup();
    let payload = json!({
        "key": "abc",
        "contactName": "Ana",
        "email": "ana@gmail.com",
        "contactPhone": "555 123 4567"
    });

    let (status, body) = send(&router, Method::POST, "/clients", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "key");
    assert_eq!(body["errors"][1]["field"], "contactPhone");

    let (_, list) = send(&router, Method::GET, "/clients", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_create_duplicate_is_409() {
    let (_temp, router) = setup();
    send(&router, Method::POST, "/clients", Some(ana())).await;

    let (status, body) = send(&router, Method::POST, "/clients", Some(ana())).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 409);
}

#[tokio::test]
async fn test_update_and_rename() {
    let (_temp, router) = setup();
    send(&router, Method::POST, "/clients", Some(ana())).await;

    let mut renamed = ana();
    renamed["key"] = json!("2");
    renamed["contactName"] = json!("Ana María");

    let (status, _) = send(&router, Method::PUT, "/clients/1", Some(renamed.clone())).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&router, Method::GET, "/clients/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&router, Method::GET, "/clients/2", None).await;
    assert_eq!(body, renamed);
}

#[tokio::test]
async fn test_update_missing_is_404() {
    let (_temp, router) = setup();
    let (status, _) = send(&router, Method::PUT, "/clients/1", Some(ana())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete() {
    let (_temp, router) = setup();
    send(&router, Method::POST, "/clients", Some(ana())).await;

    let (status, _) = send(&router, Method::DELETE, "/clients/1", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&router, Method::DELETE, "/clients/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Search and Validation Views
// =============================================================================

#[tokio::test]
async fn test_search_requires_q() {
    let (_temp, router) = setup();

    let (status, _) = send(&router, Method::GET, "/clients/search", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&router, Method::GET, "/clients/search?q=", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&router, Method::GET, "/clients/validation/search?q=", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_and_validation_views() {
    let (temp, router) = setup();
    send(&router, Method::POST, "/clients", Some(ana())).await;

    // Invalid rows can still exist in the sheet; only the API validates
    let store = ClientStore::open(temp.path().join("clients.xlsx"));
    store
        .create(&clientsheet::model::Client::new("2", "Bo", "bo@acme.com", "961 123 4567"))
        .unwrap();

    let (status, body) = send(&router, Method::GET, "/clients/search?q=ACME", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["key"], "2");

    let (_, body) = send(&router, Method::GET, "/clients/validation/all", None).await;
    assert_eq!(body[0]["hasErrors"], false);
    assert_eq!(body[1]["hasErrors"], true);
    assert_eq!(body[1]["errors"][0]["field"], "email");

    let (_, body) = send(&router, Method::GET, "/clients/validation/errors", None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["client"]["key"], "2");

    let (_, body) = send(&router, Method::GET, "/clients/validation/search?q=ana", None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["client"]["contactName"], "Ana");
}

// =============================================================================
// Storage Failures and Health
// =============================================================================

#[tokio::test]
async fn test_missing_sheet_is_500() {
    let temp = TempDir::new().unwrap();
    let router = router_for(ClientStore::open(temp.path().join("absent.xlsx")));

    let (status, body) = send(&router, Method::GET, "/clients", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], 500);

    let (status, body) = send(&router, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["storage"], "missing");
}

#[tokio::test]
async fn test_health_reports_present_sheet() {
    let (_temp, router) = setup();
    let (status, body) = send(&router, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "present");
}
