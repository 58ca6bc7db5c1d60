//! # HTTP Boundary Errors
//!
//! Maps core failures onto HTTP statuses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::model::ErrorRecord;
use crate::store::StoreError;
use crate::validation::ValidationError;

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors a handler can return
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Missing or empty required query parameter
    #[error("Missing required parameter: {0}")]
    MissingParam(String),

    /// Payload failed the client rules
    #[error("Validation errors")]
    Validation(#[from] ValidationError),

    // ==================
    // Core Errors
    // ==================
    /// Store failure; status depends on the kind
    #[error("{0}")]
    Store(#[from] StoreError),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Blocking task failed to complete
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingParam(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(err) => StatusCode::from_u16(err.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    /// Per-field failures, present only for validation errors
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ErrorRecord>,
}

impl From<ApiError> for ErrorResponse {
    fn from(err: ApiError) -> Self {
        let code = err.status_code().as_u16();
        let error = err.to_string();
        let errors = match err {
            ApiError::Validation(validation) => validation.errors,
            _ => Vec::new(),
        };
        Self {
            error,
            code,
            errors,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}
