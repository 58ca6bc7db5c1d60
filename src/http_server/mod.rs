//! # Client HTTP Server Module
//!
//! Thin axum boundary over the store and query layer.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/clients` - List and create
//! - `/clients/search?q=` - Substring search
//! - `/clients/:key` - Get, update, delete
//! - `/clients/validation/*` - Validation-annotated views

pub mod client_routes;
pub mod config;
pub mod errors;
pub mod health_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use server::HttpServer;
