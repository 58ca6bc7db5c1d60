//! # HTTP Server
//!
//! Combines the client and health routers behind CORS and request tracing.

use std::sync::Arc;

use axum::http::{header, HeaderName, HeaderValue, Method};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::client_routes::{client_routes, ClientsState};
use super::config::HttpServerConfig;
use super::health_routes::health_routes;
use crate::query::ClientQuery;

/// HTTP server for the client API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server over `query` with custom configuration
    pub fn with_config(config: HttpServerConfig, query: ClientQuery) -> Self {
        let router = Self::build_router(&config, query);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &HttpServerConfig, query: ClientQuery) -> Router {
        let state = Arc::new(ClientsState::new(query));

        Router::new()
            .merge(health_routes(state.clone()))
            .merge(client_routes(state))
            .layer(cors_layer(config))
            .layer(TraceLayer::new_for_http())
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server (async)
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr = self.config.socket_addr();
        let listener = TcpListener::bind(&addr).await?;

        info!(addr = %addr, "client API listening");
        axum::serve(listener, self.router).await?;

        Ok(())
    }
}

/// CORS from config; no configured origins means any origin
fn cors_layer(config: &HttpServerConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            HeaderName::from_static("x-requested-with"),
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
        ]);

    if config.cors_origins.is_empty() {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    cors.allow_origin(AllowOrigin::list(origins))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ClientStore;
    use crate::validation::ClientValidator;

    fn query() -> ClientQuery {
        ClientQuery::new(ClientStore::open("unused.xlsx"), ClientValidator::default())
    }

    #[test]
    fn test_server_with_custom_port() {
        let server = HttpServer::with_config(HttpServerConfig::with_port(9090), query());
        assert_eq!(server.socket_addr(), "0.0.0.0:9090");
    }

    #[test]
    fn test_router_builds_with_origin_list() {
        let config = HttpServerConfig {
            cors_origins: vec!["http://localhost:5173".into(), "not a header\n".into()],
            ..Default::default()
        };
        let _router = HttpServer::with_config(config, query()).router();
    }
}
