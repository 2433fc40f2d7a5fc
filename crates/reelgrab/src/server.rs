//! HTTP surface: router construction and the serve loop.
//!
//! The service is called straight from browser-hosted clients, so every
//! response — success, failure, and preflight — carries permissive CORS
//! headers.

use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use grabcore::Resolver;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::handlers;

/// Shared state for the service.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<Resolver>,
}

/// Build the router with CORS applied to all routes.
pub fn build_router(resolver: Arc<Resolver>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/download", post(handlers::download_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .with_state(AppState { resolver })
}

/// Start the resolution service.
pub async fn start_server(port: u16, resolver: Arc<Resolver>) -> Result<(), Box<dyn std::error::Error>> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = build_router(resolver);

    log::info!("Starting resolution service on http://{}", addr);
    log::info!("  POST /api/download - Resolve an Instagram URL");
    log::info!("  GET  /health       - Health check");

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// GET /health — liveness check.
async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
