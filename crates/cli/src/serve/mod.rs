//! `callboard serve` -- HTTP JSON API over a static call collection.
//!
//! The collection is loaded once at startup and shared read-only across
//! handlers. Every `/api` route answers with the `{data, success, error?}`
//! envelope.
//!
//! Endpoints:
//! - GET  /health           - Server status and call count
//! - GET  /api/calls        - All calls; optional `search`, `outcome`, `sort`
//! - POST /api/calls        - Accepts a payload, returns the collection unchanged
//! - GET  /api/calls/{id}   - One call, 404 when absent
//! - GET  /api/stats        - Aggregate stats over all and filtered calls
//! - GET  /api/dashboard    - Stats, chart datasets, and a call preview
//!
//! CORS is permissive so a browser dashboard on another origin can read it.

mod analytics;
mod handlers;
mod middleware;
mod state;

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{middleware as axum_middleware, Json, Router};
use callboard_storage::JsonFileSource;
use tower_http::cors::{Any, CorsLayer};

use self::analytics::{handle_dashboard, handle_stats};
use self::handlers::{
    handle_create_call, handle_get_call, handle_health, handle_list_calls, handle_not_found,
};
use self::middleware::trace_requests;
use self::state::AppState;

/// Maximum request body size: 1 MB.
const MAX_BODY_SIZE: usize = 1024 * 1024;

/// Settings for one server run.
#[derive(Debug, Clone)]
pub(crate) struct ServeConfig {
    pub(crate) port: u16,
    pub(crate) data: PathBuf,
}

/// Construct a plain JSON error response for non-API routes.
fn json_error(status: StatusCode, message: &str) -> impl IntoResponse {
    (status, Json(serde_json::json!({"error": message})))
}

/// Build the router with all routes and layers.
pub(crate) fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .route("/api/calls", get(handle_list_calls).post(handle_create_call))
        .route("/api/calls/{id}", get(handle_get_call))
        .route("/api/stats", get(handle_stats))
        .route("/api/dashboard", get(handle_dashboard))
        .fallback(handle_not_found)
        .layer(axum_middleware::from_fn(trace_requests))
        .layer(cors)
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .with_state(state)
}

/// Load the collection and serve it until Ctrl+C.
pub(crate) async fn start_server(config: ServeConfig) -> Result<(), Box<dyn std::error::Error>> {
    let source = JsonFileSource::open(&config.data)?;
    if source.rejected() > 0 {
        tracing::warn!(
            rejected = source.rejected(),
            "some call records were malformed and will not be served"
        );
    }

    let state = Arc::new(AppState::new(Arc::new(source)));
    let app = router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        data = %config.data.display(),
        "callboard listening on http://{}",
        addr
    );
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("server shut down");
    Ok(())
}

/// Wait for a shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("received shutdown signal");
}
