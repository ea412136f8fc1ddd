/**
 * Router Configuration
 *
 * Combines the API routes with request tracing and, when a web client
 * build is configured, static file serving.
 *
 * # Route Order
 *
 * 1. `/api/...` - REST API, with a JSON 404 for unknown API paths
 * 2. Static files from `static_dir`, falling back to `index.html` so that
 *    client-side routes load the app
 * 3. Without `static_dir`: JSON 404
 */

use axum::Router;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::backend::error::BackendError;
use crate::backend::routes::api_routes::api_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new().nest("/api", api_routes());

    let router = match app_state.config.static_dir.clone() {
        Some(dir) => {
            tracing::info!("Serving web client from {}", dir.display());
            let index = ServeFile::new(dir.join("index.html"));
            router.fallback_service(ServeDir::new(dir).fallback(index))
        }
        None => router.fallback(not_found),
    };

    router.layer(TraceLayer::new_for_http()).with_state(app_state)
}

async fn not_found() -> BackendError {
    BackendError::not_found("Route")
}
