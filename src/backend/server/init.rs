/**
 * Server Initialization
 *
 * # Initialization Process
 *
 * 1. Select the database (PostgreSQL or in-memory)
 * 2. Build the stores and session keys into `AppState`
 * 3. Create the router
 */

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_database;
use crate::backend::server::state::AppState;
use crate::shared::AppConfig;

/// Create and configure the Axum application
pub async fn create_app(config: AppConfig) -> Router<()> {
    tracing::info!("Initializing blogline API server");

    // Step 1: Database
    let db = load_database(&config).await;

    // Step 2: Stores and session keys
    let app_state = AppState::new(config, db);
    tracing::info!(
        "Stores initialized (comment limit {} chars, token lifetime {} days)",
        app_state.config.comment_max_len,
        app_state.config.token_ttl_days
    );

    // Step 3: Routes
    let app = create_router(app_state);
    tracing::info!("Router configured");

    app
}
