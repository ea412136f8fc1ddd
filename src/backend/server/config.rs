/**
 * Database Selection
 *
 * PostgreSQL is used when `database_url` is configured and reachable.
 * Otherwise the server logs why and keeps running on the in-memory
 * database, which loses its contents on restart.
 */

use std::sync::Arc;

use crate::backend::db::{Database, MemoryDatabase, PgDatabase};
use crate::shared::AppConfig;

/// Connect to the configured database, falling back to memory
///
/// 1. No `database_url`: in-memory database
/// 2. Connect and run migrations
/// 3. On connection failure: in-memory database
///
/// Migration failures are logged and the pool is still used; the schema may
/// already be current.
pub async fn load_database(config: &AppConfig) -> Arc<dyn Database> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set. Using the in-memory database.");
        return Arc::new(MemoryDatabase::new());
    };

    tracing::info!("Connecting to database...");

    let db = match PgDatabase::connect(database_url).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Falling back to the in-memory database.");
            return Arc::new(MemoryDatabase::new());
        }
    };

    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    match db.migrate().await {
        Ok(()) => tracing::info!("Database migrations completed successfully"),
        Err(e) => {
            tracing::error!("Failed to run database migrations: {}", e);
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Arc::new(db)
}
