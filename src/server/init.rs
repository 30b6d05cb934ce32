//! Application assembly.
//!
//! Builds the shared state and the configured router. The presence registry
//! always starts empty: there is no recovery of online status across
//! restarts, users simply appear offline until they reconnect.

use axum::Router;
use sqlx::SqlitePool;

use crate::routes::router::create_router;
use crate::server::state::AppState;

/// Create the Axum application from a ready database pool.
pub fn create_app(pool: SqlitePool) -> Router {
    let state = AppState::new(pool);
    tracing::info!("Application state initialized, presence registry empty");
    create_router(state)
}
