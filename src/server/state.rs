//! Application state shared across all request handlers.
//!
//! `AppState` is the central state container: the sqlx connection pool and
//! the in-memory presence registry. Both are cheaply cloneable handles, so
//! the whole struct is `Clone` and every Axum handler gets its own copy.
//!
//! The `FromRef` implementations let handlers extract just the part of the
//! state they need (`State<SqlitePool>`, `State<PresenceRegistry>`) instead
//! of the whole `AppState`.

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::realtime::presence::PresenceRegistry;

/// Shared application state.
///
/// The presence registry is process-local and starts empty on every boot;
/// only the database outlives the process.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: SqlitePool,
    /// Live user-to-connection mapping, mutated on connect/disconnect.
    pub presence: PresenceRegistry,
}

impl AppState {
    pub fn new(db: SqlitePool) -> Self {
        Self {
            db,
            presence: PresenceRegistry::new(),
        }
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db.clone()
    }
}

impl FromRef<AppState> for PresenceRegistry {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.presence.clone()
    }
}
