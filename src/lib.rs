//! Syncchat backend library
//!
//! A direct-messaging server built on Axum and sqlx. Users register and log
//! in over HTTP, exchange messages over a WebSocket channel with presence
//! tracking, and a daily batch job aggregates usage counts into a summary
//! table.
//!
//! The library is organized into focused modules:
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - User accounts, password hashing, session tokens
//! - **`messaging`** - Message persistence, history/unread queries, routing
//! - **`realtime`** - Presence registry, WebSocket endpoint, wire events
//! - **`analytics`** - Daily aggregation queries and batch job
//! - **`middleware`** - Session authentication middleware
//! - **`error`** - API error types and HTTP conversion

pub mod analytics;
pub mod auth;
pub mod error;
pub mod messaging;
pub mod middleware;
pub mod realtime;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use realtime::presence::PresenceRegistry;
pub use server::state::AppState;
