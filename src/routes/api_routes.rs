//! API route table.
//!
//! Public routes: registration, login, logout, and the read-only user
//! listing. Protected routes sit behind the session middleware and reject
//! unauthenticated access uniformly.

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;

use crate::auth::handlers::{list_users, login, logout, me, register};
use crate::messaging::handlers::{fetch_conversation, list_conversations};
use crate::middleware::auth::auth_middleware;
use crate::realtime::socket::ws_handler;
use crate::server::state::AppState;

/// Build the API routes and attach them to `router`.
pub fn configure_api_routes(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/users", get(list_users));

    let protected = Router::new()
        .route("/api/auth/me", get(me))
        .route("/api/conversations", get(list_conversations))
        .route("/api/conversations/{peer_id}/messages", get(fetch_conversation))
        .route("/ws", get(ws_handler))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    router.merge(public).merge(protected)
}
