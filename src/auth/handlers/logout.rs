//! Logout handler for `POST /api/auth/logout`.
//!
//! Sessions live entirely in the signed cookie, so logging out is clearing
//! it. The endpoint is deliberately unauthenticated: clearing an absent
//! session is harmless.

use axum::http::header::SET_COOKIE;
use axum::response::Json;

use crate::auth::sessions::clear_session_cookie;

pub async fn logout() -> ([(axum::http::HeaderName, String); 1], Json<serde_json::Value>) {
    (
        [(SET_COOKIE, clear_session_cookie())],
        Json(serde_json::json!({ "message": "You have been logged out." })),
    )
}
