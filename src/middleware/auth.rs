//! Session authentication middleware.
//!
//! Protected routes are wrapped by [`auth_middleware`], which resolves the
//! session token from the `session` cookie (the browser flow) or from an
//! `Authorization: Bearer` header (non-browser clients), verifies it, and
//! attaches the authenticated identity to the request. Every failure mode
//! is the same uniform 401.

use axum::extract::{Request, State};
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

use crate::auth::sessions::{verify_token, SESSION_COOKIE};
use crate::auth::users::get_user_by_id;
use crate::error::ApiError;
use crate::server::state::AppState;

/// Identity established by the auth middleware.
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
}

/// Pull the session token out of the request headers.
///
/// The cookie wins; the Bearer header is the fallback.
fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    let from_cookie = headers
        .get(COOKIE)
        .and_then(|h| h.to_str().ok())
        .and_then(|cookies| {
            cookies.split(';').find_map(|pair| {
                let (name, value) = pair.trim().split_once('=')?;
                (name == SESSION_COOKIE && !value.is_empty()).then(|| value.to_string())
            })
        });

    from_cookie.or_else(|| {
        headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(|token| token.to_string())
    })
}

pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_session_token(request.headers()).ok_or_else(|| {
        tracing::warn!("Missing session token on protected route");
        ApiError::Unauthenticated
    })?;

    let claims = verify_token(&token).map_err(|e| {
        tracing::warn!("Invalid session token: {e}");
        ApiError::Unauthenticated
    })?;

    let user_id = Uuid::parse_str(&claims.sub).map_err(|_| ApiError::Unauthenticated)?;

    // The token outlives nothing: the user row must still exist.
    let user = get_user_by_id(&app_state.db, user_id)
        .await?
        .ok_or(ApiError::Unauthenticated)?;

    request.extensions_mut().insert(AuthenticatedUser {
        user_id: user.id,
        username: user.username,
        email: user.email,
    });

    Ok(next.run(request).await)
}

/// Extractor for the identity installed by [`auth_middleware`].
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl axum::extract::FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(AuthUser)
            .ok_or(ApiError::Unauthenticated)
    }
}
