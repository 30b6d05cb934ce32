//! Login and session establishment for `POST /api/auth/login`.
//!
//! Both an unknown email and a wrong password produce the same 401 response
//! so callers cannot probe which accounts exist. On success the session
//! token is returned in the body and installed as an HttpOnly cookie.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::Json;
use bcrypt::verify;
use sqlx::SqlitePool;

use crate::auth::handlers::types::{AuthResponse, LoginRequest};
use crate::auth::sessions::{create_token, session_cookie};
use crate::auth::users::get_user_by_email;
use crate::error::ApiError;

pub async fn login(
    State(pool): State<SqlitePool>,
    Json(request): Json<LoginRequest>,
) -> Result<([(axum::http::HeaderName, String); 1], Json<AuthResponse>), ApiError> {
    tracing::info!("Login request for {}", request.email);

    let user = get_user_by_email(&pool, &request.email)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    if !verify(&request.password, &user.password_hash)? {
        tracing::warn!("Failed login attempt for {}", request.email);
        return Err(ApiError::InvalidCredentials);
    }

    let token = create_token(user.id, &user.email, &user.username)?;
    tracing::info!("User logged in: {} ({})", user.username, user.id);

    let cookie = session_cookie(&token);
    Ok((
        [(SET_COOKIE, cookie)],
        Json(AuthResponse {
            token,
            user: user.into(),
        }),
    ))
}
