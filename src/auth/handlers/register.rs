//! Registration handler for `POST /api/auth/register`.
//!
//! Validates the input, rejects duplicate usernames and emails with a
//! user-facing message, hashes the password with bcrypt, and creates the
//! user. Every connected client is then notified of the new account with a
//! `new_user_joined` broadcast.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use bcrypt::{hash, DEFAULT_COST};
use sqlx::SqlitePool;

use crate::auth::handlers::types::{RegisterRequest, UserResponse};
use crate::auth::users::{create_user, get_user_by_email, get_user_by_username};
use crate::error::ApiError;
use crate::realtime::events::OutboundEvent;
use crate::realtime::presence::PresenceRegistry;

/// Usernames are 3-30 characters, start with a letter, and contain only
/// letters, digits, and underscores.
fn is_valid_username(username: &str) -> bool {
    if username.len() < 3 || username.len() > 30 {
        return false;
    }

    let mut chars = username.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

pub async fn register(
    State(pool): State<SqlitePool>,
    State(presence): State<PresenceRegistry>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    tracing::info!("Registration request for username {}", request.username);

    if !is_valid_username(&request.username) {
        return Err(ApiError::Validation(
            "Username must be 3-30 characters, start with a letter, and contain only letters, \
             numbers, and underscores."
                .to_string(),
        ));
    }

    if !request.email.contains('@') {
        return Err(ApiError::Validation("Invalid email format.".to_string()));
    }

    if request.password.len() < 8 {
        return Err(ApiError::Validation(
            "Password must be at least 8 characters.".to_string(),
        ));
    }

    // Pre-checks give the caller a clear message; the schema's unique
    // constraints still hold against racing registrations.
    if get_user_by_email(&pool, &request.email).await?.is_some() {
        tracing::warn!("Registration rejected, email already exists");
        return Err(ApiError::Conflict(
            "Email address already exists.".to_string(),
        ));
    }

    if get_user_by_username(&pool, &request.username)
        .await?
        .is_some()
    {
        tracing::warn!("Registration rejected, username already taken");
        return Err(ApiError::Conflict("Username already taken.".to_string()));
    }

    let password_hash = hash(&request.password, DEFAULT_COST)?;

    let user = create_user(&pool, &request.username, &request.email, &password_hash).await?;
    tracing::info!("User created: {} ({})", user.username, user.id);

    presence.broadcast(OutboundEvent::NewUserJoined {
        id: user.id,
        username: user.username.clone(),
    });

    Ok((StatusCode::CREATED, Json(user.into())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_usernames() {
        assert!(is_valid_username("alice"));
        assert!(is_valid_username("bob_42"));
        assert!(is_valid_username("Xyz"));
    }

    #[test]
    fn test_invalid_usernames() {
        assert!(!is_valid_username("ab"));
        assert!(!is_valid_username("1starts_with_digit"));
        assert!(!is_valid_username("_underscore_first"));
        assert!(!is_valid_username("has space"));
        assert!(!is_valid_username(&"x".repeat(31)));
        assert!(!is_valid_username(""));
    }
}
