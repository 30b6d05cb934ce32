//! Backend error taxonomy.
//!
//! Every HTTP handler returns `Result<_, ApiError>`. The variants map the
//! failure classes the API distinguishes:
//!
//! - `Validation` / `Conflict` - rejected requests with a user-facing
//!   message (bad input, duplicate email or username)
//! - `InvalidCredentials` - login failures, deliberately not distinguishing
//!   which factor failed so account existence is not leaked
//! - `Unauthenticated` - protected operations without a valid session,
//!   rejected uniformly
//! - `NotFound` - a referenced entity does not exist
//! - `Database` / `PasswordHash` / `Token` - internal failures; the detail
//!   is logged server-side and never shown to the caller

use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request input.
    #[error("{0}")]
    Validation(String),

    /// A uniqueness constraint would be violated.
    #[error("{0}")]
    Conflict(String),

    /// Bad login attempt. One message for both unknown identity and wrong
    /// password.
    #[error("Invalid email or password.")]
    InvalidCredentials,

    /// Missing or invalid session on a protected operation.
    #[error("Authentication required.")]
    Unauthenticated,

    /// Referenced entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Persistence failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Password hashing or verification failure.
    #[error("password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    /// Session token could not be created.
    #[error("session token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

impl ApiError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InvalidCredentials | ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Database(_) | ApiError::PasswordHash(_) | ApiError::Token(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message exposed to the caller. Internal failures are collapsed to a
    /// generic message; the real cause only goes to the logs.
    pub fn public_message(&self) -> String {
        match self {
            ApiError::Database(_) | ApiError::PasswordHash(_) | ApiError::Token(_) => {
                "Internal server error.".to_string()
            }
            other => other.to_string(),
        }
    }
}
