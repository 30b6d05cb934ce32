//! Session tokens.
//!
//! Login issues a signed JWT which is carried in an HttpOnly `session`
//! cookie (with an `Authorization: Bearer` fallback for non-browser
//! clients). The token is the only session state; nothing is stored
//! server-side, so logout is simply clearing the cookie.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Name of the session cookie set on login and cleared on logout.
pub const SESSION_COOKIE: &str = "session";

/// Session lifetime: 30 days.
const SESSION_TTL_SECS: u64 = 30 * 24 * 60 * 60;

/// JWT claims carried by the session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,
    /// User email.
    pub email: String,
    /// Username.
    pub username: String,
    /// Expiration time (Unix timestamp).
    pub exp: u64,
    /// Issued at (Unix timestamp).
    pub iat: u64,
}

/// Signing secret from the environment.
fn get_session_secret() -> String {
    std::env::var("SESSION_SECRET").unwrap_or_else(|_| {
        tracing::warn!("SESSION_SECRET not set, using development default");
        "insecure-dev-secret-change-in-production".to_string()
    })
}

/// Create a session token for a user.
pub fn create_token(
    user_id: Uuid,
    email: &str,
    username: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp().max(0) as u64;

    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        username: username.to_string(),
        exp: now + SESSION_TTL_SECS,
        iat: now,
    };

    let secret = get_session_secret();
    let key = EncodingKey::from_secret(secret.as_ref());

    encode(&Header::default(), &claims, &key)
}

/// Verify and decode a session token.
pub fn verify_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let secret = get_session_secret();
    let key = DecodingKey::from_secret(secret.as_ref());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &key, &validation)?;
    Ok(token_data.claims)
}

/// `Set-Cookie` value installing the session cookie.
pub fn session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={SESSION_TTL_SECS}")
}

/// `Set-Cookie` value clearing the session cookie.
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_verify_token() {
        let user_id = Uuid::new_v4();
        let token = create_token(user_id, "test@example.com", "tester").unwrap();
        assert!(!token.is_empty());

        let claims = verify_token(&token).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.email, "test@example.com");
        assert_eq!(claims.username, "tester");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_verify_invalid_token() {
        let result = verify_token("invalid.token.here");
        assert!(result.is_err());
    }

    #[test]
    fn test_verify_tampered_token() {
        let token = create_token(Uuid::new_v4(), "a@b.c", "a").unwrap();
        let mut tampered = token.clone();
        tampered.pop();
        assert!(verify_token(&tampered).is_err());
    }

    #[test]
    fn test_cookie_values() {
        let cookie = session_cookie("tok123");
        assert!(cookie.starts_with("session=tok123;"));
        assert!(cookie.contains("HttpOnly"));

        let cleared = clear_session_cookie();
        assert!(cleared.starts_with("session=;"));
        assert!(cleared.contains("Max-Age=0"));
    }
}
