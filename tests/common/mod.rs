//! Shared fixtures for the integration tests: an in-memory database, a
//! test server wired to the real router, and auth helpers.

#![allow(dead_code)]

use axum_test::TestServer;
use axum::http::header::COOKIE;
use axum::http::HeaderValue;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use uuid::Uuid;

use syncchat::realtime::presence::PresenceRegistry;
use syncchat::routes::create_router;
use syncchat::server::state::AppState;

/// A test server plus direct handles on its state, so tests can attach
/// fake connections and inspect the database behind the HTTP surface.
pub struct TestApp {
    pub server: TestServer,
    pub pool: SqlitePool,
    pub presence: PresenceRegistry,
}

/// Fresh in-memory database with the schema applied.
///
/// A single connection keeps every query on the same in-memory instance.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("failed to run migrations");

    pool
}

pub async fn spawn_app() -> TestApp {
    let pool = test_pool().await;
    let presence = PresenceRegistry::new();
    let state = AppState {
        db: pool.clone(),
        presence: presence.clone(),
    };

    let server = TestServer::new(create_router(state)).expect("failed to start test server");

    TestApp {
        server,
        pool,
        presence,
    }
}

/// Register a user through the API and return their id.
pub async fn register_user(
    server: &TestServer,
    username: &str,
    email: &str,
    password: &str,
) -> Uuid {
    let response = server
        .post("/api/auth/register")
        .json(&serde_json::json!({
            "username": username,
            "email": email,
            "password": password,
        }))
        .await;

    assert_eq!(
        response.status_code(),
        axum::http::StatusCode::CREATED,
        "registration failed: {}",
        response.text()
    );

    let body: serde_json::Value = response.json();
    body["id"]
        .as_str()
        .and_then(|id| Uuid::parse_str(id).ok())
        .expect("registration response carried no user id")
}

/// Log in through the API and return the session token.
pub async fn login_token(server: &TestServer, email: &str, password: &str) -> String {
    let response = server
        .post("/api/auth/login")
        .json(&serde_json::json!({
            "email": email,
            "password": password,
        }))
        .await;

    assert_eq!(response.status_code(), axum::http::StatusCode::OK);

    let body: serde_json::Value = response.json();
    body["token"]
        .as_str()
        .expect("login response carried no token")
        .to_string()
}

/// `Cookie` header value carrying a session token.
pub fn session_cookie_header(token: &str) -> (axum::http::HeaderName, HeaderValue) {
    (
        COOKIE,
        HeaderValue::from_str(&format!("session={token}")).expect("invalid cookie value"),
    )
}
