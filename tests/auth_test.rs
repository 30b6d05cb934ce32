//! Integration tests for registration, login, logout, and user listing.

mod common;

use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use common::{login_token, register_user, session_cookie_header, spawn_app};

#[tokio::test]
async fn register_returns_created_user() {
    let app = spawn_app().await;

    let response = app
        .server
        .post("/api/auth/register")
        .json(&serde_json::json!({
            "username": "alice",
            "email": "alice@example.com",
            "password": "password123",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["username"], "alice");
    assert_eq!(body["email"], "alice@example.com");
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn register_duplicate_email_is_rejected_without_a_new_record() {
    let app = spawn_app().await;
    register_user(&app.server, "alice", "alice@example.com", "password123").await;

    let response = app
        .server
        .post("/api/auth/register")
        .json(&serde_json::json!({
            "username": "different_name",
            "email": "alice@example.com",
            "password": "password123",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Email address already exists.");

    let user_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(user_count, 1);
}

#[tokio::test]
async fn register_duplicate_username_is_rejected() {
    let app = spawn_app().await;
    register_user(&app.server, "alice", "alice@example.com", "password123").await;

    let response = app
        .server
        .post("/api/auth/register")
        .json(&serde_json::json!({
            "username": "alice",
            "email": "other@example.com",
            "password": "password123",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn register_validates_input() {
    let app = spawn_app().await;

    let cases = [
        serde_json::json!({"username": "alice", "email": "not-an-email", "password": "password123"}),
        serde_json::json!({"username": "alice", "email": "a@b.c", "password": "short"}),
        serde_json::json!({"username": "x", "email": "a@b.c", "password": "password123"}),
    ];

    for payload in cases {
        let response = app.server.post("/api/auth/register").json(&payload).await;
        assert_eq!(
            response.status_code(),
            StatusCode::BAD_REQUEST,
            "payload should have been rejected: {payload}"
        );
    }
}

#[tokio::test]
async fn login_sets_session_cookie_and_token_works() {
    let app = spawn_app().await;
    register_user(&app.server, "alice", "alice@example.com", "password123").await;

    let response = app
        .server
        .post("/api/auth/login")
        .json(&serde_json::json!({
            "email": "alice@example.com",
            "password": "password123",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .expect("login did not set a session cookie");
    assert!(cookie.starts_with("session="));
    assert!(cookie.contains("HttpOnly"));

    let body: serde_json::Value = response.json();
    let token = body["token"].as_str().unwrap();

    let (name, value) = session_cookie_header(token);
    let me = app.server.get("/api/auth/me").add_header(name, value).await;
    assert_eq!(me.status_code(), StatusCode::OK);
    let me_body: serde_json::Value = me.json();
    assert_eq!(me_body["email"], "alice@example.com");
}

#[tokio::test]
async fn login_failures_are_uniform() {
    let app = spawn_app().await;
    register_user(&app.server, "alice", "alice@example.com", "password123").await;

    let wrong_password = app
        .server
        .post("/api/auth/login")
        .json(&serde_json::json!({
            "email": "alice@example.com",
            "password": "wrongpassword",
        }))
        .await;

    let unknown_email = app
        .server
        .post("/api/auth/login")
        .json(&serde_json::json!({
            "email": "nobody@example.com",
            "password": "password123",
        }))
        .await;

    // Neither response may reveal which factor failed.
    assert_eq!(wrong_password.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status_code(), StatusCode::UNAUTHORIZED);
    let body_a: serde_json::Value = wrong_password.json();
    let body_b: serde_json::Value = unknown_email.json();
    assert_eq!(body_a, body_b);
}

#[tokio::test]
async fn protected_routes_reject_missing_session() {
    let app = spawn_app().await;

    for path in ["/api/auth/me", "/api/conversations"] {
        let response = app.server.get(path).await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn logout_clears_the_session_cookie() {
    let app = spawn_app().await;

    let response = app.server.post("/api/auth/logout").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .expect("logout did not clear the session cookie");
    assert!(cookie.starts_with("session=;"));
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn user_listing_is_public_and_complete() {
    let app = spawn_app().await;
    register_user(&app.server, "alice", "alice@example.com", "password123").await;
    register_user(&app.server, "bob", "bob@example.com", "password123").await;

    let response = app.server.get("/api/users").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let users: Vec<serde_json::Value> = response.json();
    assert_eq!(users.len(), 2);
    let usernames: Vec<&str> = users.iter().filter_map(|u| u["username"].as_str()).collect();
    assert!(usernames.contains(&"alice"));
    assert!(usernames.contains(&"bob"));
    assert!(response.text().find("password").is_none());
}

#[tokio::test]
async fn stale_session_for_deleted_user_is_rejected() {
    let app = spawn_app().await;
    let user_id = register_user(&app.server, "alice", "alice@example.com", "password123").await;
    let token = login_token(&app.server, "alice@example.com", "password123").await;

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(&app.pool)
        .await
        .unwrap();

    let (name, value) = session_cookie_header(&token);
    let response = app.server.get("/api/auth/me").add_header(name, value).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}
