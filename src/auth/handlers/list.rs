//! Read-only user listing for `GET /api/users`.

use axum::extract::State;
use axum::response::Json;
use sqlx::SqlitePool;

use crate::auth::handlers::types::UserResponse;
use crate::auth::users::list_all_users;
use crate::error::ApiError;

pub async fn list_users(
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = list_all_users(&pool).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}
