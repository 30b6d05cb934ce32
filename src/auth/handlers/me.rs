//! Current-user handler for `GET /api/auth/me`.

use axum::extract::State;
use axum::response::Json;
use sqlx::SqlitePool;

use crate::auth::handlers::types::UserResponse;
use crate::auth::users::get_user_by_id;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;

pub async fn me(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
) -> Result<Json<UserResponse>, ApiError> {
    let user = get_user_by_id(&pool, user.user_id)
        .await?
        .ok_or(ApiError::Unauthenticated)?;

    Ok(Json(user.into()))
}
