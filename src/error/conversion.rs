//! Conversion of `ApiError` into HTTP responses.
//!
//! Errors are returned as JSON bodies of the shape
//! `{"error": "...", "status": 400}` with the matching status code, so
//! handlers can bubble errors with `?` and still produce a consistent
//! response format.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::error::types::ApiError;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("internal error serving request: {self}");
        }

        let body = serde_json::json!({
            "error": self.public_message(),
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}
