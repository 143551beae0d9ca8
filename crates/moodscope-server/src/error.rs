//! Application error types and Axum response conversion.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Application-level errors with HTTP status code mapping.
#[derive(Debug)]
pub enum AppError {
    /// Request body failed to parse or validate against the schema: 400 for
    /// malformed JSON, 415 for a wrong content type, 422 for a schema miss.
    InvalidBody { status: StatusCode, message: String },
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let AppError::InvalidBody { status, message } = self;
        tracing::warn!(%status, error = %message, "request rejected");
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
