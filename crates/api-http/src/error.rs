//! HTTP Error Types
//!
//! Maps application errors to HTTP status codes and JSON bodies.
//! Validation failures answer with an `error` key, lookup and permission
//! failures with a `message` key - the wire shapes clients already parse.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use tolka_core::AppError;

/// HTTP-facing error: a status code plus its JSON body
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiError {
    pub fn message(status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            status,
            body: json!({ "message": msg.into() }),
        }
    }

    pub fn error(status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            status,
            body: json!({ "error": msg.into() }),
        }
    }

    /// Rejection for a non-numeric id in the path
    pub fn invalid_id() -> Self {
        Self::message(StatusCode::BAD_REQUEST, "Invalid ID provided")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Validation(msg) => Self::error(StatusCode::BAD_REQUEST, msg),
            AppError::Domain(e) => Self::error(StatusCode::BAD_REQUEST, e.to_string()),
            AppError::NotFound(msg) => Self::message(StatusCode::NOT_FOUND, msg),
            AppError::Forbidden(_) => {
                Self::message(StatusCode::FORBIDDEN, "No data found or access denied")
            }
            AppError::Conflict(msg) | AppError::InvalidState(msg) => {
                Self::error(StatusCode::CONFLICT, msg)
            }
            AppError::Dispatch(msg) => Self::error(StatusCode::BAD_GATEWAY, msg),
            other => {
                tracing::error!(error = %other, "request failed");
                Self::error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
