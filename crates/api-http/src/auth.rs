//! Caller Identity Extraction
//!
//! The service sits behind a gateway that authenticates callers and
//! forwards their identity in headers. This layer only parses that
//! identity into a typed value; it is deliberately not an auth system.

use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;
use tolka_core::domain::{AuthenticatedUser, Role};

use crate::error::ApiError;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// Parse `x-user-id` / `x-user-role` into an [`AuthenticatedUser`] extension
pub async fn identity_layer(mut req: Request, next: Next) -> Result<Response, ApiError> {
    let id = header(&req, USER_ID_HEADER).and_then(|value| value.parse::<i64>().ok());
    let role = header(&req, USER_ROLE_HEADER).and_then(|value| value.parse::<Role>().ok());

    match (id, role) {
        (Some(id), Some(role)) => {
            req.extensions_mut().insert(AuthenticatedUser { id, role });
            Ok(next.run(req).await)
        }
        _ => Err(ApiError::message(
            StatusCode::UNAUTHORIZED,
            "Missing or invalid caller identity",
        )),
    }
}

fn header<'a>(req: &'a Request, name: &str) -> Option<&'a str> {
    req.headers().get(name).and_then(|value| value.to_str().ok())
}
