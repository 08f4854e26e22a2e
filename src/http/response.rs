//! Responses produced by the gate itself.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Body sent to blocked clients.
pub const BLOCKED_BODY: &str = "Forbidden: Your IP has been blocked";

/// 403 with a plain-text body. Axum sets `text/plain; charset=utf-8`.
pub fn forbidden() -> Response {
    (StatusCode::FORBIDDEN, BLOCKED_BODY).into_response()
}

/// Upstream could not be reached.
pub fn bad_gateway() -> Response {
    (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
}
