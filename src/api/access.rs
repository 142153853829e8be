//! Plain access endpoints used to exercise the authorization policy

use axum::http::StatusCode;

pub async fn index() -> &'static str {
    "This is a dummy endpoint"
}

/// Fallback for paths matching no route; the envelope layer wraps it.
pub async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "No resource found")
}

pub async fn home() -> &'static str {
    "This is a home endpoint"
}

pub async fn farewell() -> &'static str {
    "See you next time!"
}
