//! Error envelope normalization middleware
//!
//! Runs outermost so that every error response leaves the process wrapped in
//! the standard envelope with the request path filled in. Application errors
//! attach their classified outcome as a response extension; framework-level
//! rejections (unknown route, body or parameter parse failures) are wrapped
//! here with the status' canonical label.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;

use crate::api::{ErrorDetail, StandardResponse};
use crate::error::ErrorMeta;

pub async fn standard_error_responses(request: Request<Body>, next: Next) -> Response {
    let path = request.uri().path().to_string();
    let mut response = next.run(request).await;

    // Application error: rebuild the envelope with the path filled in.
    if let Some(meta) = response.extensions_mut().remove::<ErrorMeta>() {
        return StandardResponse::error(
            meta.message,
            ErrorDetail {
                details: meta.details,
                path,
            },
        );
    }

    let status = response.status();
    if !status.is_client_error() && !status.is_server_error() {
        return response;
    }

    // JSON error bodies without our marker were already shaped deliberately.
    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains("application/json"));
    if is_json {
        return response;
    }

    // Framework rejection with a plain-text body. Malformed-body rejections
    // arrive as 422; the contract reports them as 400.
    let status = if status == StatusCode::UNPROCESSABLE_ENTITY {
        StatusCode::BAD_REQUEST
    } else {
        status
    };
    let label = status.canonical_reason().unwrap_or("Error");

    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap_or_default();
    let details = match std::str::from_utf8(&bytes) {
        Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
        _ => label.to_string(),
    };

    let envelope = StandardResponse {
        success: false,
        message: label.to_string(),
        timestamp: Utc::now(),
        data: ErrorDetail { details, path },
    };
    (status, Json(envelope)).into_response()
}
