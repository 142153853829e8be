//! Unified error handling for the laundry service

use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::api::{ErrorDetail, ResponseMessage, StandardResponse};

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types.
///
/// Every failure leaving the process boundary is classified into exactly one
/// of these; there is no uncategorized response shape.
#[derive(Error, Debug)]
pub enum AppError {
    /// Request body or pagination input failed validation (first error only)
    #[error("{0}")]
    Validation(String),

    /// Workflow shape violation or missing/invalid request parameter
    #[error("{0}")]
    InvalidParameter(String),

    /// No usable credentials on the request
    #[error("{0}")]
    Unauthenticated(String),

    /// Authenticated but lacking the required role
    #[error("{0}")]
    Forbidden(String),

    #[error("Machine not found")]
    MachineNotFound,

    #[error("Condominium not found")]
    CondominiumNotFound,

    #[error("Machine identifier already in use")]
    MachineIdentifierInUse,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Classified outcome attached to error responses so the outermost layer can
/// rebuild the envelope with the request path filled in.
#[derive(Debug, Clone)]
pub struct ErrorMeta {
    pub message: ResponseMessage,
    pub details: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (message, details) = match &self {
            AppError::Validation(msg) => {
                tracing::warn!("Validation failed: {}", msg);
                (ResponseMessage::BadRequest, msg.clone())
            }
            AppError::InvalidParameter(msg) => {
                tracing::warn!("Invalid parameter: {}", msg);
                (ResponseMessage::InvalidParameter, msg.clone())
            }
            AppError::Unauthenticated(msg) => {
                tracing::warn!("Authentication rejected: {}", msg);
                (ResponseMessage::Unauthorized, msg.clone())
            }
            AppError::Forbidden(msg) => {
                tracing::warn!("Authorization rejected: {}", msg);
                (ResponseMessage::Forbidden, msg.clone())
            }
            AppError::MachineNotFound => {
                tracing::warn!("Machine not found");
                (ResponseMessage::MachineNotFound, self.to_string())
            }
            AppError::CondominiumNotFound => {
                tracing::warn!("Condominium not found");
                (ResponseMessage::CondominiumNotFound, self.to_string())
            }
            AppError::MachineIdentifierInUse => {
                tracing::warn!("Machine identifier already in use");
                (
                    ResponseMessage::MachineIdentifierAlreadyInUse,
                    self.to_string(),
                )
            }
            AppError::Jwt(e) => {
                tracing::warn!("Token verification failed: {:?}", e);
                (
                    ResponseMessage::Unauthorized,
                    "Invalid or expired token".to_string(),
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    ResponseMessage::InternalServerError,
                    "An unexpected error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {:?}", e);
                (
                    ResponseMessage::InternalServerError,
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        let mut response = StandardResponse::error(
            message,
            ErrorDetail {
                details: details.clone(),
                path: String::new(),
            },
        );
        response.extensions_mut().insert(ErrorMeta { message, details });
        response
    }
}
