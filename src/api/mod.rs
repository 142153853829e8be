//! REST API shared types: response envelope and message table

pub mod access;
pub mod condominium;
pub mod health;
pub mod machine;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed (status, label) pairs for every outcome the service reports.
///
/// Labels are stable and machine-checkable; the free-text diagnostic lives
/// in [`ErrorDetail::details`], never here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseMessage {
    MachineCreated,
    MachineFound,
    MachineUpdated,
    MachineDeleted,
    MachineNotFound,
    MachineIdentifierAlreadyInUse,
    CondominiumCreated,
    CondominiumFound,
    CondominiumNotFound,
    InvalidParameter,
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    InternalServerError,
}

impl ResponseMessage {
    pub fn status(&self) -> StatusCode {
        match self {
            ResponseMessage::MachineCreated => StatusCode::CREATED,
            ResponseMessage::MachineFound => StatusCode::OK,
            ResponseMessage::MachineUpdated => StatusCode::ACCEPTED,
            ResponseMessage::MachineDeleted => StatusCode::NO_CONTENT,
            ResponseMessage::MachineNotFound => StatusCode::NOT_FOUND,
            ResponseMessage::MachineIdentifierAlreadyInUse => StatusCode::CONFLICT,
            ResponseMessage::CondominiumCreated => StatusCode::CREATED,
            ResponseMessage::CondominiumFound => StatusCode::OK,
            ResponseMessage::CondominiumNotFound => StatusCode::NOT_FOUND,
            ResponseMessage::InvalidParameter => StatusCode::BAD_REQUEST,
            ResponseMessage::BadRequest => StatusCode::BAD_REQUEST,
            ResponseMessage::Unauthorized => StatusCode::UNAUTHORIZED,
            ResponseMessage::Forbidden => StatusCode::FORBIDDEN,
            ResponseMessage::NotFound => StatusCode::NOT_FOUND,
            ResponseMessage::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ResponseMessage::MachineCreated => "Machine created successfully",
            ResponseMessage::MachineFound => "Machine found",
            ResponseMessage::MachineUpdated => "Machine updated successfully",
            ResponseMessage::MachineDeleted => "Machine deleted successfully",
            ResponseMessage::MachineNotFound => "Machine not found",
            ResponseMessage::MachineIdentifierAlreadyInUse => "Machine identifier already in use",
            ResponseMessage::CondominiumCreated => "Condominium created successfully",
            ResponseMessage::CondominiumFound => "Condominium found",
            ResponseMessage::CondominiumNotFound => "Condominium not found",
            ResponseMessage::InvalidParameter => "Invalid parameter",
            ResponseMessage::BadRequest => "Bad Request",
            ResponseMessage::Unauthorized => "Unauthorized",
            ResponseMessage::Forbidden => "Forbidden",
            ResponseMessage::NotFound => "Not Found",
            ResponseMessage::InternalServerError => "Internal Server Error",
        }
    }
}

/// Uniform wrapper around every JSON response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardResponse<T> {
    pub success: bool,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub data: T,
}

impl<T: Serialize> StandardResponse<T> {
    fn new(success: bool, message: ResponseMessage, data: T) -> Self {
        Self {
            success,
            message: message.label().to_string(),
            timestamp: Utc::now(),
            data,
        }
    }

    /// Wrap a success payload, carrying the message's status code
    pub fn success(message: ResponseMessage, data: T) -> Response {
        (message.status(), Json(Self::new(true, message, data))).into_response()
    }

    /// Wrap a failure payload, carrying the message's status code
    pub fn error(message: ResponseMessage, data: T) -> Response {
        (message.status(), Json(Self::new(false, message, data))).into_response()
    }
}

/// Failure payload: human-readable cause plus the request path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub details: String,
    pub path: String,
}
