//! Machine API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::api::{ResponseMessage, StandardResponse};
use crate::domain::MachineInput;
use crate::error::{AppError, Result};
use crate::pagination::{PaginationQuery, PaginationRequest, PaginationResponse};
use crate::state::HasServices;

/// Create a machine
pub async fn create<S: HasServices>(
    State(state): State<S>,
    Json(input): Json<MachineInput>,
) -> Result<Response> {
    let machine = state.machine_service().create(input).await?;
    Ok(StandardResponse::success(
        ResponseMessage::MachineCreated,
        machine,
    ))
}

/// Get a machine by id
pub async fn get<S: HasServices>(State(state): State<S>, Path(id): Path<i64>) -> Result<Response> {
    let machine = state.machine_service().get(id).await?;
    Ok(StandardResponse::success(
        ResponseMessage::MachineFound,
        machine,
    ))
}

/// Query parameters for the identifier lookup, kept optional so a missing
/// parameter reports as an invalid-parameter failure rather than a generic
/// deserialization rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifierQuery {
    #[serde(default)]
    pub identifier: Option<String>,
    #[serde(default)]
    pub condominium_id: Option<i64>,
}

/// Get a machine by its identifier within a condominium
pub async fn get_by_identifier<S: HasServices>(
    State(state): State<S>,
    Query(query): Query<IdentifierQuery>,
) -> Result<Response> {
    let identifier = query
        .identifier
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| {
            AppError::InvalidParameter("Required parameter 'identifier' is missing".to_string())
        })?;
    let condominium_id = query.condominium_id.ok_or_else(|| {
        AppError::InvalidParameter("Required parameter 'condominiumId' is missing".to_string())
    })?;

    let machine = state
        .machine_service()
        .get_by_identifier(condominium_id, &identifier)
        .await?;
    Ok(StandardResponse::success(
        ResponseMessage::MachineFound,
        machine,
    ))
}

/// Update a machine by full replacement
pub async fn update<S: HasServices>(
    State(state): State<S>,
    Json(input): Json<MachineInput>,
) -> Result<Response> {
    let machine = state.machine_service().update(input).await?;
    Ok(StandardResponse::success(
        ResponseMessage::MachineUpdated,
        machine,
    ))
}

/// Delete a machine by id
pub async fn delete<S: HasServices>(
    State(state): State<S>,
    Path(id): Path<i64>,
) -> Result<Response> {
    state.machine_service().delete(id).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

/// List machines with pagination
pub async fn list<S: HasServices>(
    State(state): State<S>,
    Query(query): Query<PaginationQuery>,
) -> Result<Response> {
    let request = PaginationRequest::from_query(&query)?;
    let page = state.machine_service().list(&request).await?;
    Ok(StandardResponse::success(
        ResponseMessage::MachineFound,
        PaginationResponse::from_store(page),
    ))
}
