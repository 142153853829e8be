//! Condominium API handlers

use axum::{
    extract::{Path, Query, State},
    response::Response,
    Json,
};

use crate::api::{ResponseMessage, StandardResponse};
use crate::domain::CondominiumInput;
use crate::error::Result;
use crate::pagination::{PaginationQuery, PaginationRequest, PaginationResponse};
use crate::state::HasServices;

/// Create a condominium
pub async fn create<S: HasServices>(
    State(state): State<S>,
    Json(input): Json<CondominiumInput>,
) -> Result<Response> {
    let condominium = state.condominium_service().create(input).await?;
    Ok(StandardResponse::success(
        ResponseMessage::CondominiumCreated,
        condominium,
    ))
}

/// Get a condominium by id
pub async fn get<S: HasServices>(
    State(state): State<S>,
    Path(id): Path<i64>,
) -> Result<Response> {
    let condominium = state.condominium_service().get(id).await?;
    Ok(StandardResponse::success(
        ResponseMessage::CondominiumFound,
        condominium,
    ))
}

/// List condominiums with pagination
pub async fn list<S: HasServices>(
    State(state): State<S>,
    Query(query): Query<PaginationQuery>,
) -> Result<Response> {
    let request = PaginationRequest::from_query(&query)?;
    let page = state.condominium_service().list(&request).await?;
    Ok(StandardResponse::success(
        ResponseMessage::CondominiumFound,
        PaginationResponse::from_store(page),
    ))
}
