//! Reserved terms are written by the reservation service and take no credentials

use crate::{
    dtos::{
        error::ErrorResponse,
        term::{CreateTermRequest, TermResponse, UpdateTermRequest},
    },
    error::ApiError,
    extract::{ApiJson, ApiPath},
    state::AppState,
};
use axum::{Json, extract::State, http::StatusCode};
use database::services::TermService;

#[utoipa::path(
    post,
    path = "/api/accommodation/reserved-term",
    request_body = CreateTermRequest,
    responses(
        (status = 201, description = "Reserved term created", body = TermResponse),
        (status = 400, description = "Invalid date range", body = ErrorResponse),
        (status = 404, description = "Accommodation not found", body = ErrorResponse)
    ),
    tag = "Reserved terms"
)]
pub async fn create_reserved_term(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateTermRequest>,
) -> Result<(StatusCode, Json<TermResponse>), ApiError> {
    let term = TermService::create_reserved_term(state.store.as_ref(), request.into()).await?;
    Ok((StatusCode::CREATED, Json(term.into())))
}

#[utoipa::path(
    put,
    path = "/api/accommodation/reserved-term/{id}",
    params(
        ("id" = i32, Path, description = "Reserved term ID")
    ),
    request_body = UpdateTermRequest,
    responses(
        (status = 200, description = "Reserved term updated", body = TermResponse),
        (status = 400, description = "Invalid date range", body = ErrorResponse),
        (status = 404, description = "Reserved term not found", body = ErrorResponse)
    ),
    tag = "Reserved terms"
)]
pub async fn update_reserved_term(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(request): ApiJson<UpdateTermRequest>,
) -> Result<Json<TermResponse>, ApiError> {
    let term = TermService::update_reserved_term(state.store.as_ref(), id, request.into()).await?;
    Ok(Json(term.into()))
}

#[utoipa::path(
    delete,
    path = "/api/accommodation/reserved-term/{id}",
    params(
        ("id" = i32, Path, description = "Reserved term ID")
    ),
    responses(
        (status = 204, description = "Reserved term deleted"),
        (status = 404, description = "Reserved term not found", body = ErrorResponse)
    ),
    tag = "Reserved terms"
)]
pub async fn delete_reserved_term(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<StatusCode, ApiError> {
    TermService::delete_reserved_term(state.store.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/accommodation/{id}/reserved-terms",
    params(
        ("id" = i32, Path, description = "Accommodation ID")
    ),
    responses(
        (status = 200, description = "Reserved terms of the accommodation", body = Vec<TermResponse>),
        (status = 404, description = "Accommodation not found", body = ErrorResponse)
    ),
    tag = "Reserved terms"
)]
pub async fn list_reserved_terms(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<Vec<TermResponse>>, ApiError> {
    let terms = TermService::list_reserved_terms(state.store.as_ref(), id).await?;
    Ok(Json(terms.into_iter().map(Into::into).collect()))
}
