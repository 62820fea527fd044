use crate::{
    dtos::{
        error::ErrorResponse,
        term::{CreateTermRequest, TermResponse, UpdateTermRequest},
    },
    error::ApiError,
    extract::{ApiJson, ApiPath},
    routes::auth::BearerToken,
    state::AppState,
};
use axum::{Json, extract::State, http::StatusCode};
use database::services::TermService;

/// Open a batch of terms for booking; nothing is saved if any entry is invalid
#[utoipa::path(
    post,
    path = "/api/accommodation/available-term",
    request_body = Vec<CreateTermRequest>,
    responses(
        (status = 201, description = "Available terms created", body = Vec<TermResponse>),
        (status = 400, description = "Invalid date range", body = ErrorResponse),
        (status = 401, description = "Caller is not a host", body = ErrorResponse),
        (status = 404, description = "Accommodation not found", body = ErrorResponse)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Available terms"
)]
pub async fn create_available_terms(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    ApiJson(requests): ApiJson<Vec<CreateTermRequest>>,
) -> Result<(StatusCode, Json<Vec<TermResponse>>), ApiError> {
    let terms = TermService::create_available_terms(
        state.store.as_ref(),
        state.identity.as_ref(),
        &token,
        requests.into_iter().map(Into::into).collect(),
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(terms.into_iter().map(Into::into).collect()),
    ))
}

#[utoipa::path(
    put,
    path = "/api/accommodation/available-term/{id}",
    params(
        ("id" = i32, Path, description = "Available term ID")
    ),
    request_body = UpdateTermRequest,
    responses(
        (status = 200, description = "Available term updated", body = TermResponse),
        (status = 400, description = "Invalid date range", body = ErrorResponse),
        (status = 401, description = "Caller is not a host", body = ErrorResponse),
        (status = 404, description = "Available term not found", body = ErrorResponse)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Available terms"
)]
pub async fn update_available_term(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    ApiPath(id): ApiPath<i32>,
    ApiJson(request): ApiJson<UpdateTermRequest>,
) -> Result<Json<TermResponse>, ApiError> {
    let term = TermService::update_available_term(
        state.store.as_ref(),
        state.identity.as_ref(),
        &token,
        id,
        request.into(),
    )
    .await?;

    Ok(Json(term.into()))
}

#[utoipa::path(
    delete,
    path = "/api/accommodation/available-term/{id}",
    params(
        ("id" = i32, Path, description = "Available term ID")
    ),
    responses(
        (status = 204, description = "Available term deleted"),
        (status = 401, description = "Caller is not a host", body = ErrorResponse),
        (status = 404, description = "Available term not found", body = ErrorResponse)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Available terms"
)]
pub async fn delete_available_term(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    ApiPath(id): ApiPath<i32>,
) -> Result<StatusCode, ApiError> {
    TermService::delete_available_term(state.store.as_ref(), state.identity.as_ref(), &token, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/accommodation/{id}/available-terms",
    params(
        ("id" = i32, Path, description = "Accommodation ID")
    ),
    responses(
        (status = 200, description = "Available terms of the accommodation", body = Vec<TermResponse>),
        (status = 404, description = "Accommodation not found", body = ErrorResponse)
    ),
    tag = "Available terms"
)]
pub async fn list_available_terms(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<Vec<TermResponse>>, ApiError> {
    let terms = TermService::list_available_terms(state.store.as_ref(), id).await?;
    Ok(Json(terms.into_iter().map(Into::into).collect()))
}
