use crate::{
    dtos::{
        accommodation::{
            AcceptReservationTypeRequest, AccommodationDetailsResponse, AccommodationResponse,
            CreateAccommodationRequest, DeletedAccommodationsResponse, SearchRequest,
            SearchResultResponse,
        },
        error::ErrorResponse,
    },
    error::ApiError,
    extract::{ApiJson, ApiPath},
    routes::auth::BearerToken,
    state::AppState,
};
use axum::{Json, extract::State, http::StatusCode};
use database::{
    ServiceError,
    services::{AccommodationService, SearchService, search::SearchQuery},
};

/// List a new accommodation for the calling host
#[utoipa::path(
    post,
    path = "/api/accommodation",
    request_body = CreateAccommodationRequest,
    responses(
        (status = 201, description = "Accommodation created", body = AccommodationResponse),
        (status = 400, description = "Invalid accommodation", body = ErrorResponse),
        (status = 401, description = "Caller is not a host", body = ErrorResponse),
        (status = 502, description = "User service or data store unavailable", body = ErrorResponse)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Accommodations"
)]
pub async fn create_accommodation(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    ApiJson(request): ApiJson<CreateAccommodationRequest>,
) -> Result<(StatusCode, Json<AccommodationResponse>), ApiError> {
    let created = AccommodationService::create(
        state.store.as_ref(),
        state.identity.as_ref(),
        &token,
        request.into(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Get an accommodation with its images and upcoming available terms
#[utoipa::path(
    get,
    path = "/api/accommodation/{id}",
    params(
        ("id" = i32, Path, description = "Accommodation ID")
    ),
    responses(
        (status = 200, description = "Accommodation found", body = AccommodationDetailsResponse),
        (status = 404, description = "Accommodation not found", body = ErrorResponse)
    ),
    tag = "Accommodations"
)]
pub async fn get_accommodation_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<AccommodationDetailsResponse>, ApiError> {
    let details = AccommodationService::find_by_id(state.store.as_ref(), id).await?;
    Ok(Json(details.into()))
}

/// Change how an accommodation accepts reservations
#[utoipa::path(
    put,
    path = "/api/accommodation/{id}/accept-reservation-type",
    params(
        ("id" = i32, Path, description = "Accommodation ID")
    ),
    request_body = AcceptReservationTypeRequest,
    responses(
        (status = 200, description = "Reservation type updated", body = AccommodationResponse),
        (status = 400, description = "Unknown reservation type", body = ErrorResponse),
        (status = 401, description = "Caller is not the owning host", body = ErrorResponse),
        (status = 404, description = "Accommodation not found", body = ErrorResponse)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Accommodations"
)]
pub async fn update_accept_reservation_type(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    ApiPath(id): ApiPath<i32>,
    ApiJson(request): ApiJson<AcceptReservationTypeRequest>,
) -> Result<Json<AccommodationResponse>, ApiError> {
    let store = state.store.as_ref();
    let updated = AccommodationService::update_accept_reservation_type(
        store,
        state.identity.as_ref(),
        &token,
        id,
        &request.accept_reservation_type,
    )
    .await?;
    let images = store
        .find_image_names(updated.id)
        .await
        .map_err(ServiceError::from)?;

    Ok(Json(AccommodationResponse::new(updated, images)))
}

/// Find bookable accommodations with a price quote for the stay
#[utoipa::path(
    post,
    path = "/api/accommodation/search",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Matching accommodations", body = Vec<SearchResultResponse>),
        (status = 400, description = "Invalid date range", body = ErrorResponse)
    ),
    tag = "Accommodations"
)]
pub async fn search_accommodations(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SearchRequest>,
) -> Result<Json<Vec<SearchResultResponse>>, ApiError> {
    let query: SearchQuery = request.into();
    let results = SearchService::search(state.store.as_ref(), &query).await?;
    Ok(Json(results.into_iter().map(Into::into).collect()))
}

/// List every accommodation of a host
#[utoipa::path(
    get,
    path = "/api/accommodation/for-host/{hostId}",
    params(
        ("hostId" = i32, Path, description = "Host ID")
    ),
    responses(
        (status = 200, description = "Accommodations of the host", body = Vec<AccommodationResponse>)
    ),
    tag = "Accommodations"
)]
pub async fn get_host_accommodations(
    State(state): State<AppState>,
    ApiPath(host_id): ApiPath<i32>,
) -> Result<Json<Vec<AccommodationResponse>>, ApiError> {
    let accommodations = AccommodationService::find_for_host(state.store.as_ref(), host_id).await?;
    Ok(Json(accommodations.into_iter().map(Into::into).collect()))
}

/// Delete every accommodation of a host with its images, prices and terms
#[utoipa::path(
    delete,
    path = "/api/accommodation/for-host/{hostId}",
    params(
        ("hostId" = i32, Path, description = "Host ID")
    ),
    responses(
        (status = 200, description = "Accommodations deleted", body = DeletedAccommodationsResponse),
        (status = 404, description = "Host has no accommodations", body = ErrorResponse)
    ),
    tag = "Accommodations"
)]
pub async fn delete_host_accommodations(
    State(state): State<AppState>,
    ApiPath(host_id): ApiPath<i32>,
) -> Result<Json<DeletedAccommodationsResponse>, ApiError> {
    let deleted =
        AccommodationService::delete_host_accommodations(state.store.as_ref(), host_id).await?;
    Ok(Json(DeletedAccommodationsResponse { deleted }))
}
