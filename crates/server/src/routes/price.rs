use crate::{
    dtos::{
        error::ErrorResponse,
        price::{CreatePriceRequest, PriceResponse, UpdatePriceRequest},
    },
    error::ApiError,
    extract::{ApiJson, ApiPath},
    routes::auth::BearerToken,
    state::AppState,
};
use axum::{Json, extract::State, http::StatusCode};
use database::services::PriceService;

/// Create a batch of prices; nothing is saved if any entry is invalid
#[utoipa::path(
    post,
    path = "/api/accommodation/price",
    request_body = Vec<CreatePriceRequest>,
    responses(
        (status = 201, description = "Prices created", body = Vec<PriceResponse>),
        (status = 400, description = "Invalid price", body = ErrorResponse),
        (status = 401, description = "Caller is not a host", body = ErrorResponse),
        (status = 404, description = "Accommodation not found", body = ErrorResponse)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Prices"
)]
pub async fn create_prices(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    ApiJson(requests): ApiJson<Vec<CreatePriceRequest>>,
) -> Result<(StatusCode, Json<Vec<PriceResponse>>), ApiError> {
    let prices = PriceService::create_prices(
        state.store.as_ref(),
        state.identity.as_ref(),
        &token,
        requests.into_iter().map(Into::into).collect(),
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(prices.into_iter().map(Into::into).collect()),
    ))
}

#[utoipa::path(
    put,
    path = "/api/accommodation/price/{id}",
    params(
        ("id" = i32, Path, description = "Price ID")
    ),
    request_body = UpdatePriceRequest,
    responses(
        (status = 200, description = "Price updated", body = PriceResponse),
        (status = 400, description = "Invalid price", body = ErrorResponse),
        (status = 401, description = "Caller is not a host", body = ErrorResponse),
        (status = 404, description = "Price not found", body = ErrorResponse)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Prices"
)]
pub async fn update_price(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    ApiPath(id): ApiPath<i32>,
    ApiJson(request): ApiJson<UpdatePriceRequest>,
) -> Result<Json<PriceResponse>, ApiError> {
    let price = PriceService::update_price(
        state.store.as_ref(),
        state.identity.as_ref(),
        &token,
        id,
        request.into(),
    )
    .await?;

    Ok(Json(price.into()))
}

#[utoipa::path(
    delete,
    path = "/api/accommodation/price/{id}",
    params(
        ("id" = i32, Path, description = "Price ID")
    ),
    responses(
        (status = 204, description = "Price deleted"),
        (status = 401, description = "Caller is not a host", body = ErrorResponse),
        (status = 404, description = "Price not found", body = ErrorResponse)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Prices"
)]
pub async fn delete_price(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    ApiPath(id): ApiPath<i32>,
) -> Result<StatusCode, ApiError> {
    PriceService::delete_price(state.store.as_ref(), state.identity.as_ref(), &token, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List every price of an accommodation
#[utoipa::path(
    get,
    path = "/api/accommodation/{id}/prices",
    params(
        ("id" = i32, Path, description = "Accommodation ID")
    ),
    responses(
        (status = 200, description = "Prices of the accommodation", body = Vec<PriceResponse>),
        (status = 404, description = "Accommodation not found", body = ErrorResponse)
    ),
    tag = "Prices"
)]
pub async fn list_prices(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<Vec<PriceResponse>>, ApiError> {
    let prices = PriceService::list_prices(state.store.as_ref(), id).await?;
    Ok(Json(prices.into_iter().map(Into::into).collect()))
}
