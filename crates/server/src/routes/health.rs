use crate::{dtos::error::ErrorResponse, error::ApiError, state::AppState};
use axum::{extract::State, http::StatusCode};
use database::ServiceError;

/// Returns "OK" while the process is up
#[utoipa::path(
    get,
    path = "/probe/liveness",
    responses(
        (status = 200, description = "Service is alive", content_type = "text/plain", body = String)
    ),
    tag = "Health"
)]
pub async fn liveness() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}

/// Returns "OK" once the data store answers
#[utoipa::path(
    get,
    path = "/probe/readiness",
    responses(
        (status = 200, description = "Service is ready", content_type = "text/plain", body = String),
        (status = 502, description = "Data store unreachable", body = ErrorResponse)
    ),
    tag = "Health"
)]
pub async fn readiness(State(state): State<AppState>) -> Result<(StatusCode, &'static str), ApiError> {
    state.store.ping().await.map_err(ServiceError::from)?;
    Ok((StatusCode::OK, "OK"))
}
