use crate::dtos::error::ErrorResponse;
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use database::ServiceError;
use log::{error, warn};
use thiserror::Error;

/// Everything a handler can fail with
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("Missing Authorization header")]
    MissingCredentials,

    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Service(ServiceError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Service(ServiceError::Validation(_)) | Self::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Service(ServiceError::Unauthorized(_)) | Self::MissingCredentials => {
                StatusCode::UNAUTHORIZED
            }
            Self::Service(ServiceError::UpstreamUnavailable(_)) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            error!("Request failed with {status}: {message}");
        } else if status == StatusCode::UNAUTHORIZED {
            warn!("Rejected request: {message}");
        }

        let body = ErrorResponse {
            message,
            status_code: status.as_u16(),
        };
        (status, Json(body)).into_response()
    }
}
