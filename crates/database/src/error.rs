use identity::IdentityError;
use models::term::InvalidRange;
use sea_orm::DbErr;
use thiserror::Error;

/// Every way a service operation can fail
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    /// The data store or the user service could not answer
    #[error("{0}")]
    UpstreamUnavailable(String),
}

impl From<DbErr> for ServiceError {
    fn from(err: DbErr) -> Self {
        Self::UpstreamUnavailable(format!("Data store error: {err}"))
    }
}

impl From<IdentityError> for ServiceError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::Unauthorized(_) => Self::Unauthorized(err.to_string()),
            IdentityError::Unavailable(_) | IdentityError::Config(_) => {
                Self::UpstreamUnavailable(err.to_string())
            }
        }
    }
}

impl From<InvalidRange> for ServiceError {
    fn from(err: InvalidRange) -> Self {
        Self::Validation(err.to_string())
    }
}
