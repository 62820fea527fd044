use chrono::{DateTime, Utc};
use database::services::term::{CreateTerm, UpdateTerm};
use models::term::{AvailableTerm, ReservedTerm};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTermRequest {
    pub accommodation_id: i32,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl From<CreateTermRequest> for CreateTerm {
    fn from(request: CreateTermRequest) -> Self {
        Self {
            accommodation_id: request.accommodation_id,
            start_date: request.start_date,
            end_date: request.end_date,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTermRequest {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl From<UpdateTermRequest> for UpdateTerm {
    fn from(request: UpdateTermRequest) -> Self {
        Self {
            start_date: request.start_date,
            end_date: request.end_date,
        }
    }
}

/// An available or reserved term
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TermResponse {
    pub id: i32,
    pub accommodation_id: i32,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl From<AvailableTerm> for TermResponse {
    fn from(term: AvailableTerm) -> Self {
        Self {
            id: term.id,
            accommodation_id: term.accommodation_id,
            start_date: term.start_date,
            end_date: term.end_date,
        }
    }
}

impl From<ReservedTerm> for TermResponse {
    fn from(term: ReservedTerm) -> Self {
        Self {
            id: term.id,
            accommodation_id: term.accommodation_id,
            start_date: term.start_date,
            end_date: term.end_date,
        }
    }
}
