use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of every failed request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub message: String,
    pub status_code: u16,
}
