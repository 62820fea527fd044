use chrono::{DateTime, Utc};
use database::services::price::{CreatePrice, UpdatePrice};
use models::price::Price;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePriceRequest {
    pub accommodation_id: i32,
    pub value: f64,
    /// REGULAR, WEEKEND or HOLIDAY
    pub price_duration: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl From<CreatePriceRequest> for CreatePrice {
    fn from(request: CreatePriceRequest) -> Self {
        Self {
            accommodation_id: request.accommodation_id,
            value: request.value,
            duration: request.price_duration,
            start_date: request.start_date,
            end_date: request.end_date,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePriceRequest {
    pub value: f64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    /// Left unchanged when omitted
    #[serde(default)]
    pub active: Option<bool>,
}

impl From<UpdatePriceRequest> for UpdatePrice {
    fn from(request: UpdatePriceRequest) -> Self {
        Self {
            value: request.value,
            start_date: request.start_date,
            end_date: request.end_date,
            active: request.active,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PriceResponse {
    pub id: i32,
    pub accommodation_id: i32,
    pub value: f64,
    pub price_duration: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub active: bool,
}

impl From<Price> for PriceResponse {
    fn from(price: Price) -> Self {
        Self {
            id: price.id,
            accommodation_id: price.accommodation_id,
            value: price.value,
            price_duration: price.duration.to_string(),
            start_date: price.start_date,
            end_date: price.end_date,
            active: price.active,
        }
    }
}
