use crate::dtos::term::TermResponse;
use chrono::{DateTime, Utc};
use database::services::{
    accommodation::{AccommodationDetails, AccommodationWithImages, CreateAccommodation},
    search::{SearchQuery, SearchResult},
};
use models::accommodation::{Accommodation, Amenities};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccommodationRequest {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub has_wifi: bool,
    #[serde(default)]
    pub has_kitchen: bool,
    #[serde(default)]
    pub has_air_conditioning: bool,
    #[serde(default)]
    pub has_free_parking: bool,
    pub min_guests: i32,
    pub max_guests: i32,
    /// PER_GUEST or PER_ACCOMMODATION_UNIT
    pub price_type: String,
    #[serde(default)]
    pub images: Vec<String>,
}

impl From<CreateAccommodationRequest> for CreateAccommodation {
    fn from(request: CreateAccommodationRequest) -> Self {
        Self {
            name: request.name,
            address: request.address,
            amenities: Amenities {
                has_wifi: request.has_wifi,
                has_kitchen: request.has_kitchen,
                has_air_conditioning: request.has_air_conditioning,
                has_free_parking: request.has_free_parking,
            },
            min_guests: request.min_guests,
            max_guests: request.max_guests,
            price_type: request.price_type,
            image_names: request.images,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccommodationResponse {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub has_wifi: bool,
    pub has_kitchen: bool,
    pub has_air_conditioning: bool,
    pub has_free_parking: bool,
    pub min_guests: i32,
    pub max_guests: i32,
    pub images: Vec<String>,
    pub host_id: i32,
    pub accept_reservation_type: String,
    pub price_type: String,
}

impl AccommodationResponse {
    pub fn new(accommodation: Accommodation, images: Vec<String>) -> Self {
        Self {
            id: accommodation.id,
            name: accommodation.name,
            address: accommodation.address,
            has_wifi: accommodation.amenities.has_wifi,
            has_kitchen: accommodation.amenities.has_kitchen,
            has_air_conditioning: accommodation.amenities.has_air_conditioning,
            has_free_parking: accommodation.amenities.has_free_parking,
            min_guests: accommodation.min_guests,
            max_guests: accommodation.max_guests,
            images,
            host_id: accommodation.host_id,
            accept_reservation_type: accommodation.accept_reservation_type.to_string(),
            price_type: accommodation.price_type.to_string(),
        }
    }
}

impl From<AccommodationWithImages> for AccommodationResponse {
    fn from(value: AccommodationWithImages) -> Self {
        Self::new(value.accommodation, value.image_names)
    }
}

/// An accommodation with the available terms that have not ended yet
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccommodationDetailsResponse {
    #[serde(flatten)]
    pub accommodation: AccommodationResponse,
    pub available_terms: Vec<TermResponse>,
}

impl From<AccommodationDetails> for AccommodationDetailsResponse {
    fn from(details: AccommodationDetails) -> Self {
        Self {
            accommodation: AccommodationResponse::new(details.accommodation, details.image_names),
            available_terms: details
                .available_terms
                .into_iter()
                .map(TermResponse::from)
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AcceptReservationTypeRequest {
    /// MANUAL or AUTOMATIC
    pub accept_reservation_type: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeletedAccommodationsResponse {
    pub deleted: u64,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Case-insensitive part of the address
    #[serde(default)]
    pub address: String,
    pub number_of_guests: u32,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl From<SearchRequest> for SearchQuery {
    fn from(request: SearchRequest) -> Self {
        Self {
            address: request.address,
            guests: request.number_of_guests,
            start_date: request.start_date,
            end_date: request.end_date,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultResponse {
    pub accommodation: AccommodationResponse,
    pub number_of_guests: u32,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    /// Unit price picked from the active prices
    pub base_price: f64,
    pub total_price: i64,
}

impl From<SearchResult> for SearchResultResponse {
    fn from(result: SearchResult) -> Self {
        Self {
            accommodation: AccommodationResponse::new(result.accommodation, result.image_names),
            number_of_guests: result.guests,
            start_date: result.start_date,
            end_date: result.end_date,
            base_price: result.quote.base_price,
            total_price: result.quote.total_price,
        }
    }
}
