use crate::{
    dtos::{
        accommodation::{
            AcceptReservationTypeRequest, AccommodationDetailsResponse, AccommodationResponse,
            CreateAccommodationRequest, DeletedAccommodationsResponse, SearchRequest,
            SearchResultResponse,
        },
        error::ErrorResponse,
        price::{CreatePriceRequest, PriceResponse, UpdatePriceRequest},
        term::{CreateTermRequest, TermResponse, UpdateTermRequest},
    },
    routes::{accommodation, available_term, health, price, reserved_term},
};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "jwt",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::liveness,
        health::readiness,
        accommodation::create_accommodation,
        accommodation::get_accommodation_by_id,
        accommodation::update_accept_reservation_type,
        accommodation::search_accommodations,
        accommodation::get_host_accommodations,
        accommodation::delete_host_accommodations,
        price::create_prices,
        price::update_price,
        price::delete_price,
        price::list_prices,
        available_term::create_available_terms,
        available_term::update_available_term,
        available_term::delete_available_term,
        available_term::list_available_terms,
        reserved_term::create_reserved_term,
        reserved_term::update_reserved_term,
        reserved_term::delete_reserved_term,
        reserved_term::list_reserved_terms
    ),
    components(schemas(
        AcceptReservationTypeRequest,
        AccommodationDetailsResponse,
        AccommodationResponse,
        CreateAccommodationRequest,
        DeletedAccommodationsResponse,
        SearchRequest,
        SearchResultResponse,
        ErrorResponse,
        CreatePriceRequest,
        PriceResponse,
        UpdatePriceRequest,
        CreateTermRequest,
        TermResponse,
        UpdateTermRequest
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness and readiness probes"),
        (name = "Accommodations", description = "Accommodation listing and search"),
        (name = "Prices", description = "Price rules of accommodations"),
        (name = "Available terms", description = "Date ranges open for booking"),
        (name = "Reserved terms", description = "Date ranges taken by reservations"),
    ),
    info(
        title = "Accommodation API",
        version = "1.0.0",
        description = "Accommodation listings, availability and pricing",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
