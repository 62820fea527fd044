//! Fixtures shared by the service tests

use crate::store::{InMemoryTermStore, TermStore};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use identity::{IdentityError, IdentityProvider};
use models::{
    accommodation::{AcceptReservationType, Accommodation, Amenities, NewAccommodation, PriceType},
    term::DateRange,
    user::{AuthenticatedUser, UserRole},
};

/// Host with id 1
pub const HOST_TOKEN: &str = "Bearer host-1";
/// Host with id 2
pub const OTHER_HOST_TOKEN: &str = "Bearer host-2";
/// Guest with id 3
pub const GUEST_TOKEN: &str = "Bearer guest-3";
/// Makes the fake user service report an outage
pub const OUTAGE_TOKEN: &str = "Bearer outage";

/// Identity provider answering from a fixed token table
pub struct FakeIdentity;

#[async_trait]
impl IdentityProvider for FakeIdentity {
    async fn authorize_host(&self, token: &str) -> Result<AuthenticatedUser, IdentityError> {
        match token {
            HOST_TOKEN => Ok(AuthenticatedUser {
                id: 1,
                role: UserRole::Host,
            }),
            OTHER_HOST_TOKEN => Ok(AuthenticatedUser {
                id: 2,
                role: UserRole::Host,
            }),
            GUEST_TOKEN => Ok(AuthenticatedUser {
                id: 3,
                role: UserRole::Guest,
            }),
            OUTAGE_TOKEN => Err(IdentityError::Unavailable("connection refused".to_string())),
            _ => Err(IdentityError::Unauthorized("unknown token".to_string())),
        }
    }
}

pub fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

pub fn range(start: DateTime<Utc>, end: DateTime<Utc>) -> DateRange {
    DateRange::new(start, end).unwrap()
}

pub fn new_listing(address: &str, min_guests: i32, max_guests: i32) -> NewAccommodation {
    NewAccommodation {
        name: format!("Apartment on {address}"),
        address: address.to_string(),
        amenities: Amenities::default(),
        min_guests,
        max_guests,
        host_id: 1,
        accept_reservation_type: AcceptReservationType::Manual,
        price_type: PriceType::PerGuest,
    }
}

pub async fn insert_listing(
    store: &InMemoryTermStore,
    address: &str,
    min_guests: i32,
    max_guests: i32,
) -> Accommodation {
    store
        .insert_accommodation(new_listing(address, min_guests, max_guests))
        .await
        .unwrap()
}
