//! Persistence boundary for listings and their terms.
//!
//! Every query only sees live records; soft-deleted rows are invisible.
//! Ranges are matched with inclusive overlap, see [`DateRange::overlaps`].

mod memory;
mod orm;

pub use memory::InMemoryTermStore;
pub use orm::SeaOrmTermStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use models::{
    accommodation::{Accommodation, AccommodationImage, NewAccommodation},
    price::{NewPrice, Price},
    term::{AvailableTerm, DateRange, NewTerm, ReservedTerm},
};
use sea_orm::DbErr;

#[async_trait]
pub trait TermStore: Send + Sync {
    /// Checks that the backing store is reachable
    async fn ping(&self) -> Result<(), DbErr> {
        Ok(())
    }

    async fn find_accommodation_by_id(&self, id: i32) -> Result<Option<Accommodation>, DbErr>;

    /// Accommodations whose capacity admits `guests` and whose address
    /// contains `address`, ignoring case
    async fn find_accommodations_by_guests_and_address(
        &self,
        guests: u32,
        address: &str,
    ) -> Result<Vec<Accommodation>, DbErr>;

    async fn find_accommodations_for_host(&self, host_id: i32)
    -> Result<Vec<Accommodation>, DbErr>;

    async fn insert_accommodation(&self, input: NewAccommodation) -> Result<Accommodation, DbErr>;

    async fn update_accommodation(
        &self,
        accommodation: &Accommodation,
    ) -> Result<Accommodation, DbErr>;

    /// Soft-deletes every accommodation of the host along with its images,
    /// prices and terms. Returns how many accommodations were deleted.
    async fn delete_host_accommodations(&self, host_id: i32) -> Result<u64, DbErr>;

    async fn insert_image(
        &self,
        accommodation_id: i32,
        image_name: &str,
    ) -> Result<AccommodationImage, DbErr>;

    async fn find_image_names(&self, accommodation_id: i32) -> Result<Vec<String>, DbErr>;

    async fn has_overlapping_available_term(
        &self,
        accommodation_id: i32,
        range: &DateRange,
    ) -> Result<bool, DbErr>;

    async fn has_overlapping_reserved_term(
        &self,
        accommodation_id: i32,
        range: &DateRange,
    ) -> Result<bool, DbErr>;

    /// Active prices overlapping `range`, in insertion order
    async fn find_active_prices(
        &self,
        accommodation_id: i32,
        range: &DateRange,
    ) -> Result<Vec<Price>, DbErr>;

    async fn find_prices_for_accommodation(
        &self,
        accommodation_id: i32,
    ) -> Result<Vec<Price>, DbErr>;

    async fn find_price_by_id(&self, id: i32) -> Result<Option<Price>, DbErr>;

    async fn insert_price(&self, input: NewPrice) -> Result<Price, DbErr>;

    async fn update_price(&self, price: &Price) -> Result<Price, DbErr>;

    /// Returns false when no live price has this id
    async fn delete_price(&self, id: i32) -> Result<bool, DbErr>;

    async fn find_available_terms_for_accommodation(
        &self,
        accommodation_id: i32,
    ) -> Result<Vec<AvailableTerm>, DbErr>;

    /// Available terms that have not ended before `instant`
    async fn find_available_terms_ending_after(
        &self,
        accommodation_id: i32,
        instant: DateTime<Utc>,
    ) -> Result<Vec<AvailableTerm>, DbErr>;

    async fn find_available_term_by_id(&self, id: i32) -> Result<Option<AvailableTerm>, DbErr>;

    async fn insert_available_term(&self, input: NewTerm) -> Result<AvailableTerm, DbErr>;

    async fn update_available_term(&self, term: &AvailableTerm) -> Result<AvailableTerm, DbErr>;

    async fn delete_available_term(&self, id: i32) -> Result<bool, DbErr>;

    async fn find_reserved_terms_for_accommodation(
        &self,
        accommodation_id: i32,
    ) -> Result<Vec<ReservedTerm>, DbErr>;

    async fn find_reserved_term_by_id(&self, id: i32) -> Result<Option<ReservedTerm>, DbErr>;

    async fn insert_reserved_term(&self, input: NewTerm) -> Result<ReservedTerm, DbErr>;

    async fn update_reserved_term(&self, term: &ReservedTerm) -> Result<ReservedTerm, DbErr>;

    async fn delete_reserved_term(&self, id: i32) -> Result<bool, DbErr>;
}
