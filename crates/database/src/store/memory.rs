use super::TermStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use models::{
    accommodation::{Accommodation, AccommodationImage, NewAccommodation},
    price::{NewPrice, Price},
    term::{AvailableTerm, DateRange, NewTerm, ReservedTerm},
};
use sea_orm::DbErr;
use tokio::sync::RwLock;

/// Rows in insertion order plus the last id handed out
struct Table<T> {
    rows: Vec<T>,
    last_id: i32,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            last_id: 0,
        }
    }
}

impl<T> Table<T> {
    fn next_id(&mut self) -> i32 {
        self.last_id += 1;
        self.last_id
    }
}

#[derive(Default)]
struct State {
    accommodations: Table<Accommodation>,
    images: Table<AccommodationImage>,
    prices: Table<Price>,
    available_terms: Table<AvailableTerm>,
    reserved_terms: Table<ReservedTerm>,
}

/// [`TermStore`] kept in process memory.
///
/// Deleted rows are dropped outright and ids are never reused.
#[derive(Default)]
pub struct InMemoryTermStore {
    state: RwLock<State>,
}

impl InMemoryTermStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Replaces the row with the same id, failing like an update of a missing row
macro_rules! replace_row {
    ($table:expr, $row:expr) => {{
        let slot = $table
            .rows
            .iter_mut()
            .find(|existing| existing.id == $row.id)
            .ok_or(DbErr::RecordNotUpdated)?;
        *slot = $row.clone();
        Ok($row.clone())
    }};
}

/// Removes the row with the given id, evaluating to whether it existed
macro_rules! remove_row {
    ($table:expr, $id:expr) => {{
        let before = $table.rows.len();
        $table.rows.retain(|row| row.id != $id);
        Ok($table.rows.len() < before)
    }};
}

#[async_trait]
impl TermStore for InMemoryTermStore {
    async fn find_accommodation_by_id(&self, id: i32) -> Result<Option<Accommodation>, DbErr> {
        let state = self.state.read().await;
        Ok(state
            .accommodations
            .rows
            .iter()
            .find(|accommodation| accommodation.id == id)
            .cloned())
    }

    async fn find_accommodations_by_guests_and_address(
        &self,
        guests: u32,
        address: &str,
    ) -> Result<Vec<Accommodation>, DbErr> {
        let state = self.state.read().await;
        Ok(state
            .accommodations
            .rows
            .iter()
            .filter(|accommodation| {
                accommodation.accepts_guests(guests) && accommodation.address_contains(address)
            })
            .cloned()
            .collect())
    }

    async fn find_accommodations_for_host(
        &self,
        host_id: i32,
    ) -> Result<Vec<Accommodation>, DbErr> {
        let state = self.state.read().await;
        Ok(state
            .accommodations
            .rows
            .iter()
            .filter(|accommodation| accommodation.is_owned_by(host_id))
            .cloned()
            .collect())
    }

    async fn insert_accommodation(&self, input: NewAccommodation) -> Result<Accommodation, DbErr> {
        let mut state = self.state.write().await;
        let accommodation = Accommodation {
            id: state.accommodations.next_id(),
            name: input.name,
            address: input.address,
            amenities: input.amenities,
            min_guests: input.min_guests,
            max_guests: input.max_guests,
            host_id: input.host_id,
            accept_reservation_type: input.accept_reservation_type,
            price_type: input.price_type,
        };

        state.accommodations.rows.push(accommodation.clone());
        debug!("Inserted accommodation {} in memory", accommodation.id);
        Ok(accommodation)
    }

    async fn update_accommodation(
        &self,
        accommodation: &Accommodation,
    ) -> Result<Accommodation, DbErr> {
        let mut state = self.state.write().await;
        replace_row!(state.accommodations, accommodation)
    }

    async fn delete_host_accommodations(&self, host_id: i32) -> Result<u64, DbErr> {
        let mut state = self.state.write().await;

        let ids: Vec<i32> = state
            .accommodations
            .rows
            .iter()
            .filter(|accommodation| accommodation.is_owned_by(host_id))
            .map(|accommodation| accommodation.id)
            .collect();

        state
            .images
            .rows
            .retain(|image| !ids.contains(&image.accommodation_id));
        state
            .prices
            .rows
            .retain(|price| !ids.contains(&price.accommodation_id));
        state
            .available_terms
            .rows
            .retain(|term| !ids.contains(&term.accommodation_id));
        state
            .reserved_terms
            .rows
            .retain(|term| !ids.contains(&term.accommodation_id));
        state
            .accommodations
            .rows
            .retain(|accommodation| !ids.contains(&accommodation.id));

        Ok(ids.len() as u64)
    }

    async fn insert_image(
        &self,
        accommodation_id: i32,
        image_name: &str,
    ) -> Result<AccommodationImage, DbErr> {
        let mut state = self.state.write().await;
        let image = AccommodationImage {
            id: state.images.next_id(),
            accommodation_id,
            image_name: image_name.to_string(),
        };

        state.images.rows.push(image.clone());
        Ok(image)
    }

    async fn find_image_names(&self, accommodation_id: i32) -> Result<Vec<String>, DbErr> {
        let state = self.state.read().await;
        Ok(state
            .images
            .rows
            .iter()
            .filter(|image| image.accommodation_id == accommodation_id)
            .map(|image| image.image_name.clone())
            .collect())
    }

    async fn has_overlapping_available_term(
        &self,
        accommodation_id: i32,
        range: &DateRange,
    ) -> Result<bool, DbErr> {
        let state = self.state.read().await;
        Ok(state
            .available_terms
            .rows
            .iter()
            .any(|term| term.accommodation_id == accommodation_id && term.range().overlaps(range)))
    }

    async fn has_overlapping_reserved_term(
        &self,
        accommodation_id: i32,
        range: &DateRange,
    ) -> Result<bool, DbErr> {
        let state = self.state.read().await;
        Ok(state
            .reserved_terms
            .rows
            .iter()
            .any(|term| term.accommodation_id == accommodation_id && term.range().overlaps(range)))
    }

    async fn find_active_prices(
        &self,
        accommodation_id: i32,
        range: &DateRange,
    ) -> Result<Vec<Price>, DbErr> {
        let state = self.state.read().await;
        Ok(state
            .prices
            .rows
            .iter()
            .filter(|price| {
                price.accommodation_id == accommodation_id
                    && price.active
                    && price.range().overlaps(range)
            })
            .cloned()
            .collect())
    }

    async fn find_prices_for_accommodation(
        &self,
        accommodation_id: i32,
    ) -> Result<Vec<Price>, DbErr> {
        let state = self.state.read().await;
        Ok(state
            .prices
            .rows
            .iter()
            .filter(|price| price.accommodation_id == accommodation_id)
            .cloned()
            .collect())
    }

    async fn find_price_by_id(&self, id: i32) -> Result<Option<Price>, DbErr> {
        let state = self.state.read().await;
        Ok(state.prices.rows.iter().find(|price| price.id == id).cloned())
    }

    async fn insert_price(&self, input: NewPrice) -> Result<Price, DbErr> {
        let mut state = self.state.write().await;
        let price = Price {
            id: state.prices.next_id(),
            accommodation_id: input.accommodation_id,
            value: input.value,
            duration: input.duration,
            start_date: input.range.start(),
            end_date: input.range.end(),
            active: input.active,
        };

        state.prices.rows.push(price.clone());
        Ok(price)
    }

    async fn update_price(&self, price: &Price) -> Result<Price, DbErr> {
        let mut state = self.state.write().await;
        replace_row!(state.prices, price)
    }

    async fn delete_price(&self, id: i32) -> Result<bool, DbErr> {
        let mut state = self.state.write().await;
        remove_row!(state.prices, id)
    }

    async fn find_available_terms_for_accommodation(
        &self,
        accommodation_id: i32,
    ) -> Result<Vec<AvailableTerm>, DbErr> {
        let state = self.state.read().await;
        Ok(state
            .available_terms
            .rows
            .iter()
            .filter(|term| term.accommodation_id == accommodation_id)
            .cloned()
            .collect())
    }

    async fn find_available_terms_ending_after(
        &self,
        accommodation_id: i32,
        instant: DateTime<Utc>,
    ) -> Result<Vec<AvailableTerm>, DbErr> {
        let state = self.state.read().await;
        Ok(state
            .available_terms
            .rows
            .iter()
            .filter(|term| term.accommodation_id == accommodation_id && term.end_date >= instant)
            .cloned()
            .collect())
    }

    async fn find_available_term_by_id(&self, id: i32) -> Result<Option<AvailableTerm>, DbErr> {
        let state = self.state.read().await;
        Ok(state
            .available_terms
            .rows
            .iter()
            .find(|term| term.id == id)
            .cloned())
    }

    async fn insert_available_term(&self, input: NewTerm) -> Result<AvailableTerm, DbErr> {
        let mut state = self.state.write().await;
        let term = AvailableTerm {
            id: state.available_terms.next_id(),
            accommodation_id: input.accommodation_id,
            start_date: input.range.start(),
            end_date: input.range.end(),
        };

        state.available_terms.rows.push(term.clone());
        Ok(term)
    }

    async fn update_available_term(&self, term: &AvailableTerm) -> Result<AvailableTerm, DbErr> {
        let mut state = self.state.write().await;
        replace_row!(state.available_terms, term)
    }

    async fn delete_available_term(&self, id: i32) -> Result<bool, DbErr> {
        let mut state = self.state.write().await;
        remove_row!(state.available_terms, id)
    }

    async fn find_reserved_terms_for_accommodation(
        &self,
        accommodation_id: i32,
    ) -> Result<Vec<ReservedTerm>, DbErr> {
        let state = self.state.read().await;
        Ok(state
            .reserved_terms
            .rows
            .iter()
            .filter(|term| term.accommodation_id == accommodation_id)
            .cloned()
            .collect())
    }

    async fn find_reserved_term_by_id(&self, id: i32) -> Result<Option<ReservedTerm>, DbErr> {
        let state = self.state.read().await;
        Ok(state
            .reserved_terms
            .rows
            .iter()
            .find(|term| term.id == id)
            .cloned())
    }

    async fn insert_reserved_term(&self, input: NewTerm) -> Result<ReservedTerm, DbErr> {
        let mut state = self.state.write().await;
        let term = ReservedTerm {
            id: state.reserved_terms.next_id(),
            accommodation_id: input.accommodation_id,
            start_date: input.range.start(),
            end_date: input.range.end(),
        };

        state.reserved_terms.rows.push(term.clone());
        Ok(term)
    }

    async fn update_reserved_term(&self, term: &ReservedTerm) -> Result<ReservedTerm, DbErr> {
        let mut state = self.state.write().await;
        replace_row!(state.reserved_terms, term)
    }

    async fn delete_reserved_term(&self, id: i32) -> Result<bool, DbErr> {
        let mut state = self.state.write().await;
        remove_row!(state.reserved_terms, id)
    }
}
