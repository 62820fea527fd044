use crate::{error::ServiceError, services::AvailabilityService, store::TermStore};
use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use log::debug;
use models::{accommodation::Accommodation, price::PriceQuote, term::DateRange};

/// What a guest is looking for
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    /// Matched as a case-insensitive substring of the address
    pub address: String,
    pub guests: u32,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// A bookable accommodation together with its quote for the query
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub accommodation: Accommodation,
    pub image_names: Vec<String>,
    pub guests: u32,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub quote: PriceQuote,
}

pub struct SearchService;

impl SearchService {
    /// Finds every accommodation that fits the guests, matches the address and
    /// is bookable for the whole range.
    ///
    /// Candidates are evaluated concurrently; results keep the store's order.
    pub async fn search(
        store: &dyn TermStore,
        query: &SearchQuery,
    ) -> Result<Vec<SearchResult>, ServiceError> {
        let range = DateRange::new(query.start_date, query.end_date)?;

        let candidates = store
            .find_accommodations_by_guests_and_address(query.guests, &query.address)
            .await?;
        let candidate_count = candidates.len();

        let evaluations = candidates
            .into_iter()
            .map(|accommodation| Self::evaluate(store, accommodation, &range, query.guests));

        let results: Vec<SearchResult> = try_join_all(evaluations)
            .await?
            .into_iter()
            .flatten()
            .collect();

        debug!(
            "Search for {:?} matched {} of {candidate_count} candidates",
            query.address,
            results.len()
        );
        Ok(results)
    }

    async fn evaluate(
        store: &dyn TermStore,
        accommodation: Accommodation,
        range: &DateRange,
        guests: u32,
    ) -> Result<Option<SearchResult>, ServiceError> {
        if !accommodation.accepts_guests(guests)
            || !AvailabilityService::is_bookable(store, accommodation.id, range).await?
        {
            return Ok(None);
        }

        let quote = AvailabilityService::compute_price(store, &accommodation, range, guests).await?;
        let image_names = store.find_image_names(accommodation.id).await?;

        Ok(Some(SearchResult {
            accommodation,
            image_names,
            guests,
            start_date: range.start(),
            end_date: range.end(),
            quote,
        }))
    }
}
