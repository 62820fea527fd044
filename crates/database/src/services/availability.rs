use crate::{error::ServiceError, store::TermStore};
use models::{accommodation::Accommodation, price::PriceQuote, term::DateRange};

pub struct AvailabilityService;

impl AvailabilityService {
    /// Whether the accommodation can be booked for `range`.
    ///
    /// The whole range is tested at once: any available term touching it
    /// admits it and any reserved term touching it rejects it. Ranges only
    /// partly covered by available terms are still accepted.
    pub async fn is_bookable(
        store: &dyn TermStore,
        accommodation_id: i32,
        range: &DateRange,
    ) -> Result<bool, ServiceError> {
        if !store
            .has_overlapping_available_term(accommodation_id, range)
            .await?
        {
            return Ok(false);
        }

        let reserved = store
            .has_overlapping_reserved_term(accommodation_id, range)
            .await?;

        Ok(!reserved)
    }

    /// Quotes a stay from the active prices overlapping it
    pub async fn compute_price(
        store: &dyn TermStore,
        accommodation: &Accommodation,
        range: &DateRange,
        guests: u32,
    ) -> Result<PriceQuote, ServiceError> {
        let prices = store.find_active_prices(accommodation.id, range).await?;

        Ok(PriceQuote::from_prices(
            accommodation.price_type,
            &prices,
            range,
            guests,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        services::testing::{at, insert_listing, range},
        store::InMemoryTermStore,
    };
    use models::{
        accommodation::PriceType,
        price::{NewPrice, PriceDuration},
        term::NewTerm,
    };

    async fn add_available(store: &InMemoryTermStore, id: i32, term: DateRange) {
        store
            .insert_available_term(NewTerm {
                accommodation_id: id,
                range: term,
            })
            .await
            .unwrap();
    }

    async fn add_reserved(store: &InMemoryTermStore, id: i32, term: DateRange) {
        store
            .insert_reserved_term(NewTerm {
                accommodation_id: id,
                range: term,
            })
            .await
            .unwrap();
    }

    async fn add_price(store: &InMemoryTermStore, id: i32, value: f64, duration: PriceDuration) {
        store
            .insert_price(NewPrice {
                accommodation_id: id,
                value,
                duration,
                range: range(at(2023, 1, 1), at(2024, 1, 1)),
                active: true,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_not_bookable_without_available_terms() {
        let store = InMemoryTermStore::new();
        let listing = insert_listing(&store, "Novi Sad", 1, 4).await;

        let stay = range(at(2023, 3, 1), at(2023, 3, 5));
        assert!(!AvailabilityService::is_bookable(&store, listing.id, &stay).await.unwrap());
    }

    #[tokio::test]
    async fn test_bookable_iff_available_and_not_reserved() {
        let store = InMemoryTermStore::new();
        let listing = insert_listing(&store, "Novi Sad", 1, 4).await;
        add_available(&store, listing.id, range(at(2023, 1, 1), at(2023, 6, 1))).await;
        add_reserved(&store, listing.id, range(at(2023, 3, 10), at(2023, 3, 20))).await;

        let free = range(at(2023, 2, 1), at(2023, 2, 5));
        assert!(AvailabilityService::is_bookable(&store, listing.id, &free).await.unwrap());

        let clashing = range(at(2023, 3, 15), at(2023, 3, 25));
        assert!(!AvailabilityService::is_bookable(&store, listing.id, &clashing).await.unwrap());

        // Ends exactly when the reservation starts
        let touching = range(at(2023, 3, 5), at(2023, 3, 10));
        assert!(!AvailabilityService::is_bookable(&store, listing.id, &touching).await.unwrap());

        let outside = range(at(2023, 7, 1), at(2023, 7, 5));
        assert!(!AvailabilityService::is_bookable(&store, listing.id, &outside).await.unwrap());
    }

    #[tokio::test]
    async fn test_partial_cover_is_accepted() {
        let store = InMemoryTermStore::new();
        let listing = insert_listing(&store, "Novi Sad", 1, 4).await;
        add_available(&store, listing.id, range(at(2023, 1, 1), at(2023, 1, 10))).await;

        let spills_over = range(at(2023, 1, 8), at(2023, 1, 20));
        assert!(AvailabilityService::is_bookable(&store, listing.id, &spills_over).await.unwrap());
    }

    #[tokio::test]
    async fn test_other_listings_terms_are_ignored() {
        let store = InMemoryTermStore::new();
        let first = insert_listing(&store, "Novi Sad", 1, 4).await;
        let second = insert_listing(&store, "Novi Sad", 1, 4).await;
        add_available(&store, first.id, range(at(2023, 1, 1), at(2023, 6, 1))).await;
        add_available(&store, second.id, range(at(2023, 1, 1), at(2023, 6, 1))).await;
        add_reserved(&store, second.id, range(at(2023, 2, 1), at(2023, 2, 3))).await;

        let stay = range(at(2023, 2, 1), at(2023, 2, 3));
        assert!(AvailabilityService::is_bookable(&store, first.id, &stay).await.unwrap());
        assert!(!AvailabilityService::is_bookable(&store, second.id, &stay).await.unwrap());
    }

    #[tokio::test]
    async fn test_price_uses_weekend_over_regular() {
        let store = InMemoryTermStore::new();
        let listing = insert_listing(&store, "Novi Sad", 1, 4).await;
        add_price(&store, listing.id, 100.0, PriceDuration::Regular).await;
        add_price(&store, listing.id, 150.0, PriceDuration::Weekend).await;

        let stay = range(at(2023, 1, 1), at(2023, 1, 4));
        let quote = AvailabilityService::compute_price(&store, &listing, &stay, 2)
            .await
            .unwrap();
        assert_eq!(quote.base_price, 150.0);
        assert_eq!(quote.total_price, 900);
    }

    #[tokio::test]
    async fn test_price_per_unit_and_without_prices() {
        let store = InMemoryTermStore::new();
        let mut listing = insert_listing(&store, "Novi Sad", 1, 4).await;
        let stay = range(at(2023, 1, 1), at(2023, 1, 4));

        let quote = AvailabilityService::compute_price(&store, &listing, &stay, 3)
            .await
            .unwrap();
        assert_eq!((quote.base_price, quote.total_price), (0.0, 0));

        add_price(&store, listing.id, 100.0, PriceDuration::Regular).await;
        listing.price_type = PriceType::PerAccommodationUnit;
        let quote = AvailabilityService::compute_price(&store, &listing, &stay, 3)
            .await
            .unwrap();
        assert_eq!(quote.total_price, 100);
    }

    #[tokio::test]
    async fn test_prices_outside_the_stay_are_ignored() {
        let store = InMemoryTermStore::new();
        let listing = insert_listing(&store, "Novi Sad", 1, 4).await;
        add_price(&store, listing.id, 100.0, PriceDuration::Regular).await;

        let next_year = range(at(2025, 1, 1), at(2025, 1, 2));
        let quote = AvailabilityService::compute_price(&store, &listing, &next_year, 1)
            .await
            .unwrap();
        assert_eq!(quote.base_price, 0.0);
    }
}
