//! Demo data for local runs

use crate::{error::ServiceError, store::TermStore};
use chrono::{DateTime, TimeZone, Utc};
use log::info;
use models::{
    accommodation::{AcceptReservationType, Accommodation, Amenities, NewAccommodation, PriceType},
    price::{NewPrice, PriceDuration},
    term::{DateRange, NewTerm},
};

fn at(year: i32, month: u32, day: u32) -> Result<DateTime<Utc>, ServiceError> {
    Utc.with_ymd_and_hms(year, month, day, 10, 0, 0)
        .single()
        .ok_or_else(|| ServiceError::Validation(format!("Invalid seed date {year}-{month}-{day}")))
}

fn span(from: (i32, u32, u32), to: (i32, u32, u32)) -> Result<DateRange, ServiceError> {
    Ok(DateRange::new(
        at(from.0, from.1, from.2)?,
        at(to.0, to.1, to.2)?,
    )?)
}

/// Inserts two Novi Sad listings with images, prices and available terms.
///
/// Ids are taken from what the store hands back, so this works on a store
/// that already holds data. Returns the seeded accommodations.
pub async fn seed_store(store: &dyn TermStore) -> Result<Vec<Accommodation>, ServiceError> {
    let year = span((2023, 1, 1), (2024, 1, 1))?;

    let vila = store
        .insert_accommodation(NewAccommodation {
            name: "Vila Marija".to_string(),
            address: "Maksima Gorkog 17a, Novi Sad".to_string(),
            amenities: Amenities {
                has_wifi: true,
                has_kitchen: true,
                has_air_conditioning: true,
                has_free_parking: false,
            },
            min_guests: 2,
            max_guests: 5,
            host_id: 1,
            accept_reservation_type: AcceptReservationType::Manual,
            price_type: PriceType::PerGuest,
        })
        .await?;

    let lanterna = store
        .insert_accommodation(NewAccommodation {
            name: "Lanterna".to_string(),
            address: "Ljubice Ravasi 32, Novi Sad".to_string(),
            amenities: Amenities {
                has_wifi: true,
                has_kitchen: false,
                has_air_conditioning: false,
                has_free_parking: true,
            },
            min_guests: 4,
            max_guests: 4,
            host_id: 1,
            accept_reservation_type: AcceptReservationType::Automatic,
            price_type: PriceType::PerGuest,
        })
        .await?;

    let images = [
        (vila.id, "373488187.jpg"),
        (vila.id, "373487944.jpg"),
        (vila.id, "373486431.jpg"),
        (lanterna.id, "242225269.jpg"),
        (lanterna.id, "242218937.jpg"),
        (lanterna.id, "242216685.jpg"),
    ];
    for (accommodation_id, image_name) in images {
        store.insert_image(accommodation_id, image_name).await?;
    }

    let prices = [
        (vila.id, 3000.0, PriceDuration::Regular),
        (vila.id, 5000.0, PriceDuration::Holiday),
        (lanterna.id, 3500.0, PriceDuration::Regular),
    ];
    for (accommodation_id, value, duration) in prices {
        store
            .insert_price(NewPrice {
                accommodation_id,
                value,
                duration,
                range: year,
                active: true,
            })
            .await?;
    }

    let terms = [
        (vila.id, span((2023, 1, 1), (2023, 5, 1))?),
        (vila.id, span((2023, 5, 1), (2024, 1, 1))?),
        (lanterna.id, year),
    ];
    for (accommodation_id, range) in terms {
        store
            .insert_available_term(NewTerm {
                accommodation_id,
                range,
            })
            .await?;
    }

    info!("Seeded accommodations {} and {}", vila.id, lanterna.id);
    Ok(vec![vila, lanterna])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        services::{SearchService, search::SearchQuery, testing::insert_listing},
        store::InMemoryTermStore,
    };

    fn query(guests: u32) -> SearchQuery {
        SearchQuery {
            address: "novi sad".to_string(),
            guests,
            start_date: Utc.with_ymd_and_hms(2023, 6, 1, 10, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2023, 6, 4, 10, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_seeded_listings_are_searchable() {
        let store = InMemoryTermStore::new();
        seed_store(&store).await.unwrap();

        let results = SearchService::search(&store, &query(4)).await.unwrap();
        assert_eq!(results.len(), 2);

        let vila = &results[0];
        assert_eq!(vila.accommodation.name, "Vila Marija");
        assert_eq!(vila.image_names.len(), 3);
        // The holiday price outranks the regular one
        assert_eq!(vila.quote.base_price, 5000.0);
        assert_eq!(vila.quote.total_price, 5000 * 4 * 3);

        let lanterna = &results[1];
        assert_eq!(lanterna.quote.base_price, 3500.0);

        // Only Vila Marija takes two guests
        let results = SearchService::search(&store, &query(2)).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].accommodation.name, "Vila Marija");
    }

    #[tokio::test]
    async fn test_seeding_resolves_ids_from_the_store() {
        let store = InMemoryTermStore::new();
        let existing = insert_listing(&store, "Beograd", 1, 2).await;

        let seeded = seed_store(&store).await.unwrap();
        assert!(seeded.iter().all(|accommodation| accommodation.id != existing.id));

        for accommodation in &seeded {
            assert_eq!(store.find_image_names(accommodation.id).await.unwrap().len(), 3);
        }
        assert!(store.find_image_names(existing.id).await.unwrap().is_empty());
    }
}
