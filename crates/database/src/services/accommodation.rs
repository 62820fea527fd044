use crate::{error::ServiceError, services::auth::authorize_host, store::TermStore};
use chrono::Utc;
use futures::future::try_join_all;
use identity::IdentityProvider;
use log::info;
use models::{
    accommodation::{
        AcceptReservationType, Accommodation, Amenities, NewAccommodation, PriceType,
    },
    term::AvailableTerm,
};

/// Input for listing a new accommodation; the host comes from the caller's token
#[derive(Debug, Clone, PartialEq)]
pub struct CreateAccommodation {
    pub name: String,
    pub address: String,
    pub amenities: Amenities,
    pub min_guests: i32,
    pub max_guests: i32,
    pub price_type: String,
    pub image_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccommodationWithImages {
    pub accommodation: Accommodation,
    pub image_names: Vec<String>,
}

/// An accommodation with the available terms that have not ended yet
#[derive(Debug, Clone, PartialEq)]
pub struct AccommodationDetails {
    pub accommodation: Accommodation,
    pub image_names: Vec<String>,
    pub available_terms: Vec<AvailableTerm>,
}

pub struct AccommodationService;

impl AccommodationService {
    pub async fn create(
        store: &dyn TermStore,
        identity: &dyn IdentityProvider,
        token: &str,
        input: CreateAccommodation,
    ) -> Result<AccommodationWithImages, ServiceError> {
        let host = authorize_host(identity, token).await?;

        let price_type: PriceType = input.price_type.parse().map_err(ServiceError::Validation)?;
        let new_accommodation = NewAccommodation {
            name: input.name,
            address: input.address,
            amenities: input.amenities,
            min_guests: input.min_guests,
            max_guests: input.max_guests,
            host_id: host.id,
            accept_reservation_type: AcceptReservationType::default(),
            price_type,
        };
        new_accommodation
            .validate()
            .map_err(ServiceError::Validation)?;

        let accommodation = store.insert_accommodation(new_accommodation).await?;
        for image_name in &input.image_names {
            store.insert_image(accommodation.id, image_name).await?;
        }

        info!(
            "Host {} listed accommodation {}",
            host.id, accommodation.id
        );
        Ok(AccommodationWithImages {
            accommodation,
            image_names: input.image_names,
        })
    }

    pub async fn find_by_id(
        store: &dyn TermStore,
        id: i32,
    ) -> Result<AccommodationDetails, ServiceError> {
        let accommodation = Self::require(store, id).await?;
        let image_names = store.find_image_names(id).await?;
        let available_terms = store
            .find_available_terms_ending_after(id, Utc::now())
            .await?;

        Ok(AccommodationDetails {
            accommodation,
            image_names,
            available_terms,
        })
    }

    pub async fn find_for_host(
        store: &dyn TermStore,
        host_id: i32,
    ) -> Result<Vec<AccommodationWithImages>, ServiceError> {
        let accommodations = store.find_accommodations_for_host(host_id).await?;

        let with_images = accommodations.into_iter().map(|accommodation| async move {
            let image_names = store.find_image_names(accommodation.id).await?;
            Ok::<_, ServiceError>(AccommodationWithImages {
                accommodation,
                image_names,
            })
        });

        try_join_all(with_images).await
    }

    /// Removes every listing of the host together with everything attached
    pub async fn delete_host_accommodations(
        store: &dyn TermStore,
        host_id: i32,
    ) -> Result<u64, ServiceError> {
        let deleted = store.delete_host_accommodations(host_id).await?;

        if deleted == 0 {
            return Err(ServiceError::NotFound(format!(
                "Host {host_id} has no accommodations"
            )));
        }

        info!("Deleted {deleted} accommodations of host {host_id}");
        Ok(deleted)
    }

    /// Changes how the accommodation accepts reservations.
    ///
    /// Checks run in order and the first failure stops the update: the type
    /// must be known, the caller must be a host, the accommodation must exist
    /// and belong to the caller.
    pub async fn update_accept_reservation_type(
        store: &dyn TermStore,
        identity: &dyn IdentityProvider,
        token: &str,
        id: i32,
        requested: &str,
    ) -> Result<Accommodation, ServiceError> {
        let reservation_type: AcceptReservationType =
            requested.parse().map_err(ServiceError::Validation)?;

        let host = authorize_host(identity, token).await?;
        let mut accommodation = Self::require(store, id).await?;

        if !accommodation.is_owned_by(host.id) {
            return Err(ServiceError::Unauthorized(
                "You don't have access to this accommodation".to_string(),
            ));
        }

        accommodation.accept_reservation_type = reservation_type;
        let updated = store.update_accommodation(&accommodation).await?;

        info!("Accommodation {id} switched to {reservation_type} reservation acceptance");
        Ok(updated)
    }

    /// Loads a live accommodation or fails with `NotFound`
    pub async fn require(store: &dyn TermStore, id: i32) -> Result<Accommodation, ServiceError> {
        store
            .find_accommodation_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Accommodation {id} does not exist")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        services::testing::{
            FakeIdentity, GUEST_TOKEN, HOST_TOKEN, OTHER_HOST_TOKEN, OUTAGE_TOKEN, at,
            insert_listing, range,
        },
        store::InMemoryTermStore,
    };
    use models::{
        price::{NewPrice, PriceDuration},
        term::NewTerm,
    };

    fn create_input() -> CreateAccommodation {
        CreateAccommodation {
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
            price_type: "PER_GUEST".to_string(),
            image_names: vec!["front.jpg".to_string(), "garden.jpg".to_string()],
        }
    }

    async fn stored_type(store: &InMemoryTermStore, id: i32) -> AcceptReservationType {
        store
            .find_accommodation_by_id(id)
            .await
            .unwrap()
            .unwrap()
            .accept_reservation_type
    }

    #[tokio::test]
    async fn test_create_assigns_host_and_manual_acceptance() {
        let store = InMemoryTermStore::new();
        let created =
            AccommodationService::create(&store, &FakeIdentity, HOST_TOKEN, create_input())
                .await
                .unwrap();

        assert_eq!(created.accommodation.host_id, 1);
        assert_eq!(
            created.accommodation.accept_reservation_type,
            AcceptReservationType::Manual
        );
        assert_eq!(
            store.find_image_names(created.accommodation.id).await.unwrap(),
            created.image_names
        );
    }

    #[tokio::test]
    async fn test_create_rejects_guests_and_bad_input() {
        let store = InMemoryTermStore::new();

        let err = AccommodationService::create(&store, &FakeIdentity, GUEST_TOKEN, create_input())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized(_)));

        let mut input = create_input();
        input.price_type = "PER_NIGHT".to_string();
        let err = AccommodationService::create(&store, &FakeIdentity, HOST_TOKEN, input)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let mut input = create_input();
        input.min_guests = 6;
        let err = AccommodationService::create(&store, &FakeIdentity, HOST_TOKEN, input)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        assert!(store.find_accommodations_for_host(1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_type_is_rejected_without_persisting() {
        let store = InMemoryTermStore::new();
        let listing = insert_listing(&store, "Novi Sad", 1, 4).await;

        let err = AccommodationService::update_accept_reservation_type(
            &store,
            &FakeIdentity,
            HOST_TOKEN,
            listing.id,
            "INVALID",
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(
            stored_type(&store, listing.id).await,
            AcceptReservationType::Manual
        );
    }

    #[tokio::test]
    async fn test_invalid_type_wins_over_bad_credentials() {
        let store = InMemoryTermStore::new();

        let err = AccommodationService::update_accept_reservation_type(
            &store,
            &FakeIdentity,
            OUTAGE_TOKEN,
            99,
            "SOMETIMES",
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn test_non_owner_is_rejected_without_persisting() {
        let store = InMemoryTermStore::new();
        let listing = insert_listing(&store, "Novi Sad", 1, 4).await;

        let err = AccommodationService::update_accept_reservation_type(
            &store,
            &FakeIdentity,
            OTHER_HOST_TOKEN,
            listing.id,
            "AUTOMATIC",
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ServiceError::Unauthorized(_)));
        assert_eq!(
            stored_type(&store, listing.id).await,
            AcceptReservationType::Manual
        );
    }

    #[tokio::test]
    async fn test_missing_accommodation_and_outage() {
        let store = InMemoryTermStore::new();

        let err = AccommodationService::update_accept_reservation_type(
            &store,
            &FakeIdentity,
            HOST_TOKEN,
            404,
            "AUTOMATIC",
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));

        let err = AccommodationService::update_accept_reservation_type(
            &store,
            &FakeIdentity,
            OUTAGE_TOKEN,
            404,
            "AUTOMATIC",
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::UpstreamUnavailable(_)));
    }

    #[tokio::test]
    async fn test_owner_update_is_persisted() {
        let store = InMemoryTermStore::new();
        let listing = insert_listing(&store, "Novi Sad", 1, 4).await;

        let updated = AccommodationService::update_accept_reservation_type(
            &store,
            &FakeIdentity,
            HOST_TOKEN,
            listing.id,
            "AUTOMATIC",
        )
        .await
        .unwrap();

        assert_eq!(
            updated.accept_reservation_type,
            AcceptReservationType::Automatic
        );
        assert_eq!(
            stored_type(&store, listing.id).await,
            AcceptReservationType::Automatic
        );
    }

    #[tokio::test]
    async fn test_find_by_id_lists_upcoming_terms_only() {
        let store = InMemoryTermStore::new();
        let listing = insert_listing(&store, "Novi Sad", 1, 4).await;
        for (start, end) in [
            (at(2000, 1, 1), at(2000, 2, 1)),
            (at(2000, 1, 1), at(2099, 1, 1)),
        ] {
            store
                .insert_available_term(NewTerm {
                    accommodation_id: listing.id,
                    range: range(start, end),
                })
                .await
                .unwrap();
        }

        let details = AccommodationService::find_by_id(&store, listing.id)
            .await
            .unwrap();
        assert_eq!(details.accommodation, listing);
        assert_eq!(details.available_terms.len(), 1);
        assert_eq!(details.available_terms[0].end_date, at(2099, 1, 1));

        let again = AccommodationService::find_by_id(&store, listing.id)
            .await
            .unwrap();
        assert_eq!(details, again);

        let err = AccommodationService::find_by_id(&store, listing.id + 1)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_find_for_host_attaches_images() {
        let store = InMemoryTermStore::new();
        let first = insert_listing(&store, "Novi Sad", 1, 4).await;
        let second = insert_listing(&store, "Beograd", 1, 4).await;
        store.insert_image(second.id, "view.jpg").await.unwrap();

        let listings = AccommodationService::find_for_host(&store, 1).await.unwrap();
        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].accommodation.id, first.id);
        assert!(listings[0].image_names.is_empty());
        assert_eq!(listings[1].image_names, vec!["view.jpg".to_string()]);

        assert!(AccommodationService::find_for_host(&store, 2).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_host_deletion_hides_everything_attached() {
        let store = InMemoryTermStore::new();
        let listing = insert_listing(&store, "Novi Sad", 1, 4).await;
        let year = range(at(2023, 1, 1), at(2024, 1, 1));
        store.insert_image(listing.id, "front.jpg").await.unwrap();
        store
            .insert_price(NewPrice {
                accommodation_id: listing.id,
                value: 3000.0,
                duration: PriceDuration::Regular,
                range: year,
                active: true,
            })
            .await
            .unwrap();
        let term = NewTerm {
            accommodation_id: listing.id,
            range: year,
        };
        store.insert_available_term(term.clone()).await.unwrap();
        store.insert_reserved_term(term).await.unwrap();

        let deleted = AccommodationService::delete_host_accommodations(&store, 1)
            .await
            .unwrap();
        assert_eq!(deleted, 1);

        assert!(store.find_accommodation_by_id(listing.id).await.unwrap().is_none());
        assert!(store.find_image_names(listing.id).await.unwrap().is_empty());
        assert!(store.find_prices_for_accommodation(listing.id).await.unwrap().is_empty());
        assert!(!store.has_overlapping_available_term(listing.id, &year).await.unwrap());
        assert!(!store.has_overlapping_reserved_term(listing.id, &year).await.unwrap());

        let err = AccommodationService::delete_host_accommodations(&store, 1)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
