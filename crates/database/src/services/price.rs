use crate::{
    error::ServiceError,
    services::{AccommodationService, auth::authorize_host},
    store::TermStore,
};
use chrono::{DateTime, Utc};
use identity::IdentityProvider;
use log::info;
use models::{
    price::{NewPrice, Price, PriceDuration},
    term::DateRange,
};

#[derive(Debug, Clone, PartialEq)]
pub struct CreatePrice {
    pub accommodation_id: i32,
    pub value: f64,
    pub duration: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// New range and value for a price; `active` is left alone when `None`
#[derive(Debug, Clone, PartialEq)]
pub struct UpdatePrice {
    pub value: f64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub active: Option<bool>,
}

fn validate_value(value: f64) -> Result<(), ServiceError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ServiceError::Validation(format!(
            "Price value must be a non-negative number, got {value}"
        )));
    }

    Ok(())
}

pub struct PriceService;

impl PriceService {
    /// Creates a batch of prices, all of them active.
    ///
    /// Every entry is checked before anything is stored, so a bad entry
    /// leaves the batch unsaved.
    pub async fn create_prices(
        store: &dyn TermStore,
        identity: &dyn IdentityProvider,
        token: &str,
        inputs: Vec<CreatePrice>,
    ) -> Result<Vec<Price>, ServiceError> {
        authorize_host(identity, token).await?;

        let mut new_prices = Vec::with_capacity(inputs.len());
        for input in inputs {
            let duration: PriceDuration =
                input.duration.parse().map_err(ServiceError::Validation)?;
            validate_value(input.value)?;
            let range = DateRange::new(input.start_date, input.end_date)?;
            AccommodationService::require(store, input.accommodation_id).await?;

            new_prices.push(NewPrice {
                accommodation_id: input.accommodation_id,
                value: input.value,
                duration,
                range,
                active: true,
            });
        }

        let mut prices = Vec::with_capacity(new_prices.len());
        for new_price in new_prices {
            prices.push(store.insert_price(new_price).await?);
        }

        info!("Created {} prices", prices.len());
        Ok(prices)
    }

    pub async fn update_price(
        store: &dyn TermStore,
        identity: &dyn IdentityProvider,
        token: &str,
        id: i32,
        input: UpdatePrice,
    ) -> Result<Price, ServiceError> {
        authorize_host(identity, token).await?;
        validate_value(input.value)?;
        let range = DateRange::new(input.start_date, input.end_date)?;

        let mut price = Self::require(store, id).await?;
        price.value = input.value;
        price.start_date = range.start();
        price.end_date = range.end();
        if let Some(active) = input.active {
            price.active = active;
        }

        Ok(store.update_price(&price).await?)
    }

    pub async fn delete_price(
        store: &dyn TermStore,
        identity: &dyn IdentityProvider,
        token: &str,
        id: i32,
    ) -> Result<(), ServiceError> {
        authorize_host(identity, token).await?;

        if !store.delete_price(id).await? {
            return Err(Self::not_found(id));
        }

        info!("Deleted price {id}");
        Ok(())
    }

    pub async fn list_prices(
        store: &dyn TermStore,
        accommodation_id: i32,
    ) -> Result<Vec<Price>, ServiceError> {
        AccommodationService::require(store, accommodation_id).await?;
        Ok(store.find_prices_for_accommodation(accommodation_id).await?)
    }

    async fn require(store: &dyn TermStore, id: i32) -> Result<Price, ServiceError> {
        store
            .find_price_by_id(id)
            .await?
            .ok_or_else(|| Self::not_found(id))
    }

    fn not_found(id: i32) -> ServiceError {
        ServiceError::NotFound(format!("Price {id} does not exist"))
    }
}
