use crate::{
    error::ServiceError,
    services::{AccommodationService, auth::authorize_host},
    store::TermStore,
};
use chrono::{DateTime, Utc};
use identity::IdentityProvider;
use log::info;
use models::term::{AvailableTerm, DateRange, NewTerm, ReservedTerm};

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTerm {
    pub accommodation_id: i32,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateTerm {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl UpdateTerm {
    fn range(&self) -> Result<DateRange, ServiceError> {
        Ok(DateRange::new(self.start_date, self.end_date)?)
    }
}

/// Checks the range and that the accommodation exists
async fn validate_new_term(
    store: &dyn TermStore,
    input: &CreateTerm,
) -> Result<NewTerm, ServiceError> {
    let range = DateRange::new(input.start_date, input.end_date)?;
    AccommodationService::require(store, input.accommodation_id).await?;

    Ok(NewTerm {
        accommodation_id: input.accommodation_id,
        range,
    })
}

fn available_not_found(id: i32) -> ServiceError {
    ServiceError::NotFound(format!("Available term {id} does not exist"))
}

fn reserved_not_found(id: i32) -> ServiceError {
    ServiceError::NotFound(format!("Reserved term {id} does not exist"))
}

/// Available and reserved terms.
///
/// Available terms are managed by hosts. Reserved terms are written by the
/// reservation service and need no credentials.
pub struct TermService;

impl TermService {
    /// Creates a batch of available terms; nothing is stored if any entry is invalid
    pub async fn create_available_terms(
        store: &dyn TermStore,
        identity: &dyn IdentityProvider,
        token: &str,
        inputs: Vec<CreateTerm>,
    ) -> Result<Vec<AvailableTerm>, ServiceError> {
        authorize_host(identity, token).await?;

        let mut new_terms = Vec::with_capacity(inputs.len());
        for input in &inputs {
            new_terms.push(validate_new_term(store, input).await?);
        }

        let mut terms = Vec::with_capacity(new_terms.len());
        for new_term in new_terms {
            terms.push(store.insert_available_term(new_term).await?);
        }

        info!("Created {} available terms", terms.len());
        Ok(terms)
    }

    pub async fn update_available_term(
        store: &dyn TermStore,
        identity: &dyn IdentityProvider,
        token: &str,
        id: i32,
        input: UpdateTerm,
    ) -> Result<AvailableTerm, ServiceError> {
        authorize_host(identity, token).await?;
        let range = input.range()?;

        let mut term = store
            .find_available_term_by_id(id)
            .await?
            .ok_or_else(|| available_not_found(id))?;
        term.start_date = range.start();
        term.end_date = range.end();

        Ok(store.update_available_term(&term).await?)
    }

    pub async fn delete_available_term(
        store: &dyn TermStore,
        identity: &dyn IdentityProvider,
        token: &str,
        id: i32,
    ) -> Result<(), ServiceError> {
        authorize_host(identity, token).await?;

        if !store.delete_available_term(id).await? {
            return Err(available_not_found(id));
        }

        info!("Deleted available term {id}");
        Ok(())
    }

    pub async fn list_available_terms(
        store: &dyn TermStore,
        accommodation_id: i32,
    ) -> Result<Vec<AvailableTerm>, ServiceError> {
        AccommodationService::require(store, accommodation_id).await?;
        Ok(store
            .find_available_terms_for_accommodation(accommodation_id)
            .await?)
    }

    pub async fn create_reserved_term(
        store: &dyn TermStore,
        input: CreateTerm,
    ) -> Result<ReservedTerm, ServiceError> {
        let new_term = validate_new_term(store, &input).await?;
        let term = store.insert_reserved_term(new_term).await?;

        info!(
            "Reserved accommodation {} from {} to {}",
            term.accommodation_id, term.start_date, term.end_date
        );
        Ok(term)
    }

    pub async fn update_reserved_term(
        store: &dyn TermStore,
        id: i32,
        input: UpdateTerm,
    ) -> Result<ReservedTerm, ServiceError> {
        let range = input.range()?;

        let mut term = store
            .find_reserved_term_by_id(id)
            .await?
            .ok_or_else(|| reserved_not_found(id))?;
        term.start_date = range.start();
        term.end_date = range.end();

        Ok(store.update_reserved_term(&term).await?)
    }

    pub async fn delete_reserved_term(store: &dyn TermStore, id: i32) -> Result<(), ServiceError> {
        if !store.delete_reserved_term(id).await? {
            return Err(reserved_not_found(id));
        }

        info!("Deleted reserved term {id}");
        Ok(())
    }

    pub async fn list_reserved_terms(
        store: &dyn TermStore,
        accommodation_id: i32,
    ) -> Result<Vec<ReservedTerm>, ServiceError> {
        AccommodationService::require(store, accommodation_id).await?;
        Ok(store
            .find_reserved_terms_for_accommodation(accommodation_id)
            .await?)
    }
}
