pub mod accommodation;
pub mod auth;
pub mod availability;
pub mod price;
pub mod search;
pub mod seed;
pub mod term;

#[cfg(test)]
pub(crate) mod testing;

pub use accommodation::AccommodationService;
pub use availability::AvailabilityService;
pub use price::PriceService;
pub use search::SearchService;
pub use seed::seed_store;
pub use term::TermService;
