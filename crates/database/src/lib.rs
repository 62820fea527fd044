pub mod db;
pub mod entities;
pub mod error;
pub mod services;
pub mod store;

pub use error::ServiceError;
pub use store::{InMemoryTermStore, SeaOrmTermStore, TermStore};
