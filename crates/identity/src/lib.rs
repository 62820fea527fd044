pub mod client;
pub mod round_robin;

pub use client::{HttpIdentityClient, IdentityError, IdentityProvider};
pub use round_robin::RoundRobin;
