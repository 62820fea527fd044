pub mod accommodation;
pub mod error;
pub mod price;
pub mod term;
