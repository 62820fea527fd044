pub mod accommodation;
pub mod price;
pub mod term;
pub mod user;

#[cfg(feature = "database")]
mod value;
