pub mod accommodation;
pub mod auth;
pub mod available_term;
pub mod health;
pub mod price;
pub mod reserved_term;
