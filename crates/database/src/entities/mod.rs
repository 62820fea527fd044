pub mod accommodation;
pub mod accommodation_image;
pub mod available_term;
pub mod price;
pub mod reserved_term;

pub use accommodation::Entity as Accommodation;
pub use accommodation_image::Entity as AccommodationImage;
pub use available_term::Entity as AvailableTerm;
pub use price::Entity as Price;
pub use reserved_term::Entity as ReservedTerm;
