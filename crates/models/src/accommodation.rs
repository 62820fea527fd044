use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};
use strum::{EnumIter, IntoEnumIterator};

/// Renders every variant of an enum as `A, B, C` for error messages
pub(crate) fn expected_values<T: IntoEnumIterator + Display>() -> String {
    T::iter()
        .map(|variant| variant.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// How a host accepts incoming reservation requests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AcceptReservationType {
    /// Every request waits for the host's approval
    #[default]
    Manual,
    /// Requests are confirmed as soon as they arrive
    Automatic,
}

impl FromStr for AcceptReservationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MANUAL" => Ok(Self::Manual),
            "AUTOMATIC" => Ok(Self::Automatic),
            _ => Err(format!(
                "Unknown accept reservation type: {s} (expected one of {})",
                expected_values::<Self>()
            )),
        }
    }
}

impl Display for AcceptReservationType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Manual => write!(f, "MANUAL"),
            Self::Automatic => write!(f, "AUTOMATIC"),
        }
    }
}

/// What a price value is charged for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceType {
    /// Value is per guest per night
    PerGuest,
    /// Value is a flat amount for the whole stay
    PerAccommodationUnit,
}

impl FromStr for PriceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PER_GUEST" => Ok(Self::PerGuest),
            "PER_ACCOMMODATION_UNIT" => Ok(Self::PerAccommodationUnit),
            _ => Err(format!(
                "Unknown price type: {s} (expected one of {})",
                expected_values::<Self>()
            )),
        }
    }
}

impl Display for PriceType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::PerGuest => write!(f, "PER_GUEST"),
            Self::PerAccommodationUnit => write!(f, "PER_ACCOMMODATION_UNIT"),
        }
    }
}

/// Amenities offered by an accommodation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Amenities {
    pub has_wifi: bool,
    pub has_kitchen: bool,
    pub has_air_conditioning: bool,
    pub has_free_parking: bool,
}

/// A lodging listing owned by a host
#[derive(Debug, Clone, PartialEq)]
pub struct Accommodation {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub amenities: Amenities,
    pub min_guests: i32,
    pub max_guests: i32,
    pub host_id: i32,
    pub accept_reservation_type: AcceptReservationType,
    pub price_type: PriceType,
}

impl Accommodation {
    /// Whether `guests` falls inside the inclusive capacity range
    pub fn accepts_guests(&self, guests: u32) -> bool {
        let guests = i64::from(guests);
        i64::from(self.min_guests) <= guests && guests <= i64::from(self.max_guests)
    }

    /// Case-insensitive substring match on the address
    pub fn address_contains(&self, needle: &str) -> bool {
        self.address
            .to_lowercase()
            .contains(&needle.to_lowercase())
    }

    pub fn is_owned_by(&self, host_id: i32) -> bool {
        self.host_id == host_id
    }
}

/// Input for creating an accommodation
#[derive(Debug, Clone, PartialEq)]
pub struct NewAccommodation {
    pub name: String,
    pub address: String,
    pub amenities: Amenities,
    pub min_guests: i32,
    pub max_guests: i32,
    pub host_id: i32,
    pub accept_reservation_type: AcceptReservationType,
    pub price_type: PriceType,
}

impl NewAccommodation {
    /// Checks the fields a listing cannot exist without
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Accommodation name must not be empty".to_string());
        }

        if self.address.trim().is_empty() {
            return Err("Accommodation address must not be empty".to_string());
        }

        if self.min_guests < 1 {
            return Err(format!(
                "Minimum guests must be at least 1, got {}",
                self.min_guests
            ));
        }

        if self.min_guests > self.max_guests {
            return Err(format!(
                "Minimum guests ({}) exceeds maximum guests ({})",
                self.min_guests, self.max_guests
            ));
        }

        Ok(())
    }
}

/// An image file attached to an accommodation
#[derive(Debug, Clone, PartialEq)]
pub struct AccommodationImage {
    pub id: i32,
    pub accommodation_id: i32,
    pub image_name: String,
}
