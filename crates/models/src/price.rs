use crate::{
    accommodation::{PriceType, expected_values},
    term::DateRange,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};
use strum::EnumIter;

/// Which days a price applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceDuration {
    Regular,
    Weekend,
    Holiday,
}

impl FromStr for PriceDuration {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "REGULAR" => Ok(Self::Regular),
            "WEEKEND" => Ok(Self::Weekend),
            "HOLIDAY" => Ok(Self::Holiday),
            _ => Err(format!(
                "Unknown price duration: {s} (expected one of {})",
                expected_values::<Self>()
            )),
        }
    }
}

impl Display for PriceDuration {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Regular => write!(f, "REGULAR"),
            Self::Weekend => write!(f, "WEEKEND"),
            Self::Holiday => write!(f, "HOLIDAY"),
        }
    }
}

/// A price rule valid over a date range
#[derive(Debug, Clone, PartialEq)]
pub struct Price {
    pub id: i32,
    pub accommodation_id: i32,
    pub value: f64,
    pub duration: PriceDuration,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub active: bool,
}

/// Input for creating a price
#[derive(Debug, Clone, PartialEq)]
pub struct NewPrice {
    pub accommodation_id: i32,
    pub value: f64,
    pub duration: PriceDuration,
    pub range: DateRange,
    pub active: bool,
}

/// Picks the unit price out of the active prices overlapping a stay.
///
/// Prices are scanned in the order given. Every `REGULAR` price replaces the
/// running value, so the last one wins; the first `WEEKEND` or `HOLIDAY`
/// price wins outright and ends the scan. Returns 0 when there are no prices.
pub fn select_base_price<'a, I>(prices: I) -> f64
where
    I: IntoIterator<Item = &'a Price>,
{
    let mut base_price = 0.0;

    for price in prices {
        match price.duration {
            PriceDuration::Weekend | PriceDuration::Holiday => return price.value,
            PriceDuration::Regular => base_price = price.value,
        }
    }

    base_price
}

/// Unit and total price quoted for a stay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceQuote {
    pub base_price: f64,
    pub total_price: i64,
}

impl PriceQuote {
    /// Scales `base_price` by the accommodation's price type.
    ///
    /// `PER_GUEST` multiplies by guests and whole nights, `PER_ACCOMMODATION_UNIT`
    /// charges the base price as is. The total is truncated to an integer.
    pub fn new(price_type: PriceType, base_price: f64, stay: &DateRange, guests: u32) -> Self {
        let total = match price_type {
            PriceType::PerGuest => base_price * f64::from(guests) * stay.nights() as f64,
            PriceType::PerAccommodationUnit => base_price,
        };

        Self {
            base_price,
            total_price: total as i64,
        }
    }

    /// Selects the base price from `prices` and scales it
    pub fn from_prices<'a, I>(
        price_type: PriceType,
        prices: I,
        stay: &DateRange,
        guests: u32,
    ) -> Self
    where
        I: IntoIterator<Item = &'a Price>,
    {
        Self::new(price_type, select_base_price(prices), stay, guests)
    }
}
