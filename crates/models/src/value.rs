//! Column codecs for the enums stored as text

use crate::{
    accommodation::{AcceptReservationType, PriceType},
    price::PriceDuration,
};
use sea_orm::Value;

macro_rules! text_value_type {
    ($ty:ident) => {
        impl sea_orm::sea_query::ValueType for $ty {
            fn try_from(v: Value) -> Result<Self, sea_orm::sea_query::ValueTypeErr> {
                match v {
                    Value::String(Some(s)) => s.parse().map_err(|_| sea_orm::sea_query::ValueTypeErr),
                    _ => Err(sea_orm::sea_query::ValueTypeErr),
                }
            }

            fn type_name() -> String {
                stringify!($ty).to_string()
            }

            fn array_type() -> sea_orm::sea_query::ArrayType {
                sea_orm::sea_query::ArrayType::String
            }

            fn column_type() -> sea_orm::sea_query::ColumnType {
                sea_orm::sea_query::ColumnType::Text
            }
        }

        impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Value::String(Some(Box::new(value.to_string())))
            }
        }

        impl sea_orm::TryGetable for $ty {
            fn try_get_by<I: sea_orm::ColIdx>(
                res: &sea_orm::QueryResult,
                index: I,
            ) -> Result<Self, sea_orm::TryGetError> {
                let val: String = res.try_get_by(index)?;

                val.parse().map_err(|e: String| {
                    sea_orm::TryGetError::DbErr(sea_orm::DbErr::Type(format!(
                        "Failed to decode {}: {e}",
                        stringify!($ty)
                    )))
                })
            }
        }

        impl sea_orm::sea_query::Nullable for $ty {
            fn null() -> Value {
                Value::String(None)
            }
        }
    };
}

text_value_type!(AcceptReservationType);
text_value_type!(PriceType);
text_value_type!(PriceDuration);
