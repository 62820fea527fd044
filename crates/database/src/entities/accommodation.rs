use models::accommodation::{AcceptReservationType, PriceType};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "accommodations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub address: String,
    pub has_wifi: bool,
    pub has_kitchen: bool,
    pub has_air_conditioning: bool,
    pub has_free_parking: bool,
    pub min_guests: i32,
    pub max_guests: i32,
    pub host_id: i32,
    pub accept_reservation_type: AcceptReservationType,
    pub price_type: PriceType,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::accommodation_image::Entity")]
    Images,
    #[sea_orm(has_many = "super::price::Entity")]
    Prices,
    #[sea_orm(has_many = "super::available_term::Entity")]
    AvailableTerms,
    #[sea_orm(has_many = "super::reserved_term::Entity")]
    ReservedTerms,
}

impl Related<super::accommodation_image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Images.def()
    }
}

impl Related<super::price::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Prices.def()
    }
}

impl Related<super::available_term::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AvailableTerms.def()
    }
}

impl Related<super::reserved_term::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReservedTerms.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for models::accommodation::Accommodation {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            address: model.address,
            amenities: models::accommodation::Amenities {
                has_wifi: model.has_wifi,
                has_kitchen: model.has_kitchen,
                has_air_conditioning: model.has_air_conditioning,
                has_free_parking: model.has_free_parking,
            },
            min_guests: model.min_guests,
            max_guests: model.max_guests,
            host_id: model.host_id,
            accept_reservation_type: model.accept_reservation_type,
            price_type: model.price_type,
        }
    }
}
