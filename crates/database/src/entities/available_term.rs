//! Windows an accommodation is offered in

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "available_terms")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub accommodation_id: i32,
    pub start_date: DateTimeUtc,
    pub end_date: DateTimeUtc,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::accommodation::Entity",
        from = "Column::AccommodationId",
        to = "super::accommodation::Column::Id"
    )]
    Accommodation,
}

impl Related<super::accommodation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Accommodation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for models::term::AvailableTerm {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            accommodation_id: model.accommodation_id,
            start_date: model.start_date,
            end_date: model.end_date,
        }
    }
}
