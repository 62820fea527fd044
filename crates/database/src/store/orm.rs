use super::TermStore;
use crate::entities::{accommodation, accommodation_image, available_term, price, reserved_term};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use models::{
    accommodation::{Accommodation, AccommodationImage, NewAccommodation},
    price::{NewPrice, Price},
    term::{AvailableTerm, DateRange, NewTerm, ReservedTerm},
};
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set, Unchanged},
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, TransactionTrait,
    sea_query::{Expr, Func, LikeExpr},
};

/// [`TermStore`] over a relational database
#[derive(Clone)]
pub struct SeaOrmTermStore {
    db: DatabaseConnection,
}

impl SeaOrmTermStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

/// Builds a `LIKE` pattern matching `needle` anywhere, with wildcards escaped
fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');

    for c in needle.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }

    pattern.push('%');
    pattern
}

/// Marks the live rows of a child table as deleted for the given parents
macro_rules! soft_delete_children {
    ($entity:ident, $ids:expr, $now:expr, $conn:expr) => {
        $entity::Entity::update_many()
            .col_expr($entity::Column::DeletedAt, Expr::value($now))
            .col_expr($entity::Column::UpdatedAt, Expr::value($now))
            .filter($entity::Column::AccommodationId.is_in($ids.iter().copied()))
            .filter($entity::Column::DeletedAt.is_null())
            .exec($conn)
            .await?
    };
}

/// Marks a single live row as deleted, evaluating to whether it existed
macro_rules! soft_delete_by_id {
    ($entity:ident, $id:expr, $conn:expr) => {{
        let now = Utc::now();
        let result = $entity::Entity::update_many()
            .col_expr($entity::Column::DeletedAt, Expr::value(now))
            .col_expr($entity::Column::UpdatedAt, Expr::value(now))
            .filter($entity::Column::Id.eq($id))
            .filter($entity::Column::DeletedAt.is_null())
            .exec($conn)
            .await?;

        result.rows_affected > 0
    }};
}

#[async_trait]
impl TermStore for SeaOrmTermStore {
    async fn ping(&self) -> Result<(), DbErr> {
        self.db.ping().await
    }

    async fn find_accommodation_by_id(&self, id: i32) -> Result<Option<Accommodation>, DbErr> {
        let model = accommodation::Entity::find_by_id(id)
            .filter(accommodation::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?;

        Ok(model.map(Into::into))
    }

    async fn find_accommodations_by_guests_and_address(
        &self,
        guests: u32,
        address: &str,
    ) -> Result<Vec<Accommodation>, DbErr> {
        let guests = i32::try_from(guests).unwrap_or(i32::MAX);
        let pattern = LikeExpr::new(contains_pattern(address)).escape('\\');

        let models = accommodation::Entity::find()
            .filter(accommodation::Column::DeletedAt.is_null())
            .filter(accommodation::Column::MinGuests.lte(guests))
            .filter(accommodation::Column::MaxGuests.gte(guests))
            .filter(Expr::expr(Func::lower(Expr::col(accommodation::Column::Address))).like(pattern))
            .order_by_asc(accommodation::Column::Id)
            .all(&self.db)
            .await?;

        debug!(
            "Found {} candidate accommodations for {guests} guests at {address:?}",
            models.len()
        );
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_accommodations_for_host(
        &self,
        host_id: i32,
    ) -> Result<Vec<Accommodation>, DbErr> {
        let models = accommodation::Entity::find()
            .filter(accommodation::Column::HostId.eq(host_id))
            .filter(accommodation::Column::DeletedAt.is_null())
            .order_by_asc(accommodation::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn insert_accommodation(&self, input: NewAccommodation) -> Result<Accommodation, DbErr> {
        let now = Utc::now();
        let model = accommodation::ActiveModel {
            id: NotSet,
            name: Set(input.name),
            address: Set(input.address),
            has_wifi: Set(input.amenities.has_wifi),
            has_kitchen: Set(input.amenities.has_kitchen),
            has_air_conditioning: Set(input.amenities.has_air_conditioning),
            has_free_parking: Set(input.amenities.has_free_parking),
            min_guests: Set(input.min_guests),
            max_guests: Set(input.max_guests),
            host_id: Set(input.host_id),
            accept_reservation_type: Set(input.accept_reservation_type),
            price_type: Set(input.price_type),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        }
        .insert(&self.db)
        .await?;

        debug!("Inserted accommodation {}", model.id);
        Ok(model.into())
    }

    async fn update_accommodation(
        &self,
        accommodation: &Accommodation,
    ) -> Result<Accommodation, DbErr> {
        let model = accommodation::ActiveModel {
            id: Unchanged(accommodation.id),
            name: Set(accommodation.name.clone()),
            address: Set(accommodation.address.clone()),
            has_wifi: Set(accommodation.amenities.has_wifi),
            has_kitchen: Set(accommodation.amenities.has_kitchen),
            has_air_conditioning: Set(accommodation.amenities.has_air_conditioning),
            has_free_parking: Set(accommodation.amenities.has_free_parking),
            min_guests: Set(accommodation.min_guests),
            max_guests: Set(accommodation.max_guests),
            host_id: Set(accommodation.host_id),
            accept_reservation_type: Set(accommodation.accept_reservation_type),
            price_type: Set(accommodation.price_type),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await?;

        Ok(model.into())
    }

    async fn delete_host_accommodations(&self, host_id: i32) -> Result<u64, DbErr> {
        let txn = self.db.begin().await?;

        let ids: Vec<i32> = accommodation::Entity::find()
            .select_only()
            .column(accommodation::Column::Id)
            .filter(accommodation::Column::HostId.eq(host_id))
            .filter(accommodation::Column::DeletedAt.is_null())
            .into_tuple()
            .all(&txn)
            .await?;

        if ids.is_empty() {
            return Ok(0);
        }

        let now = Utc::now();
        soft_delete_children!(accommodation_image, ids, now, &txn);
        soft_delete_children!(price, ids, now, &txn);
        soft_delete_children!(available_term, ids, now, &txn);
        soft_delete_children!(reserved_term, ids, now, &txn);

        let result = accommodation::Entity::update_many()
            .col_expr(accommodation::Column::DeletedAt, Expr::value(now))
            .col_expr(accommodation::Column::UpdatedAt, Expr::value(now))
            .filter(accommodation::Column::Id.is_in(ids.iter().copied()))
            .exec(&txn)
            .await?;

        txn.commit().await?;

        debug!(
            "Deleted {} accommodations of host {host_id}",
            result.rows_affected
        );
        Ok(result.rows_affected)
    }

    async fn insert_image(
        &self,
        accommodation_id: i32,
        image_name: &str,
    ) -> Result<AccommodationImage, DbErr> {
        let now = Utc::now();
        let model = accommodation_image::ActiveModel {
            id: NotSet,
            accommodation_id: Set(accommodation_id),
            image_name: Set(image_name.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        }
        .insert(&self.db)
        .await?;

        Ok(model.into())
    }

    async fn find_image_names(&self, accommodation_id: i32) -> Result<Vec<String>, DbErr> {
        accommodation_image::Entity::find()
            .select_only()
            .column(accommodation_image::Column::ImageName)
            .filter(accommodation_image::Column::AccommodationId.eq(accommodation_id))
            .filter(accommodation_image::Column::DeletedAt.is_null())
            .order_by_asc(accommodation_image::Column::Id)
            .into_tuple()
            .all(&self.db)
            .await
    }

    async fn has_overlapping_available_term(
        &self,
        accommodation_id: i32,
        range: &DateRange,
    ) -> Result<bool, DbErr> {
        let count = available_term::Entity::find()
            .filter(available_term::Column::AccommodationId.eq(accommodation_id))
            .filter(available_term::Column::DeletedAt.is_null())
            .filter(available_term::Column::StartDate.lte(range.end()))
            .filter(available_term::Column::EndDate.gte(range.start()))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    async fn has_overlapping_reserved_term(
        &self,
        accommodation_id: i32,
        range: &DateRange,
    ) -> Result<bool, DbErr> {
        let count = reserved_term::Entity::find()
            .filter(reserved_term::Column::AccommodationId.eq(accommodation_id))
            .filter(reserved_term::Column::DeletedAt.is_null())
            .filter(reserved_term::Column::StartDate.lte(range.end()))
            .filter(reserved_term::Column::EndDate.gte(range.start()))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    async fn find_active_prices(
        &self,
        accommodation_id: i32,
        range: &DateRange,
    ) -> Result<Vec<Price>, DbErr> {
        let models = price::Entity::find()
            .filter(price::Column::AccommodationId.eq(accommodation_id))
            .filter(price::Column::DeletedAt.is_null())
            .filter(price::Column::Active.eq(true))
            .filter(price::Column::StartDate.lte(range.end()))
            .filter(price::Column::EndDate.gte(range.start()))
            .order_by_asc(price::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_prices_for_accommodation(
        &self,
        accommodation_id: i32,
    ) -> Result<Vec<Price>, DbErr> {
        let models = price::Entity::find()
            .filter(price::Column::AccommodationId.eq(accommodation_id))
            .filter(price::Column::DeletedAt.is_null())
            .order_by_asc(price::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_price_by_id(&self, id: i32) -> Result<Option<Price>, DbErr> {
        let model = price::Entity::find_by_id(id)
            .filter(price::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?;

        Ok(model.map(Into::into))
    }

    async fn insert_price(&self, input: NewPrice) -> Result<Price, DbErr> {
        let now = Utc::now();
        let model = price::ActiveModel {
            id: NotSet,
            accommodation_id: Set(input.accommodation_id),
            value: Set(input.value),
            duration: Set(input.duration),
            start_date: Set(input.range.start()),
            end_date: Set(input.range.end()),
            active: Set(input.active),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        }
        .insert(&self.db)
        .await?;

        Ok(model.into())
    }

    async fn update_price(&self, price: &Price) -> Result<Price, DbErr> {
        let model = price::ActiveModel {
            id: Unchanged(price.id),
            value: Set(price.value),
            duration: Set(price.duration),
            start_date: Set(price.start_date),
            end_date: Set(price.end_date),
            active: Set(price.active),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await?;

        Ok(model.into())
    }

    async fn delete_price(&self, id: i32) -> Result<bool, DbErr> {
        Ok(soft_delete_by_id!(price, id, &self.db))
    }

    async fn find_available_terms_for_accommodation(
        &self,
        accommodation_id: i32,
    ) -> Result<Vec<AvailableTerm>, DbErr> {
        let models = available_term::Entity::find()
            .filter(available_term::Column::AccommodationId.eq(accommodation_id))
            .filter(available_term::Column::DeletedAt.is_null())
            .order_by_asc(available_term::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_available_terms_ending_after(
        &self,
        accommodation_id: i32,
        instant: DateTime<Utc>,
    ) -> Result<Vec<AvailableTerm>, DbErr> {
        let models = available_term::Entity::find()
            .filter(available_term::Column::AccommodationId.eq(accommodation_id))
            .filter(available_term::Column::DeletedAt.is_null())
            .filter(available_term::Column::EndDate.gte(instant))
            .order_by_asc(available_term::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_available_term_by_id(&self, id: i32) -> Result<Option<AvailableTerm>, DbErr> {
        let model = available_term::Entity::find_by_id(id)
            .filter(available_term::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?;

        Ok(model.map(Into::into))
    }

    async fn insert_available_term(&self, input: NewTerm) -> Result<AvailableTerm, DbErr> {
        let now = Utc::now();
        let model = available_term::ActiveModel {
            id: NotSet,
            accommodation_id: Set(input.accommodation_id),
            start_date: Set(input.range.start()),
            end_date: Set(input.range.end()),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        }
        .insert(&self.db)
        .await?;

        Ok(model.into())
    }

    async fn update_available_term(&self, term: &AvailableTerm) -> Result<AvailableTerm, DbErr> {
        let model = available_term::ActiveModel {
            id: Unchanged(term.id),
            start_date: Set(term.start_date),
            end_date: Set(term.end_date),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await?;

        Ok(model.into())
    }

    async fn delete_available_term(&self, id: i32) -> Result<bool, DbErr> {
        Ok(soft_delete_by_id!(available_term, id, &self.db))
    }

    async fn find_reserved_terms_for_accommodation(
        &self,
        accommodation_id: i32,
    ) -> Result<Vec<ReservedTerm>, DbErr> {
        let models = reserved_term::Entity::find()
            .filter(reserved_term::Column::AccommodationId.eq(accommodation_id))
            .filter(reserved_term::Column::DeletedAt.is_null())
            .order_by_asc(reserved_term::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_reserved_term_by_id(&self, id: i32) -> Result<Option<ReservedTerm>, DbErr> {
        let model = reserved_term::Entity::find_by_id(id)
            .filter(reserved_term::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?;

        Ok(model.map(Into::into))
    }

    async fn insert_reserved_term(&self, input: NewTerm) -> Result<ReservedTerm, DbErr> {
        let now = Utc::now();
        let model = reserved_term::ActiveModel {
            id: NotSet,
            accommodation_id: Set(input.accommodation_id),
            start_date: Set(input.range.start()),
            end_date: Set(input.range.end()),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        }
        .insert(&self.db)
        .await?;

        Ok(model.into())
    }

    async fn update_reserved_term(&self, term: &ReservedTerm) -> Result<ReservedTerm, DbErr> {
        let model = reserved_term::ActiveModel {
            id: Unchanged(term.id),
            start_date: Set(term.start_date),
            end_date: Set(term.end_date),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await?;

        Ok(model.into())
    }

    async fn delete_reserved_term(&self, id: i32) -> Result<bool, DbErr> {
        Ok(soft_delete_by_id!(reserved_term, id, &self.db))
    }
}
