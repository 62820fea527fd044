use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// `created_at`, `updated_at` and the soft-delete marker shared by every table
fn timestamps<T: Iden + 'static>(
    table: &mut TableCreateStatement,
    created_at: T,
    updated_at: T,
    deleted_at: T,
) -> &mut TableCreateStatement {
    table
        .col(
            ColumnDef::new(created_at)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .col(
            ColumnDef::new(updated_at)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .col(ColumnDef::new(deleted_at).timestamp_with_time_zone())
}

/// Child table columns pointing at an accommodation, deleted along with it
fn accommodation_fk<'a, T: Iden + Clone + 'static>(
    table: &'a mut TableCreateStatement,
    name: &str,
    child: T,
    column: T,
) -> &'a mut TableCreateStatement {
    table
        .col(ColumnDef::new(column.clone()).integer().not_null())
        .foreign_key(
            ForeignKey::create()
                .name(name)
                .from(child, column)
                .to(Accommodations::Table, Accommodations::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create accommodations table
        let mut accommodations = Table::create();
        accommodations
            .table(Accommodations::Table)
            .if_not_exists()
            .col(
                ColumnDef::new(Accommodations::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(ColumnDef::new(Accommodations::Name).string().not_null())
            .col(ColumnDef::new(Accommodations::Address).string().not_null())
            .col(
                ColumnDef::new(Accommodations::HasWifi)
                    .boolean()
                    .not_null()
                    .default(false),
            )
            .col(
                ColumnDef::new(Accommodations::HasKitchen)
                    .boolean()
                    .not_null()
                    .default(false),
            )
            .col(
                ColumnDef::new(Accommodations::HasAirConditioning)
                    .boolean()
                    .not_null()
                    .default(false),
            )
            .col(
                ColumnDef::new(Accommodations::HasFreeParking)
                    .boolean()
                    .not_null()
                    .default(false),
            )
            .col(ColumnDef::new(Accommodations::MinGuests).integer().not_null())
            .col(ColumnDef::new(Accommodations::MaxGuests).integer().not_null())
            .col(ColumnDef::new(Accommodations::HostId).integer().not_null())
            .col(
                ColumnDef::new(Accommodations::AcceptReservationType)
                    .text()
                    .not_null()
                    .default("MANUAL"),
            )
            .col(ColumnDef::new(Accommodations::PriceType).text().not_null());
        timestamps(
            &mut accommodations,
            Accommodations::CreatedAt,
            Accommodations::UpdatedAt,
            Accommodations::DeletedAt,
        );
        manager.create_table(accommodations.to_owned()).await?;

        // Create accommodation_images table
        let mut images = Table::create();
        images
            .table(AccommodationImages::Table)
            .if_not_exists()
            .col(
                ColumnDef::new(AccommodationImages::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(
                ColumnDef::new(AccommodationImages::ImageName)
                    .string()
                    .not_null(),
            );
        accommodation_fk(
            &mut images,
            "fk-accommodation_images-accommodation_id",
            AccommodationImages::Table,
            AccommodationImages::AccommodationId,
        );
        timestamps(
            &mut images,
            AccommodationImages::CreatedAt,
            AccommodationImages::UpdatedAt,
            AccommodationImages::DeletedAt,
        );
        manager.create_table(images.to_owned()).await?;

        // Create prices table
        let mut prices = Table::create();
        prices
            .table(Prices::Table)
            .if_not_exists()
            .col(
                ColumnDef::new(Prices::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(ColumnDef::new(Prices::Value).double().not_null())
            .col(ColumnDef::new(Prices::Duration).text().not_null())
            .col(
                ColumnDef::new(Prices::StartDate)
                    .timestamp_with_time_zone()
                    .not_null(),
            )
            .col(
                ColumnDef::new(Prices::EndDate)
                    .timestamp_with_time_zone()
                    .not_null(),
            )
            .col(
                ColumnDef::new(Prices::Active)
                    .boolean()
                    .not_null()
                    .default(true),
            );
        accommodation_fk(
            &mut prices,
            "fk-prices-accommodation_id",
            Prices::Table,
            Prices::AccommodationId,
        );
        timestamps(
            &mut prices,
            Prices::CreatedAt,
            Prices::UpdatedAt,
            Prices::DeletedAt,
        );
        manager.create_table(prices.to_owned()).await?;

        // Create available_terms and reserved_terms, which share a layout
        for (table, fk_name) in [
            (Terms::AvailableTerms, "fk-available_terms-accommodation_id"),
            (Terms::ReservedTerms, "fk-reserved_terms-accommodation_id"),
        ] {
            let mut terms = Table::create();
            terms
                .table(table)
                .if_not_exists()
                .col(
                    ColumnDef::new(Terms::Id)
                        .integer()
                        .not_null()
                        .auto_increment()
                        .primary_key(),
                )
                .col(
                    ColumnDef::new(Terms::StartDate)
                        .timestamp_with_time_zone()
                        .not_null(),
                )
                .col(
                    ColumnDef::new(Terms::EndDate)
                        .timestamp_with_time_zone()
                        .not_null(),
                );
            accommodation_fk(&mut terms, fk_name, table, Terms::AccommodationId);
            timestamps(
                &mut terms,
                Terms::CreatedAt,
                Terms::UpdatedAt,
                Terms::DeletedAt,
            );
            manager.create_table(terms.to_owned()).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in [Terms::ReservedTerms, Terms::AvailableTerms] {
            manager
                .drop_table(Table::drop().table(table).to_owned())
                .await?;
        }

        manager
            .drop_table(Table::drop().table(Prices::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(AccommodationImages::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Accommodations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Accommodations {
    Table,
    Id,
    Name,
    Address,
    HasWifi,
    HasKitchen,
    HasAirConditioning,
    HasFreeParking,
    MinGuests,
    MaxGuests,
    HostId,
    AcceptReservationType,
    PriceType,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(Iden, Clone, Copy)]
enum AccommodationImages {
    Table,
    Id,
    AccommodationId,
    ImageName,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(Iden, Clone, Copy)]
enum Prices {
    Table,
    Id,
    AccommodationId,
    Value,
    Duration,
    StartDate,
    EndDate,
    Active,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

/// Columns of `available_terms` and `reserved_terms`
#[derive(Iden, Clone, Copy)]
enum Terms {
    AvailableTerms,
    ReservedTerms,
    Id,
    AccommodationId,
    StartDate,
    EndDate,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
