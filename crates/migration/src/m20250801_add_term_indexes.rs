use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Candidate lookups filter on capacity, host lookups on the owner
        manager
            .create_index(
                Index::create()
                    .name("idx_accommodations_guests")
                    .table(Accommodations::Table)
                    .col(Accommodations::MinGuests)
                    .col(Accommodations::MaxGuests)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_accommodations_host_id")
                    .table(Accommodations::Table)
                    .col(Accommodations::HostId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_accommodation_images_accommodation_id")
                    .table(AccommodationImages::Table)
                    .col(AccommodationImages::AccommodationId)
                    .to_owned(),
            )
            .await?;

        // Overlap queries always filter by accommodation, then compare dates
        for (table, name) in [
            (Ranged::Prices, "idx_prices_accommodation_range"),
            (Ranged::AvailableTerms, "idx_available_terms_accommodation_range"),
            (Ranged::ReservedTerms, "idx_reserved_terms_accommodation_range"),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(table)
                        .col(Ranged::AccommodationId)
                        .col(Ranged::StartDate)
                        .col(Ranged::EndDate)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (table, name) in [
            (Ranged::ReservedTerms, "idx_reserved_terms_accommodation_range"),
            (Ranged::AvailableTerms, "idx_available_terms_accommodation_range"),
            (Ranged::Prices, "idx_prices_accommodation_range"),
        ] {
            manager
                .drop_index(Index::drop().name(name).table(table).to_owned())
                .await?;
        }

        manager
            .drop_index(
                Index::drop()
                    .name("idx_accommodation_images_accommodation_id")
                    .table(AccommodationImages::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_accommodations_host_id")
                    .table(Accommodations::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_accommodations_guests")
                    .table(Accommodations::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum Accommodations {
    Table,
    MinGuests,
    MaxGuests,
    HostId,
}

#[derive(Iden)]
enum AccommodationImages {
    Table,
    AccommodationId,
}

/// Tables holding a date range per accommodation
#[derive(Iden, Clone, Copy)]
enum Ranged {
    Prices,
    AvailableTerms,
    ReservedTerms,
    AccommodationId,
    StartDate,
    EndDate,
}
