//! Migration: Create farm_plots table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FarmPlots::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FarmPlots::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FarmPlots::BeneficiaryId).string_len(20).not_null())
                    .col(ColumnDef::new(FarmPlots::Name).string_len(100).not_null())
                    .col(
                        ColumnDef::new(FarmPlots::Color)
                            .string_len(20)
                            .not_null()
                            .default("#22c55e"),
                    )
                    // JSON array of {lat, lng}
                    .col(ColumnDef::new(FarmPlots::Coordinates).text().not_null())
                    .col(
                        ColumnDef::new(FarmPlots::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FarmPlots::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_farm_plots_beneficiary_id")
                    .table(FarmPlots::Table)
                    .col(FarmPlots::BeneficiaryId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FarmPlots::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum FarmPlots {
    Table,
    Id,
    BeneficiaryId,
    Name,
    Color,
    Coordinates,
    CreatedAt,
    UpdatedAt,
}
