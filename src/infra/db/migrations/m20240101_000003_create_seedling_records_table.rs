//! Migration: Create seedling_records table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SeedlingRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SeedlingRecords::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SeedlingRecords::BeneficiaryId)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SeedlingRecords::SeedlingsReceived)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(SeedlingRecords::DateReceived).date().not_null())
                    .col(
                        ColumnDef::new(SeedlingRecords::SeedlingsPlanted)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(SeedlingRecords::Hectares)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(SeedlingRecords::PlantingStart).date().not_null())
                    .col(ColumnDef::new(SeedlingRecords::PlantingEnd).date().null())
                    .col(ColumnDef::new(SeedlingRecords::Gps).string_len(100).null())
                    .col(
                        ColumnDef::new(SeedlingRecords::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SeedlingRecords::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_seedling_records_beneficiary_id")
                    .table(SeedlingRecords::Table)
                    .col(SeedlingRecords::BeneficiaryId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SeedlingRecords::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum SeedlingRecords {
    Table,
    Id,
    BeneficiaryId,
    SeedlingsReceived,
    DateReceived,
    SeedlingsPlanted,
    Hectares,
    PlantingStart,
    PlantingEnd,
    Gps,
    CreatedAt,
    UpdatedAt,
}
