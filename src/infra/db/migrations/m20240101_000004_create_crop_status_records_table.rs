//! Migration: Create crop_status_records table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CropStatusRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CropStatusRecords::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CropStatusRecords::BeneficiaryId)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(CropStatusRecords::SurveyDate).date().not_null())
                    .col(
                        ColumnDef::new(CropStatusRecords::Surveyor)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CropStatusRecords::AliveCrops)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CropStatusRecords::DeadCrops)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(CropStatusRecords::Plot).string_len(100).null())
                    // JSON array of stored filenames
                    .col(ColumnDef::new(CropStatusRecords::Pictures).text().not_null())
                    .col(
                        ColumnDef::new(CropStatusRecords::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CropStatusRecords::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_crop_status_records_beneficiary_id")
                    .table(CropStatusRecords::Table)
                    .col(CropStatusRecords::BeneficiaryId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CropStatusRecords::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum CropStatusRecords {
    Table,
    Id,
    BeneficiaryId,
    SurveyDate,
    Surveyor,
    AliveCrops,
    DeadCrops,
    Plot,
    Pictures,
    CreatedAt,
    UpdatedAt,
}
