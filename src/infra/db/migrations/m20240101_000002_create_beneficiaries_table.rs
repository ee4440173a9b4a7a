//! Migration: Create beneficiaries table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Beneficiaries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Beneficiaries::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    // Unique index turns allocator races into a constraint error
                    .col(
                        ColumnDef::new(Beneficiaries::BeneficiaryId)
                            .string_len(20)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Beneficiaries::FirstName).string_len(100).not_null())
                    .col(ColumnDef::new(Beneficiaries::MiddleName).string_len(100).null())
                    .col(ColumnDef::new(Beneficiaries::LastName).string_len(100).not_null())
                    .col(ColumnDef::new(Beneficiaries::NameExtension).string_len(10).null())
                    .col(ColumnDef::new(Beneficiaries::Gender).string_len(10).not_null())
                    .col(ColumnDef::new(Beneficiaries::BirthDate).date().null())
                    .col(ColumnDef::new(Beneficiaries::Phone).string_len(20).null())
                    .col(ColumnDef::new(Beneficiaries::Province).string_len(100).not_null())
                    .col(ColumnDef::new(Beneficiaries::Municipality).string_len(100).not_null())
                    .col(ColumnDef::new(Beneficiaries::Barangay).string_len(100).not_null())
                    .col(ColumnDef::new(Beneficiaries::Street).string_len(255).null())
                    .col(ColumnDef::new(Beneficiaries::Picture).string_len(255).null())
                    .col(
                        ColumnDef::new(Beneficiaries::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Beneficiaries::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Duplicate-name lookups filter on both names
        manager
            .create_index(
                Index::create()
                    .name("idx_beneficiaries_name")
                    .table(Beneficiaries::Table)
                    .col(Beneficiaries::LastName)
                    .col(Beneficiaries::FirstName)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Beneficiaries::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Beneficiaries {
    Table,
    Id,
    BeneficiaryId,
    FirstName,
    MiddleName,
    LastName,
    NameExtension,
    Gender,
    BirthDate,
    Phone,
    Province,
    Municipality,
    Barangay,
    Street,
    Picture,
    CreatedAt,
    UpdatedAt,
}
