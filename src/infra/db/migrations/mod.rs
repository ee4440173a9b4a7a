//! Database migrations.
//!
//! Each migration is a separate module following SeaORM conventions.
//! Migration names follow the pattern: m{YYYYMMDD}_{NNNNNN}_{description}

use sea_orm_migration::prelude::*;

mod m20240101_000001_create_admin_users_table;
mod m20240101_000002_create_beneficiaries_table;
mod m20240101_000003_create_seedling_records_table;
mod m20240101_000004_create_crop_status_records_table;
mod m20240101_000005_create_farm_plots_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_admin_users_table::Migration),
            Box::new(m20240101_000002_create_beneficiaries_table::Migration),
            Box::new(m20240101_000003_create_seedling_records_table::Migration),
            Box::new(m20240101_000004_create_crop_status_records_table::Migration),
            Box::new(m20240101_000005_create_farm_plots_table::Migration),
        ]
    }
}
