//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections, migrations and repositories
//! - Unit of Work for transaction management
//! - Upload storage on disk
//! - Address reference data files

pub mod address_book;
pub mod db;
pub mod repositories;
pub mod storage;
pub mod unit_of_work;

pub use address_book::AddressBook;
pub use db::{Database, Migrator};
pub use repositories::{
    AdminRepository, AdminStore, BeneficiaryRepository, BeneficiaryStore, CropStatusRepository,
    CropStatusStore, FarmPlotRepository, FarmPlotStore, SeedlingRepository, SeedlingStore,
    StatisticsRepository, StatisticsStore, WithOwner, totals_from,
};
pub use storage::{FileStore, UploadedFile};
pub use unit_of_work::{
    Persistence, RemovedDependents, TransactionContext, TxBeneficiaryRepository, UnitOfWork,
};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockAdminRepository, MockBeneficiaryRepository, MockCropStatusRepository,
    MockFarmPlotRepository, MockSeedlingRepository, MockStatisticsRepository,
};
