//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod admin_repository;
mod beneficiary_repository;
mod crop_status_repository;
pub mod entities;
mod farm_plot_repository;
mod seedling_repository;
mod statistics_repository;

use crate::domain::Beneficiary;

/// A dependent record with its owning beneficiary, when that row still exists
pub type WithOwner<T> = (T, Option<Beneficiary>);

pub use admin_repository::{AdminRepository, AdminStore};
pub use beneficiary_repository::{BeneficiaryRepository, BeneficiaryStore};
pub use crop_status_repository::{CropStatusRepository, CropStatusStore};
pub use farm_plot_repository::{FarmPlotRepository, FarmPlotStore};
pub use seedling_repository::{SeedlingRepository, SeedlingStore};
pub use statistics_repository::{totals_from, StatisticsRepository, StatisticsStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use admin_repository::MockAdminRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use beneficiary_repository::MockBeneficiaryRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use crop_status_repository::MockCropStatusRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use farm_plot_repository::MockFarmPlotRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use seedling_repository::MockSeedlingRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use statistics_repository::MockStatisticsRepository;
