//! Unit of Work double backed by mockall repositories.

use async_trait::async_trait;
use std::sync::Arc;

use crate::errors::{AppError, AppResult};
use crate::infra::{
    AdminRepository, BeneficiaryRepository, CropStatusRepository, FarmPlotRepository,
    MockAdminRepository, MockBeneficiaryRepository, MockCropStatusRepository,
    MockFarmPlotRepository, MockSeedlingRepository, MockStatisticsRepository, SeedlingRepository,
    StatisticsRepository, TransactionContext, UnitOfWork,
};

/// Repositories default to mocks with no expectations, so any unplanned
/// call fails the test.
pub struct TestUow {
    admins: Arc<dyn AdminRepository>,
    beneficiaries: Arc<dyn BeneficiaryRepository>,
    seedlings: Arc<dyn SeedlingRepository>,
    crop_statuses: Arc<dyn CropStatusRepository>,
    farm_plots: Arc<dyn FarmPlotRepository>,
    statistics: Arc<dyn StatisticsRepository>,
}

impl TestUow {
    pub fn new() -> Self {
        Self {
            admins: Arc::new(MockAdminRepository::new()),
            beneficiaries: Arc::new(MockBeneficiaryRepository::new()),
            seedlings: Arc::new(MockSeedlingRepository::new()),
            crop_statuses: Arc::new(MockCropStatusRepository::new()),
            farm_plots: Arc::new(MockFarmPlotRepository::new()),
            statistics: Arc::new(MockStatisticsRepository::new()),
        }
    }

    pub fn with_admins(mut self, repo: MockAdminRepository) -> Self {
        self.admins = Arc::new(repo);
        self
    }

    pub fn with_beneficiaries(mut self, repo: MockBeneficiaryRepository) -> Self {
        self.beneficiaries = Arc::new(repo);
        self
    }

    pub fn with_seedlings(mut self, repo: MockSeedlingRepository) -> Self {
        self.seedlings = Arc::new(repo);
        self
    }

    pub fn with_crop_statuses(mut self, repo: MockCropStatusRepository) -> Self {
        self.crop_statuses = Arc::new(repo);
        self
    }

    pub fn with_farm_plots(mut self, repo: MockFarmPlotRepository) -> Self {
        self.farm_plots = Arc::new(repo);
        self
    }

    pub fn with_statistics(mut self, repo: MockStatisticsRepository) -> Self {
        self.statistics = Arc::new(repo);
        self
    }
}

#[async_trait]
impl UnitOfWork for TestUow {
    fn admins(&self) -> Arc<dyn AdminRepository> {
        self.admins.clone()
    }

    fn beneficiaries(&self) -> Arc<dyn BeneficiaryRepository> {
        self.beneficiaries.clone()
    }

    fn seedlings(&self) -> Arc<dyn SeedlingRepository> {
        self.seedlings.clone()
    }

    fn crop_statuses(&self) -> Arc<dyn CropStatusRepository> {
        self.crop_statuses.clone()
    }

    fn farm_plots(&self) -> Arc<dyn FarmPlotRepository> {
        self.farm_plots.clone()
    }

    fn statistics(&self) -> Arc<dyn StatisticsRepository> {
        self.statistics.clone()
    }

    // Transactions need a real connection; covered by the SQLite tests.
    async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        Err(AppError::internal("transactions are unavailable in unit tests"))
    }
}
