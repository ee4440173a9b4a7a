//! Service Container - Centralized service access.
//!
//! Handlers depend on the service traits handed out here, never on the
//! concrete managers.

use std::sync::Arc;

use super::{
    AddressDirectory, AddressService, AuthService, Authenticator, BeneficiaryManager,
    BeneficiaryService, CropStatusManager, CropStatusService, FarmPlotManager, FarmPlotService,
    SeedlingManager, SeedlingService, StatisticsReporter, StatisticsService,
};
use crate::config::Config;
use crate::infra::{AddressBook, FileStore, Persistence};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn beneficiaries(&self) -> Arc<dyn BeneficiaryService>;

    fn seedlings(&self) -> Arc<dyn SeedlingService>;

    fn crop_statuses(&self) -> Arc<dyn CropStatusService>;

    fn farm_plots(&self) -> Arc<dyn FarmPlotService>;

    fn addresses(&self) -> Arc<dyn AddressService>;

    fn statistics(&self) -> Arc<dyn StatisticsService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    beneficiary_service: Arc<dyn BeneficiaryService>,
    seedling_service: Arc<dyn SeedlingService>,
    crop_status_service: Arc<dyn CropStatusService>,
    farm_plot_service: Arc<dyn FarmPlotService>,
    address_service: Arc<dyn AddressService>,
    statistics_service: Arc<dyn StatisticsService>,
}

impl Services {
    /// Wire every service over one shared Unit of Work.
    pub fn from_connection(
        db: sea_orm::DatabaseConnection,
        config: Config,
        address_book: Arc<AddressBook>,
        storage: FileStore,
    ) -> Self {
        let uow = Arc::new(Persistence::new(db));

        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), config)),
            beneficiary_service: Arc::new(BeneficiaryManager::new(uow.clone(), storage.clone())),
            seedling_service: Arc::new(SeedlingManager::new(uow.clone())),
            crop_status_service: Arc::new(CropStatusManager::new(uow.clone(), storage)),
            farm_plot_service: Arc::new(FarmPlotManager::new(uow.clone())),
            address_service: Arc::new(AddressDirectory::new(address_book)),
            statistics_service: Arc::new(StatisticsReporter::new(uow)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn beneficiaries(&self) -> Arc<dyn BeneficiaryService> {
        self.beneficiary_service.clone()
    }

    fn seedlings(&self) -> Arc<dyn SeedlingService> {
        self.seedling_service.clone()
    }

    fn crop_statuses(&self) -> Arc<dyn CropStatusService> {
        self.crop_status_service.clone()
    }

    fn farm_plots(&self) -> Arc<dyn FarmPlotService> {
        self.farm_plot_service.clone()
    }

    fn addresses(&self) -> Arc<dyn AddressService> {
        self.address_service.clone()
    }

    fn statistics(&self) -> Arc<dyn StatisticsService> {
        self.statistics_service.clone()
    }
}
