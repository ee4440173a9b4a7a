//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{AddressBook, Database, FileStore};
use crate::services::{
    AddressService, AuthService, BeneficiaryService, CropStatusService, FarmPlotService,
    SeedlingService, ServiceContainer, Services, StatisticsService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub beneficiary_service: Arc<dyn BeneficiaryService>,
    pub seedling_service: Arc<dyn SeedlingService>,
    pub crop_status_service: Arc<dyn CropStatusService>,
    pub farm_plot_service: Arc<dyn FarmPlotService>,
    pub address_service: Arc<dyn AddressService>,
    pub statistics_service: Arc<dyn StatisticsService>,
    /// Database handle, used by the health check
    pub database: Arc<Database>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Create application state from the database, config and loaded
    /// reference data.
    pub fn from_config(database: Arc<Database>, config: Config, address_book: AddressBook) -> Self {
        let storage = FileStore::new(config.upload_dir.clone());
        let container = Services::from_connection(
            database.get_connection(),
            config.clone(),
            Arc::new(address_book),
            storage,
        );

        Self::from_container(&container, database, config)
    }

    /// Create application state from any service container.
    pub fn from_container(
        container: &dyn ServiceContainer,
        database: Arc<Database>,
        config: Config,
    ) -> Self {
        Self {
            auth_service: container.auth(),
            beneficiary_service: container.beneficiaries(),
            seedling_service: container.seedlings(),
            crop_status_service: container.crop_statuses(),
            farm_plot_service: container.farm_plots(),
            address_service: container.addresses(),
            statistics_service: container.statistics(),
            database,
            config: Arc::new(config),
        }
    }
}
