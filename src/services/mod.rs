//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.
//!
//! All database-backed services go through the Unit of Work for
//! repository access and transaction management.

mod address_service;
mod auth_service;
mod beneficiary_service;
pub mod container;
mod crop_status_service;
mod farm_plot_service;
mod owner;
mod seedling_service;
mod statistics_service;

#[cfg(test)]
mod test_support;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use address_service::{AddressDirectory, AddressService};
pub use auth_service::{AuthService, Authenticator, Claims, LoginResponse};
pub use beneficiary_service::{BeneficiaryManager, BeneficiaryService};
pub use crop_status_service::{CropStatusManager, CropStatusService};
pub use farm_plot_service::{FarmPlotManager, FarmPlotService};
pub use seedling_service::{SeedlingManager, SeedlingService};
pub use statistics_service::{StatisticsReporter, StatisticsService};

#[cfg(any(test, feature = "test-utils"))]
pub use address_service::MockAddressService;
#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
