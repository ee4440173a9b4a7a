//! Domain layer - Core business entities and logic
//!
//! Entities, value objects and DTOs for beneficiaries and the records
//! that hang off them. Free of persistence concerns.

pub mod address;
pub mod admin;
pub mod beneficiary;
pub mod coordinates;
pub mod crop_status;
pub mod farm_plot;
pub mod password;
pub mod seedling;
pub mod statistics;

pub use address::{Barangay, Municipality, Named, Province};
pub use admin::{AdminUser, AdminUserResponse};
pub use beneficiary::{
    Beneficiary, BeneficiaryInput, BeneficiaryResponse, Gender, NewBeneficiary, OwnerSummary,
};
pub use coordinates::Coordinate;
pub use crop_status::{CropStatusData, CropStatusInput, CropStatusRecord, CropStatusResponse};
pub use farm_plot::{ensure_boundary, FarmPlot, FarmPlotData, FarmPlotInput, FarmPlotResponse};
pub use password::Password;
pub use seedling::{SeedlingInput, SeedlingRecord, SeedlingResponse};
pub use statistics::{DashboardStats, GenderCount, MunicipalityCount, Totals};
