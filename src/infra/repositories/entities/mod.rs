//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod admin_user;
pub mod beneficiary;
pub mod crop_status_record;
pub mod farm_plot;
pub mod seedling_record;

// Re-exports for public API convenience
#[allow(unused_imports)]
pub use admin_user::{ActiveModel as AdminUserActiveModel, Entity as AdminUserEntity};
#[allow(unused_imports)]
pub use beneficiary::{ActiveModel as BeneficiaryActiveModel, Entity as BeneficiaryEntity};
#[allow(unused_imports)]
pub use crop_status_record::{ActiveModel as CropStatusActiveModel, Entity as CropStatusEntity};
#[allow(unused_imports)]
pub use farm_plot::{ActiveModel as FarmPlotActiveModel, Entity as FarmPlotEntity};
#[allow(unused_imports)]
pub use seedling_record::{ActiveModel as SeedlingActiveModel, Entity as SeedlingEntity};
