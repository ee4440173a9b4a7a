//! HTTP request handlers.

use serde::Deserialize;
use utoipa::IntoParams;

pub mod address_handler;
pub mod auth_handler;
pub mod beneficiary_handler;
pub mod crop_status_handler;
pub mod farm_plot_handler;
pub mod seedling_handler;
pub mod statistics_handler;

pub use address_handler::address_routes;
pub use auth_handler::{auth_routes, session_routes};
pub use beneficiary_handler::beneficiary_routes;
pub use crop_status_handler::crop_status_routes;
pub use farm_plot_handler::farm_plot_routes;
pub use seedling_handler::seedling_routes;
pub use statistics_handler::statistics_routes;

/// Optional owner filter shared by the record list endpoints
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct OwnerQuery {
    /// Only records of this beneficiary (e.g. `JD001`)
    pub beneficiary_id: Option<String>,
}

impl OwnerQuery {
    pub fn owner(self) -> Option<String> {
        self.beneficiary_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
    }
}
