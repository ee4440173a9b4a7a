//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    address_handler, auth_handler, beneficiary_handler, crop_status_handler, farm_plot_handler,
    seedling_handler, statistics_handler,
};
use crate::domain::{
    AdminUserResponse, Barangay, BeneficiaryInput, BeneficiaryResponse, Coordinate,
    CropStatusInput, CropStatusResponse, DashboardStats, FarmPlotInput, FarmPlotResponse,
    GenderCount, Municipality, MunicipalityCount, Province, SeedlingInput, SeedlingResponse,
};
use crate::services::LoginResponse;
use crate::types::MessageResponse;

/// OpenAPI documentation for the AgriTrack API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "AgriTrack API",
        version = "0.1.0",
        description = "Monitoring of farm beneficiaries, seedling distribution, crop surveys and farm plots"
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    ),
    paths(
        auth_handler::login,
        auth_handler::me,
        beneficiary_handler::list_beneficiaries,
        beneficiary_handler::get_beneficiary,
        beneficiary_handler::create_beneficiary,
        beneficiary_handler::update_beneficiary,
        beneficiary_handler::delete_beneficiary,
        seedling_handler::list_seedlings,
        seedling_handler::get_seedling,
        seedling_handler::create_seedling,
        seedling_handler::update_seedling,
        seedling_handler::delete_seedling,
        crop_status_handler::list_crop_statuses,
        crop_status_handler::get_crop_status,
        crop_status_handler::create_crop_status,
        crop_status_handler::update_crop_status,
        crop_status_handler::delete_crop_status,
        farm_plot_handler::list_farm_plots,
        farm_plot_handler::get_farm_plot,
        farm_plot_handler::create_farm_plot,
        farm_plot_handler::update_farm_plot,
        farm_plot_handler::delete_farm_plot,
        address_handler::list_provinces,
        address_handler::list_municipalities,
        address_handler::list_barangays,
        statistics_handler::dashboard_statistics,
    ),
    components(
        schemas(
            auth_handler::LoginRequest,
            LoginResponse,
            AdminUserResponse,
            BeneficiaryInput,
            BeneficiaryResponse,
            SeedlingInput,
            SeedlingResponse,
            CropStatusInput,
            CropStatusResponse,
            Coordinate,
            FarmPlotInput,
            FarmPlotResponse,
            Province,
            Municipality,
            Barangay,
            DashboardStats,
            GenderCount,
            MunicipalityCount,
            MessageResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Admin login"),
        (name = "Beneficiaries", description = "Registered farmers"),
        (name = "Seedlings", description = "Seedling distribution records"),
        (name = "Crop status", description = "Crop survival surveys"),
        (name = "Farm plots", description = "Plot boundaries"),
        (name = "Addresses", description = "Province, municipality and barangay lookups"),
        (name = "Statistics", description = "Dashboard totals")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /api/auth/login"))
                        .build(),
                ),
            );
        }
    }
}
