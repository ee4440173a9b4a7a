//! Address reference data handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::AppState;
use crate::domain::{Barangay, Municipality, Province};
use crate::errors::AppResult;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NameQuery {
    /// Case-insensitive name filter
    pub q: Option<String>,
}

pub fn address_routes() -> Router<AppState> {
    Router::new()
        .route("/provinces", get(list_provinces))
        .route("/provinces/:code/municipalities", get(list_municipalities))
        .route("/municipalities/:code/barangays", get(list_barangays))
}

#[utoipa::path(
    get,
    path = "/api/addresses/provinces",
    tag = "Addresses",
    params(NameQuery),
    responses((status = 200, description = "Provinces sorted by name", body = Vec<Province>)),
    security(("bearer_auth" = []))
)]
pub async fn list_provinces(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> Json<Vec<Province>> {
    Json(state.address_service.provinces(query.q))
}

#[utoipa::path(
    get,
    path = "/api/addresses/provinces/{code}/municipalities",
    tag = "Addresses",
    params(("code" = String, Path, description = "Province code"), NameQuery),
    responses(
        (status = 200, description = "Municipalities of the province", body = Vec<Municipality>),
        (status = 404, description = "Unknown province")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_municipalities(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(query): Query<NameQuery>,
) -> AppResult<Json<Vec<Municipality>>> {
    Ok(Json(state.address_service.municipalities(&code, query.q)?))
}

#[utoipa::path(
    get,
    path = "/api/addresses/municipalities/{code}/barangays",
    tag = "Addresses",
    params(("code" = String, Path, description = "Municipality code"), NameQuery),
    responses(
        (status = 200, description = "Barangays of the municipality", body = Vec<Barangay>),
        (status = 404, description = "Unknown municipality")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_barangays(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(query): Query<NameQuery>,
) -> AppResult<Json<Vec<Barangay>>> {
    Ok(Json(state.address_service.barangays(&code, query.q)?))
}
