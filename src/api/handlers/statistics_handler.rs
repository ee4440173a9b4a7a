//! Dashboard statistics handler.

use axum::{extract::State, response::Json, routing::get, Router};

use crate::api::AppState;
use crate::domain::DashboardStats;
use crate::errors::AppResult;

pub fn statistics_routes() -> Router<AppState> {
    Router::new().route("/", get(dashboard_statistics))
}

#[utoipa::path(
    get,
    path = "/api/statistics",
    tag = "Statistics",
    responses((status = 200, description = "Program totals", body = DashboardStats)),
    security(("bearer_auth" = []))
)]
pub async fn dashboard_statistics(State(state): State<AppState>) -> AppResult<Json<DashboardStats>> {
    Ok(Json(state.statistics_service.dashboard().await?))
}
