//! Farm plot handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};

use super::OwnerQuery;
use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{FarmPlotInput, FarmPlotResponse};
use crate::errors::AppResult;
use crate::types::{Created, MessageResponse};

pub fn farm_plot_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_farm_plots).post(create_farm_plot))
        .route(
            "/:id",
            get(get_farm_plot)
                .put(update_farm_plot)
                .delete(delete_farm_plot),
        )
}

#[utoipa::path(
    get,
    path = "/api/farm-plots",
    tag = "Farm plots",
    params(OwnerQuery),
    responses((status = 200, description = "Farm plots", body = Vec<FarmPlotResponse>)),
    security(("bearer_auth" = []))
)]
pub async fn list_farm_plots(
    State(state): State<AppState>,
    Query(query): Query<OwnerQuery>,
) -> AppResult<Json<Vec<FarmPlotResponse>>> {
    Ok(Json(state.farm_plot_service.list(query.owner()).await?))
}

#[utoipa::path(
    get,
    path = "/api/farm-plots/{id}",
    tag = "Farm plots",
    params(("id" = i32, Path, description = "Plot id")),
    responses(
        (status = 200, description = "Farm plot", body = FarmPlotResponse),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_farm_plot(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<FarmPlotResponse>> {
    Ok(Json(state.farm_plot_service.get(id).await?))
}

/// Save a plot boundary (at least three vertices)
#[utoipa::path(
    post,
    path = "/api/farm-plots",
    tag = "Farm plots",
    request_body = FarmPlotInput,
    responses(
        (status = 201, description = "Created", body = FarmPlotResponse),
        (status = 400, description = "Invalid boundary or unknown beneficiary")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_farm_plot(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<FarmPlotInput>,
) -> AppResult<Created<FarmPlotResponse>> {
    Ok(Created(state.farm_plot_service.create(payload).await?))
}

#[utoipa::path(
    put,
    path = "/api/farm-plots/{id}",
    tag = "Farm plots",
    params(("id" = i32, Path, description = "Plot id")),
    request_body = FarmPlotInput,
    responses(
        (status = 200, description = "Updated", body = FarmPlotResponse),
        (status = 400, description = "Invalid boundary or unknown beneficiary"),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_farm_plot(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<FarmPlotInput>,
) -> AppResult<Json<FarmPlotResponse>> {
    Ok(Json(state.farm_plot_service.update(id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/farm-plots/{id}",
    tag = "Farm plots",
    params(("id" = i32, Path, description = "Plot id")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_farm_plot(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    state.farm_plot_service.delete(id).await?;
    Ok(Json(MessageResponse::new("Farm plot deleted successfully")))
}
