//! Seedling record handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};

use super::OwnerQuery;
use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{SeedlingInput, SeedlingResponse};
use crate::errors::AppResult;
use crate::types::{Created, MessageResponse};

pub fn seedling_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_seedlings).post(create_seedling))
        .route(
            "/:id",
            get(get_seedling).put(update_seedling).delete(delete_seedling),
        )
}

#[utoipa::path(
    get,
    path = "/api/seedlings",
    tag = "Seedlings",
    params(OwnerQuery),
    responses((status = 200, description = "Seedling records", body = Vec<SeedlingResponse>)),
    security(("bearer_auth" = []))
)]
pub async fn list_seedlings(
    State(state): State<AppState>,
    Query(query): Query<OwnerQuery>,
) -> AppResult<Json<Vec<SeedlingResponse>>> {
    Ok(Json(state.seedling_service.list(query.owner()).await?))
}

#[utoipa::path(
    get,
    path = "/api/seedlings/{id}",
    tag = "Seedlings",
    params(("id" = i32, Path, description = "Record id")),
    responses(
        (status = 200, description = "Seedling record", body = SeedlingResponse),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_seedling(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<SeedlingResponse>> {
    Ok(Json(state.seedling_service.get(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/seedlings",
    tag = "Seedlings",
    request_body = SeedlingInput,
    responses(
        (status = 201, description = "Created", body = SeedlingResponse),
        (status = 400, description = "Validation error or unknown beneficiary")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_seedling(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SeedlingInput>,
) -> AppResult<Created<SeedlingResponse>> {
    Ok(Created(state.seedling_service.create(payload).await?))
}

#[utoipa::path(
    put,
    path = "/api/seedlings/{id}",
    tag = "Seedlings",
    params(("id" = i32, Path, description = "Record id")),
    request_body = SeedlingInput,
    responses(
        (status = 200, description = "Updated", body = SeedlingResponse),
        (status = 400, description = "Validation error or unknown beneficiary"),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_seedling(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<SeedlingInput>,
) -> AppResult<Json<SeedlingResponse>> {
    Ok(Json(state.seedling_service.update(id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/seedlings/{id}",
    tag = "Seedlings",
    params(("id" = i32, Path, description = "Record id")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_seedling(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    state.seedling_service.delete(id).await?;
    Ok(Json(MessageResponse::new("Seedling record deleted successfully")))
}
