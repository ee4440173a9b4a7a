//! Crop status survey handlers. Create and update take multipart forms
//! with repeated `pictures` file parts.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};

use super::OwnerQuery;
use crate::api::extractors::MultipartForm;
use crate::api::AppState;
use crate::domain::{CropStatusInput, CropStatusResponse};
use crate::errors::AppResult;
use crate::types::{Created, MessageResponse};

const PICTURES_FIELD: &str = "pictures";

pub fn crop_status_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_crop_statuses).post(create_crop_status))
        .route(
            "/:id",
            get(get_crop_status)
                .put(update_crop_status)
                .delete(delete_crop_status),
        )
}

#[utoipa::path(
    get,
    path = "/api/crop-status",
    tag = "Crop status",
    params(OwnerQuery),
    responses((status = 200, description = "Surveys", body = Vec<CropStatusResponse>)),
    security(("bearer_auth" = []))
)]
pub async fn list_crop_statuses(
    State(state): State<AppState>,
    Query(query): Query<OwnerQuery>,
) -> AppResult<Json<Vec<CropStatusResponse>>> {
    Ok(Json(state.crop_status_service.list(query.owner()).await?))
}

#[utoipa::path(
    get,
    path = "/api/crop-status/{id}",
    tag = "Crop status",
    params(("id" = i32, Path, description = "Survey id")),
    responses(
        (status = 200, description = "Survey", body = CropStatusResponse),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_crop_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<CropStatusResponse>> {
    Ok(Json(state.crop_status_service.get(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/crop-status",
    tag = "Crop status",
    request_body(content = CropStatusInput, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Created", body = CropStatusResponse),
        (status = 400, description = "Validation error or unknown beneficiary")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_crop_status(
    State(state): State<AppState>,
    MultipartForm { fields, mut files }: MultipartForm<CropStatusInput>,
) -> AppResult<Created<CropStatusResponse>> {
    let pictures = files.take_all(PICTURES_FIELD);
    Ok(Created(
        state.crop_status_service.create(fields, pictures).await?,
    ))
}

#[utoipa::path(
    put,
    path = "/api/crop-status/{id}",
    tag = "Crop status",
    params(("id" = i32, Path, description = "Survey id")),
    request_body(content = CropStatusInput, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Updated", body = CropStatusResponse),
        (status = 400, description = "Validation error or unknown beneficiary"),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_crop_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    MultipartForm { fields, mut files }: MultipartForm<CropStatusInput>,
) -> AppResult<Json<CropStatusResponse>> {
    let pictures = files.take_all(PICTURES_FIELD);
    Ok(Json(
        state
            .crop_status_service
            .update(id, fields, pictures)
            .await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/crop-status/{id}",
    tag = "Crop status",
    params(("id" = i32, Path, description = "Survey id")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_crop_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    state.crop_status_service.delete(id).await?;
    Ok(Json(MessageResponse::new("Crop status record deleted successfully")))
}
